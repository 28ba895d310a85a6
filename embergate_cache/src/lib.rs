pub mod bus;
pub mod builder;
pub mod handlers;
pub mod message;
pub mod model;
pub mod registry;
pub mod snapshot;

pub use bus::*;
pub use builder::*;
pub use handlers::apply_dispatch;
pub use message::*;
pub use model::*;
pub use registry::*;
pub use snapshot::*;
