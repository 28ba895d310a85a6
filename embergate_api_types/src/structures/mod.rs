pub mod channel;
pub mod gateway;
pub mod guild;
pub mod user;

pub use channel::*;
pub use gateway::*;
pub use guild::*;
pub use user::*;
