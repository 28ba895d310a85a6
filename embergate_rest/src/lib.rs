pub mod error;
pub mod request_manager;

pub use reqwest;
pub use reqwest::Method;

pub use error::*;
pub use request_manager::*;
