#[macro_use]
mod macros;

pub type Snowflake = String;

pub mod error;
pub mod frame;
pub mod opcode;
pub mod payloads;
pub mod routes;
pub mod structures;

pub use error::*;
pub use frame::*;
pub use opcode::*;
pub use payloads::*;
pub use structures::*;
