//! Command implementations.

pub mod extract;
pub mod status;

pub use self::extract::execute_extract;
pub use self::status::execute_status;
