//! Command implementations.

pub mod init;
pub mod load;

pub use self::init::execute_init;
pub use self::load::execute_load;
