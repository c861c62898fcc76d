//! Command implementations.

pub mod init;
pub mod process;
pub mod show_config;

pub use self::init::execute_init;
pub use self::process::execute_process;
pub use self::show_config::execute_show_config;
