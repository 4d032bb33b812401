mod log_level;
mod symlink_mode;

pub use log_level::LogLevel;
pub use symlink_mode::SymlinkMode;
