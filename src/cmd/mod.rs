pub mod completions;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod thresholds;
pub mod watch;
