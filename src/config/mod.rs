#[cfg(feature = "cli")]
pub mod cli;
pub mod scan_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use scan_config::ScanConfig;
