pub mod config;
pub mod error;

pub use config::{AppConfig, CheckConfig, DiscoveryConfig, OutputConfig, OutputFormat};
pub use error::{CliError, ExitCode};
