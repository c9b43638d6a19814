pub mod auth_config;
pub mod config;
pub mod database_config;
pub mod error;
pub mod log_level;
pub mod logging_config;
pub mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, Result as ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

use log::LevelFilter;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const MIN_PORT: u16 = 1024;

pub const DEFAULT_MAX_CONNECTIONS: usize = 1000;
pub const MIN_MAX_CONNECTIONS: usize = 1;
pub const MAX_MAX_CONNECTIONS: usize = 100_000;

pub const DEFAULT_DATABASE_FILE: &str = "taskdeck.db";

pub const DEFAULT_AUTH_ENABLED: bool = false;

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
pub const DEFAULT_LOG_LEVEL_STRING: &str = "info";
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
