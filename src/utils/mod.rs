pub mod errors;
pub mod config;

pub use errors::ApiError;
pub use config::{AppConfig, ConfigError};
