use dotenv::dotenv;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_DATABASE_NAME: &str = "pets";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub table_name: String,
    pub region: String,
    /// Checked when a URL is signed, not at startup.
    pub bucket_name: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub s3_endpoint: Option<String>,
    pub bind_address: String,
}

impl AppConfig {

    pub fn global() -> &'static AppConfig {
        CONFIG.get_or_init(|| {
            dotenv().ok();
            Self::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e))
        })
    }

    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            database_url: required("DATABASE_URL")?,
            database_name: optional("DATABASE_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            table_name: required("TABLE_NAME")?,
            region: required("REGION")?,
            bucket_name: env::var("S3_BUCKET_NAME").unwrap_or_default(),
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            session_token: optional("AWS_SESSION_TOKEN"),
            s3_endpoint: optional("S3_ENDPOINT"),
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        };

        if config.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                name: "BIND_ADDRESS",
                reason: format!("expected host:port, got {}", config.bind_address),
            });
        }

        Ok(config)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
