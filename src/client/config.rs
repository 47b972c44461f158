use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://i4lwox07l9.execute-api.us-east-1.amazonaws.com/prod";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Self {
        ClientConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `PETS_API_BASE_URL` if set, the deployed API otherwise.
    pub fn from_env() -> Self {
        match env::var("PETS_API_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_override() {
        temp_env::with_var("PETS_API_BASE_URL", Some("http://localhost:8080/"), || {
            let config = ClientConfig::from_env();
            assert_eq!(config.api_base_url, "http://localhost:8080");
            assert_eq!(config.endpoint("/owners"), "http://localhost:8080/owners");
        });
    }

    #[test]
    fn test_default_base_url() {
        temp_env::with_var_unset("PETS_API_BASE_URL", || {
            assert_eq!(ClientConfig::from_env().endpoint("owner"), format!("{}/owner", DEFAULT_API_BASE_URL));
        });
    }
}
