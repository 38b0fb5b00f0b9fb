use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Google Places API key. Optional at load time; the CLI rejects search
    /// invocations without it.
    pub places_api_key: Option<String>,
    /// Override for the provider base URL (mock servers, regional endpoints).
    pub places_base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub default_radius_meters: f64,
    pub flag_retention_secs: u64,
    pub flag_store_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("default_radius_meters", &self.default_radius_meters)
            .field("flag_retention_secs", &self.flag_retention_secs)
            .field("flag_store_path", &self.flag_store_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let cfg = AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            places_api_key: Some("super-secret".to_string()),
            places_base_url: None,
            request_timeout_secs: 30,
            user_agent: "nightshop/0.1".to_string(),
            max_retries: 3,
            retry_backoff_base_ms: 1_000,
            default_radius_meters: 2_000.0,
            flag_retention_secs: 7_200,
            flag_store_path: PathBuf::from("./flags.json"),
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn environment_display_matches_env_var_values() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Test.to_string(), "test");
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
