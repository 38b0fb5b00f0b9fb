use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("NIGHTSHOP_ENV", "development"));
    let log_level = or_default("NIGHTSHOP_LOG_LEVEL", "info");

    let places_api_key = lookup("GOOGLE_PLACES_API_KEY").ok();
    let places_base_url = lookup("NIGHTSHOP_PLACES_BASE_URL").ok();

    let request_timeout_secs = parse_u64("NIGHTSHOP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NIGHTSHOP_USER_AGENT", "nightshop/0.1 (shop-search)");
    let max_retries = parse_u32("NIGHTSHOP_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("NIGHTSHOP_RETRY_BACKOFF_BASE_MS", "1000")?;

    let default_radius_meters = parse_f64("NIGHTSHOP_DEFAULT_RADIUS_METERS", "2000")?;
    let flag_retention_secs = parse_u64("NIGHTSHOP_FLAG_RETENTION_SECS", "7200")?;
    let flag_store_path = PathBuf::from(or_default(
        "NIGHTSHOP_FLAG_STORE_PATH",
        "./nightshop-flags.json",
    ));

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        default_radius_meters,
        flag_retention_secs,
        flag_store_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
