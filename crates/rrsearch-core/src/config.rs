//! Environment-variable configuration loading.

use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

/// Errors raised while loading [`AppConfig`] from the environment.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require_non_blank = |var: &str| -> Result<String, ConfigError> {
        let value = lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be blank".to_string(),
            });
        }
        Ok(value)
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // A misconfigured index is indistinguishable from zero results, so the
    // endpoint and key are validated here rather than at first query.
    let index_url = require_non_blank("RRSEARCH_INDEX_URL")?;
    let index_api_key = require_non_blank("RRSEARCH_INDEX_API_KEY")?;
    let catalog_url = require_non_blank("RRSEARCH_CATALOG_URL")?;

    let index_name = or_default("RRSEARCH_INDEX_NAME", "products");
    let catalog_publishable_key = lookup("RRSEARCH_CATALOG_PUBLISHABLE_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let env = parse_environment(&or_default("RRSEARCH_ENV", "development"));
    let log_level = or_default("RRSEARCH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("RRSEARCH_REQUEST_TIMEOUT_SECS", "30")?;
    let hydration_max_concurrency = parse_usize("RRSEARCH_HYDRATION_MAX_CONCURRENCY", "8")?;

    Ok(AppConfig {
        env,
        index_url,
        index_api_key,
        index_name,
        catalog_url,
        catalog_publishable_key,
        request_timeout_secs,
        hydration_max_concurrency: hydration_max_concurrency.max(1),
        log_level,
    })
}

fn parse_environment(raw: &str) -> Environment {
    match raw.to_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_env() -> HashMap<String, String> {
        HashMap::from([
            (
                "RRSEARCH_INDEX_URL".to_string(),
                "http://localhost:7700".to_string(),
            ),
            ("RRSEARCH_INDEX_API_KEY".to_string(), "masterKey".to_string()),
            (
                "RRSEARCH_CATALOG_URL".to_string(),
                "http://localhost:9000".to_string(),
            ),
        ])
    }

    fn build(env: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        build_app_config(|key| env.get(key).cloned().ok_or(std::env::VarError::NotPresent))
    }

    #[test]
    fn defaults_applied_for_optional_vars() {
        let config = build(&base_env()).expect("config should load");
        assert_eq!(config.index_name, "products");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.hydration_max_concurrency, 8);
        assert_eq!(config.env, Environment::Development);
        assert!(config.catalog_publishable_key.is_none());
    }

    #[test]
    fn missing_index_url_is_an_error() {
        let mut env = base_env();
        env.remove("RRSEARCH_INDEX_URL");
        let err = build(&env).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(v) if v == "RRSEARCH_INDEX_URL"));
    }

    #[test]
    fn blank_index_api_key_is_an_error() {
        let mut env = base_env();
        env.insert("RRSEARCH_INDEX_API_KEY".to_string(), "   ".to_string());
        let err = build(&env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { var, .. } if var == "RRSEARCH_INDEX_API_KEY"));
    }

    #[test]
    fn invalid_timeout_is_an_error() {
        let mut env = base_env();
        env.insert(
            "RRSEARCH_REQUEST_TIMEOUT_SECS".to_string(),
            "soon".to_string(),
        );
        let err = build(&env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { var, .. } if var == "RRSEARCH_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn zero_concurrency_is_clamped_to_one() {
        let mut env = base_env();
        env.insert(
            "RRSEARCH_HYDRATION_MAX_CONCURRENCY".to_string(),
            "0".to_string(),
        );
        let config = build(&env).expect("config should load");
        assert_eq!(config.hydration_max_concurrency, 1);
    }

    #[test]
    fn production_environment_parses() {
        let mut env = base_env();
        env.insert("RRSEARCH_ENV".to_string(), "production".to_string());
        let config = build(&env).expect("config should load");
        assert_eq!(config.env, Environment::Production);
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = build(&base_env()).expect("config should load");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("masterKey"));
        assert!(rendered.contains("[redacted]"));
    }
}
