use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("TRENDSCOPE_ENV", "development"))?;
    let log_level = or_default("TRENDSCOPE_LOG_LEVEL", "info");
    let scoring_path = PathBuf::from(or_default(
        "TRENDSCOPE_SCORING_PATH",
        "./config/scoring.yaml",
    ));
    let output_dir = PathBuf::from(or_default("TRENDSCOPE_OUTPUT_DIR", "./data"));

    let max_concurrent_categories = parse_usize("TRENDSCOPE_MAX_CONCURRENT_CATEGORIES", "4")?;
    if max_concurrent_categories == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDSCOPE_MAX_CONCURRENT_CATEGORIES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let min_posts_override = match lookup("TRENDSCOPE_MIN_POSTS") {
        Ok(raw) => Some(raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "TRENDSCOPE_MIN_POSTS".to_string(),
            reason: e.to_string(),
        })?),
        Err(_) => None,
    };

    let lookback_hours_override = match lookup("TRENDSCOPE_LOOKBACK_HOURS") {
        Ok(raw) => Some(raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "TRENDSCOPE_LOOKBACK_HOURS".to_string(),
            reason: e.to_string(),
        })?),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        log_level,
        scoring_path,
        output_dir,
        max_concurrent_categories,
        min_posts_override,
        lookback_hours_override,
    })
}

/// Parse a string into an `Environment` variant.
pub(crate) fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TRENDSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
