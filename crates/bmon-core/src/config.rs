use std::net::SocketAddr;
use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parse and validate configuration through an env-var lookup function, so
/// tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("BMON_ENV", "development"))?;

    let bind_addr = or_default("BMON_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BMON_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("BMON_LOG_LEVEL", "info");

    let brands_path = lookup("BMON_BRANDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let rate_limit_max_requests = or_default("BMON_RATE_LIMIT_MAX_REQUESTS", "120")
        .parse::<usize>()
        .map_err(|e| invalid("BMON_RATE_LIMIT_MAX_REQUESTS", e.to_string()))?;
    if rate_limit_max_requests == 0 {
        return Err(invalid(
            "BMON_RATE_LIMIT_MAX_REQUESTS",
            "must be greater than zero".to_string(),
        ));
    }

    let rate_limit_window_secs = or_default("BMON_RATE_LIMIT_WINDOW_SECS", "60")
        .parse::<u64>()
        .map_err(|e| invalid("BMON_RATE_LIMIT_WINDOW_SECS", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        brands_path,
        rate_limit_max_requests,
        rate_limit_window_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BMON_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
