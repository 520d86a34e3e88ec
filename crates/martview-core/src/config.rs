use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("MARTVIEW_ENV", "development"));
    let bind_addr = parse_addr("MARTVIEW_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MARTVIEW_LOG_LEVEL", "info");
    let http_timeout_secs = parse_u64("MARTVIEW_HTTP_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default("MARTVIEW_HTTP_USER_AGENT", "martview/0.1 (client-reporting)");

    // All platform credentials are optional; absence routes the adapter to
    // its fallback dataset rather than failing startup.
    let google_analytics_access_token = lookup("GOOGLE_ANALYTICS_ACCESS_TOKEN").ok();
    let facebook_access_token = lookup("FACEBOOK_ACCESS_TOKEN").ok();
    let linkedin_access_token = lookup("LINKEDIN_ACCESS_TOKEN").ok();
    let google_ads_access_token = lookup("GOOGLE_ADS_ACCESS_TOKEN").ok();
    let google_ads_developer_token = lookup("GOOGLE_ADS_DEVELOPER_TOKEN").ok();
    let google_ads_login_customer_id = lookup("GOOGLE_ADS_LOGIN_CUSTOMER_ID").ok();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        http_timeout_secs,
        http_user_agent,
        google_analytics_access_token,
        facebook_access_token,
        linkedin_access_token,
        google_ads_access_token,
        google_ads_developer_token,
        google_ads_login_customer_id,
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
