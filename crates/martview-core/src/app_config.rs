use std::net::SocketAddr;

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

/// Process-level configuration, read once at startup and treated as
/// read-only for the process lifetime. Platform credentials are all
/// optional: a missing credential routes that adapter to its fallback
/// dataset instead of failing startup.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub http_user_agent: String,
    pub google_analytics_access_token: Option<String>,
    pub facebook_access_token: Option<String>,
    pub linkedin_access_token: Option<String>,
    pub google_ads_access_token: Option<String>,
    pub google_ads_developer_token: Option<String>,
    pub google_ads_login_customer_id: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field(
                "google_analytics_access_token",
                &redact(&self.google_analytics_access_token),
            )
            .field("facebook_access_token", &redact(&self.facebook_access_token))
            .field("linkedin_access_token", &redact(&self.linkedin_access_token))
            .field(
                "google_ads_access_token",
                &redact(&self.google_ads_access_token),
            )
            .field(
                "google_ads_developer_token",
                &redact(&self.google_ads_developer_token),
            )
            .field(
                "google_ads_login_customer_id",
                &self.google_ads_login_customer_id,
            )
            .finish()
    }
}
