// Application configuration loaded from the environment
pub mod logging;

use std::env;

/// Runtime configuration for the backend.
///
/// Identity and listing data share one database; the activity log lives
/// in its own so retention and backup policies can differ.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub core_database_url: String,
    pub activity_database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    /// Seed admin created at startup when no account with this email exists.
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let core_database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://staynest.db?mode=rwc".to_string());
        let activity_database_url = env::var("ACTIVITY_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://staynest_activity.db?mode=rwc".to_string());
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            core_database_url,
            activity_database_url,
            jwt_secret,
            bind_addr,
            bootstrap_admin_email: env::var("BOOTSTRAP_ADMIN_EMAIL").ok(),
            bootstrap_admin_password: env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
        })
    }
}
