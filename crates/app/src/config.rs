use tracing::debug;

/// Environment-driven application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Display name used when seeding the gym-info document.
    pub gym_name: String,
    /// Bootstrap administrator account.
    pub admin_email: String,
    pub admin_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            gym_name: env_or("FITDESK_GYM_NAME", "FitDesk Gym"),
            admin_email: env_or("FITDESK_ADMIN_EMAIL", "admin@fitdesk.dev"),
            admin_name: env_or("FITDESK_ADMIN_NAME", "Site Admin"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            debug!(key, default, "config variable not set; using default");
            default.to_string()
        }
    }
}
