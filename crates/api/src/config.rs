/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Internal escalation address: every notification is also sent
    /// here. `None` (unset or empty) skips the admin copy entirely.
    pub admin_email: Option<String>,
    /// How many days ahead the scheduled expiry scan looks (default: `7`).
    pub lookahead_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `NOTIFY_ADMIN_EMAIL`    | unset (admin copy skipped) |
    /// | `NOTIFY_LOOKAHEAD_DAYS` | `7`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_email = std::env::var("NOTIFY_ADMIN_EMAIL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let lookahead_days: i64 = std::env::var("NOTIFY_LOOKAHEAD_DAYS")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .expect("NOTIFY_LOOKAHEAD_DAYS must be a valid i64");
        assert!(
            lookahead_days >= 0,
            "NOTIFY_LOOKAHEAD_DAYS must be zero or positive"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin_email,
            lookahead_days,
        }
    }
}
