use std::path::PathBuf;

/// Username/password pair required for mutating requests.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for a single kiosk-style deployment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Bootstrap file imported on first start.
    pub seed_path: PathBuf,
    /// Frontend assets served at `/`.
    pub static_dir: PathBuf,
    /// Uploaded sound files, served at `/sounds`.
    pub sounds_dir: PathBuf,
    /// Largest accepted sound upload in bytes.
    pub max_upload_bytes: usize,
    /// `None` disables authentication.
    pub admin: Option<AdminCredentials>,
    /// `host:port` of the NTP server queried by `/api/v1/time`.
    pub ntp_server: String,
    pub ntp_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_PATH`        | `data/breaks.db`           |
    /// | `SEED_PATH`            | `breaks.json`              |
    /// | `STATIC_DIR`           | `frontend`                 |
    /// | `SOUNDS_DIR`           | `sounds`                   |
    /// | `MAX_UPLOAD_BYTES`     | `5242880`                  |
    /// | `ADMIN_USERNAME`       | unset                      |
    /// | `ADMIN_PASSWORD`       | unset                      |
    /// | `NTP_SERVER`           | `192.168.12.210:123`       |
    /// | `NTP_TIMEOUT_SECS`     | `5`                        |
    ///
    /// Authentication is enabled only when both admin variables are set and
    /// non-empty.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
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

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "5242880".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let ntp_timeout_secs: u64 = std::env::var("NTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("NTP_TIMEOUT_SECS must be a valid u64");

        let admin = match (
            non_empty_var("ADMIN_USERNAME"),
            non_empty_var("ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(AdminCredentials { username, password }),
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_path: path_var("DATABASE_PATH", "data/breaks.db"),
            seed_path: path_var("SEED_PATH", "breaks.json"),
            static_dir: path_var("STATIC_DIR", "frontend"),
            sounds_dir: path_var("SOUNDS_DIR", "sounds"),
            max_upload_bytes,
            admin,
            ntp_server: std::env::var("NTP_SERVER").unwrap_or_else(|_| "192.168.12.210:123".into()),
            ntp_timeout_secs,
        }
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    std::env::var(name)
        .unwrap_or_else(|_| default.into())
        .into()
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
