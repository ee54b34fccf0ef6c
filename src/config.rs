use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub uploads_dir: PathBuf,
    pub session_ttl_minutes: i64,
    pub max_upload_bytes: usize,
    pub public_rps: u32,
    pub public_base_url: String,
    pub default_days_valid: i64,
    pub admin_jwt_secret: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8080".to_string(),
            database_url: None,
            uploads_dir: PathBuf::from("./uploads"),
            session_ttl_minutes: 30,
            max_upload_bytes: 16 * 1024 * 1024,
            public_rps: 50,
            public_base_url: "http://localhost:8080".to_string(),
            default_days_valid: 10,
            admin_jwt_secret: None,
            cors_allowed_origins: Vec::new(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let log_format = match get_env_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => {
                return Err(Error::Config(format!(
                    "Invalid value for LOG_FORMAT: {} (expected pretty or json)",
                    other
                )))
            }
        };

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            database_url: get_optional_env("DATABASE_URL"),
            uploads_dir: PathBuf::from(get_env_or("UPLOADS_DIR", "./uploads")),
            session_ttl_minutes: get_env_parse_or("SESSION_TTL_MINUTES", 30)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 16 * 1024 * 1024)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 50)?,
            public_base_url: get_env_or("PUBLIC_BASE_URL", "http://localhost:8080"),
            default_days_valid: get_env_parse_or("DEFAULT_DAYS_VALID", 10)?,
            admin_jwt_secret: get_optional_env("ADMIN_JWT_SECRET"),
            cors_allowed_origins: get_optional_env("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_format,
        })
    }
}

fn get_optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_optional_env(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_env(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
