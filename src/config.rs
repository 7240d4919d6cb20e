use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

const LEGACY_SQLITE_SCHEME: &str = "sqlite3://";
const SQLITE_SCHEME: &str = "sqlite://";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseSettings,
    pub max_connections: u32,
}

/// Where the student database lives.
///
/// A full URL always wins over the discrete `DB_DIR`/`DB_NAME` pair.
/// `DB_NAME` stands in for the "database" setting of a server-backed
/// deployment; host, user, password and port have no SQLite counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSettings {
    Url(String),
    File { dir: PathBuf, name: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let max_connections = env_map
            .get("DB_MAX_CONNECTIONS")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DB_MAX_CONNECTIONS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let database = match env_map.get("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            Some(url) => DatabaseSettings::Url(normalize_database_url(url.trim())),
            None => {
                let name = env_map
                    .get("DB_NAME")
                    .cloned()
                    .unwrap_or_else(|| "study".to_string());
                if name.is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "DB_NAME".to_string(),
                        "must not be empty".to_string(),
                    ));
                }
                DatabaseSettings::File {
                    dir: PathBuf::from(env_map.get("DB_DIR").map(|s| s.as_str()).unwrap_or(".")),
                    name,
                }
            }
        };

        Ok(Config {
            host,
            port,
            database,
            max_connections,
        })
    }
}

impl DatabaseSettings {
    /// Connection URL understood by the sqlx SQLite driver.
    pub fn connection_url(&self) -> String {
        match self {
            DatabaseSettings::Url(url) => url.clone(),
            DatabaseSettings::File { dir, name } => {
                format!("{}{}", SQLITE_SCHEME, dir.join(format!("{}.db", name)).display())
            }
        }
    }

    /// Database file for the discrete form. `None` when configured by URL.
    pub fn file_path(&self) -> Option<PathBuf> {
        match self {
            DatabaseSettings::Url(_) => None,
            DatabaseSettings::File { dir, name } => Some(dir.join(format!("{}.db", name))),
        }
    }
}

/// Rewrite a legacy `sqlite3://` prefix to the scheme sqlx expects.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix(LEGACY_SQLITE_SCHEME) {
        Some(rest) => format!("{}{}", SQLITE_SCHEME, rest),
        None => url.to_string(),
    }
}
