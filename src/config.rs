use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

pub const DEFAULT_DATABASE_PATH: &str = "database.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub secret_key: SecretKey,
    pub query_mode: QueryMode,
    pub debug: bool,
}

/// How the `id` parameter of `/users` reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Bound as an integer parameter.
    Parameterized,
    /// Spliced into the SQL text verbatim. Injectable; training builds only.
    Concatenated,
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryMode::Parameterized => write!(f, "parameterized"),
            QueryMode::Concatenated => write!(f, "concatenated"),
        }
    }
}

/// Session-signing secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: String) -> Self {
        SecretKey(key)
    }

    /// Raw key material for signing session cookies. `/users` keeps no
    /// session, so nothing in the request path reads it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_addr = env_map
            .get("BIND_ADDR")
            .map(|s| s.as_str())
            .unwrap_or("0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BIND_ADDR".to_string(),
                    "must be an IP address".to_string(),
                )
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = database_path_from_map(&env_map);

        let secret_key = match env_map.get("SECRET_KEY") {
            None => return Err(ConfigError::MissingEnv("SECRET_KEY".to_string())),
            Some(s) if s.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "SECRET_KEY".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            Some(s) => SecretKey::new(s.clone()),
        };

        let query_mode = match env_map
            .get("QUERY_MODE")
            .map(|s| s.as_str())
            .unwrap_or("parameterized")
        {
            "parameterized" => QueryMode::Parameterized,
            "concatenated" => QueryMode::Concatenated,
            other => {
                return Err(ConfigError::InvalidValue(
                    "QUERY_MODE".to_string(),
                    format!("must be parameterized or concatenated, got {}", other),
                ))
            }
        };

        let debug = match env_map
            .get("DEBUG")
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
            .unwrap_or("false")
        {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "DEBUG".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        if debug && query_mode == QueryMode::Parameterized {
            return Err(ConfigError::InvalidValue(
                "DEBUG".to_string(),
                "debug diagnostics are only allowed with QUERY_MODE=concatenated".to_string(),
            ));
        }

        Ok(Config {
            bind_addr,
            port,
            database_path,
            secret_key,
            query_mode,
            debug,
        })
    }
}

/// `DATABASE_PATH`, or `database.db` in the working directory.
pub fn database_path_from_map(env_map: &HashMap<String, String>) -> String {
    env_map
        .get("DATABASE_PATH")
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
}
