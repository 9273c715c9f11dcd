use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SEED_FILE: &str = "seed/seed_data.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Without a database URL the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub seed_file: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    expected: "a positive integer",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let port = match lookup("APP_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "APP_PORT",
                expected: "a port number",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Settings {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            max_connections,
            host: lookup("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            seed_file: lookup("SEED_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_FILE)),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, None);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.address(), "0.0.0.0:8080");
        assert_eq!(s.seed_file, PathBuf::from("seed/seed_data.json"));
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://localhost/trivia"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "5000"),
        ])
        .unwrap();
        assert_eq!(s.database_url.as_deref(), Some("postgres://localhost/trivia"));
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.address(), "127.0.0.1:5000");
    }

    #[test]
    fn empty_database_url_means_none() {
        assert_eq!(settings(&[("DATABASE_URL", "")]).unwrap().database_url, None);
    }

    #[test]
    fn rejects_malformed_port() {
        let err = settings(&[("APP_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("APP_PORT"));
        assert!(settings(&[("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }
}
