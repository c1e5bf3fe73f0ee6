use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got `{0}`")]
    InvalidPort(String),
}

/// Runtime settings, read once at startup from the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub service_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port_raw = var("PORT", "8000");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        Ok(AppConfig {
            host: var("HOST", "localhost"),
            port,
            mongodb_uri: var("MONGODB_URI", "mongodb://localhost:27017"),
            database_name: var("DATABASE_NAME", "movies_db"),
            jwt_secret: var("JWT_SECRET", "secret"),
            service_name: var("SERVICE_NAME", "Unknown"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8000);
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017");
        assert_eq!(config.database_name, "movies_db");
        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.service_name, "Unknown");
    }

    #[test]
    fn values_from_environment_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("DATABASE_NAME", "cinema"),
            ("JWT_SECRET", "s3cr3t"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_name, "cinema");
        assert_eq!(config.jwt_secret, "s3cr3t");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(ref p) if p == "eighty"));
    }
}
