//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Model artifact manifest
    pub model_path: PathBuf,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 7860,
            environment: "development".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            model_path: lookup("HEWS_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),

            log_json: lookup("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.log_json),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:7860");
        assert!(!config.is_production());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HEWS_MODEL_PATH", "/srv/hews/model.json"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "JSON"),
        ]));
        assert_eq!(config.model_path, PathBuf::from("/srv/hews/model.json"));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_production());
        assert!(config.log_json);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "http"), ("HOST", "localhost:1")]));
        assert_eq!(config.port, 7860);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
