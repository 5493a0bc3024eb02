//! Server configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8000,http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub cors_allowed_origins: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            http_host: lookup("HTTP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            http_port: parse_or(&lookup, "HTTP_PORT", DEFAULT_PORT),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            ),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        }
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}={:?}, using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.http_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.cors_allowed_origins, DEFAULT_CORS_ORIGINS);
    }

    #[test]
    fn reads_values() {
        let config = config_from(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/posts"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]);
        assert_eq!(config.http_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/posts")
        );
        assert_eq!(config.database_max_connections, 12);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[("HTTP_PORT", "http"), ("DATABASE_MAX_CONNECTIONS", "-1")]);
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn blank_database_url_means_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]);
        assert_eq!(config.database_url, None);
    }
}
