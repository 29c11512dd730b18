//! Environment-driven server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost.tiangolo.com",
    "https://localhost.tiangolo.com",
    "http://localhost",
    "http://localhost:8080",
];

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (`APP_ADDR`).
    pub addr: SocketAddr,
    /// Directory mounted at `/static` (`STATIC_DIR`).
    pub static_dir: PathBuf,
    /// File that notification background tasks append to (`NOTIFICATION_LOG`).
    pub notification_log: PathBuf,
    /// Origins allowed to make credentialed cross-origin calls (`CORS_ORIGINS`).
    pub cors_origins: Vec<String>,
    /// `None` disables the route.
    pub openapi_url: Option<String>,
    pub docs_url: Option<String>,
    pub redoc_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            static_dir: PathBuf::from("static"),
            notification_log: PathBuf::from("log.txt"),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            openapi_url: Some("/openapi.json".to_string()),
            docs_url: Some("/docs".to_string()),
            redoc_url: Some("/redoc".to_string()),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("APP_ADDR") {
            config.addr = raw
                .parse()
                .with_context(|| format!("APP_ADDR={raw:?} is not a socket address"))?;
        } else {
            tracing::info!(addr = %config.addr, "APP_ADDR not set; using default");
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("NOTIFICATION_LOG") {
            config.notification_log = PathBuf::from(path);
        }
        if let Some(raw) = lookup("CORS_ORIGINS") {
            config.cors_origins = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(raw) = lookup("OPENAPI_URL") {
            config.openapi_url = route_path("OPENAPI_URL", raw)?;
        }
        if let Some(raw) = lookup("DOCS_URL") {
            config.docs_url = route_path("DOCS_URL", raw)?;
        }
        if let Some(raw) = lookup("REDOC_URL") {
            config.redoc_url = route_path("REDOC_URL", raw)?;
        }

        if config.openapi_url.is_none() && (config.docs_url.is_some() || config.redoc_url.is_some()) {
            tracing::warn!("OPENAPI_URL disabled; documentation pages are disabled too");
            config.docs_url = None;
            config.redoc_url = None;
        }

        Ok(config)
    }
}

/// Empty disables; anything else must be an absolute route path.
fn route_path(key: &str, raw: String) -> anyhow::Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if !raw.starts_with('/') {
        bail!("{key}={raw:?} must start with '/'");
    }
    Ok(Some(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.port(), 8000);
        assert_eq!(config.cors_origins.len(), 4);
        assert_eq!(config.docs_url.as_deref(), Some("/docs"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("APP_ADDR", "127.0.0.1:9000"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("DOCS_URL", "/swagger"),
            ("REDOC_URL", ""),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.docs_url.as_deref(), Some("/swagger"));
        assert!(config.redoc_url.is_none());
    }

    #[test]
    fn disabling_openapi_disables_docs() {
        let config = ApiConfig::from_lookup(lookup(&[("OPENAPI_URL", "")])).unwrap();
        assert!(config.openapi_url.is_none());
        assert!(config.docs_url.is_none());
        assert!(config.redoc_url.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ApiConfig::from_lookup(lookup(&[("APP_ADDR", "nope")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("DOCS_URL", "docs")])).is_err());
    }
}
