//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";

/// Where appointment state is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotBackend {
    /// `PostgreSQL` at the given connection URL.
    Postgres(String),
    /// JSON files in the given directory.
    File(PathBuf),
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to bind.
    pub addr: SocketAddr,
    /// Durable slot backend.
    pub backend: SlotBackend,
    /// Optional YAML catalog; the built-in catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
    /// OTLP collector endpoint; span export is disabled when absent.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid `u16` or
    /// `HOST:PORT` is not a valid socket address.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        let backend = match non_empty("DATABASE_URL") {
            Some(url) => SlotBackend::Postgres(url),
            None => SlotBackend::File(
                non_empty("WASHFLOW_DATA_DIR")
                    .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                    .into(),
            ),
        };

        Ok(Self {
            addr,
            backend,
            catalog_path: non_empty("WASHFLOW_CATALOG_PATH").map(PathBuf::from),
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.backend, SlotBackend::File(PathBuf::from("data")));
        assert!(config.catalog_path.is_none());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_database_url_selects_postgres_backend() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/washflow"),
            ("WASHFLOW_DATA_DIR", "/var/lib/washflow"),
        ])
        .unwrap();

        assert_eq!(
            config.backend,
            SlotBackend::Postgres("postgres://localhost/washflow".into())
        );
    }

    #[test]
    fn test_reads_all_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("WASHFLOW_DATA_DIR", "/tmp/wf"),
            ("WASHFLOW_CATALOG_PATH", "catalog.yaml"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.backend, SlotBackend::File(PathBuf::from("/tmp/wf")));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.yaml")));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let result = config_from(&[("PORT", "70000")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_host_is_config_error() {
        let result = config_from(&[("HOST", "not a host")]);

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("DATABASE_URL", "")]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert!(matches!(config.backend, SlotBackend::File(_)));
    }
}
