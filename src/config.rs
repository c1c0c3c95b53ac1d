//! Service Configuration
//!
//! Settings are read from environment variables. Unset variables default to
//! empty strings, so a missing backend is reported by the backend factory
//! rather than here.

use std::path::PathBuf;

use thiserror::Error;

use crate::http_server::HttpServerConfig;

pub const ELASTICSEARCH_HOST_VAR: &str = "QUERIDO_DIARIO_ELASTICSEARCH_HOST";
pub const ELASTICSEARCH_INDEX_VAR: &str = "QUERIDO_DIARIO_ELASTICSEARCH_INDEX";
pub const API_ROOT_PATH_VAR: &str = "QUERIDO_DIARIO_API_ROOT_PATH";
pub const URL_PREFIX_VAR: &str = "QUERIDO_DIARIO_URL_PREFIX";
pub const DATA_FILE_VAR: &str = "QUERIDO_DIARIO_DATA_FILE";
pub const API_PORT_VAR: &str = "QUERIDO_DIARIO_API_PORT";
/// Comma-separated list of allowed CORS origins (unset = any origin)
pub const CORS_ORIGINS_VAR: &str = "QUERIDO_DIARIO_CORS_ORIGINS";

/// Result type for configuration and backend setup
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Problems detected while configuring the service. All are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing host")]
    MissingHost,

    #[error("Missing index name")]
    MissingIndex,

    #[error("Index does not exist: {0}")]
    IndexNotFound(String),

    /// Search backend could not be reached during setup
    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Cannot read data file {path}: {reason}")]
    DataFile { path: String, reason: String },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    /// Elasticsearch base URL
    pub host: String,
    /// Elasticsearch index holding the gazettes
    pub index: String,
    /// Prefix under which every route is served
    pub root_path: String,
    /// Prefix for gazette file URLs
    pub url_prefix: String,
    /// JSON data file; when set, gazettes are served from memory
    pub data_file: Option<PathBuf>,
    /// Port override
    pub port: Option<u16>,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Configuration {
    /// Load from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();

        let data_file = read(DATA_FILE_VAR);
        let port = read(API_PORT_VAR);
        let port = if port.trim().is_empty() {
            None
        } else {
            Some(port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: API_PORT_VAR.to_string(),
                value: port.clone(),
            })?)
        };

        Ok(Self {
            host: read(ELASTICSEARCH_HOST_VAR),
            index: read(ELASTICSEARCH_INDEX_VAR),
            root_path: read(API_ROOT_PATH_VAR),
            url_prefix: read(URL_PREFIX_VAR),
            data_file: if data_file.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(data_file.trim()))
            },
            port,
            cors_origins: read(CORS_ORIGINS_VAR)
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// HTTP server settings derived from this configuration
    pub fn http_server_config(&self) -> HttpServerConfig {
        let mut config = HttpServerConfig {
            root_path: self.root_path.clone(),
            cors_origins: self.cors_origins.clone(),
            ..Default::default()
        };
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

/// Load the configuration from the environment
pub fn load_configuration() -> ConfigResult<Configuration> {
    Configuration::from_env()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> ConfigResult<Configuration> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Configuration::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_load_configuration_with_no_envvars() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.host, "");
        assert_eq!(config.index, "");
        assert_eq!(config.root_path, "");
        assert_eq!(config.url_prefix, "");
    }

    #[test]
    fn test_load_configuration_with_empty_envvars() {
        let config = load(&[
            (ELASTICSEARCH_HOST_VAR, ""),
            (ELASTICSEARCH_INDEX_VAR, ""),
            (API_ROOT_PATH_VAR, ""),
            (URL_PREFIX_VAR, ""),
            (DATA_FILE_VAR, ""),
            (API_PORT_VAR, ""),
        ])
        .unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_load_configuration_with_envvars_defined() {
        let config = load(&[
            (ELASTICSEARCH_HOST_VAR, "000.0.0.0"),
            (ELASTICSEARCH_INDEX_VAR, "myindex"),
            (API_ROOT_PATH_VAR, "api/"),
            (URL_PREFIX_VAR, "https://test.com"),
            (DATA_FILE_VAR, "/srv/gazettes.json"),
            (API_PORT_VAR, "9000"),
        ])
        .unwrap();

        assert_eq!(config.host, "000.0.0.0");
        assert_eq!(config.index, "myindex");
        assert_eq!(config.root_path, "api/");
        assert_eq!(config.url_prefix, "https://test.com");
        assert_eq!(config.data_file, Some(PathBuf::from("/srv/gazettes.json")));
        assert_eq!(config.port, Some(9000));
    }

    #[test]
    fn test_invalid_port() {
        let result = load(&[(API_PORT_VAR, "eighty")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let config = load(&[(
            CORS_ORIGINS_VAR,
            "https://queridodiario.ok.org.br, http://localhost:3000,,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://queridodiario.ok.org.br", "http://localhost:3000"]
        );
        assert_eq!(config.http_server_config().cors_origins, config.cors_origins);

        assert!(load(&[(CORS_ORIGINS_VAR, " ")]).unwrap().cors_origins.is_empty());
    }

    #[test]
    fn test_http_server_config() {
        let config = load(&[(API_ROOT_PATH_VAR, "/api"), (API_PORT_VAR, "9000")]).unwrap();
        let http = config.http_server_config();
        assert_eq!(http.port, 9000);
        assert_eq!(http.root_path, "/api");

        let http = Configuration::default().http_server_config();
        assert_eq!(http.port, 8080);
    }
}
