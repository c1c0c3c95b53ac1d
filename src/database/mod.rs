//! # Storage Backends
//!
//! Data gateway implementations:
//!
//! - [`MemoryGateway`] - documents held in memory, loadable from a JSON file
//! - [`ElasticSearchGateway`] - documents indexed in Elasticsearch

pub mod elasticsearch;
pub mod memory;

pub use elasticsearch::{
    build_query, create_elasticsearch_gateway, ElasticSearchGateway, HttpSearchBackend,
    SearchBackend,
};
pub use memory::{MemoryGateway, StoredGazette};

use std::sync::Arc;

use crate::config::{ConfigResult, Configuration};
use crate::gazettes::GazetteDataGateway;

/// Create the gateway selected by `config`.
///
/// A data file takes precedence over Elasticsearch settings.
pub fn create_data_gateway(config: &Configuration) -> ConfigResult<Arc<dyn GazetteDataGateway>> {
    if let Some(path) = &config.data_file {
        return Ok(Arc::new(MemoryGateway::load(path)?));
    }

    let gateway =
        create_elasticsearch_gateway(&config.host, &config.index)?.with_url_prefix(&config.url_prefix);
    Ok(Arc::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_data_file_selects_memory_gateway() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"territory_id": "4205902", "date": "2021-01-07", "url": "https://a"}}]"#
        )
        .unwrap();

        let config = Configuration {
            data_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let gateway = create_data_gateway(&config).unwrap();
        assert_eq!(gateway.get_gazettes(None, None, None, None, 0, 10).count(), 1);
    }

    #[test]
    fn test_missing_backend_settings() {
        let result = create_data_gateway(&Configuration::default());
        assert!(matches!(result, Err(ConfigError::MissingHost)));
    }
}
