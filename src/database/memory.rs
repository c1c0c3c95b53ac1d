//! # In-Memory Gateway
//!
//! Serves gazettes from a list held in memory, optionally loaded from a JSON
//! file. Meant for development and tests; production deployments use the
//! Elasticsearch gateway.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::{ConfigError, ConfigResult};
use crate::gazettes::{GatewayResult, GazetteDataGateway, GazetteRecord, GazetteRecords};

/// One document as stored in a data file
#[derive(Debug, Clone, Deserialize)]
pub struct StoredGazette {
    pub territory_id: String,
    pub date: NaiveDate,
    pub url: String,
    #[serde(default)]
    pub territory_name: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    /// Text searched by keyword filters
    #[serde(default)]
    pub source_text: String,
}

#[derive(Debug, Clone)]
struct Entry {
    record: GazetteRecord,
    /// Lowercased source text
    text: String,
}

/// Gateway over an in-memory document list
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    /// Newest first
    entries: Vec<Entry>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored documents
    pub fn from_documents(documents: Vec<StoredGazette>) -> GatewayResult<Self> {
        let mut gateway = Self::new();
        for document in documents {
            gateway.insert(document)?;
        }
        Ok(gateway)
    }

    /// Load a JSON array of documents from `path`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let data_file_error = |reason: String| ConfigError::DataFile {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| data_file_error(e.to_string()))?;
        let documents: Vec<StoredGazette> =
            serde_json::from_str(&content).map_err(|e| data_file_error(e.to_string()))?;

        Self::from_documents(documents).map_err(|e| data_file_error(e.to_string()))
    }

    /// Add one document, keeping newest-first order.
    ///
    /// Documents with the same date keep insertion order.
    pub fn insert(&mut self, document: StoredGazette) -> GatewayResult<()> {
        let mut record = GazetteRecord::new(document.territory_id, document.date, document.url)?;
        if let Some(name) = document.territory_name {
            record = record.with_territory_name(name);
        }
        if let Some(code) = document.state_code {
            record = record.with_state_code(code);
        }

        let position = self
            .entries
            .partition_point(|entry| entry.record.date() >= record.date());
        self.entries.insert(
            position,
            Entry {
                record,
                text: document.source_text.to_lowercase(),
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GazetteDataGateway for MemoryGateway {
    fn get_gazettes(
        &self,
        territory_id: Option<&str>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        keywords: Option<&[String]>,
        page: usize,
        page_size: usize,
    ) -> GazetteRecords<'_> {
        let territory_id = territory_id.map(str::to_string);
        let keywords: Vec<String> = keywords
            .unwrap_or_default()
            .iter()
            .map(|k| k.to_lowercase())
            .collect();

        let matches = move |entry: &&Entry| {
            let record = &entry.record;
            if let Some(territory_id) = &territory_id {
                if record.territory_id() != territory_id {
                    return false;
                }
            }
            if since.is_some_and(|since| record.date() < since) {
                return false;
            }
            if until.is_some_and(|until| record.date() > until) {
                return false;
            }
            // Every keyword must appear in the text
            keywords.iter().all(|k| entry.text.contains(k.as_str()))
        };

        Box::new(
            self.entries
                .iter()
                .filter(matches)
                .skip(page.saturating_mul(page_size))
                .take(page_size)
                .map(|entry| Ok(entry.record.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(days: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, days).unwrap()
    }

    fn doc(territory_id: &str, day: u32, text: &str) -> StoredGazette {
        StoredGazette {
            territory_id: territory_id.to_string(),
            date: date(day),
            url: format!("http://test.com/{}/{}", territory_id, day),
            territory_name: Some("Rio de Janeiro".to_string()),
            state_code: Some("RJ".to_string()),
            source_text: text.to_string(),
        }
    }

    fn gateway() -> MemoryGateway {
        MemoryGateway::from_documents(vec![
            doc("3304557", 7, "This is a fake gazette content"),
            doc("4205902", 6, "This is a fake gazette content"),
            doc("4205902", 8, "Fake gazette content. Piraporinha and cafundo"),
            doc("3304557", 6, "This is a fake gazette content. anotherkeyword"),
            doc("4205919", 2, "Piraporinha gazette"),
        ])
        .unwrap()
    }

    fn collect(records: GazetteRecords<'_>) -> Vec<GazetteRecord> {
        records.collect::<GatewayResult<_>>().unwrap()
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let gateway = gateway();
        let records = collect(gateway.get_gazettes(None, None, None, None, 0, 10));

        assert_eq!(records.len(), 5);
        let dates: Vec<_> = records.iter().map(|r| r.date()).collect();
        assert_eq!(dates, vec![date(8), date(7), date(6), date(6), date(2)]);
        // Same date keeps insertion order
        assert_eq!(records[2].territory_id(), "4205902");
        assert_eq!(records[3].territory_id(), "3304557");
    }

    #[test]
    fn test_filter_by_territory() {
        let gateway = gateway();
        let records = collect(gateway.get_gazettes(Some("4205902"), None, None, None, 0, 10));
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.territory_id() == "4205902"));
    }

    #[test]
    fn test_filter_by_date_range_is_inclusive() {
        let gateway = gateway();
        let records = collect(gateway.get_gazettes(None, Some(date(6)), Some(date(7)), None, 0, 10));
        assert_eq!(records.len(), 3);

        let records = collect(gateway.get_gazettes(None, Some(date(8)), None, None, 0, 10));
        assert_eq!(records.len(), 1);

        let records = collect(gateway.get_gazettes(None, None, Some(date(2)), None, 0, 10));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_keywords_must_all_match() {
        let gateway = gateway();
        let one = vec!["piraporinha".to_string()];
        let both = vec!["Piraporinha".to_string(), "cafundo".to_string()];
        let missing = vec!["wasd1234xxx".to_string()];

        assert_eq!(collect(gateway.get_gazettes(None, None, None, Some(&one), 0, 10)).len(), 2);
        assert_eq!(collect(gateway.get_gazettes(None, None, None, Some(&both), 0, 10)).len(), 1);
        assert!(collect(gateway.get_gazettes(None, None, None, Some(&missing), 0, 10)).is_empty());
    }

    #[test]
    fn test_pagination() {
        let gateway = gateway();
        let first = collect(gateway.get_gazettes(None, None, None, None, 0, 2));
        let second = collect(gateway.get_gazettes(None, None, None, None, 1, 2));
        let third = collect(gateway.get_gazettes(None, None, None, None, 2, 2));
        let missing = collect(gateway.get_gazettes(None, None, None, None, 99, 2));

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(third.len(), 1);
        assert!(missing.is_empty());
        assert!(first[1].date() >= second[0].date());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"territory_id": "4205902", "date": "2021-01-07", "url": "https://queridodiario.ok.org.br/",
                 "territory_name": "My city", "state_code": "My state", "source_text": "decreto"}},
                {{"territory_id": "3304557", "date": "2021-01-02", "url": "http://test.com/a"}}]"#
        )
        .unwrap();

        let gateway = MemoryGateway::load(file.path()).unwrap();
        assert_eq!(gateway.len(), 2);

        let records = collect(gateway.get_gazettes(Some("4205902"), None, None, None, 0, 10));
        assert_eq!(records[0].territory_name(), Some("My city"));
        assert_eq!(records[0].state_code(), Some("My state"));
    }

    #[test]
    fn test_load_missing_or_malformed_file() {
        let result = MemoryGateway::load(Path::new("/path/does/not/exists.json"));
        assert!(matches!(result, Err(ConfigError::DataFile { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            MemoryGateway::load(file.path()),
            Err(ConfigError::DataFile { .. })
        ));
    }

    #[test]
    fn test_rejects_document_without_territory() {
        let result = MemoryGateway::from_documents(vec![doc("", 1, "")]);
        assert!(result.is_err());
    }
}
