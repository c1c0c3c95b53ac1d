//! # Gazette Records
//!
//! The in-memory shape of one published gazette, and the result mapping
//! handed to the transport layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::gateway::{GatewayError, GatewayResult};

/// One published gazette, as produced by a data gateway.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GazetteRecord {
    territory_id: String,
    date: NaiveDate,
    url: String,
    territory_name: Option<String>,
    state_code: Option<String>,
}

impl GazetteRecord {
    /// Create a record. The territory id must not be empty.
    pub fn new(
        territory_id: impl Into<String>,
        date: NaiveDate,
        url: impl Into<String>,
    ) -> GatewayResult<Self> {
        let territory_id = territory_id.into();
        if territory_id.trim().is_empty() {
            return Err(GatewayError::InvalidRecord(
                "territory_id cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            territory_id,
            date,
            url: url.into(),
            territory_name: None,
            state_code: None,
        })
    }

    /// Attach the territory display name
    pub fn with_territory_name(mut self, name: impl Into<String>) -> Self {
        self.territory_name = Some(name.into());
        self
    }

    /// Attach the state code
    pub fn with_state_code(mut self, code: impl Into<String>) -> Self {
        self.state_code = Some(code.into());
        self
    }

    pub fn territory_id(&self) -> &str {
        &self.territory_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn territory_name(&self) -> Option<&str> {
        self.territory_name.as_deref()
    }

    pub fn state_code(&self) -> Option<&str> {
        self.state_code.as_deref()
    }
}

/// Result mapping for one gazette.
///
/// Carries exactly the five public fields of a [`GazetteRecord`]. `date`
/// serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteItem {
    pub territory_id: String,
    pub date: NaiveDate,
    pub url: String,
    pub territory_name: Option<String>,
    pub state_code: Option<String>,
}

impl From<GazetteRecord> for GazetteItem {
    fn from(record: GazetteRecord) -> Self {
        Self {
            territory_id: record.territory_id,
            date: record.date,
            url: record.url,
            territory_name: record.territory_name,
            state_code: record.state_code,
        }
    }
}
