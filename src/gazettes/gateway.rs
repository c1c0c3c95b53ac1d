//! # Data Gateway
//!
//! The storage capability the access layer depends on. Backends live in
//! `crate::database`.

use chrono::NaiveDate;
use thiserror::Error;

use super::record::GazetteRecord;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Lazy, one-pass sequence of records yielded by a gateway.
///
/// Errors surface as items; the sequence may be dropped at any point.
pub type GazetteRecords<'a> = Box<dyn Iterator<Item = GatewayResult<GazetteRecord>> + Send + 'a>;

/// Failures raised by a storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend answered with an error
    #[error("Backend error: {0}")]
    Backend(String),

    /// The backend could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// A stored document could not be mapped to a record
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A record violates its invariants
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Storage access for gazettes.
///
/// Implementations must be safe to share across concurrent requests.
pub trait GazetteDataGateway: Send + Sync {
    /// Query stored gazettes.
    ///
    /// `territory_id = None` matches every territory. `page` is zero-based.
    fn get_gazettes(
        &self,
        territory_id: Option<&str>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        keywords: Option<&[String]>,
        page: usize,
        page_size: usize,
    ) -> GazetteRecords<'_>;
}

impl<G: GazetteDataGateway + ?Sized> GazetteDataGateway for std::sync::Arc<G> {
    fn get_gazettes(
        &self,
        territory_id: Option<&str>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        keywords: Option<&[String]>,
        page: usize,
        page_size: usize,
    ) -> GazetteRecords<'_> {
        (**self).get_gazettes(territory_id, since, until, keywords, page, page_size)
    }
}

impl<G: GazetteDataGateway + ?Sized> GazetteDataGateway for Box<G> {
    fn get_gazettes(
        &self,
        territory_id: Option<&str>,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
        keywords: Option<&[String]>,
        page: usize,
        page_size: usize,
    ) -> GazetteRecords<'_> {
        (**self).get_gazettes(territory_id, since, until, keywords, page, page_size)
    }
}
