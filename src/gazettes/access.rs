//! # Gazette Access
//!
//! The single translation point between caller intent and storage
//! capability. The transport layer depends only on
//! [`GazetteAccessInterface`]; [`GazetteAccess`] is the implementation that
//! forwards filters to a [`GazetteDataGateway`].

use std::sync::Arc;

use super::filter::QueryFilter;
use super::gateway::{GatewayResult, GazetteDataGateway};
use super::record::GazetteItem;

/// Lazy, one-pass sequence of result mappings
pub type GazetteItems<'a> = Box<dyn Iterator<Item = GatewayResult<GazetteItem>> + Send + 'a>;

/// Rules to interact with the gazettes
pub trait GazetteAccessInterface: Send + Sync {
    /// Get the gazettes matching `filter` (None = default filter)
    fn get_gazettes(&self, filter: Option<QueryFilter>) -> GazetteItems<'_>;
}

/// Access service wrapping a data gateway
pub struct GazetteAccess<G: GazetteDataGateway> {
    gateway: G,
}

impl<G: GazetteDataGateway> GazetteAccess<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Borrow the underlying gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

impl<G: GazetteDataGateway> GazetteAccessInterface for GazetteAccess<G> {
    fn get_gazettes(&self, filter: Option<QueryFilter>) -> GazetteItems<'_> {
        let filter = filter.unwrap_or_default();

        // The gateway receives plain arguments, never the filter itself.
        let records = self.gateway.get_gazettes(
            filter.territory_id.as_deref(),
            filter.since,
            filter.until,
            filter.keywords.as_deref(),
            filter.page,
            filter.page_size,
        );

        Box::new(records.map(|record| record.map(GazetteItem::from)))
    }
}

/// Build the access interface over `gateway`
pub fn create_gazettes_interface<G>(gateway: G) -> Arc<dyn GazetteAccessInterface>
where
    G: GazetteDataGateway + 'static,
{
    Arc::new(GazetteAccess::new(gateway))
}
