//! # Gazettes Module
//!
//! The query/access layer: record types, the query filter, the data gateway
//! contract and the access service the HTTP layer talks to.

pub mod access;
pub mod filter;
pub mod gateway;
pub mod record;

pub use access::{create_gazettes_interface, GazetteAccess, GazetteAccessInterface, GazetteItems};
pub use filter::{
    normalize_keywords, Keyword, QueryFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PAGE_NUMBER_OFFSET,
};
pub use gateway::{GatewayError, GatewayResult, GazetteDataGateway, GazetteRecords};
pub use record::{GazetteItem, GazetteRecord};
