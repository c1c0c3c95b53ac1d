//! # HTTP Server Module
//!
//! Transport layer for the gazette API: parses requests into query filters,
//! calls the access interface and serializes results as JSON.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/gazettes` - Gazettes from every territory
//! - `/gazettes/:territory_id` - Gazettes from one territory
//!
//! All endpoints are nested under the configured root path.

pub mod config;
pub mod errors;
pub mod gazette_routes;
pub mod health_routes;
pub mod params;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use params::parse_gazette_query;
pub use server::{build_router, HttpServer};
