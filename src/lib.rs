//! gazette-api - A read-only query API over government gazette publications
//!
//! Requests flow from the HTTP layer through the gazette access interface
//! to a data gateway, and results flow back as JSON.

pub mod cli;
pub mod config;
pub mod database;
pub mod gazettes;
pub mod http_server;
pub mod observability;
