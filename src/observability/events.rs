//! Observable events
//!
//! Every log line names one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    ConfigLoaded,
    GatewayReady,
    ServerStart,
    ServerStop,

    // Queries
    QueryReceived,
    QueryCompleted,
    QueryRejected,
    GatewayFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::GatewayReady => "GATEWAY_READY",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
            Event::QueryReceived => "QUERY_RECEIVED",
            Event::QueryCompleted => "QUERY_COMPLETED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::GatewayFailed => "GATEWAY_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
