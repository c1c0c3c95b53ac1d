//! Observability
//!
//! Structured JSON logging for lifecycle and query events.
//!
//! ```ignore
//! use gazette_api::observability::{Event, Logger};
//!
//! Logger::info(Event::QueryReceived, &[("territory_id", "4205902")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{format_line, Logger, Severity};
