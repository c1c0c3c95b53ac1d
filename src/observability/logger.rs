//! Structured JSON logger
//!
//! One line per event, `event` first, `severity` second, then the fields in
//! alphabetical order. Writes are synchronous and unbuffered; a failed write
//! is ignored so logging never fails a request.
//!
//! Errors go to stderr. Other lines go to stdout unless a command has
//! reserved stdout for its own output (see [`Logger::reserve_stdout`]).

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set once stdout carries command output; all log lines then go to stderr
static STDOUT_RESERVED: AtomicBool = AtomicBool::new(false);

/// Structured logger writing JSON lines to stdout/stderr
pub struct Logger;

impl Logger {
    /// Log `event` with `fields`
    pub fn log(severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if severity >= Severity::Error || STDOUT_RESERVED.load(Ordering::Relaxed) {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &mut io::stdout());
        }
    }

    /// Log to an explicit writer
    pub fn log_to_writer<W: Write>(
        severity: Severity,
        event: Event,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = format_line(severity, event, fields);
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Route every later log line to stderr for the rest of the process
    pub fn reserve_stdout() {
        STDOUT_RESERVED.store(true, Ordering::Relaxed);
    }

    pub fn info(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

/// Render one log line, newline included
pub fn format_line(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
    let mut line = String::with_capacity(128);
    line.push_str("{\"event\":");
    push_json_string(&mut line, event.as_str());
    line.push_str(",\"severity\":");
    push_json_string(&mut line, severity.as_str());

    let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);

    for (key, value) in sorted {
        line.push(',');
        push_json_string(&mut line, key);
        line.push(':');
        push_json_string(&mut line, value);
    }

    line.push_str("}\n");
    line
}

fn push_json_string(out: &mut String, value: &str) {
    match serde_json::to_string(value) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => out.push_str("\"\""),
    }
}
