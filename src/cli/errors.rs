//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits
//! with a non-zero status.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::http_server::ApiError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration or backend setup failed
    ConfigError,
    /// A command argument is invalid
    InvalidArgument,
    /// The storage backend failed during a query
    QueryFailed,
    /// The HTTP server could not start or stopped with an error
    ServerFailed,
    /// I/O error (stdout)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "GAZETTE_CLI_CONFIG_ERROR",
            Self::InvalidArgument => "GAZETTE_CLI_INVALID_ARGUMENT",
            Self::QueryFailed => "GAZETTE_CLI_QUERY_FAILED",
            Self::ServerFailed => "GAZETTE_CLI_SERVER_FAILED",
            Self::IoError => "GAZETTE_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn server_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServerFailed, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, e.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        let code = if e.is_client_error() {
            CliErrorCode::InvalidArgument
        } else {
            CliErrorCode::QueryFailed
        };
        Self::new(code, e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
