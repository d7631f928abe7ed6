//! Storefront Sheets Library
//!
//! A Rust library for turning loosely formatted CSV/TSV sheets published from
//! spreadsheets into typed storefront records: an order-builder catalog, a
//! product showcase and customer reviews.
//!
//! This library provides tools for:
//! - Tokenizing delimited lines with several quoting conventions
//! - Resolving semantic columns from headers whose order and naming drift
//! - Normalizing raw fields into validated records, skipping malformed rows
//! - Filtering, sorting and aggregating the parsed records
//! - Fetching sheets with timeouts, retries and a proxy-then-direct fallback
//! - Persisting the order selection map and building the WhatsApp hand-off

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod collection;
        pub mod order_builder;
        pub mod order_message;
        pub mod page_loader;
        pub mod review_form;
        pub mod sheet_parser;
    }
    pub mod adapters {
        pub mod review_submitter;
        pub mod selection_store;
        pub mod sheet_source;
        pub mod view;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CatalogItem, Review, SelectionMap, StoreProduct};
pub use config::StorefrontConfig;

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fetching, parsing and validating storefront data
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Network fetch failed before a response was received
    #[error("Transport error fetching '{url}': {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Server answered with a non-success status
    #[error("HTTP error fetching '{url}': status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Fetch did not complete within the configured timeout
    #[error("Timed out after {elapsed:?} fetching '{url}'")]
    Timeout {
        url: String,
        elapsed: std::time::Duration,
    },

    /// Sheet is missing the columns needed to parse it
    #[error("Sheet format error in '{sheet}': {message}")]
    SheetFormat { sheet: String, message: String },

    /// A single row failed validation
    #[error("Row {line} rejected: {reason}")]
    RowRejected { line: usize, reason: String },

    /// User input failed validation
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Persistent storage error
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Operation cancelled
    #[error("Cancelled: {reason}")]
    Cancelled { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a transport error
    pub fn transport(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a timeout error
    pub fn timeout(url: impl Into<String>, elapsed: std::time::Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            elapsed,
        }
    }

    /// Create a sheet format error
    pub fn sheet_format(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SheetFormat {
            sheet: sheet.into(),
            message: message.into(),
        }
    }

    /// Create a row rejection
    pub fn row_rejected(line: usize, reason: impl Into<String>) -> Self {
        Self::RowRejected {
            line,
            reason: reason.into(),
        }
    }

    /// Create a user input validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a cancellation error
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// Whether this error came from the network layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::Timeout { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::Transport {
            url,
            message: "request failed".to_string(),
            source: Some(error),
        }
    }
}
