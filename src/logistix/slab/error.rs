use std::path::PathBuf;

use thiserror::Error;

use crate::logistix::slab::model::SheetRef;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur while the
/// tool downloads the price list, derives a price, and rewrites the project
/// workbook.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised when a required sheet cannot be resolved by name or position.
    #[error("sheet not found: {0}")]
    SheetNotFound(SheetRef),

    /// Raised when no price could be parsed below the marker row.
    #[error("no parseable price samples were found in the price list")]
    EmptyInput,

    /// Raised when a single cell does not hold a usable number. Callers skip
    /// the row instead of propagating this.
    #[error("malformed cell value '{value}' in column {column}")]
    MalformedCell { column: usize, value: String },

    /// Raised when the live exchange rate could not be obtained. The gateway
    /// absorbs this and falls back to the configured default.
    #[error("exchange rate lookup failed: {0}")]
    RateFetch(String),

    /// Raised when a currency conversion is attempted with a degenerate rate.
    #[error("cannot convert with non-positive exchange rate {rate}")]
    DivisionByZero { rate: f64 },

    /// Raised when the price list could not be downloaded.
    #[error("failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// Raised when the settings file holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
