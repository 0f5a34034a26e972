//! Sheet reader error types

use thiserror::Error;

/// Result type for sheet-name reading
pub type SheetsResult<T> = std::result::Result<T, SheetsError>;

/// Errors that can occur while listing a workbook's sheets
#[derive(Debug, Error)]
pub enum SheetsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid file format
    #[error("Invalid workbook format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),
}
