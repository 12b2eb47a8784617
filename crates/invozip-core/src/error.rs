//! Error types for the invozip-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the invozip library.
#[derive(Error, Debug)]
pub enum InvozipError {
    /// Invoice parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Zip archive handling error.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// PDF text extraction error.
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    /// Workbook (XLSX) emission error.
    #[error("workbook error: {0}")]
    Workbook(#[from] xlsxwriter::XlsxError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A document failed as a whole, with its path for the report.
    #[error("document {path} failed: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: Box<InvozipError>,
    },
}

/// Errors raised by the line parsers.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A date or amount string did not match any recognized pattern.
    #[error("unrecognized {field} format: {value:?}")]
    Format { field: &'static str, value: String },

    /// A concatenated two-line buffer did not match the entry grammar
    /// after a product-code prefix was recognized.
    #[error("entry grammar mismatch: {line:?}")]
    GrammarMismatch { line: String },
}

/// Result type for the invozip library.
pub type Result<T> = std::result::Result<T, InvozipError>;
