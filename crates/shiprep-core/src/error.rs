//! Error types for the shiprep-core library.

use thiserror::Error;

/// Main error type for the shiprep library.
#[derive(Error, Debug)]
pub enum ShipError {
    /// PDF reading error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file type the pipeline cannot read.
    #[error("unsupported file format: {0:?}")]
    UnsupportedFormat(String),
}

/// Errors related to reading the report document.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract the text layer.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Too little text to be a report, typically a scanned PDF.
    #[error("PDF has no text layer ({chars} characters, need at least {min})")]
    NoTextLayer { chars: usize, min: usize },
}

/// Errors related to shipment record extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// The report was read but no block carried a tracking number.
    #[error("no shipment records found")]
    NoRecords,

    /// A configured pattern could not be compiled.
    #[error("invalid pattern for {field}: {reason}")]
    Pattern { field: String, reason: String },
}

/// Result type for the shiprep library.
pub type Result<T> = std::result::Result<T, ShipError>;
