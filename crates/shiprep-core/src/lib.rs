//! Core library for carrier shipment report extraction.
//!
//! This crate provides:
//! - PDF text-layer reading into an ordered line sequence
//! - Block segmentation on the `Package Ref No.1` reference marker
//! - Per-block record classification (reference, tracking number, void status)
//! - Shipment record models with the exported field names fixed

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod pipeline;
pub mod report;

pub use error::{ExtractionError, Result, ShipError};
pub use models::config::ShipConfig;
pub use models::shipment::{ShipmentRecord, ShipmentStatus};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::{extract_from_path, extract_from_text};
#[cfg(feature = "pdf")]
pub use pipeline::extract_from_pdf_bytes;
pub use report::{
    Block, BlockSegmenter, ExtractionResult, RecordClassifier, ReportParser, ReportText,
    ShipmentReportParser,
};
