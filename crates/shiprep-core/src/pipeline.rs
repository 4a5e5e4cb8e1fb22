//! End-to-end extraction: document in, shipment records out.
//!
//! Reading failures are returned as errors before any parsing happens. A
//! report that reads fine but yields nothing comes back as an empty
//! [`ExtractionResult`], never as an error.

use crate::error::{Result, ShipError};
use crate::models::config::ShipConfig;
use crate::report::{ExtractionResult, ReportParser, ReportText, ShipmentReportParser};

#[cfg(feature = "pdf")]
use crate::pdf::{PdfExtractor, PdfProcessor};
#[cfg(feature = "pdf")]
use tracing::info;

fn parser_for(config: &ShipConfig) -> Result<ShipmentReportParser> {
    Ok(ShipmentReportParser::from_config(&config.parser)?)
}

/// Parse an already-extracted text dump.
pub fn extract_from_text(text: &str, config: &ShipConfig) -> Result<ExtractionResult> {
    let parser = parser_for(config)?;
    let lines = ReportText::from_text(text);
    Ok(parser.parse_lines(lines.lines()))
}

/// Read a PDF report and parse its text layer.
#[cfg(feature = "pdf")]
pub fn extract_from_pdf_bytes(data: &[u8], config: &ShipConfig) -> Result<ExtractionResult> {
    let parser = parser_for(config)?;

    let mut extractor = PdfExtractor::new()
        .with_empty_password_decryption(config.pdf.decrypt_empty_password)
        .with_min_text_length(config.pdf.min_text_length);
    extractor.load(data)?;

    let lines = extractor.extract_lines()?;
    info!(
        "Read {} lines from {} page(s)",
        lines.len(),
        extractor.page_count()
    );

    Ok(parser.parse_lines(lines.lines()))
}

/// Read a report file, dispatching on its extension.
///
/// `.txt` files are taken as a pre-extracted text dump.
pub fn extract_from_path(path: &std::path::Path, config: &ShipConfig) -> Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        #[cfg(feature = "pdf")]
        "pdf" => {
            let data = std::fs::read(path)?;
            extract_from_pdf_bytes(&data, config)
        }
        "txt" | "text" => {
            let text = std::fs::read_to_string(path)?;
            extract_from_text(&text, config)
        }
        other => Err(ShipError::UnsupportedFormat(other.to_string())),
    }
}
