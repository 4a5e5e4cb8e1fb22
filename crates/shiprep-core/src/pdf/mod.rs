//! PDF text-layer reading.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::report::ReportText;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF readers feeding the report parser.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF in reading order.
    fn extract_text(&self) -> Result<String>;

    /// Extract the ordered line sequence of the whole document.
    fn extract_lines(&self) -> Result<ReportText> {
        Ok(ReportText::from_text(&self.extract_text()?))
    }
}

/// Reject text too short to hold a report.
///
/// A report that merely has no shipments still has headers, so this only
/// trips on scanned or blank documents.
pub fn require_text_layer(text: &str, min_text_length: usize) -> Result<()> {
    let chars = text.chars().filter(|c| !c.is_whitespace()).count();
    if chars < min_text_length {
        return Err(PdfError::NoTextLayer {
            chars,
            min: min_text_length,
        });
    }
    Ok(())
}
