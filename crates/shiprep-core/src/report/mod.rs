//! Shipment report parsing.
//!
//! Lines flow one way: the [`BlockSegmenter`] cuts the report into one block
//! per `Package Ref No.1` marker, and the [`RecordClassifier`] turns each block
//! into zero or one [`ShipmentRecord`](crate::models::shipment::ShipmentRecord).

mod classifier;
mod parser;
pub mod patterns;
mod segmenter;

pub use classifier::RecordClassifier;
pub use parser::{ExtractionResult, ReportParser, ShipmentReportParser};
pub use segmenter::{is_marker_line, segment_lines, Block, BlockSegmenter};

/// Ordered lines of one report's extracted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportText {
    lines: Vec<String>,
}

impl ReportText {
    /// Split a text dump into lines.
    ///
    /// CR, LF and form feeds all end a line; pages simply run on. Blank lines
    /// are dropped and trailing whitespace is trimmed.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split(['\n', '\r', '\u{c}'])
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Append another page's text.
    pub fn extend_from_text(&mut self, text: &str) {
        self.lines.extend(Self::from_text(text).lines);
    }
}

impl From<Vec<String>> for ReportText {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}
