//! Report parser: segmenter and classifier wired together.

use serde::Serialize;
use tracing::debug;

use super::classifier::RecordClassifier;
use super::segmenter::BlockSegmenter;
use super::ReportText;
use crate::error::ExtractionError;
use crate::models::config::ParserConfig;
use crate::models::shipment::ShipmentRecord;

/// Result of parsing one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Records in document order.
    pub records: Vec<ShipmentRecord>,
    /// Number of reference markers seen.
    pub blocks_found: usize,
    /// Blocks that carried no tracking number.
    pub blocks_skipped: usize,
    /// Number of input lines.
    pub lines_read: usize,
}

impl ExtractionResult {
    /// True when no block produced a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn void_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_void()).count()
    }

    pub fn into_records(self) -> Vec<ShipmentRecord> {
        self.records
    }

    /// Records, or [`ExtractionError::NoRecords`] for an empty report.
    pub fn require_records(self) -> Result<Vec<ShipmentRecord>, ExtractionError> {
        if self.records.is_empty() {
            Err(ExtractionError::NoRecords)
        } else {
            Ok(self.records)
        }
    }
}

/// Trait for shipment report parsing.
pub trait ReportParser {
    /// Parse the ordered lines of one report.
    fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ExtractionResult;

    /// Parse a raw text dump of one report.
    fn parse_text(&self, text: &str) -> ExtractionResult {
        self.parse_lines(ReportText::from_text(text).lines())
    }
}

/// Line-oriented parser for the Daily Shipment Detail Report.
///
/// Holds only compiled patterns, so one instance can serve any number of
/// reports, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct ShipmentReportParser {
    segmenter: BlockSegmenter,
    classifier: RecordClassifier,
}

impl ShipmentReportParser {
    /// Create a parser with the default carrier patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ExtractionError> {
        Ok(Self {
            segmenter: BlockSegmenter::new(),
            classifier: RecordClassifier::from_config(config)?,
        })
    }
}

impl ReportParser for ShipmentReportParser {
    fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> ExtractionResult {
        let blocks = self.segmenter.segment(lines);
        let blocks_found = blocks.len();

        let records: Vec<ShipmentRecord> = blocks
            .iter()
            .filter_map(|block| self.classifier.classify(block))
            .collect();

        let result = ExtractionResult {
            blocks_skipped: blocks_found - records.len(),
            records,
            blocks_found,
            lines_read: lines.len(),
        };

        debug!(
            "Extracted {} records ({} void) from {} blocks, {} skipped",
            result.records.len(),
            result.void_count(),
            result.blocks_found,
            result.blocks_skipped
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::shipment::ShipmentStatus;
    use pretty_assertions::assert_eq;

    fn parse(lines: &[&str]) -> Vec<ShipmentRecord> {
        ShipmentReportParser::new().parse_lines(lines).into_records()
    }

    #[test]
    fn test_single_active_shipment() {
        let records = parse(&["Package Ref No.1: INV-001", "Tracking No.: 1ZABC111"]);
        assert_eq!(
            records,
            vec![ShipmentRecord::new("INV-001", "1ZABC111", ShipmentStatus::Active)]
        );
    }

    #[test]
    fn test_void_before_tracking() {
        let records = parse(&["Package Ref No.1: INV-002", "VOID", "Tracking No.: 1ZDEF222"]);
        assert_eq!(
            records,
            vec![ShipmentRecord::new("INV-002", "1ZDEF222", ShipmentStatus::Void)]
        );
    }

    #[test]
    fn test_void_after_tracking() {
        let records = parse(&["Package Ref No.1: INV-003", "Tracking No.: 1ZGHI333", "VOID"]);
        assert_eq!(
            records,
            vec![ShipmentRecord::new("INV-003", "1ZGHI333", ShipmentStatus::Void)]
        );
    }

    #[test]
    fn test_marker_without_tracking() {
        let result = ShipmentReportParser::new().parse_lines(&["Package Ref No.1: INV-004"]);
        assert!(result.is_empty());
        assert_eq!(result.blocks_found, 1);
        assert_eq!(result.blocks_skipped, 1);
        assert_eq!(result.require_records(), Err(ExtractionError::NoRecords));
    }

    #[test]
    fn test_two_blocks_keep_order() {
        let records = parse(&[
            "Package Ref No.1: INV-001",
            "Tracking No.: 1ZABC111",
            "Package Ref No.1: INV-002",
            "VOID",
            "Tracking No.: 1ZDEF222",
        ]);
        assert_eq!(
            records,
            vec![
                ShipmentRecord::new("INV-001", "1ZABC111", ShipmentStatus::Active),
                ShipmentRecord::new("INV-002", "1ZDEF222", ShipmentStatus::Void),
            ]
        );
    }

    #[test]
    fn test_skipped_block_does_not_merge_into_next() {
        let records = parse(&[
            "Package Ref No.1: R1",
            "Tracking No.: 1ZONE",
            "Package Ref No.1: R2",
            "VOID",
            "Package Ref No.1: R3",
            "Tracking No.: 1ZTHREE",
        ]);
        let refs: Vec<(&str, ShipmentStatus)> = records
            .iter()
            .map(|r| (r.package_ref.as_str(), r.status))
            .collect();
        assert_eq!(
            refs,
            vec![("R1", ShipmentStatus::Active), ("R3", ShipmentStatus::Active)]
        );
    }

    #[test]
    fn test_void_does_not_leak_across_blocks() {
        let records = parse(&[
            "Package Ref No.1: R1",
            "Tracking No.: 1ZONE",
            "VOID",
            "Package Ref No.1: R2",
            "Tracking No.: 1ZTWO",
        ]);
        assert_eq!(records[0].status, ShipmentStatus::Void);
        assert_eq!(records[1].status, ShipmentStatus::Active);
    }

    #[test]
    fn test_preamble_tracking_is_ignored() {
        let result = ShipmentReportParser::new().parse_lines(&[
            "Daily Shipment Detail Report",
            "Tracking No.: 1ZHEADER",
            "VOID",
        ]);
        assert!(result.is_empty());
        assert_eq!(result.blocks_found, 0);
        assert_eq!(result.lines_read, 3);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = ShipmentReportParser::new();
        let lines = [
            "Report header",
            "Package Ref No.1: A",
            "Tracking No.: 1ZAAA",
            "Package Ref No.1:",
            "1ZBBB",
            "VOID",
        ];
        let first = parser.parse_lines(&lines);
        let second = parser.parse_lines(&lines);
        assert_eq!(first, second);
        assert_eq!(first.records[1], ShipmentRecord::new("", "1ZBBB", ShipmentStatus::Void));
    }

    #[test]
    fn test_marker_line_with_other_columns() {
        let records = parse(&[
            "Package Ref No.1: INV-001 Tracking No.: 1ZABC111",
            "Package Ref No.1: INV-002 UPS Total Charges 12.40",
            "Tracking No.: 1ZDEF222",
        ]);
        assert_eq!(
            records,
            vec![
                ShipmentRecord::new("INV-001", "1ZABC111", ShipmentStatus::Active),
                ShipmentRecord::new("INV-002", "1ZDEF222", ShipmentStatus::Active),
            ]
        );
    }

    #[test]
    fn test_report_footer_keeps_last_record_active() {
        let records = parse(&[
            "Package Ref No.1: INV-001",
            "Tracking No.: 1ZABC111",
            "Package Ref No.1: INV-002",
            "Tracking No.: 1ZDEF222",
            "Total Packages: 2   VOID Voided Packages: 0",
        ]);
        assert_eq!(records[1].status, ShipmentStatus::Active);
    }

    #[test]
    fn test_parse_text_with_page_break() {
        let text = "Page 1\r\nPackage Ref No.1: INV-1\r\n\x0cPage 2\nTracking No.: 1ZPAGED\n";
        let result = ShipmentReportParser::new().parse_text(text);
        assert_eq!(
            result.records,
            vec![ShipmentRecord::new("INV-1", "1ZPAGED", ShipmentStatus::Active)]
        );
    }
}
