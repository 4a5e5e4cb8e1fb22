//! Turns a single block into at most one shipment record.

use regex::Regex;
use tracing::trace;

use super::patterns::{
    bare_tracking_pattern, labeled_tracking_pattern, normalize_whitespace,
    void_exclusion_pattern, void_pattern, REFERENCE_MARKER, TRACKING_BARE, TRACKING_LABELED,
    VOID_EXCLUSION, VOID_TOKEN,
};
use super::segmenter::Block;
use crate::error::ExtractionError;
use crate::models::config::ParserConfig;
use crate::models::shipment::{ShipmentRecord, ShipmentStatus};

/// Per-block record classifier.
///
/// Each block is handled on its own: the tracking number is the first
/// prefixed identifier anywhere in the block, and the void token counts
/// wherever it appears inside the block's span, except on summary lines
/// that carry the exclusion text (`Voided Packages: 0`).
#[derive(Debug, Clone)]
pub struct RecordClassifier {
    tracking_labeled: Regex,
    tracking_bare: Regex,
    void_token: Regex,
    void_exclusion: Option<Regex>,
}

impl RecordClassifier {
    /// Classifier for `1Z` tracking numbers and the `VOID` token.
    pub fn new() -> Self {
        Self {
            tracking_labeled: TRACKING_LABELED.clone(),
            tracking_bare: TRACKING_BARE.clone(),
            void_token: VOID_TOKEN.clone(),
            void_exclusion: Some(VOID_EXCLUSION.clone()),
        }
    }

    /// Build a classifier from parser settings.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ExtractionError> {
        let prefix = config.tracking_prefix.trim();
        if prefix.is_empty() {
            return Err(pattern_error("tracking_prefix", "must not be empty"));
        }
        let token = config.void_token.trim();
        if token.is_empty() {
            return Err(pattern_error("void_token", "must not be empty"));
        }

        Ok(Self {
            tracking_labeled: labeled_tracking_pattern(prefix)
                .map_err(|e| pattern_error("tracking_prefix", e))?,
            tracking_bare: bare_tracking_pattern(prefix)
                .map_err(|e| pattern_error("tracking_prefix", e))?,
            void_token: void_pattern(token, config.case_insensitive_void)
                .map_err(|e| pattern_error("void_token", e))?,
            void_exclusion: match config.void_exclusion.trim() {
                "" => None,
                text => Some(
                    void_exclusion_pattern(text, config.case_insensitive_void)
                        .map_err(|e| pattern_error("void_exclusion", e))?,
                ),
            },
        })
    }

    /// Reference value from the marker line, empty when the marker carries none.
    pub fn extract_reference(&self, block: &Block) -> String {
        REFERENCE_MARKER
            .captures(&normalize_whitespace(block.marker_line()))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    }

    /// First tracking number in the block.
    ///
    /// On the matching line a labeled `Tracking No.` value wins over a bare
    /// positional match.
    pub fn extract_tracking(&self, block: &Block) -> Option<String> {
        block.lines.iter().find_map(|line| {
            self.tracking_labeled
                .captures(line)
                .or_else(|| self.tracking_bare.captures(line))
                .map(|caps| caps[1].to_string())
        })
    }

    /// True when the void token appears anywhere in the block.
    pub fn is_void(&self, block: &Block) -> bool {
        block.lines.iter().any(|line| self.is_void_line(line))
    }

    fn is_void_line(&self, line: &str) -> bool {
        if !self.void_token.is_match(line) {
            return false;
        }
        match &self.void_exclusion {
            Some(exclusion) => !exclusion.is_match(line),
            None => true,
        }
    }

    /// Classify a block, or `None` when it carries no tracking number.
    pub fn classify(&self, block: &Block) -> Option<ShipmentRecord> {
        let package_ref = self.extract_reference(block);

        let Some(tracking_no) = self.extract_tracking(block) else {
            trace!(
                "No tracking number in block at lines {}-{} (ref {:?}), skipping",
                block.start_line,
                block.end_line(),
                package_ref
            );
            return None;
        };

        let status = if self.is_void(block) {
            ShipmentStatus::Void
        } else {
            ShipmentStatus::Active
        };

        Some(ShipmentRecord::new(package_ref, tracking_no, status))
    }
}

impl Default for RecordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern_error(field: &str, reason: impl ToString) -> ExtractionError {
    ExtractionError::Pattern {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(lines: &[&str]) -> Block {
        Block {
            start_line: 1,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_classify_active() {
        let b = block(&["Package Ref No.1: INV-001", "Tracking No.: 1ZABC111"]);
        let record = RecordClassifier::new().classify(&b).unwrap();
        assert_eq!(record, ShipmentRecord::new("INV-001", "1ZABC111", ShipmentStatus::Active));
    }

    #[test]
    fn test_void_before_and_after_tracking_line() {
        let classifier = RecordClassifier::new();
        let before = block(&["Package Ref No.1: INV-002", "VOID", "Tracking No.: 1ZDEF222"]);
        let after = block(&["Package Ref No.1: INV-002", "Tracking No.: 1ZDEF222", "VOID"]);
        let inline = block(&["Package Ref No.1: INV-002", "Tracking No.: 1ZDEF222 VOID"]);

        for b in [&before, &after, &inline] {
            assert_eq!(classifier.classify(b).unwrap().status, ShipmentStatus::Void);
        }
    }

    #[test]
    fn test_void_substring_does_not_count() {
        let b = block(&["Package Ref No.1: AVOIDANCE", "Tracking No.: 1ZX1", "VOIDED LABEL"]);
        assert_eq!(RecordClassifier::new().classify(&b).unwrap().status, ShipmentStatus::Active);
    }

    #[test]
    fn test_missing_tracking_yields_none() {
        let b = block(&["Package Ref No.1: INV-004", "Weight 3 LBS"]);
        assert!(RecordClassifier::new().classify(&b).is_none());
    }

    #[test]
    fn test_empty_reference_is_kept() {
        let b = block(&["Package Ref No.1:", "Tracking No.: 1ZEMPTY1"]);
        let record = RecordClassifier::new().classify(&b).unwrap();
        assert_eq!(record.package_ref, "");
        assert_eq!(record.tracking_no, "1ZEMPTY1");
    }

    #[test]
    fn test_first_tracking_match_wins() {
        let b = block(&[
            "Package Ref No.1: INV-9",
            "Ship To 1ZFIRST1",
            "Tracking No.: 1ZSECOND2",
        ]);
        assert_eq!(RecordClassifier::new().extract_tracking(&b).as_deref(), Some("1ZFIRST1"));
    }

    #[test]
    fn test_labeled_value_preferred_on_same_line() {
        let b = block(&["Package Ref No.1: INV-9", "Ref 1ZOTHER Tracking No.: 1ZLABEL1"]);
        assert_eq!(RecordClassifier::new().extract_tracking(&b).as_deref(), Some("1ZLABEL1"));
    }

    #[test]
    fn test_tracking_on_marker_line() {
        let b = block(&["Package Ref No.1: INV-10   Tracking No.: 1ZINLINE7"]);
        let record = RecordClassifier::new().classify(&b).unwrap();
        assert_eq!(record, ShipmentRecord::new("INV-10", "1ZINLINE7", ShipmentStatus::Active));
    }

    #[test]
    fn test_reference_drops_trailing_columns() {
        let classifier = RecordClassifier::new();
        let charges = block(&["Package Ref No.1: INV-002 UPS Total Charges 12.40", "Tracking No.: 1ZDEF222"]);
        let service = block(&["Package Ref No.1: INV-003 Service Type: Ground", "1ZGHI333"]);

        assert_eq!(classifier.extract_reference(&charges), "INV-002");
        assert_eq!(classifier.extract_reference(&service), "INV-003");
    }

    #[test]
    fn test_summary_line_does_not_void_last_block() {
        let b = block(&[
            "Package Ref No.1: INV-001",
            "Tracking No.: 1ZABC111",
            "Total Packages: 1   VOID Voided Packages: 0",
        ]);
        let record = RecordClassifier::new().classify(&b).unwrap();
        assert_eq!(record.status, ShipmentStatus::Active);
    }

    #[test]
    fn test_empty_exclusion_counts_every_void() {
        let config = ParserConfig {
            void_exclusion: String::new(),
            ..ParserConfig::default()
        };
        let b = block(&["Package Ref No.1: INV-001", "Tracking No.: 1ZABC111", "VOID Voided"]);
        let classifier = RecordClassifier::from_config(&config).unwrap();
        assert!(classifier.is_void(&b));
    }

    #[test]
    fn test_from_config_custom_tokens() {
        let config = ParserConfig {
            tracking_prefix: "TB".to_string(),
            void_token: "cancelled".to_string(),
            case_insensitive_void: true,
            ..ParserConfig::default()
        };
        let classifier = RecordClassifier::from_config(&config).unwrap();
        let b = block(&["Package Ref No.1: R1", "Tracking No.: TB0042", "CANCELLED"]);
        let record = classifier.classify(&b).unwrap();
        assert_eq!(record, ShipmentRecord::new("R1", "TB0042", ShipmentStatus::Void));
    }

    #[test]
    fn test_from_config_rejects_empty_prefix() {
        let config = ParserConfig {
            tracking_prefix: "  ".to_string(),
            ..ParserConfig::default()
        };
        let err = RecordClassifier::from_config(&config).unwrap_err();
        assert!(matches!(err, ExtractionError::Pattern { ref field, .. } if field == "tracking_prefix"));
    }
}
