//! WASM bindings for carrier shipment report extraction.
//!
//! The browser side hands over text it already pulled from the report; these
//! bindings run the same parser as the CLI and return plain JS objects.

use wasm_bindgen::prelude::*;

use shiprep_core::models::config::ParserConfig;
use shiprep_core::ExtractionError;
use shiprep_core::report::is_marker_line;
use shiprep_core::{ExtractionResult, ReportParser, ReportText, ShipmentReportParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract shipment records from report text.
///
/// Returns an array of `{"Package Ref No.1", "Tracking No.", "Status"}`
/// objects. Throws `"no shipment records found"` when nothing was extracted.
#[wasm_bindgen]
pub fn extract_shipments_from_text(text: &str) -> Result<JsValue, JsValue> {
    records_to_js(ShipmentReportParser::new().parse_text(text))
}

/// Extract shipment records from lines already split by the caller.
#[wasm_bindgen]
pub fn extract_shipments_from_lines(lines: Vec<String>) -> Result<JsValue, JsValue> {
    records_to_js(ShipmentReportParser::new().parse_lines(&lines))
}

/// Whether a line opens a new shipment block.
#[wasm_bindgen]
pub fn is_reference_line(line: &str) -> bool {
    is_marker_line(line)
}

fn records_to_js(result: ExtractionResult) -> Result<JsValue, JsValue> {
    let records = result
        .require_records()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&records).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Shipment extractor class for browser use.
#[wasm_bindgen]
pub struct ShipmentExtractor {
    config: ParserConfig,
    parser: ShipmentReportParser,
}

#[wasm_bindgen]
impl ShipmentExtractor {
    /// Create an extractor with the default carrier patterns.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            parser: ShipmentReportParser::new(),
        }
    }

    /// Change the tracking number prefix.
    #[wasm_bindgen]
    pub fn set_tracking_prefix(&mut self, prefix: &str) -> Result<(), JsValue> {
        let config = ParserConfig {
            tracking_prefix: prefix.to_string(),
            ..self.config.clone()
        };
        self.apply(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Change the void token and whether it ignores case.
    #[wasm_bindgen]
    pub fn set_void_token(&mut self, token: &str, case_insensitive: bool) -> Result<(), JsValue> {
        let config = ParserConfig {
            void_token: token.to_string(),
            case_insensitive_void: case_insensitive,
            ..self.config.clone()
        };
        self.apply(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract records from text. Throws when the report holds none.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        records_to_js(self.parser.parse_text(text))
    }

    /// Extract records along with block statistics. Never throws on an
    /// empty report; check `records.length`.
    #[wasm_bindgen]
    pub fn extract_with_stats(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse_text(text);
        serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl ShipmentExtractor {
    /// Swap in new settings. A rejected config leaves the extractor as it was.
    fn apply(&mut self, config: ParserConfig) -> Result<(), ExtractionError> {
        self.parser = ShipmentReportParser::from_config(&config)?;
        self.config = config;
        Ok(())
    }
}

impl Default for ShipmentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Report text accumulated page by page on the JS side.
#[wasm_bindgen]
pub struct ReportPages {
    text: ReportText,
}

#[wasm_bindgen]
impl ReportPages {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            text: ReportText::default(),
        }
    }

    /// Append the text of the next page.
    #[wasm_bindgen]
    pub fn add_page(&mut self, page_text: &str) {
        self.text.extend_from_text(page_text);
    }

    /// Number of non-blank lines collected so far.
    #[wasm_bindgen]
    pub fn line_count(&self) -> usize {
        self.text.len()
    }

    /// Extract records from every page added so far.
    #[wasm_bindgen]
    pub fn extract(&self) -> Result<JsValue, JsValue> {
        records_to_js(ShipmentReportParser::new().parse_lines(self.text.lines()))
    }
}

impl Default for ReportPages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_is_reference_line() {
        assert!(is_reference_line("Package Ref No.1: INV-001"));
        assert!(!is_reference_line("Tracking No.: 1ZABC111"));
    }

    #[test]
    fn test_rejected_setting_keeps_previous_state() {
        let mut extractor = ShipmentExtractor::new();
        let bad = ParserConfig {
            tracking_prefix: String::new(),
            ..ParserConfig::default()
        };
        assert!(extractor.apply(bad).is_err());
        assert_eq!(extractor.config.tracking_prefix, "1Z");

        let cancelled = ParserConfig {
            void_token: "CANCELLED".to_string(),
            ..extractor.config.clone()
        };
        extractor.apply(cancelled).unwrap();
        assert_eq!(extractor.config.void_token, "CANCELLED");

        let result = extractor
            .parser
            .parse_text("Package Ref No.1: R1\nTracking No.: 1ZR1\nCANCELLED\n");
        assert_eq!(result.void_count(), 1);
    }

    #[wasm_bindgen_test]
    fn test_pages_run_on() {
        let mut pages = ReportPages::new();
        pages.add_page("Package Ref No.1: INV-001\n");
        pages.add_page("Tracking No.: 1ZABC111\nVOID");
        assert_eq!(pages.line_count(), 3);
    }
}
