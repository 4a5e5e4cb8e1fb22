//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the shiprep pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// PDF reading configuration.
    pub pdf: PdfConfig,

    /// Report parsing configuration.
    pub parser: ParserConfig,

    /// Output rendering configuration.
    pub output: OutputConfig,
}

/// PDF reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try the empty password on encrypted reports.
    pub decrypt_empty_password: bool,

    /// Minimum text length to consider the PDF as carrying a text layer.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            min_text_length: 16,
        }
    }
}

/// Report parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Carrier prefix that starts every tracking number.
    pub tracking_prefix: String,

    /// Whole-word token marking a voided shipment.
    pub void_token: String,

    /// Lines containing this text never mark a block void. Empty disables.
    pub void_exclusion: String,

    /// Match the void token and exclusion regardless of case.
    pub case_insensitive_void: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tracking_prefix: "1Z".to_string(),
            void_token: "VOID".to_string(),
            void_exclusion: "Voided".to_string(),
            case_insensitive_void: false,
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix table rows with a 1-based row number.
    pub include_row_numbers: bool,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_row_numbers: true,
            pretty_json: false,
        }
    }
}

impl ShipConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
