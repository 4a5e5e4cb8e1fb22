//! Shipment record model exchanged with renderers and exporters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a shipment went out or was cancelled on the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Shipment is live.
    #[default]
    Active,
    /// Shipment was voided.
    #[serde(rename = "VOID", alias = "Void")]
    Void,
}

impl ShipmentStatus {
    /// Literal used on the wire and in exported files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Void => "VOID",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "void" => Ok(Self::Void),
            other => Err(format!("unknown shipment status: {other}")),
        }
    }
}

/// One shipment reconstructed from a report block.
///
/// Field names are serialized exactly as the report labels them; downstream
/// table, CSV and persistence consumers key on these strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Customer reference from the marker line. May be empty.
    #[serde(rename = "Package Ref No.1")]
    pub package_ref: String,

    /// Carrier tracking number. Natural key for persistence.
    #[serde(rename = "Tracking No.")]
    pub tracking_no: String,

    #[serde(rename = "Status")]
    pub status: ShipmentStatus,
}

impl ShipmentRecord {
    /// Header names in column order.
    pub const FIELD_NAMES: [&'static str; 3] = ["Package Ref No.1", "Tracking No.", "Status"];

    pub fn new(
        package_ref: impl Into<String>,
        tracking_no: impl Into<String>,
        status: ShipmentStatus,
    ) -> Self {
        Self {
            package_ref: package_ref.into(),
            tracking_no: tracking_no.into(),
            status,
        }
    }

    pub fn is_void(&self) -> bool {
        self.status == ShipmentStatus::Void
    }

    /// Field values in `FIELD_NAMES` order.
    pub fn to_row(&self) -> [&str; 3] {
        [&self.package_ref, &self.tracking_no, self.status.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_serializes_with_report_field_names() {
        let record = ShipmentRecord::new("INV-002", "1ZDEF222", ShipmentStatus::Void);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"Package Ref No.1":"INV-002","Tracking No.":"1ZDEF222","Status":"VOID"}"#
        );
    }

    #[test]
    fn test_record_deserializes_from_report_field_names() {
        let json = r#"{"Package Ref No.1":"","Tracking No.":"1ZABC111","Status":"Active"}"#;
        let record: ShipmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, ShipmentRecord::new("", "1ZABC111", ShipmentStatus::Active));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("VOID".parse::<ShipmentStatus>(), Ok(ShipmentStatus::Void));
        assert_eq!(" active ".parse::<ShipmentStatus>(), Ok(ShipmentStatus::Active));
        assert!("shipped".parse::<ShipmentStatus>().is_err());
    }

    #[test]
    fn test_to_row_follows_field_order() {
        let record = ShipmentRecord::new("PO 7", "1Z999", ShipmentStatus::Active);
        assert_eq!(record.to_row(), ["PO 7", "1Z999", "Active"]);
        assert!(!record.is_void());
    }
}
