//! Common regex patterns for shipment report extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Carrier prefix every tracking number starts with.
pub const DEFAULT_TRACKING_PREFIX: &str = "1Z";

/// Token printed on cancelled shipments.
pub const DEFAULT_VOID_TOKEN: &str = "VOID";

lazy_static! {
    // Reference marker, matched against a whitespace-normalized line.
    // `\b` after the 1 keeps "Package Ref No.10" and friends out. The value
    // stops where the next report column starts on the same line.
    pub static ref REFERENCE_MARKER: Regex = Regex::new(
        r"(?i)^Package Ref No\.\s?1\b(?:\s*[:\-])?(.*?)(?:\s+(?:UPS\s+T|Tracking|Service\s+Type)|$)"
    ).unwrap();

    pub static ref TRACKING_LABELED: Regex = labeled_tracking_pattern(DEFAULT_TRACKING_PREFIX).unwrap();

    pub static ref TRACKING_BARE: Regex = bare_tracking_pattern(DEFAULT_TRACKING_PREFIX).unwrap();

    pub static ref VOID_TOKEN: Regex = void_pattern(DEFAULT_VOID_TOKEN, false).unwrap();

    pub static ref VOID_EXCLUSION: Regex = void_exclusion_pattern(DEFAULT_VOID_EXCLUSION, false).unwrap();
}

/// `Tracking No.` label followed by a prefixed identifier.
pub fn labeled_tracking_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?i)Tracking\s+(?:No\.?|Number)\s*[:#\-]?\s*({}[0-9A-Za-z]+)\b",
        regex::escape(prefix)
    ))
}

/// Identifier anywhere on a line, no label required.
pub fn bare_tracking_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b({}[0-9A-Za-z]+)\b", regex::escape(prefix)))
}

/// Past-tense form of the void token, as printed on report summary lines.
pub const DEFAULT_VOID_EXCLUSION: &str = "Voided";

/// Void token as a whole word.
pub fn void_pattern(token: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    let flags = if case_insensitive { "(?i)" } else { "" };
    Regex::new(&format!(r"{}\b{}\b", flags, regex::escape(token)))
}

/// Plain substring pattern for lines that never count as a void marker.
pub fn void_exclusion_pattern(text: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    let flags = if case_insensitive { "(?i)" } else { "" };
    Regex::new(&format!("{}{}", flags, regex::escape(text)))
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
