//! Splits the ordered report lines into one block per reference marker.

use tracing::{debug, trace};

use super::patterns::{normalize_whitespace, REFERENCE_MARKER};

/// Contiguous lines belonging to one reference marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-indexed line number of the marker line.
    pub start_line: usize,
    /// Marker line first, then every line up to the next marker.
    pub lines: Vec<String>,
}

impl Block {
    /// The line that opened this block.
    pub fn marker_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// 1-indexed line number of the last line in the block.
    pub fn end_line(&self) -> usize {
        self.start_line + self.lines.len().saturating_sub(1)
    }
}

/// Returns true when the line opens a new block.
pub fn is_marker_line(line: &str) -> bool {
    REFERENCE_MARKER.is_match(&normalize_whitespace(line))
}

/// Block segmenter keyed on the `Package Ref No.1` marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockSegmenter;

impl BlockSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Partition `lines` into blocks in document order.
    ///
    /// Lines ahead of the first marker (report headers) are dropped.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut current: Option<Block> = None;
        let mut preamble = 0usize;

        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();

            if is_marker_line(line) {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
                trace!("Reference marker at line {}", idx + 1);
                current = Some(Block {
                    start_line: idx + 1,
                    lines: vec![line.to_string()],
                });
            } else if let Some(block) = current.as_mut() {
                block.lines.push(line.to_string());
            } else {
                preamble += 1;
            }
        }

        if let Some(block) = current {
            blocks.push(block);
        }

        debug!(
            "Segmented {} lines into {} blocks ({} preamble lines dropped)",
            lines.len(),
            blocks.len(),
            preamble
        );

        blocks
    }
}

/// Segment `lines` with the default segmenter.
pub fn segment_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
    BlockSegmenter::new().segment(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preamble_is_dropped() {
        let lines = [
            "Daily Shipment Detail Report",
            "Shipper Number: 12345X",
            "Package Ref No.1: INV-001",
            "Tracking No.: 1ZABC111",
        ];

        let blocks = segment_lines(&lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_line, 3);
        assert_eq!(blocks[0].end_line(), 4);
        assert_eq!(blocks[0].marker_line(), "Package Ref No.1: INV-001");
    }

    #[test]
    fn test_blocks_cover_everything_after_first_marker() {
        let lines = [
            "header",
            "Package Ref No.1: A",
            "x",
            "y",
            "Package Ref No.1: B",
            "Package Ref No.1: C",
            "z",
        ];

        let blocks = segment_lines(&lines);
        let spans: Vec<(usize, usize)> = blocks.iter().map(|b| (b.start_line, b.end_line())).collect();
        assert_eq!(spans, vec![(2, 4), (5, 5), (6, 7)]);

        let rebuilt: Vec<&str> = blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(String::as_str))
            .collect();
        assert_eq!(rebuilt, lines[1..].to_vec());
    }

    #[test]
    fn test_no_marker_yields_no_blocks() {
        let lines = ["Tracking No.: 1ZABC111", "VOID"];
        assert!(segment_lines(&lines).is_empty());
        assert!(segment_lines::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_marker_without_value_still_opens_block() {
        let lines = ["Package Ref No.1:", "Tracking No.: 1Z1"];
        let blocks = segment_lines(&lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines.len(), 2);
    }

    #[test]
    fn test_secondary_reference_stays_in_block() {
        let lines = [
            "Package Ref No.1: A",
            "Package Ref No.2: dept 4",
            "Tracking No.: 1ZAAA",
        ];
        let blocks = segment_lines(&lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines.len(), 3);
    }
}
