//! Decoded stream content: classification, show-text operands and
//! character maps.
//!
//! A decoded stream is either text-painting content (it holds at least one
//! `BT ... ET` text object) or is handed to the CMap builder. Text-painting
//! detection always wins.

mod cmap;
mod operators;

pub use cmap::TransformationTable;
pub use operators::extract_show_text;

use crate::parser::scanner::{find_ci, is_pdf_delimiter, is_pdf_whitespace};

/// Classification of a decoded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamContent<'a> {
    /// Bodies of the `BT ... ET` text objects, in stream order
    Text(Vec<&'a [u8]>),
    /// A stream that may define character mappings
    CharMap(&'a [u8]),
}

/// Classify a decoded stream.
pub fn classify(data: &[u8]) -> StreamContent<'_> {
    let blocks = text_objects(data);
    if blocks.is_empty() {
        StreamContent::CharMap(data)
    } else {
        StreamContent::Text(blocks)
    }
}

/// Find the bodies of all `BT ... ET` text objects.
///
/// `BT` and `ET` must stand as separate tokens. Each body ends at the first
/// `ET` after its `BT`; an unterminated text object runs to the end of the
/// stream.
pub fn text_objects(data: &[u8]) -> Vec<&[u8]> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(begin) = find_operator(data, pos, b"BT") {
        // The whitespace byte after BT belongs to the marker.
        let body_start = begin + 3;
        match find_operator(data, body_start, b"ET") {
            Some(end) => {
                blocks.push(&data[body_start..end]);
                pos = end + 2;
            }
            None => {
                blocks.push(&data[body_start..]);
                break;
            }
        }
    }

    blocks
}

/// Find `op` as a standalone token at or after `from`.
///
/// The byte before must be a delimiter or whitespace (or the start of the
/// data) and the byte after must be whitespace. `ET` may also be the last
/// token of the data.
fn find_operator(data: &[u8], from: usize, op: &[u8]) -> Option<usize> {
    let mut pos = from;
    while let Some(at) = find_ci(data, pos, op) {
        let before_ok = at == 0 || is_pdf_whitespace(data[at - 1]) || is_pdf_delimiter(data[at - 1]);
        let after_ok = match data.get(at + op.len()) {
            Some(&b) => is_pdf_whitespace(b),
            None => op == b"ET",
        };
        if before_ok && after_ok {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_text_stream() {
        let data = b"q\nBT\n/F1 12 Tf\n(One) Tj\nET\nBT\n(Two) Tj\nET\nQ\n";
        match classify(data) {
            StreamContent::Text(blocks) => {
                assert_eq!(blocks.len(), 2);
                assert_eq!(blocks[0], b"/F1 12 Tf\n(One) Tj\n");
                assert_eq!(blocks[1], b"(Two) Tj\n");
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_cmap_stream() {
        let data = b"1 beginbfchar\n<01> <0041>\nendbfchar\n";
        assert_eq!(classify(data), StreamContent::CharMap(&data[..]));
    }

    #[test]
    fn test_text_objects_single_line() {
        let blocks = text_objects(b"BT (Hello) Tj ET");
        assert_eq!(blocks, vec![&b"(Hello) Tj "[..]]);
    }

    #[test]
    fn test_text_objects_case_insensitive() {
        let blocks = text_objects(b"bt\n(x) Tj\net\n");
        assert_eq!(blocks, vec![&b"(x) Tj\n"[..]]);
    }

    #[test]
    fn test_text_objects_unterminated() {
        let blocks = text_objects(b"BT\n(open) Tj\n");
        assert_eq!(blocks, vec![&b"(open) Tj\n"[..]]);
    }

    #[test]
    fn test_text_objects_ignore_embedded_letters() {
        // "ET" inside a word is not an operator.
        let blocks = text_objects(b"BT\n(SET BETA) Tj\nET\n");
        assert_eq!(blocks, vec![&b"(SET BETA) Tj\n"[..]]);
    }

    #[test]
    fn test_no_text_objects() {
        assert!(text_objects(b"0 0 612 792 re f\n").is_empty());
        assert!(text_objects(b"").is_empty());
    }
}
