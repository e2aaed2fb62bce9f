//! Character code transformations from `bfchar` / `bfrange` records.
//!
//! Codes are 16-bit slots written as up to 4 hex digits. Destinations are
//! UTF-16BE code units, so a multi-unit destination (`<00660069>`) maps one
//! code to several characters and surrogate pairs decode to one character.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::parser::scanner::{find_ci, is_pdf_whitespace};

lazy_static! {
    /// `<code> <value>`
    static ref RE_BFCHAR: Regex =
        Regex::new(r"(?i)^<([0-9a-f]{2,4})>\s+<([0-9a-f]{4,512})>").unwrap();
    /// `<from> <to> <dest>`
    static ref RE_BFRANGE_OFFSET: Regex =
        Regex::new(r"(?i)^<([0-9a-f]{4})>\s+<([0-9a-f]{4})>\s+<([0-9a-f]{4})>").unwrap();
    /// `<from> <to> [ v0 v1 ... ]`
    static ref RE_BFRANGE_ARRAY: Regex =
        Regex::new(r"(?is)^<([0-9a-f]{4})>\s+<([0-9a-f]{4})>\s+\[(.*?)\]").unwrap();
}

/// Mapping from character code to replacement text.
///
/// Accumulated across every character-map stream of a file. A later entry
/// for the same code replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationTable {
    entries: HashMap<u16, String>,
}

impl TransformationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `code` to `text`.
    pub fn insert(&mut self, code: u16, text: impl Into<String>) {
        self.entries.insert(code, text.into());
    }

    /// Replacement text for `code`, if mapped.
    pub fn get(&self, code: u16) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    /// Number of mapped codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no code is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add every `bfchar` and `bfrange` record found in a character-map
    /// stream. Returns the number of codes written.
    ///
    /// All `bfchar` blocks of the stream are applied before its `bfrange`
    /// blocks. Each block contributes at most as many records as its count
    /// prefix declares, one record per line.
    pub fn extend_from_cmap(&mut self, data: &[u8]) -> usize {
        let text: String = data.iter().map(|&b| b as char).collect();
        let mut written = 0;

        for (count, body) in counted_sections(&text, "beginbfchar", "endbfchar") {
            for line in record_lines(body, count) {
                if let Some((code, value)) = parse_bfchar(line) {
                    log::trace!("bfchar {:04X} -> {:?}", code, value);
                    self.insert(code, value);
                    written += 1;
                }
            }
        }

        for (count, body) in counted_sections(&text, "beginbfrange", "endbfrange") {
            for line in record_lines(body, count) {
                written += self.apply_bfrange(line);
            }
        }

        written
    }

    fn apply_bfrange(&mut self, line: &str) -> usize {
        if let Some(caps) = RE_BFRANGE_ARRAY.captures(line) {
            let (Some(from), Some(to)) = (parse_code(&caps[1]), parse_code(&caps[2])) else {
                return 0;
            };
            let values = caps[3]
                .split(|c: char| c.is_ascii() && is_pdf_whitespace(c as u8))
                .filter(|v| !v.is_empty());
            let mut written = 0;
            for (code, value) in (from..=to).zip(values) {
                let digits: String = value.chars().filter(char::is_ascii_hexdigit).collect();
                self.insert(code, decode_utf16_hex(&digits));
                written += 1;
            }
            return written;
        }

        let Some(caps) = RE_BFRANGE_OFFSET.captures(line) else {
            return 0;
        };
        let (Some(from), Some(to), Some(dest)) =
            (parse_code(&caps[1]), parse_code(&caps[2]), parse_code(&caps[3]))
        else {
            return 0;
        };
        let mut written = 0;
        for code in from..=to {
            let target = u32::from(dest) + u32::from(code - from);
            if let Some(ch) = char::from_u32(target) {
                self.insert(code, ch);
                written += 1;
            }
        }
        written
    }
}

/// Find every `<count> <begin> ... <end>` section.
///
/// The count is the run of decimal digits before the begin keyword,
/// separated from it by whitespace. A keyword without a count is skipped.
fn counted_sections<'a>(text: &'a str, begin: &str, end: &str) -> Vec<(usize, &'a str)> {
    let bytes = text.as_bytes();
    let mut sections = Vec::new();
    let mut pos = 0;

    while let Some(begin_at) = find_ci(bytes, pos, begin.as_bytes()) {
        let body_start = begin_at + begin.len();
        let Some(count) = count_before(bytes, begin_at) else {
            pos = body_start;
            continue;
        };
        let Some(end_at) = find_ci(bytes, body_start, end.as_bytes()) else {
            break;
        };
        sections.push((count, &text[body_start..end_at]));
        pos = end_at + end.len();
    }

    sections
}

/// Parse the decimal count that precedes a keyword at `at`.
fn count_before(bytes: &[u8], at: usize) -> Option<usize> {
    let digits_end = bytes[..at]
        .iter()
        .rposition(|&b| !is_pdf_whitespace(b))
        .map(|i| i + 1)?;
    if digits_end == at {
        return None;
    }
    let digits_start = bytes[..digits_end]
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);
    if digits_start == digits_end {
        return None;
    }
    let digits = std::str::from_utf8(&bytes[digits_start..digits_end]).ok()?;
    Some(digits.parse().unwrap_or(usize::MAX))
}

/// The first `count` lines of a section body, trimmed.
fn record_lines(body: &str, count: usize) -> impl Iterator<Item = &str> {
    body.trim_matches(is_trim_char)
        .split('\n')
        .take(count)
        .map(|line| line.trim_matches(is_trim_char))
}

fn is_trim_char(c: char) -> bool {
    c.is_ascii() && is_pdf_whitespace(c as u8)
}

fn parse_bfchar(line: &str) -> Option<(u16, String)> {
    let caps = RE_BFCHAR.captures(line)?;
    let code = parse_code(&caps[1])?;
    Some((code, decode_utf16_hex(&caps[2])))
}

fn parse_code(hex: &str) -> Option<u16> {
    u16::from_str_radix(hex, 16).ok()
}

/// Decode hex digits as UTF-16BE code units (4 digits each).
pub(crate) fn decode_utf16_hex(hex: &str) -> String {
    let units: Vec<u16> = hex
        .as_bytes()
        .chunks(4)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .filter_map(|chunk| u16::from_str_radix(chunk, 16).ok())
        .collect();
    String::from_utf16_lossy(&units)
}
