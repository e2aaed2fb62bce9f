//! Show-text operand extraction from a text object body.

use crate::parser::scanner::{is_pdf_delimiter, is_pdf_whitespace};

/// One way of locating show-text operands.
struct ShowPattern {
    open: u8,
    close: u8,
    /// Operand must follow a `Td`/`Tw`/`Tm`/`Tf` operator
    positioned: bool,
    operator: &'static [u8],
    /// Keep the bracket or parenthesis around the captured operand
    keep_delimiters: bool,
}

/// Patterns in priority order. Only the first that matches is used.
const PATTERNS: [ShowPattern; 5] = [
    // [ ... ] TJ
    ShowPattern {
        open: b'[',
        close: b']',
        positioned: false,
        operator: b"TJ",
        keep_delimiters: false,
    },
    // Td ( ... ) Tj
    ShowPattern {
        open: b'(',
        close: b')',
        positioned: true,
        operator: b"Tj",
        keep_delimiters: true,
    },
    // Td [ ... ] Tj
    ShowPattern {
        open: b'[',
        close: b']',
        positioned: true,
        operator: b"Tj",
        keep_delimiters: true,
    },
    // ( ... ) Tj with no positioning operator before it
    ShowPattern {
        open: b'(',
        close: b')',
        positioned: false,
        operator: b"Tj",
        keep_delimiters: true,
    },
    // < ... > Tj
    ShowPattern {
        open: b'<',
        close: b'>',
        positioned: false,
        operator: b"Tj",
        keep_delimiters: true,
    },
];

/// Extract the raw operand text of the show-text operators in a text
/// object body.
///
/// Returns the concatenated operands of every match of the first pattern
/// that matches at all, or `None` when no pattern matches. Operators are
/// matched case-insensitively.
pub fn extract_show_text(block: &[u8]) -> Option<Vec<u8>> {
    PATTERNS.iter().find_map(|pattern| {
        let operands = pattern.find_all(block);
        if operands.is_empty() {
            None
        } else {
            Some(operands.concat())
        }
    })
}

impl ShowPattern {
    fn find_all<'a>(&self, block: &'a [u8]) -> Vec<&'a [u8]> {
        let mut found = Vec::new();
        let mut pos = 0;

        while let Some(open_at) = self.find_open(block, pos) {
            // No close after this opening means none after any later one.
            let Some((close_at, end)) = self.find_close(block, open_at + 1) else {
                break;
            };
            if self.keep_delimiters {
                found.push(&block[open_at..=close_at]);
            } else {
                found.push(&block[open_at + 1..close_at]);
            }
            pos = end;
        }

        found
    }

    fn find_open(&self, block: &[u8], from: usize) -> Option<usize> {
        if !self.positioned {
            return block
                .get(from..)?
                .iter()
                .position(|&b| b == self.open)
                .map(|i| from + i);
        }

        (from..block.len().saturating_sub(1)).find_map(|i| {
            if !block[i].eq_ignore_ascii_case(&b'T')
                || !matches!(block[i + 1].to_ascii_lowercase(), b'd' | b'w' | b'm' | b'f')
            {
                return None;
            }
            let at = skip_spaces(block, i + 2);
            (block.get(at) == Some(&self.open)).then_some(at)
        })
    }

    /// Find the first closing byte followed by optional whitespace and the
    /// operator. Returns the closing position and the end of the operator.
    fn find_close(&self, block: &[u8], from: usize) -> Option<(usize, usize)> {
        (from..block.len()).find_map(|c| {
            if block[c] != self.close {
                return None;
            }
            let op_at = skip_spaces(block, c + 1);
            let op_end = op_at + self.operator.len();
            let op = block.get(op_at..op_end)?;
            let boundary = block
                .get(op_end)
                .map_or(true, |&b| is_pdf_whitespace(b) || is_pdf_delimiter(b));
            (op.eq_ignore_ascii_case(self.operator) && boundary).then_some((c, op_end))
        })
    }
}

fn skip_spaces(data: &[u8], from: usize) -> usize {
    data.get(from..)
        .and_then(|rest| rest.iter().position(|&b| !is_pdf_whitespace(b)))
        .map_or(data.len(), |i| from + i)
}
