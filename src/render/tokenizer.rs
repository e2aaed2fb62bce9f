//! String tokenizer: turns raw show-text operands into output text.
//!
//! A single pass over the operand text with three states. `<` and `(` open
//! a hex or literal string, `>` closes a hex string and `)` a literal one.
//! Any other character is buffered while a string is open. Inside a literal
//! string `<` and `>` are ordinary characters, and backslash escapes are
//! recognised only there.

use crate::content::TransformationTable;
use crate::parser::{DecodeOptions, QuoteMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    None,
    Hex,
    Literal,
}

/// Render the raw operand text of one text block to a single line.
///
/// The returned line has no trailing newline.
pub fn render_block(raw: &str, table: &TransformationTable, options: &DecodeOptions) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut hex = String::new();
    let mut literal = String::new();
    let mut state = State::None;
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && state == State::Literal {
            let Some(escaped) = chars.next() else {
                break;
            };
            match escaped {
                '\\' | '(' | ')' => literal.push(escaped),
                'n' | 'r' | 't' | 'b' | 'f' => {
                    literal.push('\\');
                    literal.push(escaped);
                }
                '0'..='7' => {
                    let mut code = escaped as u32 - '0' as u32;
                    for _ in 0..2 {
                        match chars.peek() {
                            Some(&d @ '0'..='7') => {
                                code = code * 8 + (d as u32 - '0' as u32);
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                    push_octal(&mut literal, code, options.quote_mode);
                }
                other => {
                    literal.push('\\');
                    literal.push(other);
                }
            }
            continue;
        }

        match (ch, state) {
            ('<', State::Literal) | ('>', State::Literal) => literal.push(ch),
            ('<', _) => {
                state = State::Hex;
                hex.clear();
            }
            ('>', State::Hex) => {
                flush_hex(&mut output, &hex, table, options);
                hex.clear();
                state = State::None;
            }
            ('(', _) => {
                state = State::Literal;
                literal.clear();
            }
            (')', State::Literal) => {
                output.push_str(&literal);
                literal.clear();
                state = State::None;
            }
            // A stray close outside its own string type is ignored.
            ('>', _) | (')', _) => {}
            (_, State::Hex) => hex.push(ch),
            (_, State::Literal) => literal.push(ch),
            (_, State::None) => {}
        }
    }

    output
}

fn push_octal(buffer: &mut String, code: u32, quotes: QuoteMode) {
    match char::from_u32(code) {
        Some('"') if !quotes.decodes_double() => buffer.push_str("&#34;"),
        Some('\'') if !quotes.decodes_single() => buffer.push_str("&#39;"),
        Some(c) => buffer.push(c),
        None => {}
    }
}

/// Decode a hex string body into `output`.
///
/// The digits are cut into codes of the configured width. Each code is
/// looked up in the table; an unmapped code is emitted as the character at
/// that code point. Code 0 and invalid chunks emit nothing.
fn flush_hex(
    output: &mut String,
    hex: &str,
    table: &TransformationTable,
    options: &DecodeOptions,
) {
    let digits: Vec<u8> = hex
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    for chunk in digits.chunks(options.code_width.hex_digits()) {
        let Some(code) = std::str::from_utf8(chunk)
            .ok()
            .and_then(|s| u16::from_str_radix(s, 16).ok())
        else {
            continue;
        };
        if let Some(mapped) = table.get(code) {
            output.push_str(mapped);
        } else if code != 0 {
            if let Some(c) = char::from_u32(u32::from(code)) {
                output.push(c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::CodeWidth;

    fn render(raw: &str) -> String {
        render_block(raw, &TransformationTable::new(), &DecodeOptions::default())
    }

    fn render_with(raw: &str, options: DecodeOptions) -> String {
        render_block(raw, &TransformationTable::new(), &options)
    }

    #[test]
    fn test_literal_string() {
        assert_eq!(render("(Hello)"), "Hello");
        assert_eq!(render("(Hel) -20 (lo)"), "Hello");
    }

    #[test]
    fn test_text_outside_strings_is_ignored() {
        assert_eq!(render("12 Tf (a) 3 (b) TJ"), "ab");
    }

    #[test]
    fn test_escaped_delimiters() {
        assert_eq!(render(r"(a\(b\)c\\d)"), r"a(b)c\d");
    }

    #[test]
    fn test_named_escapes_stay_two_characters() {
        assert_eq!(render(r"(line\nnext\ttab)"), r"line\nnext\ttab");
    }

    #[test]
    fn test_unrecognised_escape_passes_through() {
        assert_eq!(render(r"(He doesn\'t)"), r"He doesn\'t");
    }

    #[test]
    fn test_octal_escape() {
        assert_eq!(render(r"(\050x\051)"), "(x)");
        assert_eq!(render(r"(\101\102C)"), "ABC");
        assert_eq!(render(r"(\7a)"), "\u{7}a");
    }

    #[test]
    fn test_octal_escape_reads_at_most_three_digits() {
        assert_eq!(render(r"(\1011)"), "A1");
    }

    #[test]
    fn test_octal_quotes_follow_quote_mode() {
        let raw = r"(\042q\047)";
        assert_eq!(render(raw), "\"q'");
        assert_eq!(
            render_with(raw, DecodeOptions::new().with_quote_mode(QuoteMode::Double)),
            "\"q&#39;"
        );
        assert_eq!(
            render_with(raw, DecodeOptions::new().with_quote_mode(QuoteMode::None)),
            "&#34;q&#39;"
        );
    }

    #[test]
    fn test_backslash_outside_literal_is_not_an_escape() {
        assert_eq!(render(r"\(x)"), "x");
    }

    #[test]
    fn test_trailing_backslash_is_dropped() {
        assert_eq!(render("(abc\\"), "");
        assert_eq!(render("(abc\\"), render("(abc"));
    }

    #[test]
    fn test_hex_string_without_table() {
        assert_eq!(render("<00480069>"), "Hi");
        assert_eq!(render("<0048 0069>"), "Hi");
    }

    #[test]
    fn test_hex_string_with_table() {
        let mut table = TransformationTable::new();
        table.insert(0x0041, "B");
        let out = render_block("<0041><0043>", &table, &DecodeOptions::default());
        assert_eq!(out, "BC");
    }

    #[test]
    fn test_hex_string_range_mapping() {
        let mut table = TransformationTable::new();
        table.extend_from_cmap(b"1 beginbfrange\n<0010> <0012> [<0041> <0042> <0043>]\nendbfrange");
        let out = render_block("<001000110012>", &table, &DecodeOptions::default());
        assert_eq!(out, "ABC");
    }

    #[test]
    fn test_single_byte_codes() {
        let options = DecodeOptions::new().with_code_width(CodeWidth::Single);
        assert_eq!(render_with("<4869>", options), "Hi");

        let mut table = TransformationTable::new();
        table.insert(0x0003, "x");
        assert_eq!(render_block("<0341>", &table, &options), "xA");
    }

    #[test]
    fn test_short_final_chunk_is_left_padded() {
        assert_eq!(render("<0048041>"), "HA");
    }

    #[test]
    fn test_zero_code_and_empty_hex_emit_nothing() {
        assert_eq!(render("<0000>"), "");
        assert_eq!(render("<>"), "");
    }

    #[test]
    fn test_angle_brackets_inside_literal() {
        assert_eq!(render("(x > y)"), "x > y");
        assert_eq!(render("(a < b) (c)"), "a < bc");
    }

    #[test]
    fn test_close_paren_keeps_pending_hex() {
        assert_eq!(render("<00)41>"), "A");
        assert_eq!(render("<0041)>"), "A");
    }

    #[test]
    fn test_mixed_hex_and_literal() {
        assert_eq!(render("(A) <0042> (C)"), "ABC");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }
}
