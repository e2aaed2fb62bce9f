//! ASCIIHexDecode implementation.
//!
//! Each pair of hex digits becomes one byte. Decoding stops at `>`.
//! Whitespace and `%` comments (to end of line) are skipped, and an odd
//! trailing digit is padded with a zero low nibble.

use super::is_codec_whitespace;
use crate::error::{Error, Result};

/// Decode ASCIIHex-encoded data.
///
/// A byte that is neither a hex digit, whitespace, nor part of a comment
/// fails the whole decode.
pub fn decode_ascii_hex(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len() / 2);
    let mut high: Option<u8> = None;
    let mut in_comment = false;

    for &byte in input {
        if in_comment {
            if byte == b'\r' || byte == b'\n' {
                in_comment = false;
            }
            continue;
        }

        match byte {
            b'>' => break,
            b'%' => in_comment = true,
            _ if is_codec_whitespace(byte) => {}
            _ => {
                let nibble = hex_digit_to_value(byte).ok_or_else(|| {
                    Error::Decode(format!(
                        "ASCIIHexDecode: invalid hex digit '{}'",
                        byte as char
                    ))
                })?;

                match high.take() {
                    Some(h) => output.push((h << 4) | nibble),
                    None => high = Some(nibble),
                }
            }
        }
    }

    if let Some(h) = high {
        output.push(h << 4);
    }

    Ok(output)
}

/// Encode bytes as uppercase hex pairs followed by the `>` terminator.
pub fn encode_ascii_hex(input: &[u8]) -> Vec<u8> {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut output = Vec::with_capacity(input.len() * 2 + 1);
    for &byte in input {
        output.push(DIGITS[(byte >> 4) as usize]);
        output.push(DIGITS[(byte & 0x0F) as usize]);
    }
    output.push(b'>');
    output
}

/// Convert a hexadecimal ASCII character to its numeric value.
pub(crate) fn hex_digit_to_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_hex_decode_simple() {
        let output = decode_ascii_hex(b"48656C6C6F>").unwrap();
        assert_eq!(output, b"Hello");
    }

    #[test]
    fn test_ascii_hex_decode_lowercase_and_whitespace() {
        let output = decode_ascii_hex(b"48 65\n6c\t6c\r6f >").unwrap();
        assert_eq!(output, b"Hello");
    }

    #[test]
    fn test_ascii_hex_decode_odd_length() {
        let output = decode_ascii_hex(b"486>").unwrap();
        assert_eq!(output, vec![0x48, 0x60]);
    }

    #[test]
    fn test_ascii_hex_decode_stops_at_terminator() {
        let output = decode_ascii_hex(b"4142>4344").unwrap();
        assert_eq!(output, b"AB");
    }

    #[test]
    fn test_ascii_hex_decode_skips_comments() {
        let output = decode_ascii_hex(b"41 % ignored ZZ\n42>").unwrap();
        assert_eq!(output, b"AB");
    }

    #[test]
    fn test_ascii_hex_decode_invalid_digit() {
        assert!(decode_ascii_hex(b"41G2>").is_err());
    }

    #[test]
    fn test_ascii_hex_decode_without_terminator() {
        let output = decode_ascii_hex(b"4142").unwrap();
        assert_eq!(output, b"AB");
    }

    #[test]
    fn test_ascii_hex_encode() {
        assert_eq!(encode_ascii_hex(b"\x00\xffA"), b"00FF41>".to_vec());
        assert_eq!(encode_ascii_hex(b""), b">".to_vec());
    }

    proptest! {
        #[test]
        fn ascii_hex_round_trip(data in prop::collection::vec(any::<u8>(), 0..512)) {
            let encoded = encode_ascii_hex(&data);
            prop_assert_eq!(decode_ascii_hex(&encoded).unwrap(), data);
        }
    }
}
