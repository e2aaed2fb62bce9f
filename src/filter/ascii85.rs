//! ASCII85Decode (base-85) implementation.
//!
//! Every 5 characters in the range `!`..=`u` encode 4 bytes. A lone `z` at
//! a group boundary stands for 4 zero bytes, and `~` ends the data.

use super::is_codec_whitespace;
use crate::error::{Error, Result};

/// Value of the highest digit (`u`), used to pad a short final group.
const MAX_DIGIT: u8 = b'u' - b'!';

/// Decode ASCII85-encoded data.
///
/// A final group of 2-4 characters yields one byte fewer than its length.
/// A final group of a single character is an error, as is any character
/// outside `!`..=`u` (other than whitespace, comments and `z`).
pub fn decode_ascii85(input: &[u8]) -> Result<Vec<u8>> {
    let input = strip_leading_delimiter(input);
    let mut output = Vec::with_capacity(input.len() * 4 / 5 + 4);
    let mut group = [0u8; 5];
    let mut count = 0usize;
    let mut in_comment = false;

    for &byte in input {
        if in_comment {
            if byte == b'\r' || byte == b'\n' {
                in_comment = false;
            }
            continue;
        }

        match byte {
            b'~' => break,
            b'%' => in_comment = true,
            _ if is_codec_whitespace(byte) => {}
            b'z' if count == 0 => output.extend_from_slice(&[0, 0, 0, 0]),
            b'!'..=b'u' => {
                group[count] = byte - b'!';
                count += 1;

                if count == 5 {
                    output.extend_from_slice(&group_value(&group)?.to_be_bytes());
                    count = 0;
                }
            }
            _ => {
                return Err(Error::Decode(format!(
                    "ASCII85Decode: invalid character '{}'",
                    byte as char
                )));
            }
        }
    }

    match count {
        0 => {}
        1 => {
            return Err(Error::Decode(
                "ASCII85Decode: final group has a single character".to_string(),
            ));
        }
        _ => {
            group[count..].fill(MAX_DIGIT);
            let bytes = group_value(&group)?.to_be_bytes();
            output.extend_from_slice(&bytes[..count - 1]);
        }
    }

    Ok(output)
}

/// Encode bytes as ASCII85 followed by the `~>` terminator.
pub fn encode_ascii85(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len() * 5 / 4 + 7);

    for chunk in input.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        let mut value = u32::from_be_bytes(word);

        if chunk.len() == 4 && value == 0 {
            output.push(b'z');
            continue;
        }

        let mut digits = [0u8; 5];
        for digit in digits.iter_mut().rev() {
            *digit = (value % 85) as u8 + b'!';
            value /= 85;
        }
        output.extend_from_slice(&digits[..chunk.len() + 1]);
    }

    output.extend_from_slice(b"~>");
    output
}

fn group_value(group: &[u8; 5]) -> Result<u32> {
    let value = group
        .iter()
        .fold(0u64, |acc, &digit| acc * 85 + u64::from(digit));
    u32::try_from(value)
        .map_err(|_| Error::Decode("ASCII85Decode: group value overflows 32 bits".to_string()))
}

/// Skip an optional `<~` prefix (after leading whitespace).
fn strip_leading_delimiter(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|&b| !is_codec_whitespace(b))
        .unwrap_or(input.len());
    match input[start..].strip_prefix(b"<~") {
        Some(rest) => rest,
        None => input,
    }
}
