//! Stream filter codecs.
//!
//! Only the three filters that carry text content in practice are
//! supported:
//! - ASCIIHexDecode - hexadecimal encoding
//! - ASCII85Decode - base-85 encoding
//! - FlateDecode - zlib compression
//!
//! Any other filter name is treated as a passthrough by the stream decoder.
//! Filters chain: the output of one is the input of the next.

mod ascii85;
mod ascii_hex;
mod flate;

pub use ascii85::{decode_ascii85, encode_ascii85};
pub use ascii_hex::{decode_ascii_hex, encode_ascii_hex};
pub use flate::decode_flate;

use crate::error::Result;

/// A stream filter this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// ASCIIHexDecode (hexadecimal encoding)
    AsciiHex,
    /// ASCII85Decode (base-85 encoding)
    Ascii85,
    /// FlateDecode (zlib compression)
    Flate,
}

impl Filter {
    /// Look up a filter by its PDF name (without the leading `/`).
    ///
    /// Returns `None` for names we do not decode.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ASCIIHexDecode" => Some(Filter::AsciiHex),
            "ASCII85Decode" => Some(Filter::Ascii85),
            "FlateDecode" => Some(Filter::Flate),
            _ => None,
        }
    }

    /// The PDF name of this filter.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::AsciiHex => "ASCIIHexDecode",
            Filter::Ascii85 => "ASCII85Decode",
            Filter::Flate => "FlateDecode",
        }
    }

    /// Decode `input` with this filter.
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Filter::AsciiHex => decode_ascii_hex(input),
            Filter::Ascii85 => decode_ascii85(input),
            Filter::Flate => decode_flate(input),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apply `filters` to `data` in order.
///
/// The first failing filter aborts the chain.
pub fn decode_chain(data: &[u8], filters: &[Filter]) -> Result<Vec<u8>> {
    let mut current = data.to_vec();
    for filter in filters {
        current = filter.decode(&current)?;
        log::trace!("{} produced {} bytes", filter, current.len());
    }
    Ok(current)
}

/// Whitespace bytes skipped by the ASCII codecs.
pub(crate) fn is_codec_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_name() {
        assert_eq!(Filter::from_name("FlateDecode"), Some(Filter::Flate));
        assert_eq!(Filter::from_name("ASCIIHexDecode"), Some(Filter::AsciiHex));
        assert_eq!(Filter::from_name("ASCII85Decode"), Some(Filter::Ascii85));
        assert_eq!(Filter::from_name("LZWDecode"), None);
        assert_eq!(Filter::from_name("flatedecode"), None);
    }

    #[test]
    fn test_chain_hex_then_ascii85() {
        let a85 = encode_ascii85(b"Hello World");
        let hex = encode_ascii_hex(&a85);
        let out = decode_chain(&hex, &[Filter::AsciiHex, Filter::Ascii85]).unwrap();
        assert_eq!(out, b"Hello World");
    }

    #[test]
    fn test_chain_empty_is_identity() {
        let out = decode_chain(b"raw bytes", &[]).unwrap();
        assert_eq!(out, b"raw bytes");
    }

    #[test]
    fn test_chain_stops_on_failure() {
        assert!(decode_chain(b"zz", &[Filter::AsciiHex, Filter::Flate]).is_err());
    }
}
