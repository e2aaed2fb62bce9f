//! Decoding options and configuration.

use serde::{Deserialize, Serialize};

/// Options for decoding PDF text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Which quote characters octal escapes may produce
    pub quote_mode: QuoteMode,

    /// Width of a character code inside hex strings
    pub code_width: CodeWidth,
}

impl DecodeOptions {
    /// Create new decode options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quote mode.
    pub fn with_quote_mode(mut self, mode: QuoteMode) -> Self {
        self.quote_mode = mode;
        self
    }

    /// Set the hex-string code width.
    pub fn with_code_width(mut self, width: CodeWidth) -> Self {
        self.code_width = width;
        self
    }

    /// Select 4-digit (`true`) or 2-digit (`false`) hex codes.
    pub fn multibyte(mut self, multibyte: bool) -> Self {
        self.code_width = if multibyte {
            CodeWidth::Double
        } else {
            CodeWidth::Single
        };
        self
    }

    /// Use 2-digit hex codes.
    pub fn single_byte(self) -> Self {
        self.multibyte(false)
    }
}

/// Which quote characters octal escapes in literal strings are decoded to.
///
/// A quote that is not decoded is emitted as its numeric entity
/// (`&#34;` or `&#39;`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// Leave both quote characters encoded
    None,
    /// Decode double quotes only
    Double,
    /// Decode double and single quotes
    #[default]
    Both,
}

impl QuoteMode {
    /// Whether `"` is decoded.
    pub fn decodes_double(&self) -> bool {
        matches!(self, QuoteMode::Double | QuoteMode::Both)
    }

    /// Whether `'` is decoded.
    pub fn decodes_single(&self) -> bool {
        matches!(self, QuoteMode::Both)
    }
}

/// Number of hex digits forming one character code in a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeWidth {
    /// One byte per code (2 hex digits)
    Single,
    /// Two bytes per code (4 hex digits)
    #[default]
    Double,
}

impl CodeWidth {
    /// Hex digits per code.
    pub fn hex_digits(&self) -> usize {
        match self {
            CodeWidth::Single => 2,
            CodeWidth::Double => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_options_builder() {
        let options = DecodeOptions::new()
            .with_quote_mode(QuoteMode::Double)
            .single_byte();

        assert_eq!(options.quote_mode, QuoteMode::Double);
        assert_eq!(options.code_width, CodeWidth::Single);
        assert_eq!(options.code_width.hex_digits(), 2);
    }

    #[test]
    fn test_default_options() {
        let options = DecodeOptions::default();
        assert_eq!(options.quote_mode, QuoteMode::Both);
        assert_eq!(options.code_width.hex_digits(), 4);
    }

    #[test]
    fn test_multibyte_toggle() {
        let options = DecodeOptions::new().multibyte(false).multibyte(true);
        assert_eq!(options.code_width, CodeWidth::Double);
    }

    #[test]
    fn test_quote_mode_flags() {
        assert!(!QuoteMode::None.decodes_double());
        assert!(!QuoteMode::None.decodes_single());
        assert!(QuoteMode::Double.decodes_double());
        assert!(!QuoteMode::Double.decodes_single());
        assert!(QuoteMode::Both.decodes_double());
        assert!(QuoteMode::Both.decodes_single());
    }
}
