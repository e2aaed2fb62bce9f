//! # pdf2text
//!
//! Lightweight PDF text extraction.
//!
//! The extractor does not build a PDF object model. It scans the raw file
//! for objects, decodes their streams (ASCIIHex, ASCII85 and Flate), pulls
//! the operands of the show-text operators out of every `BT ... ET` text
//! object and renders them to text, applying any `bfchar` / `bfrange`
//! character maps found anywhere in the file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2text::Pdf2Text;
//!
//! fn main() -> pdf2text::Result<()> {
//!     let extractor = Pdf2Text::new(Some("document.pdf"))?;
//!     print!("{}", extractor.decode());
//!     Ok(())
//! }
//! ```
//!
//! ## Behaviour
//!
//! - One output line per text object, in file order
//! - Streams that fail to decode are skipped, never fatal
//! - Fonts, images and other typed streams are never decoded
//! - No cross-reference, encryption or object stream support

pub mod content;
pub mod detect;
pub mod error;
pub mod filter;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use content::TransformationTable;
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_pdf, is_pdf_bytes, PdfFormat,
};
pub use error::{Error, Result};
pub use model::{Document, ExtractionStats, TextBlock};
pub use parser::{CodeWidth, DecodeOptions, Extractor, Pdf2Text, QuoteMode};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Decode a PDF file to text with default options.
///
/// Unlike [`Pdf2Text::decode`], an unreadable file is reported as an error.
///
/// # Example
///
/// ```no_run
/// use pdf2text::decode_file;
///
/// let text = decode_file("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<String> {
    decode_file_with_options(path, DecodeOptions::default())
}

/// Decode a PDF file to text with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf2text::{decode_file_with_options, DecodeOptions, QuoteMode};
///
/// let options = DecodeOptions::new()
///     .with_quote_mode(QuoteMode::None)
///     .single_byte();
/// let text = decode_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn decode_file_with_options<P: AsRef<Path>>(path: P, options: DecodeOptions) -> Result<String> {
    Pdf2Text::new(Some(path))?.with_options(options).try_decode()
}

/// Decode a PDF held in memory.
pub fn decode_bytes(data: &[u8]) -> String {
    decode_bytes_with_options(data, DecodeOptions::default())
}

/// Decode a PDF held in memory with custom options.
pub fn decode_bytes_with_options(data: &[u8], options: DecodeOptions) -> String {
    Extractor::with_options(options).extract_bytes(data).plain_text()
}

/// Decode a PDF from a reader.
///
/// # Example
///
/// ```no_run
/// use pdf2text::decode_reader;
/// use std::fs::File;
///
/// let file = File::open("document.pdf").unwrap();
/// let text = decode_reader(file).unwrap();
/// ```
pub fn decode_reader<R: Read>(reader: R) -> Result<String> {
    Extractor::new()
        .extract_reader(reader)
        .map(|doc| doc.plain_text())
}

/// Extract the structured document from a PDF file.
pub fn extract_file<P: AsRef<Path>>(path: P, options: DecodeOptions) -> Result<Document> {
    Pdf2Text::new(Some(path))?.with_options(options).try_extract()
}

/// Convert a PDF file to JSON.
///
/// # Example
///
/// ```no_run
/// use pdf2text::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = extract_file(path, DecodeOptions::default())?;
    render::to_json(&doc, format)
}
