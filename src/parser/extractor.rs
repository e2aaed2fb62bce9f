//! Text extraction pipeline.
//!
//! Extraction runs in two passes. The first scans every object, decodes its
//! stream and either collects the raw show-text operands of its text
//! objects or feeds it to the character map builder. The second renders
//! the collected operands against the finished transformation table, so a
//! character map stored after the text that uses it still applies.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::content::{classify, extract_show_text, StreamContent, TransformationTable};
use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{Document, ExtractionStats, TextBlock};
use crate::render::tokenizer::render_block;

use super::dictionary::StreamDictionary;
use super::options::DecodeOptions;
use super::scanner::{scan_objects, stream_payload};
use super::stream::decode_stream;

/// Extracts text from PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    options: DecodeOptions,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Get the decode options.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Extract text from a reader.
    pub fn extract_reader<R: Read>(&self, mut reader: R) -> Result<Document> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(self.extract_bytes(&data))
    }

    /// Extract text from the bytes of a PDF file.
    ///
    /// Never fails: objects whose streams cannot be decoded are skipped and
    /// input without any text objects yields an empty document.
    pub fn extract_bytes(&self, data: &[u8]) -> Document {
        let mut document = Document::new();
        match detect_format_from_bytes(data) {
            Ok(format) => document.version = Some(format.version),
            Err(e) => log::warn!("Input has no usable PDF header ({}), scanning anyway", e),
        }

        let mut stats = ExtractionStats::default();
        let mut table = TransformationTable::new();
        let mut raw_blocks = Vec::new();

        for (index, object) in scan_objects(data).enumerate() {
            stats.object_count += 1;

            let Some(payload) = stream_payload(object) else {
                continue;
            };
            stats.stream_count += 1;

            let dict = StreamDictionary::parse(object);
            let decoded = match decode_stream(payload, &dict) {
                Ok(Some(decoded)) => decoded,
                Ok(None) => {
                    log::debug!("Object {}: skipping non-content stream", index);
                    stats.skipped_streams += 1;
                    continue;
                }
                Err(e) => {
                    log::warn!("Object {}: failed to decode stream: {}", index, e);
                    stats.failed_streams += 1;
                    continue;
                }
            };

            match classify(&decoded) {
                StreamContent::Text(bodies) => {
                    stats.text_streams += 1;
                    let before = raw_blocks.len();
                    raw_blocks.extend(
                        bodies
                            .into_iter()
                            .filter_map(extract_show_text)
                            .map(|raw| latin1(&raw)),
                    );
                    log::debug!(
                        "Object {}: {} text blocks",
                        index,
                        raw_blocks.len() - before
                    );
                }
                StreamContent::CharMap(cmap) => {
                    stats.cmap_streams += 1;
                    let written = table.extend_from_cmap(cmap);
                    if written > 0 {
                        log::debug!("Object {}: {} character mappings", index, written);
                    }
                }
            }
        }

        document.blocks = raw_blocks
            .into_iter()
            .map(|raw| {
                let mut block = TextBlock::new(raw);
                block.text = render_block(&block.raw, &table, &self.options);
                block
            })
            .collect();

        stats.block_count = document.blocks.len();
        stats.transformation_count = table.len();
        document.stats = stats;

        log::info!(
            "Extracted {} text blocks from {} objects ({} mappings)",
            stats.block_count,
            stats.object_count,
            stats.transformation_count
        );

        document
    }
}

/// Read bytes as ISO-8859-1, one character per byte.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// File-based text extractor.
///
/// # Example
///
/// ```no_run
/// use pdf2text::Pdf2Text;
///
/// let extractor = Pdf2Text::new(Some("document.pdf")).unwrap();
/// print!("{}", extractor.decode());
/// ```
#[derive(Debug, Clone)]
pub struct Pdf2Text {
    path: PathBuf,
    extractor: Extractor,
}

impl Pdf2Text {
    /// Create an extractor for a file.
    ///
    /// Fails with [`Error::NoInput`] when no filename (or an empty one) is
    /// given. The file itself is not opened until decoding.
    pub fn new<P: AsRef<Path>>(filename: Option<P>) -> Result<Self> {
        let path = filename
            .map(|p| p.as_ref().to_path_buf())
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(Error::NoInput)?;

        Ok(Self {
            path,
            extractor: Extractor::new(),
        })
    }

    /// Replace the decode options.
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.extractor = Extractor::with_options(options);
        self
    }

    /// Get the input path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the decode options.
    pub fn options(&self) -> &DecodeOptions {
        self.extractor.options()
    }

    /// Read and extract the file, surfacing I/O errors.
    pub fn try_extract(&self) -> Result<Document> {
        let data = fs::read(&self.path)?;
        Ok(self.extractor.extract_bytes(&data))
    }

    /// Read and extract the file. An unreadable file yields an empty
    /// document.
    pub fn extract(&self) -> Document {
        self.try_extract().unwrap_or_else(|e| {
            log::warn!("Cannot read {}: {}", self.path.display(), e);
            Document::new()
        })
    }

    /// Decode the file to text, surfacing I/O errors.
    pub fn try_decode(&self) -> Result<String> {
        self.try_extract().map(|doc| doc.plain_text())
    }

    /// Decode the file to text: one newline-terminated line per text block.
    /// An unreadable file yields an empty string.
    pub fn decode(&self) -> String {
        self.extract().plain_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{encode_ascii85, encode_ascii_hex};

    fn object(number: usize, dict: &str, stream: &[u8]) -> Vec<u8> {
        let mut out = format!("{} 0 obj\n{}\nstream\n", number, dict).into_bytes();
        out.extend_from_slice(stream);
        out.extend_from_slice(b"\nendstream\nendobj\n");
        out
    }

    fn pdf(objects: &[Vec<u8>]) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n".to_vec();
        for object in objects {
            out.extend_from_slice(object);
        }
        out.extend_from_slice(b"trailer\n<< /Root 1 0 R >>\n%%EOF\n");
        out
    }

    #[test]
    fn test_single_text_object() {
        let data = pdf(&[object(1, "<< /Length 16 >>", b"BT (Hello) Tj ET")]);
        let doc = Extractor::new().extract_bytes(&data);

        assert_eq!(doc.plain_text(), "Hello\n");
        assert_eq!(doc.version.as_deref(), Some("1.4"));
        assert_eq!(doc.blocks[0].raw, "(Hello)");
        assert_eq!(doc.stats.object_count, 1);
        assert_eq!(doc.stats.text_streams, 1);
    }

    #[test]
    fn test_cmap_after_text_still_applies() {
        let data = pdf(&[
            object(1, "<< /Length 22 >>", b"BT\n1 0 Td [<0041>] TJ\nET"),
            object(
                2,
                "<< /Length 40 >>",
                b"1 beginbfchar\n<0041> <0042>\nendbfchar",
            ),
        ]);
        let doc = Extractor::new().extract_bytes(&data);

        assert_eq!(doc.plain_text(), "B\n");
        assert_eq!(doc.stats.cmap_streams, 1);
        assert_eq!(doc.stats.transformation_count, 1);
    }

    #[test]
    fn test_filtered_streams() {
        let hex = encode_ascii_hex(b"BT\n(hex) Tj\nET\n");
        let a85 = encode_ascii85(b"BT\n(a85) Tj\nET\n");
        let data = pdf(&[
            object(1, "<< /Filter /ASCIIHexDecode >>", &hex),
            object(2, "<< /Filter /ASCII85Decode >>", &a85),
        ]);
        let doc = Extractor::new().extract_bytes(&data);

        assert_eq!(doc.plain_text(), "hex\na85\n");
    }

    #[test]
    fn test_failed_and_skipped_streams_do_not_stop_extraction() {
        let data = pdf(&[
            object(1, "<< /Filter /FlateDecode >>", b"definitely not zlib"),
            object(2, "<< /Subtype /Image /Length 3 >>", b"BT (img) Tj ET"),
            object(3, "<< >>", b"BT (kept) Tj ET"),
        ]);
        let doc = Extractor::new().extract_bytes(&data);

        assert_eq!(doc.plain_text(), "kept\n");
        assert_eq!(doc.stats.failed_streams, 1);
        assert_eq!(doc.stats.skipped_streams, 1);
        assert_eq!(doc.stats.stream_count, 3);
    }

    #[test]
    fn test_text_object_without_show_operator_adds_no_line() {
        let data = pdf(&[object(1, "<< >>", b"BT /F1 12 Tf ET\nBT (x) Tj ET")]);
        let doc = Extractor::new().extract_bytes(&data);
        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.plain_text(), "x\n");
    }

    #[test]
    fn test_matched_but_empty_block_emits_empty_line() {
        let data = pdf(&[object(1, "<< >>", b"BT [] TJ ET\nBT (y) Tj ET")]);
        let doc = Extractor::new().extract_bytes(&data);
        assert_eq!(doc.plain_text(), "\ny\n");
    }

    #[test]
    fn test_input_without_header() {
        let doc = Extractor::new().extract_bytes(b"just some bytes");
        assert!(doc.is_empty());
        assert_eq!(doc.version, None);
    }

    #[test]
    fn test_new_without_filename() {
        assert!(matches!(Pdf2Text::new(None::<&str>), Err(Error::NoInput)));
        assert!(matches!(Pdf2Text::new(Some("")), Err(Error::NoInput)));
    }

    #[test]
    fn test_missing_file_decodes_to_empty() {
        let extractor = Pdf2Text::new(Some("/nonexistent/input.pdf")).unwrap();
        assert_eq!(extractor.decode(), "");
        assert!(matches!(extractor.try_decode(), Err(Error::Io(_))));
    }
}
