//! Document-level types.

use serde::{Deserialize, Serialize};

/// The text extracted from one PDF file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Version from the `%PDF-x.y` header, when present
    pub version: Option<String>,

    /// Text blocks in stream-encounter order
    pub blocks: Vec<TextBlock>,

    /// Counters collected during extraction
    pub stats: ExtractionStats,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text block.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Get the number of text blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no text blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the decoded text: every block's line, each terminated by a
    /// newline. Blocks that rendered to nothing still contribute an empty
    /// line.
    pub fn plain_text(&self) -> String {
        let capacity = self.blocks.iter().map(|b| b.text.len() + 1).sum();
        self.blocks
            .iter()
            .fold(String::with_capacity(capacity), |mut out, block| {
                out.push_str(&block.text);
                out.push('\n');
                out
            })
    }
}

/// One text object's show-text operands and their rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Operand text as extracted, before tokenizing
    pub raw: String,

    /// Rendered line, without the trailing newline
    pub text: String,
}

impl TextBlock {
    /// Create a block from raw operand text, not yet rendered.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            text: String::new(),
        }
    }
}

/// What the extractor saw while scanning a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// `obj ... endobj` spans found
    pub object_count: usize,
    /// Objects carrying a stream payload
    pub stream_count: usize,
    /// Streams not decoded because their dictionary marks them as fonts,
    /// images or typed objects
    pub skipped_streams: usize,
    /// Streams whose filters failed to decode
    pub failed_streams: usize,
    /// Streams holding text objects
    pub text_streams: usize,
    /// Streams handed to the character map builder
    pub cmap_streams: usize,
    /// Text blocks collected
    pub block_count: usize,
    /// Codes in the final transformation table
    pub transformation_count: usize,
}
