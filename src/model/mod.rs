//! Document model for extracted text.
//!
//! An extraction produces an ordered list of text blocks, one per text
//! object that carried show-text operands, plus counters describing what the
//! scan encountered.

mod document;

pub use document::{Document, ExtractionStats, TextBlock};
