//! Rendering module for converting extracted documents to output formats.

mod json;
mod text;
pub mod tokenizer;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
pub use tokenizer::render_block;
