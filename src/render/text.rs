//! Plain text rendering.

use crate::model::Document;

/// Convert a document to plain text: one newline-terminated line per text
/// block, in extraction order.
pub fn to_text(doc: &Document) -> String {
    doc.plain_text()
}
