//! PDF parsing module.
//!
//! Objects are found by scanning the raw bytes for `obj ... endobj` spans;
//! no cross-reference table is read. Each object's stream is decoded with
//! the filters its dictionary names.

mod dictionary;
mod extractor;
mod options;
pub(crate) mod scanner;
mod stream;

pub use dictionary::{DictValue, StreamDictionary};
pub use extractor::{Extractor, Pdf2Text};
pub use options::{CodeWidth, DecodeOptions, QuoteMode};
pub use scanner::{scan_objects, stream_payload, ObjectScanner};
pub use stream::decode_stream;
