//! Stream decoding: apply the filters named in a stream dictionary.

use super::dictionary::StreamDictionary;
use crate::error::Result;
use crate::filter::decode_chain;

/// Decode a raw stream payload according to its dictionary.
///
/// Returns `Ok(None)` when the dictionary marks a non-content stream (font
/// files, images, typed objects); such streams are never decoded. When the
/// dictionary declares no `Filter`, the payload is returned unchanged.
/// Otherwise the payload is cut to a direct `Length` (if any) and run
/// through the declared filters in order.
pub fn decode_stream(payload: &[u8], dict: &StreamDictionary) -> Result<Option<Vec<u8>>> {
    if dict.is_non_content() {
        return Ok(None);
    }

    let filters = dict.filters();
    if filters.is_empty() {
        return Ok(Some(payload.to_vec()));
    }

    let payload = match dict.length() {
        Some(length) if length < payload.len() => &payload[..length],
        _ => payload,
    };

    decode_chain(payload, &filters).map(Some)
}
