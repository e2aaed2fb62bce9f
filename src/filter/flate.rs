//! FlateDecode (zlib) implementation.

use crate::error::{Error, Result};
use flate2::{Decompress, FlushDecompress, Status};

/// Inflate zlib-wrapped deflate data.
///
/// The stream must reach its end marker: truncated or corrupt input is an
/// error and any partial output is discarded.
pub fn decode_flate(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Decompress::new(true);
    let mut output = Vec::with_capacity(input.len().saturating_mul(4).max(256));

    loop {
        if output.len() == output.capacity() {
            output.reserve(output.capacity());
        }

        let before_in = decoder.total_in();
        let before_out = decoder.total_out();
        let consumed = before_in as usize;

        let status = decoder
            .decompress_vec(&input[consumed..], &mut output, FlushDecompress::Finish)
            .map_err(|e| Error::Decode(format!("FlateDecode: {}", e)))?;

        match status {
            Status::StreamEnd => return Ok(output),
            _ if decoder.total_in() == before_in && decoder.total_out() == before_out => {
                return Err(Error::Decode(
                    "FlateDecode: unexpected end of compressed data".to_string(),
                ));
            }
            _ => {}
        }
    }
}
