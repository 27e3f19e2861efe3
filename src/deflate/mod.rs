//! Streaming deflate encoder
//!
//! This module provides the single-pass compressor: a fixed-size hash table
//! proposes one back-reference candidate per input position, literals and
//! matches are coded with the fixed Huffman tables of RFC 1951, and the
//! [`Stream`] state machine sequences headers, blocks and trailers across
//! any number of `encode` calls.

mod bits;
mod encoder;
mod hash;
mod state;
mod writer;

pub use bits::BitWriter;
pub use hash::{HashTable, Match};
pub use state::Stream;
pub use writer::{SlzWriter, DEFAULT_CHUNK_SIZE};

use crate::common::{max_encoded_len, Format, Level, Result, MAX_TRAILER_LEN};

/// Convenience function to compress data in memory
pub fn compress_bytes(data: &[u8], level: Level, format: Format) -> Result<Vec<u8>> {
    let mut stream = Stream::new(level, format);
    let mut output = vec![0u8; max_encoded_len(data.len()) + MAX_TRAILER_LEN];

    let written = stream.encode(&mut output, data, false)?;
    let trailer = stream.finish(&mut output[written..])?;
    output.truncate(written + trailer);

    Ok(output)
}
