//! slz - single-pass streaming deflate, zlib and gzip compression
//!
//! This crate provides a bounded-memory compressor producing standard raw
//! deflate (RFC 1951), zlib (RFC 1950) and gzip (RFC 1952) streams. It never
//! buffers the whole input: each call to [`Stream::encode`] compresses the
//! slice it is given and writes the result straight into the caller's buffer,
//! which makes it suitable for inline use on a send path.
//!
//! # Features
//!
//! - Fixed Huffman coding with a single-candidate LZ77 hash table (8 K slots)
//! - Stored blocks for incompressible runs and for level 0
//! - Resumable: any number of `encode` calls, bit-exact across boundaries
//! - Bounded output: at most [`max_encoded_len`] bytes per call
//! - Streaming API via the `Write` trait ([`SlzWriter`])
//! - Optional tokio support behind the `async` feature
//!
//! # Example - One-shot
//!
//! ```
//! use slz::{compress_bytes, Format, Level};
//!
//! let data = b"the quick brown fox the quick brown fox";
//! let gzip = compress_bytes(data, Level::Compress, Format::Gzip)?;
//! assert_eq!(&gzip[..2], &[0x1f, 0x8b]);
//! # Ok::<(), slz::SlzError>(())
//! ```
//!
//! # Example - Incremental
//!
//! ```
//! use slz::{max_encoded_len, Format, Level, Stream, MAX_TRAILER_LEN};
//!
//! let mut stream = Stream::new(Level::Compress, Format::Zlib);
//! let mut out = vec![0u8; max_encoded_len(16) + MAX_TRAILER_LEN];
//! let mut compressed = Vec::new();
//!
//! let n = stream.encode(&mut out, b"hello, ", true)?;
//! compressed.extend_from_slice(&out[..n]);
//! let n = stream.encode(&mut out, b"world", false)?;
//! compressed.extend_from_slice(&out[..n]);
//! let n = stream.finish(&mut out)?;
//! compressed.extend_from_slice(&out[..n]);
//!
//! assert!(stream.is_finished());
//! # Ok::<(), slz::SlzError>(())
//! ```
//!
//! # Example - Streaming writer
//!
//! ```no_run
//! use slz::{Format, Level, SlzWriter};
//! use std::io::Write;
//!
//! let file = std::fs::File::create("data.gz")?;
//! let mut writer = SlzWriter::new(file, Level::Compress, Format::Gzip);
//! writer.write_all(b"Hello, World!")?;
//! writer.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod adler32;
pub mod common;
pub mod crc32;
pub mod deflate;
pub mod error;
pub mod format;
pub mod tables;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;
#[cfg(feature = "async")]
pub mod async_writer;

// Re-export commonly used types
pub use adler32::adler32;
pub use common::{
    max_encoded_len, EncodeStats, Format, Level, Result, SlzError, StreamState, HASH_BITS,
    MAX_MATCH, MAX_STORED_LEN, MAX_TRAILER_LEN, MIN_MATCH, WINDOW_SIZE,
};
pub use crc32::crc32;
pub use deflate::{compress_bytes, SlzWriter, Stream, DEFAULT_CHUNK_SIZE};
pub use format::Trailer;

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;
#[cfg(feature = "async")]
pub use async_writer::AsyncSlzWriter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let _ = Level::Compress;
        let _ = Format::Deflate;
        assert_eq!(max_encoded_len(8), 8 + 1 + 64);

        let data = b"test";
        assert_eq!(crc32(data), crc32::crc32(data));
        assert_eq!(adler32(data), adler32::adler32(data));

        let out = compress_bytes(data, Level::Store, Format::Deflate).unwrap();
        assert_eq!(&out[5..], data);
    }
}
