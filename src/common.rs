//! Common types and constants for the slz compressor
//!
//! This module defines the configuration enums, the stream state machine
//! states, statistics and the error type shared by the encoder, the envelope
//! framing and the streaming adaptors.

use thiserror::Error;

/// Compression level of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// No compression, input is emitted as stored blocks only
    Store = 0,
    /// Single-pass LZ77 with fixed Huffman codes
    Compress = 1,
}

impl Level {
    /// Create a Level from a raw value
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Level::Store),
            1 => Ok(Level::Compress),
            _ => Err(SlzError::InvalidLevel(value)),
        }
    }
}

/// Envelope format wrapping the deflate bitstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RFC 1952: gzip envelope with CRC-32 and input length trailer
    Gzip = 0,
    /// RFC 1950: zlib envelope with Adler-32 trailer
    Zlib = 1,
    /// RFC 1951: raw deflate, no envelope and no checksum
    Deflate = 2,
}

impl Format {
    /// Create a Format from a raw value.
    ///
    /// Unrecognized values fall back to raw deflate instead of failing.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Format::Gzip,
            1 => Format::Zlib,
            _ => Format::Deflate,
        }
    }
}

/// Position of a stream in its lifecycle
///
/// `Init -> Eob` happens once, blocks then alternate between `Eob` and
/// `Fixed`, and the final call walks `Last -> Done`. Only `finish` reaches
/// `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StreamState {
    /// Stream initialized, nothing sent yet
    Init,
    /// Header or end of block sent, ready for the next block
    Eob,
    /// Inside a fixed Huffman block
    Fixed,
    /// BFINAL of the last block sent
    Last,
    /// End of the last block sent
    Done,
    /// Trailer sent
    End,
}

impl StreamState {
    /// Whether `next` is a legal successor of this state
    pub fn allows(self, next: StreamState) -> bool {
        use StreamState::*;
        matches!(
            (self, next),
            (Init, Eob) | (Eob, Fixed) | (Eob, Last) | (Fixed, Eob) | (Last, Done) | (Done, End)
        )
    }

    /// Whether `encode` may still be called in this state
    pub fn accepts_input(self) -> bool {
        matches!(self, StreamState::Init | StreamState::Eob | StreamState::Fixed)
    }
}

/// Error type for slz operations
#[derive(Debug, Error)]
pub enum SlzError {
    /// Invalid compression level value
    #[error("Invalid compression level: {0} (expected 0 or 1)")]
    InvalidLevel(u8),

    /// Operation not permitted in the current stream state
    #[error("Cannot {operation} a stream in state {state:?}")]
    InvalidStreamState {
        /// Rejected operation
        operation: &'static str,
        /// State of the stream when the operation was attempted
        state: StreamState,
    },

    /// Output buffer too small for the worst case of the call
    #[error("Output buffer too small: need {needed} bytes, got {available}")]
    BufferTooSmall {
        /// Bytes the call may write
        needed: usize,
        /// Bytes the caller provided
        available: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SlzError> for std::io::Error {
    fn from(err: SlzError) -> Self {
        match err {
            SlzError::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::InvalidInput, other),
        }
    }
}

/// Result type alias for slz operations
pub type Result<T> = std::result::Result<T, SlzError>;

// Deflate constants

/// Log2 of the number of slots in the match finder table
pub const HASH_BITS: u32 = 13;

/// Number of slots in the match finder table
pub const HASH_SIZE: usize = 1 << HASH_BITS;

/// Deflate window: largest distance a back-reference may span
pub const WINDOW_SIZE: usize = 32768;

/// Minimum match length worth a back-reference
pub const MIN_MATCH: usize = 3;

/// Maximum match length of a single back-reference
pub const MAX_MATCH: usize = 258;

/// Maximum payload of one stored block
pub const MAX_STORED_LEN: usize = 65535;

/// Largest trailer `finish` may write (pending bits, checksum, length)
pub const MAX_TRAILER_LEN: usize = 12;

/// Fixed slack of [`max_encoded_len`]: envelope header, block framing and
/// bits left over from the previous call
pub const ENCODE_OVERHEAD: usize = 64;

/// Output capacity `encode` requires for `input_len` bytes of input.
///
/// Fixed Huffman literals cost at most 9 bits, matches are only used when
/// they are no more expensive than literals, and literal runs fall back to
/// stored blocks when Huffman coding would cost more.
pub const fn max_encoded_len(input_len: usize) -> usize {
    input_len + (input_len >> 3) + ENCODE_OVERHEAD
}

/// Statistics collected while encoding a stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodeStats {
    /// Number of literal symbols emitted in fixed Huffman blocks
    pub literal_count: usize,
    /// Number of back-references emitted
    pub match_count: usize,
    /// Longest back-reference emitted
    pub longest_match: usize,
    /// Number of fixed Huffman blocks opened
    pub fixed_blocks: usize,
    /// Number of stored blocks emitted
    pub stored_blocks: usize,
    /// Input bytes consumed
    pub input_bytes: u64,
    /// Output bytes produced, header and trailer included
    pub output_bytes: u64,
}

impl EncodeStats {
    /// Output size relative to input size, 0.0 for empty input
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}
