//! Envelope framing for the three output formats
//!
//! The format decides which checksum runs over the input, which header
//! bytes precede the first block and what `finish` appends after the last
//! one. None of this touches the bitstream itself.

use crate::common::Format;
use crate::{adler32, crc32};

/// Gzip header: magic, CM=deflate, no flags, no mtime, XFL=fastest, OS=Unix
const GZIP_HEADER: [u8; 10] = [0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x03];

/// Zlib header: CM=deflate with a 32 KiB window, FLEVEL=fastest, no dictionary
const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];

/// Checksum and length bytes appended by `finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    bytes: [u8; 8],
    len: usize,
}

impl Trailer {
    /// The trailer bytes in stream order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Number of trailer bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the format has no trailer at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Format {
    /// Bytes sent before the first deflate block
    pub fn header(self) -> &'static [u8] {
        match self {
            Format::Gzip => &GZIP_HEADER,
            Format::Zlib => &ZLIB_HEADER,
            Format::Deflate => &[],
        }
    }

    /// Starting value of the running checksum
    pub fn initial_checksum(self) -> u32 {
        match self {
            Format::Gzip => 0,
            Format::Zlib => 1,
            Format::Deflate => 0,
        }
    }

    /// Fold consumed input into the running checksum
    pub fn update_checksum(self, checksum: u32, data: &[u8]) -> u32 {
        match self {
            Format::Gzip => crc32::update(checksum, data),
            Format::Zlib => adler32::update(checksum, data),
            Format::Deflate => checksum,
        }
    }

    /// Trailer for a stream with the given checksum and input length
    pub fn trailer(self, checksum: u32, input_length: u32) -> Trailer {
        let mut bytes = [0u8; 8];
        let len = match self {
            Format::Gzip => {
                bytes[..4].copy_from_slice(&checksum.to_le_bytes());
                bytes[4..].copy_from_slice(&input_length.to_le_bytes());
                8
            }
            Format::Zlib => {
                bytes[..4].copy_from_slice(&checksum.to_be_bytes());
                4
            }
            Format::Deflate => 0,
        };
        Trailer { bytes, len }
    }
}
