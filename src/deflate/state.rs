//! Stream state and the encode/finish entry points
//!
//! A [`Stream`] carries everything that has to survive between calls: the
//! partial bit queue, the block state, the running checksum and input length,
//! and the match finder table. Each call validates the state transition it
//! is about to make and the capacity of the output slice before touching
//! either.

use super::bits::BitWriter;
use super::hash::HashTable;
use crate::common::{
    max_encoded_len, EncodeStats, Format, Level, Result, SlzError, StreamState,
};

/// One compression session
#[derive(Debug, Clone)]
pub struct Stream {
    /// Pending output bits, LSB first
    pub(super) queue: u32,
    /// Number of valid bits in `queue`, < 8 between calls
    pub(super) qbits: u32,
    pub(super) state: StreamState,
    pub(super) level: Level,
    pub(super) format: Format,
    pub(super) checksum: u32,
    /// Input length mod 2^32, as stored in the gzip trailer
    pub(super) input_length: u32,
    /// Absolute input offset of the next call, keys the hash table
    pub(super) total_in: u64,
    pub(super) hash: HashTable,
    pub(super) stats: EncodeStats,
}

impl Stream {
    /// Create a stream producing `format` output at `level`
    pub fn new(level: Level, format: Format) -> Self {
        log::debug!("new stream: level={level:?} format={format:?}");
        Self {
            queue: 0,
            qbits: 0,
            state: StreamState::Init,
            level,
            format,
            checksum: format.initial_checksum(),
            input_length: 0,
            total_in: 0,
            hash: HashTable::new(),
            stats: EncodeStats::default(),
        }
    }

    /// Return the stream to its freshly created state, keeping level and format
    pub fn reset(&mut self) {
        self.queue = 0;
        self.qbits = 0;
        self.state = StreamState::Init;
        self.checksum = self.format.initial_checksum();
        self.input_length = 0;
        self.total_in = 0;
        self.hash.reset();
        self.stats = EncodeStats::default();
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Compression level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Envelope format
    pub fn format(&self) -> Format {
        self.format
    }

    /// Running checksum of the input consumed so far (CRC-32, Adler-32 or 0)
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Total input consumed so far, mod 2^32
    pub fn input_length(&self) -> u32 {
        self.input_length
    }

    /// Encoding statistics
    pub fn stats(&self) -> &EncodeStats {
        &self.stats
    }

    /// Whether `finish` has completed
    pub fn is_finished(&self) -> bool {
        self.state == StreamState::End
    }

    /// Compress `input` into `out` and return the number of bytes written.
    ///
    /// The envelope header is sent on the first call. With `more == false`
    /// the final block is closed and the stream moves to `Done`, after which
    /// only [`finish`](Self::finish) is accepted. `out` must hold at least
    /// [`max_encoded_len`]`(input.len())` bytes.
    pub fn encode(&mut self, out: &mut [u8], input: &[u8], more: bool) -> Result<usize> {
        if !self.state.accepts_input() {
            return Err(SlzError::InvalidStreamState {
                operation: "encode",
                state: self.state,
            });
        }
        let needed = max_encoded_len(input.len());
        if out.len() < needed {
            return Err(SlzError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        let mut bits = BitWriter::resume(out, self.queue, self.qbits);

        if self.state == StreamState::Init {
            bits.write_bytes(self.format.header());
            self.transition(StreamState::Eob);
        }

        match self.level {
            Level::Store => self.encode_stored(&mut bits, input, more),
            Level::Compress => {
                self.encode_fixed(&mut bits, input);
                if !more {
                    self.close_fixed_stream(&mut bits);
                }
            }
        }

        self.checksum = self.format.update_checksum(self.checksum, input);
        self.input_length = self.input_length.wrapping_add(input.len() as u32);
        self.total_in += input.len() as u64;

        let (written, queue, qbits) = bits.into_parts();
        self.queue = queue;
        self.qbits = qbits;
        self.stats.input_bytes += input.len() as u64;
        self.stats.output_bytes += written as u64;

        Ok(written)
    }

    /// Flush the last bits and append the trailer, returning the bytes written.
    ///
    /// Only valid once the final `encode` call has run. Calling it again
    /// after it succeeded writes nothing and returns 0.
    pub fn finish(&mut self, out: &mut [u8]) -> Result<usize> {
        match self.state {
            StreamState::End => return Ok(0),
            StreamState::Done => {}
            state => {
                return Err(SlzError::InvalidStreamState {
                    operation: "finish",
                    state,
                })
            }
        }

        let trailer = self.format.trailer(self.checksum, self.input_length);
        let needed = usize::from(self.qbits > 0) + trailer.len();
        if out.len() < needed {
            return Err(SlzError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        let mut bits = BitWriter::resume(out, self.queue, self.qbits);
        bits.flush_to_byte();
        bits.write_bytes(trailer.as_bytes());
        let (written, queue, qbits) = bits.into_parts();
        self.queue = queue;
        self.qbits = qbits;
        self.stats.output_bytes += written as u64;
        self.transition(StreamState::End);

        log::debug!(
            "stream finished: format={:?} in={} out={} checksum={:08x}",
            self.format,
            self.stats.input_bytes,
            self.stats.output_bytes,
            self.checksum
        );
        Ok(written)
    }

    /// Move to `next`, which must be a legal successor of the current state
    pub(super) fn transition(&mut self, next: StreamState) {
        debug_assert!(
            self.state.allows(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        log::trace!("state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
