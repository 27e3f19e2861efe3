//! Bit-level output for the deflate bitstream
//!
//! Bits are queued LSB first in a 32-bit register and moved to the output
//! slice a whole byte at a time. Between calls the stream keeps the queue
//! and its bit count, and the next call resumes from them.

/// Largest number of bits a single `emit_bits` call may append
pub const MAX_EMIT_BITS: u32 = 24;

/// LSB-first bit writer over a caller-supplied output slice
#[derive(Debug)]
pub struct BitWriter<'a> {
    out: &'a mut [u8],
    pos: usize,
    queue: u32,
    qbits: u32,
}

impl<'a> BitWriter<'a> {
    /// Resume writing into `out` with `qbits` (< 8) bits already pending
    pub fn resume(out: &'a mut [u8], queue: u32, qbits: u32) -> Self {
        debug_assert!(qbits < 8);
        Self {
            out,
            pos: 0,
            queue,
            qbits,
        }
    }

    /// Append the `nbits` low-order bits of `value`
    #[inline]
    pub fn emit_bits(&mut self, value: u32, nbits: u32) {
        debug_assert!(nbits <= MAX_EMIT_BITS);
        let mask = (1u32 << nbits) - 1;
        self.queue |= (value & mask) << self.qbits;
        self.qbits += nbits;

        while self.qbits >= 8 {
            self.out[self.pos] = self.queue as u8;
            self.pos += 1;
            self.queue >>= 8;
            self.qbits -= 8;
        }
    }

    /// Pad the pending bits with zeros up to the next byte boundary
    pub fn flush_to_byte(&mut self) {
        if self.qbits > 0 {
            self.out[self.pos] = self.queue as u8;
            self.pos += 1;
        }
        self.queue = 0;
        self.qbits = 0;
    }

    /// Copy whole bytes to the output. The queue must be byte aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        debug_assert_eq!(self.qbits, 0);
        let end = self.pos + bytes.len();
        self.out[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    /// Bits pending in the queue
    pub fn pending_bits(&self) -> u32 {
        self.qbits
    }

    /// Bytes written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes written, pending queue and its bit count
    pub fn into_parts(self) -> (usize, u32, u32) {
        (self.pos, self.queue, self.qbits)
    }
}
