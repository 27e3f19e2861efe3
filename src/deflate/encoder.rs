//! Block encoding: literals, matches and stored blocks
//!
//! Fixed Huffman blocks stay open across calls. A run of literals between
//! two matches is costed both ways and sent as stored blocks instead when
//! that is cheaper, which closes the current fixed block first. Back
//! references never reach outside the input slice of the current call.

use super::bits::BitWriter;
use super::hash::Match;
use super::state::Stream;
use crate::common::{StreamState, MAX_STORED_LEN, MIN_MATCH};
use crate::tables::{
    distance_code, length_code, literal_cost, match_cost, DISTANCE_BASE, DISTANCE_CODES,
    DISTANCE_CODE_BITS, DISTANCE_EXTRA_BITS, END_OF_BLOCK, LENGTH_BASE, LENGTH_EXTRA_BITS,
    LITERAL_CODES,
};

/// BTYPE of a stored block
const BTYPE_STORED: u32 = 0b00;

/// BTYPE of a fixed Huffman block
const BTYPE_FIXED: u32 = 0b01;

/// Bits of a block header (BFINAL + BTYPE)
const BLOCK_HEADER_BITS: u64 = 3;

/// Bits of the fixed end-of-block code
const EOB_BITS: u64 = 7;

/// Worst-case bits of a stored block besides its payload: header, padding, LEN and NLEN
const STORED_FRAMING_BITS: u64 = BLOCK_HEADER_BITS + 7 + 32;

impl Stream {
    /// Emit `input` as stored blocks, the last one final when `more` is false
    pub(super) fn encode_stored(&mut self, bits: &mut BitWriter<'_>, input: &[u8], more: bool) {
        if !input.is_empty() || !more {
            self.send_stored(bits, input, !more);
        }
    }

    /// Run the match finder over `input` and emit literals and matches
    pub(super) fn encode_fixed(&mut self, bits: &mut BitWriter<'_>, input: &[u8]) {
        let base = self.total_in;
        let mut pos = 0;
        let mut literal_start = 0;

        while pos + MIN_MATCH <= input.len() {
            match self.hash.find_and_insert(input, pos, base) {
                Some(m) if is_profitable(&input[pos..pos + m.length], m) => {
                    self.send_literals(bits, &input[literal_start..pos]);
                    self.send_match(bits, m);
                    pos += m.length;
                    literal_start = pos;
                }
                _ => pos += 1,
            }
        }

        self.send_literals(bits, &input[literal_start..]);
    }

    /// Close the stream with an empty final fixed block
    pub(super) fn close_fixed_stream(&mut self, bits: &mut BitWriter<'_>) {
        if self.state == StreamState::Fixed {
            self.send_eob(bits);
        }
        bits.emit_bits(1 | (BTYPE_FIXED << 1), BLOCK_HEADER_BITS as u32);
        self.stats.fixed_blocks += 1;
        self.transition(StreamState::Last);

        let (code, len) = LITERAL_CODES[END_OF_BLOCK];
        bits.emit_bits(code as u32, len as u32);
        self.transition(StreamState::Done);
    }

    /// Emit a run of literals as Huffman symbols or stored blocks, whichever is shorter
    fn send_literals(&mut self, bits: &mut BitWriter<'_>, run: &[u8]) {
        if run.is_empty() {
            return;
        }

        let huffman = self.open_cost() + literal_cost(run);
        let stored = self.stored_cost(run.len());
        if stored < huffman {
            log::trace!(
                "{} literals as stored ({stored} bits vs {huffman} bits)",
                run.len()
            );
            self.send_stored(bits, run, false);
            return;
        }

        self.ensure_fixed(bits);
        for &byte in run {
            let (code, len) = LITERAL_CODES[byte as usize];
            bits.emit_bits(code as u32, len as u32);
        }
        self.stats.literal_count += run.len();
    }

    /// Emit one length/distance pair
    fn send_match(&mut self, bits: &mut BitWriter<'_>, m: Match) {
        self.ensure_fixed(bits);

        let lcode = length_code(m.length);
        let (code, len) = LITERAL_CODES[257 + lcode];
        let extra = (m.length - LENGTH_BASE[lcode] as usize) as u32;
        bits.emit_bits(
            code as u32 | (extra << len),
            len as u32 + LENGTH_EXTRA_BITS[lcode] as u32,
        );

        let dcode = distance_code(m.distance);
        let extra = (m.distance - DISTANCE_BASE[dcode] as usize) as u32;
        bits.emit_bits(
            DISTANCE_CODES[dcode] as u32 | (extra << DISTANCE_CODE_BITS),
            DISTANCE_CODE_BITS + DISTANCE_EXTRA_BITS[dcode] as u32,
        );

        self.stats.match_count += 1;
        self.stats.longest_match = self.stats.longest_match.max(m.length);
    }

    /// Emit `data` as stored blocks of at most `MAX_STORED_LEN` bytes.
    ///
    /// An empty `data` still produces one (empty) block.
    fn send_stored(&mut self, bits: &mut BitWriter<'_>, data: &[u8], last: bool) {
        if self.state == StreamState::Fixed {
            self.send_eob(bits);
        }

        let mut rest = data;
        loop {
            let (chunk, tail) = rest.split_at(rest.len().min(MAX_STORED_LEN));
            let final_block = last && tail.is_empty();

            bits.emit_bits(u32::from(final_block) | (BTYPE_STORED << 1), 3);
            if final_block {
                self.transition(StreamState::Last);
            }
            bits.flush_to_byte();

            let len = chunk.len() as u16;
            bits.write_bytes(&len.to_le_bytes());
            bits.write_bytes(&(!len).to_le_bytes());
            bits.write_bytes(chunk);
            self.stats.stored_blocks += 1;

            if final_block {
                self.transition(StreamState::Done);
            }

            rest = tail;
            if rest.is_empty() {
                break;
            }
        }
    }

    /// Open a fixed Huffman block unless one is already open
    fn ensure_fixed(&mut self, bits: &mut BitWriter<'_>) {
        if self.state == StreamState::Eob {
            bits.emit_bits(BTYPE_FIXED << 1, BLOCK_HEADER_BITS as u32);
            self.stats.fixed_blocks += 1;
            self.transition(StreamState::Fixed);
        }
    }

    /// Close the open fixed Huffman block
    fn send_eob(&mut self, bits: &mut BitWriter<'_>) {
        let (code, len) = LITERAL_CODES[END_OF_BLOCK];
        bits.emit_bits(code as u32, len as u32);
        self.transition(StreamState::Eob);
    }

    /// Bits needed before the next Huffman symbol can be sent
    fn open_cost(&self) -> u64 {
        if self.state == StreamState::Fixed {
            0
        } else {
            BLOCK_HEADER_BITS
        }
    }

    /// Upper bound of the bits a stored rendition of `len` literals costs,
    /// including closing the open block and reopening one afterwards
    fn stored_cost(&self, len: usize) -> u64 {
        let close = if self.state == StreamState::Fixed {
            EOB_BITS
        } else {
            0
        };
        let blocks = len.div_ceil(MAX_STORED_LEN).max(1) as u64;
        close + blocks * STORED_FRAMING_BITS + 8 * len as u64 + BLOCK_HEADER_BITS
    }
}

/// A match is used only when it costs no more than the literals it replaces
fn is_profitable(covered: &[u8], m: Match) -> bool {
    // Four literals cost at least 32 bits, more than any match.
    covered.len() > MIN_MATCH || match_cost(m.length, m.distance) as u64 <= literal_cost(covered)
}
