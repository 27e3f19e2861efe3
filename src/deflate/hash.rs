//! Single-candidate hash table used to propose LZ77 back-references
//!
//! Each slot remembers the most recent absolute input offset whose next
//! three bytes hashed to it. Slots are overwritten on every lookup and never
//! chained, so finding a candidate costs O(1) per input byte. A candidate is
//! only a hint: it is verified byte by byte before being returned.

use crate::common::{HASH_BITS, HASH_SIZE, MAX_MATCH, MIN_MATCH, WINDOW_SIZE};

/// A verified back-reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Backward distance, `1..=WINDOW_SIZE`
    pub distance: usize,
    /// Match length, `MIN_MATCH..=MAX_MATCH`
    pub length: usize,
}

/// Direct-mapped table of last occurrences
#[derive(Debug, Clone)]
pub struct HashTable {
    /// Absolute input offset + 1 of the last occurrence, 0 when empty
    slots: Box<[u64]>,
}

/// Hash of the three bytes starting at `bytes[0]`
#[inline]
pub fn hash3(bytes: &[u8]) -> usize {
    let word = bytes[0] as u32 | (bytes[1] as u32) << 8 | (bytes[2] as u32) << 16;
    (word.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
}

impl HashTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            slots: vec![0u64; HASH_SIZE].into_boxed_slice(),
        }
    }

    /// Forget every recorded occurrence
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    /// Look up a candidate for `input[pos..]` and record `pos` in its slot.
    ///
    /// `base` is the absolute offset of `input[0]` in the stream. Entries
    /// recorded before `base` belong to input the caller no longer holds and
    /// are ignored. Requires `pos + MIN_MATCH <= input.len()`.
    pub fn find_and_insert(&mut self, input: &[u8], pos: usize, base: u64) -> Option<Match> {
        let slot = hash3(&input[pos..]);
        let previous = std::mem::replace(&mut self.slots[slot], base + pos as u64 + 1);

        if previous == 0 || previous - 1 < base {
            return None;
        }
        let candidate = (previous - 1 - base) as usize;
        let distance = pos - candidate;
        if distance == 0 || distance > WINDOW_SIZE {
            return None;
        }

        let max_length = (input.len() - pos).min(MAX_MATCH);
        let length = input[candidate..]
            .iter()
            .zip(&input[pos..pos + max_length])
            .take_while(|(a, b)| a == b)
            .count();

        if length >= MIN_MATCH {
            Some(Match { distance, length })
        } else {
            None
        }
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}
