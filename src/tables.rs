//! Static tables for fixed Huffman deflate blocks (RFC 1951 section 3.2.6)
//!
//! Huffman codes are packed most-significant bit first while the rest of the
//! bitstream is LSB first, so the codes below are stored bit-reversed and
//! can be handed to the bit writer as-is.

/// Literal/length symbol closing a block
pub const END_OF_BLOCK: usize = 256;

/// Every fixed-block distance code is 5 bits long
pub const DISTANCE_CODE_BITS: u32 = 5;

/// Base match length of length symbols 257..=285
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115,
    131, 163, 195, 227, 258,
];

/// Extra bits following length symbols 257..=285
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base distance of distance symbols 0..=29
pub const DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits following distance symbols 0..=29
pub const DISTANCE_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Bit-reversed fixed Huffman code and its length for literal/length symbols
pub static LITERAL_CODES: [(u16, u8); 288] = build_literal_codes();

/// Bit-reversed 5-bit fixed codes for distance symbols
pub static DISTANCE_CODES: [u8; 30] = build_distance_codes();

/// Index into `LENGTH_BASE` for every match length 0..=258 (entries below 3 unused)
pub static LENGTH_SYMBOLS: [u8; 259] = build_length_symbols();

const fn reverse_bits(code: u32, len: u32) -> u32 {
    let mut reversed = 0;
    let mut i = 0;
    while i < len {
        reversed = (reversed << 1) | ((code >> i) & 1);
        i += 1;
    }
    reversed
}

const fn build_literal_codes() -> [(u16, u8); 288] {
    let mut codes = [(0u16, 0u8); 288];
    let mut symbol = 0;
    while symbol < 288 {
        let (code, len) = if symbol < 144 {
            (0x30 + symbol, 8)
        } else if symbol < 256 {
            (0x190 + symbol - 144, 9)
        } else if symbol < 280 {
            (symbol - 256, 7)
        } else {
            (0xC0 + symbol - 280, 8)
        };
        codes[symbol] = (reverse_bits(code as u32, len) as u16, len as u8);
        symbol += 1;
    }
    codes
}

const fn build_distance_codes() -> [u8; 30] {
    let mut codes = [0u8; 30];
    let mut symbol = 0;
    while symbol < 30 {
        codes[symbol] = reverse_bits(symbol as u32, DISTANCE_CODE_BITS) as u8;
        symbol += 1;
    }
    codes
}

const fn build_length_symbols() -> [u8; 259] {
    let mut symbols = [0u8; 259];
    let mut code = 0;
    while code < 29 {
        let base = LENGTH_BASE[code] as usize;
        let span = 1usize << LENGTH_EXTRA_BITS[code];
        let mut len = base;
        // Symbol 284 nominally reaches 258; symbol 285 owns it and comes later.
        while len < base + span && len <= 258 {
            symbols[len] = code as u8;
            len += 1;
        }
        code += 1;
    }
    symbols
}

/// Index into `LENGTH_BASE` for a match length in `3..=258`
#[inline]
pub fn length_code(length: usize) -> usize {
    LENGTH_SYMBOLS[length] as usize
}

/// Distance symbol for a distance in `1..=32768`
#[inline]
pub fn distance_code(distance: usize) -> usize {
    let d = (distance - 1) as u32;
    if d < 4 {
        d as usize
    } else {
        let log2 = 31 - d.leading_zeros();
        (2 * log2 + ((d >> (log2 - 1)) & 1)) as usize
    }
}

/// Bits a match costs in a fixed Huffman block
#[inline]
pub fn match_cost(length: usize, distance: usize) -> u32 {
    let lcode = length_code(length);
    let dcode = distance_code(distance);
    LITERAL_CODES[257 + lcode].1 as u32
        + LENGTH_EXTRA_BITS[lcode] as u32
        + DISTANCE_CODE_BITS
        + DISTANCE_EXTRA_BITS[dcode] as u32
}

/// Bits a run of literals costs in a fixed Huffman block
#[inline]
pub fn literal_cost(data: &[u8]) -> u64 {
    data.iter().map(|&b| LITERAL_CODES[b as usize].1 as u64).sum()
}
