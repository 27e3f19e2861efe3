//! Adler-32 checksum (RFC 1950) used by the zlib envelope
//!
//! A running checksum starts at `1`.

const MOD_ADLER: u32 = 65_521;

/// Largest n such that 255*n*(n+1)/2 + (n+1)*(MOD_ADLER-1) fits in a u32.
const NMAX: usize = 5552;

/// Fold `data` into `adler` one byte at a time, reducing after every byte.
pub fn update_bytewise(adler: u32, data: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;
    for &byte in data {
        s1 = (s1 + byte as u32) % MOD_ADLER;
        s2 = (s2 + s1) % MOD_ADLER;
    }
    (s2 << 16) | s1
}

/// Fold `data` into `adler`, deferring the modulo to `NMAX` byte boundaries.
///
/// Produces exactly the value of [`update_bytewise`].
pub fn update(adler: u32, data: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;

    for chunk in data.chunks(NMAX) {
        for &byte in chunk {
            s1 += byte as u32;
            s2 += s1;
        }
        s1 %= MOD_ADLER;
        s2 %= MOD_ADLER;
    }

    (s2 << 16) | s1
}

/// Adler-32 of a complete buffer
pub fn adler32(data: &[u8]) -> u32 {
    update(1, data)
}
