//! CRC-32 checksum (RFC 1952) used by the gzip envelope
//!
//! Both entry points take and return the finished (post-inverted) CRC value,
//! so a running checksum starts at `0` and can be folded call after call.

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Slicing-by-4 tables for the reflected polynomial, built at compile time.
static CRC_TABLES: [[u32; 256]; 4] = build_tables();

const fn build_tables() -> [[u32; 256]; 4] {
    let mut tables = [[0u32; 256]; 4];

    // Table 0: classic byte-at-a-time.
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        tables[0][i] = crc;
        i += 1;
    }

    // Tables 1..3 advance the CRC over additional zero bytes.
    let mut t = 1;
    while t < 4 {
        let mut i = 0;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = (prev >> 8) ^ tables[0][(prev & 0xFF) as usize];
            i += 1;
        }
        t += 1;
    }

    tables
}

/// Fold `data` into `crc` one byte at a time.
pub fn update_bytewise(crc: u32, data: &[u8]) -> u32 {
    let table = &CRC_TABLES[0];
    let mut crc = !crc;
    for &byte in data {
        crc = (crc >> 8) ^ table[((crc ^ byte as u32) & 0xFF) as usize];
    }
    !crc
}

/// Fold `data` into `crc` four bytes at a time.
///
/// Produces exactly the value of [`update_bytewise`].
pub fn update(crc: u32, data: &[u8]) -> u32 {
    let tables = &CRC_TABLES;
    let mut crc = !crc;

    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        crc ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        crc = tables[3][(crc & 0xFF) as usize]
            ^ tables[2][((crc >> 8) & 0xFF) as usize]
            ^ tables[1][((crc >> 16) & 0xFF) as usize]
            ^ tables[0][(crc >> 24) as usize];
    }

    for &byte in chunks.remainder() {
        crc = (crc >> 8) ^ tables[0][((crc ^ byte as u32) & 0xFF) as usize];
    }

    !crc
}

/// CRC-32 of a complete buffer
pub fn crc32(data: &[u8]) -> u32 {
    update(0, data)
}
