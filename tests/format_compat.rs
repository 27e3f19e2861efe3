//! Compatibility tests against a standard inflater
//!
//! These tests verify that every envelope format produced here is accepted
//! by flate2 and that headers and trailers match RFC 1950/1952 byte for byte.

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use slz::{compress_bytes, Format, Level, SlzWriter};
use std::io::{Read, Write};

const SAMPLES: &[&[u8]] = &[
    b"",
    b"a",
    b"Hello, World!",
    b"the quick brown fox the quick brown fox",
    b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
    &[0xFF, 0x00, 0x80, 0x7F, 0xFE, 0x01],
];

fn inflate(format: Format, data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut output = Vec::new();
    match format {
        Format::Gzip => GzDecoder::new(data).read_to_end(&mut output)?,
        Format::Zlib => ZlibDecoder::new(data).read_to_end(&mut output)?,
        Format::Deflate => DeflateDecoder::new(data).read_to_end(&mut output)?,
    };
    Ok(output)
}

#[test]
fn test_gzip_header_and_trailer() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"Hello, World!";
    let compressed = compress_bytes(data, Level::Compress, Format::Gzip)?;

    assert_eq!(hex::encode(&compressed[..10]), "1f8b0800000000000403");

    let trailer = &compressed[compressed.len() - 8..];
    assert_eq!(trailer[..4], slz::crc32(data).to_le_bytes());
    assert_eq!(trailer[4..], (data.len() as u32).to_le_bytes());

    Ok(())
}

#[test]
fn test_zlib_header_and_trailer() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"Hello, World!";
    let compressed = compress_bytes(data, Level::Compress, Format::Zlib)?;

    assert_eq!(hex::encode(&compressed[..2]), "7801");
    // CMF*256 + FLG must be a multiple of 31.
    assert_eq!((0x78u16 * 256 + 0x01) % 31, 0);

    let trailer = &compressed[compressed.len() - 4..];
    assert_eq!(trailer, slz::adler32(data).to_be_bytes());

    Ok(())
}

#[test]
fn test_raw_deflate_has_no_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let stored = compress_bytes(b"xyz", Level::Store, Format::Deflate)?;
    // Final stored block: header byte, LEN 3, NLEN !3, payload.
    assert_eq!(hex::encode(&stored), "010300fcff78797a");

    Ok(())
}

#[test]
fn test_all_samples_decode() {
    for &sample in SAMPLES {
        for level in [Level::Store, Level::Compress] {
            for format in [Format::Gzip, Format::Zlib, Format::Deflate] {
                let compressed = compress_bytes(sample, level, format).unwrap();
                let decoded = inflate(format, &compressed).unwrap_or_else(|e| {
                    panic!(
                        "{level:?}/{format:?} failed on {}: {e}",
                        hex::encode(&compressed)
                    )
                });
                assert_eq!(decoded, sample);
            }
        }
    }
}

#[test]
fn test_large_text_compresses() {
    let text = b"It was the best of times, it was the worst of times, it was the age of wisdom, \
                 it was the age of foolishness, it was the epoch of belief. "
        .repeat(400);

    let compressed = compress_bytes(&text, Level::Compress, Format::Gzip).unwrap();
    assert!(
        compressed.len() < text.len() / 4,
        "expected at least 4:1 on repetitive text, got {} -> {}",
        text.len(),
        compressed.len()
    );
    assert_eq!(inflate(Format::Gzip, &compressed).unwrap(), text);
}

#[test]
fn test_writer_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    let data = b"streamed through a file, streamed through a file\n".repeat(2000);

    {
        let mut writer = SlzWriter::with_chunk_size(file.as_file_mut(), Level::Compress, Format::Gzip, 1000);
        for chunk in data.chunks(333) {
            writer.write_all(chunk)?;
        }
        let stats = writer.stats().clone();
        writer.finish()?;
        assert_eq!(stats.input_bytes, data.len() as u64);
    }

    let compressed = std::fs::read(file.path())?;
    assert_eq!(inflate(Format::Gzip, &compressed)?, data);

    Ok(())
}

#[test]
fn test_gzip_multi_member_via_writer() -> Result<(), Box<dyn std::error::Error>> {
    // Two complete members concatenated decode as one stream.
    let mut output = Vec::new();
    for part in [&b"first member, "[..], b"second member"] {
        let mut writer = SlzWriter::new(&mut output, Level::Compress, Format::Gzip);
        writer.write_all(part)?;
        writer.finish()?;
    }

    let mut decoded = Vec::new();
    flate2::read::MultiGzDecoder::new(&output[..]).read_to_end(&mut decoded)?;
    assert_eq!(decoded, b"first member, second member");

    Ok(())
}
