//! Tests for the incremental Stream API
//!
//! These tests drive `Stream::encode`/`Stream::finish` directly and decode
//! the result with a standard inflater.

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use slz::{
    compress_bytes, max_encoded_len, Format, Level, SlzError, Stream, StreamState,
    MAX_TRAILER_LEN, WINDOW_SIZE,
};
use std::io::Read;

fn decode(format: Format, data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    match format {
        Format::Gzip => GzDecoder::new(data).read_to_end(&mut output),
        Format::Zlib => ZlibDecoder::new(data).read_to_end(&mut output),
        Format::Deflate => DeflateDecoder::new(data).read_to_end(&mut output),
    }
    .unwrap_or_else(|e| panic!("{format:?} stream failed to decode: {e}"));
    output
}

/// Encode `input` split into `chunk_size` pieces and finish the stream
fn encode_chunked(level: Level, format: Format, input: &[u8], chunk_size: usize) -> Vec<u8> {
    let mut stream = Stream::new(level, format);
    let mut buffer = vec![0u8; max_encoded_len(chunk_size) + MAX_TRAILER_LEN];
    let mut output = Vec::new();

    let mut chunks = input.chunks(chunk_size).peekable();
    while let Some(chunk) = chunks.next() {
        let more = chunks.peek().is_some();
        let n = stream.encode(&mut buffer, chunk, more).unwrap();
        output.extend_from_slice(&buffer[..n]);
    }
    if stream.state().accepts_input() {
        let n = stream.encode(&mut buffer, &[], false).unwrap();
        output.extend_from_slice(&buffer[..n]);
    }
    let n = stream.finish(&mut buffer).unwrap();
    output.extend_from_slice(&buffer[..n]);
    output
}

#[test]
fn test_quick_brown_fox_gzip() -> Result<(), Box<dyn std::error::Error>> {
    let input = b"the quick brown fox the quick brown fox";

    let mut stream = Stream::new(Level::Compress, Format::Gzip);
    let mut out = vec![0u8; max_encoded_len(input.len())];
    let mut out2 = [0u8; MAX_TRAILER_LEN];
    let n = stream.encode(&mut out, input, false)?;
    let m = stream.finish(&mut out2)?;

    let mut compressed = out[..n].to_vec();
    compressed.extend_from_slice(&out2[..m]);

    assert_eq!(decode(Format::Gzip, &compressed), input);
    let isize = u32::from_le_bytes(compressed[compressed.len() - 4..].try_into()?);
    assert_eq!(isize as usize, input.len());
    let crc = u32::from_le_bytes(compressed[compressed.len() - 8..compressed.len() - 4].try_into()?);
    assert_eq!(crc, slz::crc32(input));
    assert!(stream.stats().match_count >= 1);

    Ok(())
}

#[test]
fn test_empty_input_all_formats() {
    for level in [Level::Store, Level::Compress] {
        for format in [Format::Gzip, Format::Zlib, Format::Deflate] {
            let compressed = compress_bytes(b"", level, format).unwrap();
            assert!(!compressed.is_empty());
            assert!(
                decode(format, &compressed).is_empty(),
                "{level:?}/{format:?} should decode to nothing"
            );
        }
    }
}

/// Zero filler with `head` at offset 0 and `tail` at offset `distance`
fn window_input(distance: usize, head: &[u8; 3], tail: &[u8; 3]) -> Vec<u8> {
    let mut input = vec![0u8; distance + 3];
    input[..3].copy_from_slice(head);
    input[distance..].copy_from_slice(tail);
    input
}

fn match_count(input: &[u8]) -> usize {
    let mut stream = Stream::new(Level::Compress, Format::Deflate);
    let mut out = vec![0u8; max_encoded_len(input.len())];
    stream.encode(&mut out, input, false).unwrap();
    stream.stats().match_count
}

#[test]
fn test_match_at_window_boundary() {
    // 9-bit literals, so a 3-byte match at the longest distance still pays off.
    let repeat = [0xF0, 0xF1, 0xF2];
    let unseen = [0xE0, 0xE1, 0xE2];

    for (distance, extra_matches) in [(WINDOW_SIZE, 1), (WINDOW_SIZE + 1, 0)] {
        let input = window_input(distance, &repeat, &repeat);
        let baseline = window_input(distance, &repeat, &unseen);
        assert_eq!(
            match_count(&input),
            match_count(&baseline) + extra_matches,
            "distance {distance}"
        );

        for format in [Format::Deflate, Format::Gzip] {
            let compressed = compress_bytes(&input, Level::Compress, format).unwrap();
            assert_eq!(decode(format, &compressed), input);
        }
    }
}

#[test]
fn test_chunked_encoding_round_trip() {
    let input: Vec<u8> = (0..20_000u32)
        .flat_map(|i| format!("{} ", i % 97).into_bytes())
        .collect();

    for chunk_size in [1, 2, 3, 7, 100, 4096, 65536] {
        for level in [Level::Store, Level::Compress] {
            for format in [Format::Gzip, Format::Zlib, Format::Deflate] {
                let compressed = encode_chunked(level, format, &input, chunk_size);
                assert_eq!(
                    decode(format, &compressed),
                    input,
                    "chunk size {chunk_size}, {level:?}/{format:?}"
                );
            }
        }
    }
}

#[test]
fn test_empty_encode_calls_between_data() {
    let mut stream = Stream::new(Level::Compress, Format::Zlib);
    let mut buffer = vec![0u8; max_encoded_len(64) + MAX_TRAILER_LEN];
    let mut output = Vec::new();

    for chunk in [&b""[..], b"abcabc", b"", b"", b"abcabcabc", b""] {
        let n = stream.encode(&mut buffer, chunk, true).unwrap();
        output.extend_from_slice(&buffer[..n]);
    }
    let n = stream.encode(&mut buffer, b"", false).unwrap();
    output.extend_from_slice(&buffer[..n]);
    let n = stream.finish(&mut buffer).unwrap();
    output.extend_from_slice(&buffer[..n]);

    assert_eq!(decode(Format::Zlib, &output), b"abcabcabcabcabc");
}

#[test]
fn test_length_accounting() {
    let mut stream = Stream::new(Level::Compress, Format::Gzip);
    let mut buffer = vec![0u8; max_encoded_len(1000)];
    let mut total = 0u32;

    for len in [0usize, 1, 17, 1000, 3, 256] {
        let chunk = vec![b'q'; len];
        stream.encode(&mut buffer, &chunk, true).unwrap();
        total += len as u32;
        assert_eq!(stream.input_length(), total);
    }
}

#[test]
fn test_finish_twice() {
    let mut stream = Stream::new(Level::Store, Format::Zlib);
    let mut buffer = vec![0u8; max_encoded_len(5) + MAX_TRAILER_LEN];
    stream.encode(&mut buffer, b"hello", false).unwrap();

    assert_eq!(stream.finish(&mut buffer).unwrap(), 4);
    assert_eq!(stream.finish(&mut buffer).unwrap(), 0);
    assert_eq!(stream.state(), StreamState::End);
}

#[test]
fn test_invalid_state_errors() {
    let mut stream = Stream::new(Level::Compress, Format::Deflate);
    let mut buffer = vec![0u8; 128];

    assert!(matches!(
        stream.finish(&mut buffer),
        Err(SlzError::InvalidStreamState { .. })
    ));

    stream.encode(&mut buffer, b"abc", false).unwrap();
    stream.finish(&mut buffer).unwrap();

    let err = stream.encode(&mut buffer, b"more", true).unwrap_err();
    assert!(matches!(
        err,
        SlzError::InvalidStreamState {
            state: StreamState::End,
            ..
        }
    ));
    let io_err: std::io::Error = err.into();
    assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn test_reset_reuses_stream() {
    let input = b"reuse me, reuse me, reuse me";
    let mut stream = Stream::new(Level::Compress, Format::Gzip);
    let mut buffer = vec![0u8; max_encoded_len(input.len()) + MAX_TRAILER_LEN];

    let mut first = Vec::new();
    for _ in 0..2 {
        let n = stream.encode(&mut buffer, input, false).unwrap();
        let m = stream.finish(&mut buffer[n..]).unwrap();
        let output = buffer[..n + m].to_vec();
        assert_eq!(decode(Format::Gzip, &output), input);
        if first.is_empty() {
            first = output;
        } else {
            assert_eq!(output, first);
        }
        stream.reset();
    }
}

#[test]
fn test_level_and_format_from_u8() {
    assert_eq!(Level::from_u8(0).unwrap(), Level::Store);
    assert_eq!(Level::from_u8(1).unwrap(), Level::Compress);
    assert!(matches!(Level::from_u8(9), Err(SlzError::InvalidLevel(9))));

    assert_eq!(Format::from_u8(0), Format::Gzip);
    assert_eq!(Format::from_u8(1), Format::Zlib);
    assert_eq!(Format::from_u8(2), Format::Deflate);
    assert_eq!(Format::from_u8(200), Format::Deflate);
}

#[test]
fn test_output_within_bound() {
    let mut seed = 0xDEAD_BEEFu32;
    let noise: Vec<u8> = (0..100_000)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed as u8
        })
        .collect();

    for level in [Level::Store, Level::Compress] {
        let compressed = compress_bytes(&noise, level, Format::Deflate).unwrap();
        assert!(compressed.len() <= max_encoded_len(noise.len()));
        assert_eq!(decode(Format::Deflate, &compressed), noise);
    }
}
