//! SlzWriter - Streaming compression writer
//!
//! This module implements a `std::io::Write` adaptor over [`Stream`]. Input
//! is encoded in chunks of bounded size as it arrives, so the writer never
//! holds more than one chunk's worth of compressed output.

use super::state::Stream;
use crate::common::{max_encoded_len, EncodeStats, Format, Level, Result, MAX_TRAILER_LEN};
use std::io::{self, Write};

/// Default number of input bytes encoded per call (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Streaming compression writer implementing Write trait
#[derive(Debug)]
pub struct SlzWriter<W: Write> {
    writer: Option<W>,
    stream: Stream,
    chunk_size: usize,
    buffer: Vec<u8>,
    /// Compressed bytes in `buffer[pending..pending_end]` not yet accepted by `writer`
    pending: usize,
    pending_end: usize,
}

impl<W: Write> SlzWriter<W> {
    /// Create a new SlzWriter
    pub fn new(writer: W, level: Level, format: Format) -> Self {
        Self::with_chunk_size(writer, level, format, DEFAULT_CHUNK_SIZE)
    }

    /// Create a new SlzWriter encoding at most `chunk_size` input bytes per call
    pub fn with_chunk_size(writer: W, level: Level, format: Format, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            writer: Some(writer),
            stream: Stream::new(level, format),
            chunk_size,
            buffer: vec![0u8; max_encoded_len(chunk_size)],
            pending: 0,
            pending_end: 0,
        }
    }

    /// The underlying compression stream
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Encoding statistics so far
    pub fn stats(&self) -> &EncodeStats {
        self.stream.stats()
    }

    /// Reference to the wrapped writer
    pub fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref()
    }

    /// Finish compression, write the trailer and return the wrapped writer
    pub fn finish(mut self) -> Result<W> {
        self.finish_stream()?;
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| io::Error::other("writer already taken"))?;
        writer.flush()?;
        Ok(writer)
    }

    /// Encode one chunk of at most `chunk_size` bytes and stage the output.
    ///
    /// Must only be called with nothing pending.
    fn encode_chunk(&mut self, data: &[u8], more: bool) -> Result<()> {
        debug_assert_eq!(self.pending, self.pending_end);
        let written = self.stream.encode(&mut self.buffer, data, more)?;
        self.stage(written);
        Ok(())
    }

    /// Close the final block and write the trailer, unless already done
    fn finish_stream(&mut self) -> Result<()> {
        self.drain()?;
        if self.stream.state().accepts_input() {
            self.encode_chunk(&[], false)?;
            self.drain()?;
        }
        if !self.stream.is_finished() {
            let written = self.stream.finish(&mut self.buffer[..MAX_TRAILER_LEN])?;
            self.stage(written);
        }
        self.drain()
    }

    fn stage(&mut self, len: usize) {
        self.pending = 0;
        self.pending_end = len;
    }

    /// Hand every staged byte to the wrapped writer.
    ///
    /// On error the unwritten bytes stay staged and are retried by the next call.
    fn drain(&mut self) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        while self.pending < self.pending_end {
            match writer.write(&self.buffer[self.pending..self.pending_end]) {
                Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero).into()),
                Ok(n) => self.pending += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl<W: Write> Write for SlzWriter<W> {
    /// Compress `buf` chunk by chunk.
    ///
    /// Output left over from an earlier failed call is written first; if that
    /// fails nothing of `buf` is consumed. Once a chunk is encoded it counts as
    /// consumed even if forwarding its output fails, in which case the output
    /// stays staged for the next call.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.drain()?;

        let mut consumed = 0;
        for chunk in buf.chunks(self.chunk_size) {
            self.encode_chunk(chunk, true)?;
            consumed += chunk.len();
            if let Err(e) = self.drain() {
                log::debug!("inner writer failed after {consumed} bytes: {e}");
                break;
            }
        }
        Ok(consumed)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Bits of an unfinished byte stay queued in the stream.
        self.drain()?;
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for SlzWriter<W> {
    fn drop(&mut self) {
        if self.writer.is_some() {
            // Try to finish compression, but ignore errors in drop
            let _ = self.finish_stream();
        }
    }
}
