//! Async compression module
//!
//! This module provides an async streaming compressor implementing
//! `tokio::io::AsyncWrite`. Compressed bytes are staged in a small buffer
//! and drained into the wrapped writer before new input is accepted, so
//! memory stays bounded by one chunk.

#[cfg(feature = "async")]
/// Async streaming compression over `tokio::io::AsyncWrite`
pub mod writer {
    use crate::common::{max_encoded_len, EncodeStats, Format, Level, Result, MAX_TRAILER_LEN};
    use crate::deflate::{Stream, DEFAULT_CHUNK_SIZE};
    use bytes::{Buf, BytesMut};
    use pin_project::pin_project;
    use std::io;
    use std::pin::Pin;
    use std::task::{ready, Context, Poll};
    use tokio::io::{AsyncWrite, AsyncWriteExt};

    /// Async streaming compressor
    #[pin_project]
    #[derive(Debug)]
    pub struct AsyncSlzWriter<W> {
        #[pin]
        writer: W,
        stream: Stream,
        chunk_size: usize,
        pending: BytesMut,
    }

    impl<W: AsyncWrite> AsyncSlzWriter<W> {
        /// Create a new AsyncSlzWriter
        pub fn new(writer: W, level: Level, format: Format) -> Self {
            Self::with_chunk_size(writer, level, format, DEFAULT_CHUNK_SIZE)
        }

        /// Create a new AsyncSlzWriter accepting at most `chunk_size` bytes per write
        pub fn with_chunk_size(writer: W, level: Level, format: Format, chunk_size: usize) -> Self {
            let chunk_size = chunk_size.max(1);
            Self {
                writer,
                stream: Stream::new(level, format),
                chunk_size,
                pending: BytesMut::with_capacity(max_encoded_len(chunk_size)),
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
        pub fn get_ref(&self) -> &W {
            &self.writer
        }

        /// Unwrap the writer. Compressed bytes not yet drained are lost.
        pub fn into_inner(self) -> W {
            self.writer
        }

        /// Write everything staged so far to the wrapped writer
        fn poll_drain(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            let mut this = self.project();
            while !this.pending.is_empty() {
                let n = ready!(this.writer.as_mut().poll_write(cx, &this.pending[..]))?;
                if n == 0 {
                    return Poll::Ready(Err(io::ErrorKind::WriteZero.into()));
                }
                this.pending.advance(n);
            }
            Poll::Ready(Ok(()))
        }

        /// Encode `data` and stage the output
        fn stage_encode(self: Pin<&mut Self>, data: &[u8], more: bool) -> Result<()> {
            let this = self.project();
            let start = this.pending.len();
            this.pending.resize(start + max_encoded_len(data.len()), 0);
            let written = this.stream.encode(&mut this.pending[start..], data, more);
            this.pending.truncate(start + *written.as_ref().unwrap_or(&0));
            written.map(|_| ())
        }

        /// Stage the trailer
        fn stage_finish(self: Pin<&mut Self>) -> Result<()> {
            let this = self.project();
            let start = this.pending.len();
            this.pending.resize(start + MAX_TRAILER_LEN, 0);
            let written = this.stream.finish(&mut this.pending[start..]);
            this.pending.truncate(start + *written.as_ref().unwrap_or(&0));
            written.map(|_| ())
        }
    }

    impl<W: AsyncWrite + Unpin> AsyncSlzWriter<W> {
        /// Compress a chunk of data asynchronously
        pub async fn write_chunk(&mut self, data: &[u8]) -> Result<()> {
            self.write_all(data).await?;
            Ok(())
        }

        /// Finish compression, write the trailer and return the wrapped writer
        pub async fn finish(mut self) -> Result<W> {
            self.shutdown().await?;
            Ok(self.writer)
        }
    }

    impl<W: AsyncWrite> AsyncWrite for AsyncSlzWriter<W> {
        fn poll_write(
            mut self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            ready!(self.as_mut().poll_drain(cx))?;

            let len = buf.len().min(self.chunk_size);
            self.as_mut().stage_encode(&buf[..len], true)?;
            Poll::Ready(Ok(len))
        }

        fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            ready!(self.as_mut().poll_drain(cx))?;
            self.project().writer.poll_flush(cx)
        }

        fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            if self.stream.state().accepts_input() {
                self.as_mut().stage_encode(&[], false)?;
            }
            if !self.stream.is_finished() {
                self.as_mut().stage_finish()?;
                log::debug!(
                    "async stream finished: {} -> {} bytes",
                    self.stream.stats().input_bytes,
                    self.stream.stats().output_bytes
                );
            }
            ready!(self.as_mut().poll_drain(cx))?;
            self.project().writer.poll_shutdown(cx)
        }
    }

}

#[cfg(feature = "async")]
pub use writer::AsyncSlzWriter;
