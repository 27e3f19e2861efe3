//! Async convenience functions
//!
//! This module provides easy-to-use async functions for common compression
//! operations.

#[cfg(feature = "async")]
pub mod functions {
    use crate::async_writer::AsyncSlzWriter;
    use crate::common::{EncodeStats, Format, Level, Result};
    use crate::deflate::DEFAULT_CHUNK_SIZE;
    use std::path::{Path, PathBuf};
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

    /// Compress data from an async reader
    pub async fn compress_async<R: AsyncRead + Unpin>(
        reader: R,
        level: Level,
        format: Format,
    ) -> Result<Vec<u8>> {
        let mut writer = AsyncSlzWriter::new(Vec::new(), level, format);
        copy_into(reader, &mut writer).await?;
        writer.finish().await
    }

    /// Compress data from bytes
    pub async fn compress_bytes_async(data: &[u8], level: Level, format: Format) -> Result<Vec<u8>> {
        compress_async(data, level, format).await
    }

    /// Compress a file asynchronously, returning the encoding statistics
    pub async fn compress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        level: Level,
        format: Format,
    ) -> Result<EncodeStats> {
        let input = tokio::fs::File::open(input_path).await?;
        let output = tokio::fs::File::create(output_path).await?;

        let mut writer = AsyncSlzWriter::new(BufWriter::new(output), level, format);
        copy_into(input, &mut writer).await?;
        writer.shutdown().await?;

        Ok(writer.stats().clone())
    }

    /// Compress multiple files concurrently
    pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
        files: Vec<P>,
        level: Level,
        format: Format,
        concurrency: Option<usize>,
    ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
        use crate::async_batch::AsyncBatchProcessor;

        let mut processor = AsyncBatchProcessor::new();
        if let Some(limit) = concurrency {
            processor = processor.with_concurrency(limit);
        }

        processor.compress_files(files, level, format).await
    }

    /// Create a streaming compressor for continuous data
    pub fn create_streaming_compressor<W: AsyncWrite + Unpin>(
        writer: W,
        level: Level,
        format: Format,
    ) -> AsyncSlzWriter<W> {
        AsyncSlzWriter::new(writer, level, format)
    }

    async fn copy_into<R, W>(reader: R, writer: &mut AsyncSlzWriter<W>) -> Result<u64>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buffer = vec![0u8; DEFAULT_CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            writer.write_chunk(&buffer[..bytes_read]).await?;
            total += bytes_read as u64;
        }
        Ok(total)
    }

}

#[cfg(feature = "async")]
pub use functions::*;
