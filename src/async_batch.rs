//! Async batch processing module
//!
//! This module compresses many independent inputs concurrently. Every task
//! owns its own [`Stream`](crate::Stream), so no state is shared between them.

#[cfg(feature = "async")]
/// Concurrent compression of buffers and files with a bounded task count
pub mod processor {
    use crate::async_writer::AsyncSlzWriter;
    use crate::common::{EncodeStats, Format, Level, Result};
    use crate::deflate::DEFAULT_CHUNK_SIZE;
    use bytes::Bytes;
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};
    use tokio::fs::File;
    use tokio::io::{AsyncReadExt, BufReader};

    /// Concurrent compressor optimized for throughput
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
        chunk_size: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor with default settings
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
                chunk_size: DEFAULT_CHUNK_SIZE,
            }
        }

        /// Set the concurrency limit
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Set the chunk size used when reading files
        pub fn with_chunk_size(mut self, size: usize) -> Self {
            self.chunk_size = size.max(1);
            self
        }

        /// Compress in-memory buffers on the blocking pool, preserving input order
        pub async fn compress_buffers(
            &self,
            buffers: Vec<Bytes>,
            level: Level,
            format: Format,
        ) -> Result<Vec<Vec<u8>>> {
            log::debug!(
                "compressing {} buffers, concurrency {}",
                buffers.len(),
                self.concurrency_limit
            );

            stream::iter(buffers.into_iter().map(|data| async move {
                tokio::task::spawn_blocking(move || crate::compress_bytes(&data, level, format))
                    .await
                    .map_err(std::io::Error::other)?
            }))
            .buffered(self.concurrency_limit)
            .try_collect()
            .await
        }

        /// Compress files concurrently, results in completion order
        pub async fn compress_files<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
            level: Level,
            format: Format,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            let results: Vec<(PathBuf, Vec<u8>, EncodeStats)> = self
                .compress_files_with_stats(files, level, format)
                .await?;
            Ok(results
                .into_iter()
                .map(|(path, data, _)| (path, data))
                .collect())
        }

        /// Compress files concurrently, keeping each file's statistics
        pub async fn compress_files_with_stats<P: AsRef<Path> + Send + Sync>(
            &self,
            files: Vec<P>,
            level: Level,
            format: Format,
        ) -> Result<Vec<(PathBuf, Vec<u8>, EncodeStats)>> {
            stream::iter(files.into_iter().map(|path| {
                let processor = self.clone();
                async move { processor.compress_single_file(path, level, format).await }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await
        }

        async fn compress_single_file<P: AsRef<Path>>(
            &self,
            path: P,
            level: Level,
            format: Format,
        ) -> Result<(PathBuf, Vec<u8>, EncodeStats)> {
            let path = path.as_ref();
            let mut reader = BufReader::new(File::open(path).await?);
            let mut writer =
                AsyncSlzWriter::with_chunk_size(Vec::new(), level, format, self.chunk_size);

            let mut buffer = vec![0u8; self.chunk_size];
            loop {
                let bytes_read = reader.read(&mut buffer).await?;
                if bytes_read == 0 {
                    break;
                }
                writer.write_chunk(&buffer[..bytes_read]).await?;

                // Yield control periodically for fairness
                if bytes_read == self.chunk_size {
                    tokio::task::yield_now().await;
                }
            }

            let stats = writer.stats().clone();
            let mut output = writer.finish().await?;
            output.shrink_to_fit();
            log::debug!(
                "{}: {} -> {} bytes",
                path.display(),
                stats.input_bytes,
                output.len()
            );
            Ok((path.to_path_buf(), output, stats))
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }

}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
