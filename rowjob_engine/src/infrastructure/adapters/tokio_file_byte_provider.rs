// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Tokio File Byte Provider
//!
//! [`FileByteProvider`] implementation backed by `tokio::fs`, reading exact
//! byte ranges with seek + read_exact rather than loading the whole file,
//! so chunk reads stay proportional to chunk size regardless of file size.

use async_trait::async_trait;
use rowjob_domain::services::{ChunkData, FileByteProvider};
use rowjob_domain::JobEngineError;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

pub struct TokioFileByteProvider;

impl TokioFileByteProvider {
    pub fn new() -> Self {
        Self
    }

    async fn read_at(&self, path: &Path, offset: u64, len: u64) -> Result<Vec<u8>, JobEngineError> {
        let mut file = File::open(path).await?;
        let file_size = file.metadata().await?.len();
        let clamped_len = len.min(file_size.saturating_sub(offset));

        file.seek(SeekFrom::Start(offset)).await?;
        let mut buf = vec![0u8; clamped_len as usize];
        file.read_exact(&mut buf).await?;
        Ok(buf)
    }
}

impl Default for TokioFileByteProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileByteProvider for TokioFileByteProvider {
    async fn file_size(&self, directory: &Path, filename: &str) -> Result<u64, JobEngineError> {
        let metadata = tokio::fs::metadata(directory.join(filename)).await?;
        Ok(metadata.len())
    }

    async fn read_window(
        &self,
        directory: &Path,
        filename: &str,
        offset: u64,
        window_len: u64,
    ) -> Result<Vec<u8>, JobEngineError> {
        self.read_at(&directory.join(filename), offset, window_len).await
    }

    async fn read_range(&self, directory: &Path, filename: &str, start: u64, end: u64) -> Result<Vec<u8>, JobEngineError> {
        self.read_at(&directory.join(filename), start, end.saturating_sub(start)).await
    }

    async fn read_prefix_sample(&self, directory: &Path, filename: &str, sample_bytes: u64) -> Result<Vec<u8>, JobEngineError> {
        self.read_at(&directory.join(filename), 0, sample_bytes).await
    }
}

/// Splits a byte range into `ChunkData` along with its row count, where
/// `header_excluded` drops the first line from the count (chunk 0's header).
pub fn to_chunk_data(start_offset: u64, end_offset: u64, bytes: Vec<u8>, header_excluded: bool) -> ChunkData {
    let mut row_count = bytes.iter().filter(|&&b| b == b'\n').count() as u64;
    if !bytes.is_empty() && bytes.last() != Some(&b'\n') {
        row_count += 1;
    }
    if header_excluded && row_count > 0 {
        row_count -= 1;
    }

    ChunkData {
        start_offset,
        end_offset,
        bytes,
        row_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_exact_byte_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::File::create(&path).unwrap().write_all(b"0123456789").unwrap();

        let provider = TokioFileByteProvider::new();
        let bytes = provider.read_range(dir.path(), "data.csv", 2, 5).await.unwrap();
        assert_eq!(bytes, b"234");
    }

    #[tokio::test]
    async fn file_size_matches_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::File::create(&path).unwrap().write_all(b"hello world").unwrap();

        let provider = TokioFileByteProvider::new();
        assert_eq!(provider.file_size(dir.path(), "data.csv").await.unwrap(), 11);
    }

    #[test]
    fn to_chunk_data_excludes_header_row() {
        let data = to_chunk_data(0, 20, b"header\nrow1\nrow2\n".to_vec(), true);
        assert_eq!(data.row_count, 2);
    }

    #[test]
    fn to_chunk_data_counts_trailing_partial_row() {
        let data = to_chunk_data(0, 20, b"row1\nrow2".to_vec(), false);
        assert_eq!(data.row_count, 2);
    }
}
