// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Byte Provider Port
//!
//! Abstracts reading bytes from the file a job targets, so boundary
//! alignment and chunk reading stay testable without touching the
//! filesystem and the engine crate can swap implementations (plain file,
//! memory-mapped, remote object store) without the domain knowing.

use crate::JobEngineError;
use async_trait::async_trait;
use std::path::Path;

/// A contiguous byte range read from a file, paired with the row count the
/// row-range activity derived from it.
#[derive(Debug, Clone)]
pub struct ChunkData {
    pub start_offset: u64,
    pub end_offset: u64,
    pub bytes: Vec<u8>,
    pub row_count: u64,
}

#[async_trait]
pub trait FileByteProvider: Send + Sync {
    /// Total size of the file in bytes.
    async fn file_size(&self, directory: &Path, filename: &str) -> Result<u64, JobEngineError>;

    /// Reads `[start, end)` bytes of window around `offset`, used for
    /// boundary-alignment scans. `window_len` bytes are read starting at
    /// `offset`, or fewer if `offset + window_len` exceeds the file size.
    async fn read_window(&self, directory: &Path, filename: &str, offset: u64, window_len: u64)
        -> Result<Vec<u8>, JobEngineError>;

    /// Reads the row-aligned `[start, end)` byte range for a chunk.
    async fn read_range(&self, directory: &Path, filename: &str, start: u64, end: u64)
        -> Result<Vec<u8>, JobEngineError>;

    /// Reads up to `sample_bytes` from the start of the file, used by file
    /// analysis to estimate the average row width.
    async fn read_prefix_sample(&self, directory: &Path, filename: &str, sample_bytes: u64)
        -> Result<Vec<u8>, JobEngineError>;
}
