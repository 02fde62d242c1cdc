// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Size Value Object
//!
//! Type-safe representation of the byte width used to partition an input
//! file into row-range chunks. Bounds-checked at construction so an
//! out-of-range `chunk_size_bytes` in a submitted request fails fast instead
//! of producing a degenerate partition plan.
//!
//! ```
//! use rowjob_domain::value_objects::ChunkSizeBytes;
//!
//! let chunk = ChunkSizeBytes::from_mb(100).unwrap();
//! assert_eq!(chunk.bytes(), 100 * 1024 * 1024);
//! assert_eq!(chunk.chunks_needed_for_file(250 * 1024 * 1024), 3);
//! ```

use crate::JobEngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated chunk size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkSizeBytes {
    bytes: u64,
}

impl ChunkSizeBytes {
    /// Minimum chunk size - a chunk must contain at least one byte.
    pub const MIN_SIZE: u64 = 1;

    /// Maximum chunk size (4GB) - bounds the largest single in-flight read.
    pub const MAX_SIZE: u64 = 4 * 1024 * 1024 * 1024;

    /// Default chunk size (100MiB), matching the documented default for
    /// `FileProcessingRequest::chunk_size_bytes`.
    pub const DEFAULT_SIZE: u64 = 100 * 1024 * 1024;

    pub fn new(bytes: u64) -> Result<Self, JobEngineError> {
        if bytes < Self::MIN_SIZE {
            return Err(JobEngineError::invalid_config(format!(
                "chunk_size_bytes {} is below minimum of {} bytes",
                bytes,
                Self::MIN_SIZE
            )));
        }
        if bytes > Self::MAX_SIZE {
            return Err(JobEngineError::invalid_config(format!(
                "chunk_size_bytes {} exceeds maximum of {} bytes",
                bytes,
                Self::MAX_SIZE
            )));
        }
        Ok(Self { bytes })
    }

    pub fn from_kb(kb: u64) -> Result<Self, JobEngineError> {
        Self::new(kb.saturating_mul(1024))
    }

    pub fn from_mb(mb: u64) -> Result<Self, JobEngineError> {
        Self::new(mb.saturating_mul(1024 * 1024))
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn megabytes(&self) -> f64 {
        (self.bytes as f64) / (1024.0 * 1024.0)
    }

    /// Number of chunks a file of `file_size_bytes` splits into: `ceil(file_size
    /// / chunk_size)`, with a zero-byte file still counting as one (empty)
    /// chunk so a job always has at least one chunk workflow to finalize.
    pub fn chunks_needed_for_file(&self, file_size_bytes: u64) -> u64 {
        if file_size_bytes == 0 {
            return 1;
        }
        file_size_bytes.div_ceil(self.bytes)
    }
}

impl Default for ChunkSizeBytes {
    fn default() -> Self {
        Self {
            bytes: Self::DEFAULT_SIZE,
        }
    }
}

impl fmt::Display for ChunkSizeBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}MB", self.megabytes())
    }
}

impl TryFrom<u64> for ChunkSizeBytes {
    type Error = JobEngineError;

    fn try_from(bytes: u64) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        assert!(ChunkSizeBytes::new(0).is_err());
    }

    #[test]
    fn rejects_above_max() {
        assert!(ChunkSizeBytes::new(ChunkSizeBytes::MAX_SIZE + 1).is_err());
    }

    #[test]
    fn default_is_100_mib() {
        assert_eq!(ChunkSizeBytes::default().bytes(), 100 * 1024 * 1024);
    }

    #[test]
    fn chunks_needed_rounds_up() {
        let chunk = ChunkSizeBytes::from_mb(100).unwrap();
        assert_eq!(chunk.chunks_needed_for_file(250 * 1024 * 1024), 3);
        assert_eq!(chunk.chunks_needed_for_file(200 * 1024 * 1024), 2);
        assert_eq!(chunk.chunks_needed_for_file(1), 1);
    }

    #[test]
    fn empty_file_is_one_chunk() {
        let chunk = ChunkSizeBytes::from_mb(100).unwrap();
        assert_eq!(chunk.chunks_needed_for_file(0), 1);
    }

    #[test]
    fn display_formats_megabytes() {
        let chunk = ChunkSizeBytes::from_mb(2).unwrap();
        assert_eq!(format!("{}", chunk), "2.0MB");
    }
}
