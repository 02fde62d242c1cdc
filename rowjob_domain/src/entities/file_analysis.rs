// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Analysis
//!
//! Result of the one-time file analysis activity that seeds a job's
//! partition plan: total size, a row-count estimate derived from sampling
//! the file prefix, and the resulting chunk count.

use crate::value_objects::ChunkSizeBytes;
use serde::{Deserialize, Serialize};

/// Default width of the file-prefix sample used to estimate average row
/// size.
pub const DEFAULT_ANALYSIS_SAMPLE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysisResult {
    pub file_size_bytes: u64,
    pub estimated_row_count: u64,
    pub total_chunks: u64,
    pub chunk_size_bytes: u64,
}

impl FileAnalysisResult {
    pub fn new(file_size_bytes: u64, estimated_row_count: u64, chunk_size_bytes: ChunkSizeBytes) -> Self {
        Self {
            file_size_bytes,
            estimated_row_count,
            total_chunks: chunk_size_bytes.chunks_needed_for_file(file_size_bytes),
            chunk_size_bytes: chunk_size_bytes.bytes(),
        }
    }
}

/// Estimates the number of data rows in a file from a prefix sample:
/// `max(0, floor(file_size / avg_bytes_per_row) - 1)`, subtracting one row
/// for the header. Falls back to `file_size / 100` when the sample contains
/// no newline at all (single giant row, or a sample narrower than one row).
pub fn estimate_row_count(file_size_bytes: u64, sample: &[u8]) -> u64 {
    if file_size_bytes == 0 {
        return 0;
    }

    let newline_count = sample.iter().filter(|&&b| b == b'\n').count();
    if newline_count == 0 {
        return file_size_bytes / 100;
    }

    let avg_bytes_per_row = sample.len() as f64 / newline_count as f64;
    if avg_bytes_per_row <= 0.0 {
        return file_size_bytes / 100;
    }

    let estimated = (file_size_bytes as f64 / avg_bytes_per_row).floor() as i64 - 1;
    estimated.max(0) as u64
}
