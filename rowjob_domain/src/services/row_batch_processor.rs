// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Row Batch Processor Port
//!
//! The row schema and its validation/deduplication rules are owned by the
//! caller, not this engine: the engine only knows how to slice rows into
//! batches and drive this port. Kept as a trait so tests can swap in a
//! fixture processor without a real row schema.

use crate::value_objects::{ChunkIndex, JobId};
use crate::JobEngineError;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchProcessingResult {
    pub processed_count: u64,
    pub valid_count: u64,
    pub invalid_count: u64,
    pub duplicate_count: u64,
    /// `(line offset within the batch, raw row text)` for each row counted
    /// in `invalid_count`, so the chunk workflow can record it as a
    /// [`FailedRecord`](crate::entities::FailedRecord) without re-deriving
    /// which rows failed.
    pub invalid_rows: Vec<(u64, String)>,
    /// Same shape as `invalid_rows`, for rows counted in `duplicate_count`.
    pub duplicate_rows: Vec<(u64, String)>,
}

impl BatchProcessingResult {
    pub fn is_consistent(&self) -> bool {
        self.processed_count == self.valid_count + self.invalid_count + self.duplicate_count
            && self.invalid_rows.len() as u64 == self.invalid_count
            && self.duplicate_rows.len() as u64 == self.duplicate_count
    }
}

#[async_trait]
pub trait RowBatchProcessor: Send + Sync {
    /// Processes one batch of raw row lines belonging to `chunk_index` of
    /// `job_id`. `enable_deduplication` scopes duplicate detection to the
    /// whole job, not just this batch or chunk.
    async fn process_batch(
        &self,
        job_id: JobId,
        chunk_index: ChunkIndex,
        batch_start_line: u64,
        rows: &[String],
        enable_deduplication: bool,
    ) -> Result<BatchProcessingResult, JobEngineError>;
}
