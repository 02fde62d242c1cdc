// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Status
//!
//! Aggregate, queryable state for a whole job. `recompute_aggregates` is the
//! single place componentwise sums over the chunk-progress map are produced,
//! so aggregation stays deterministic regardless of the order children
//! complete in.

use crate::entities::chunk_progress::{ChunkProgress, ChunkStatus};
use crate::value_objects::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Started,
    AnalyzingFile,
    ProcessingChunks,
    Completed,
    Failed,
    Cancelled,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed | JobState::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    pub job_id: JobId,
    pub status: JobState,
    pub total_chunks: u64,
    pub completed_chunks: u64,
    pub total_rows: u64,
    pub processed_rows: u64,
    pub valid_rows: u64,
    pub invalid_rows: u64,
    pub duplicate_rows: u64,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl JobStatus {
    pub fn new(job_id: JobId) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            status: JobState::Started,
            total_chunks: 0,
            completed_chunks: 0,
            total_rows: 0,
            processed_rows: 0,
            valid_rows: 0,
            invalid_rows: 0,
            duplicate_rows: 0,
            started_at: now,
            updated_at: now,
            finished_at: None,
            error_message: None,
        }
    }

    /// Componentwise sum over the chunk-progress map. `completed_chunks` is
    /// the count of entries in `Completed` status, not the map's length, so
    /// failed or still-running chunks are never mistaken for completions.
    pub fn recompute_aggregates(&mut self, chunks: &BTreeMap<u32, ChunkProgress>) {
        self.completed_chunks = chunks
            .values()
            .filter(|c| c.status == ChunkStatus::Completed)
            .count() as u64;
        self.total_rows = chunks.values().map(|c| c.total_rows).sum();
        self.processed_rows = chunks.values().map(|c| c.processed_rows).sum();
        self.valid_rows = chunks.values().map(|c| c.valid_rows).sum();
        self.invalid_rows = chunks.values().map(|c| c.invalid_rows).sum();
        self.duplicate_rows = chunks.values().map(|c| c.duplicate_rows).sum();
        self.updated_at = Utc::now();
    }

    /// Applies a reprocess pass's outcome: successfully reprocessed rows
    /// move from invalid to valid without changing `processed_rows`, and
    /// `invalid_rows` never goes negative even if reprocessing outpaces the
    /// recorded failure count.
    pub fn apply_reprocess_result(&mut self, successfully_processed: u64) {
        self.valid_rows += successfully_processed;
        self.invalid_rows = self.invalid_rows.saturating_sub(successfully_processed);
    }

    pub fn mark_completed(&mut self) {
        self.status = JobState::Completed;
        self.finished_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    pub fn mark_failed(&mut self, error_message: impl Into<String>) {
        self.status = JobState::Failed;
        self.error_message = Some(error_message.into());
        self.finished_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    pub fn mark_cancelled(&mut self) {
        self.status = JobState::Cancelled;
        self.finished_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ChunkIndex;

    fn chunk(status: ChunkStatus, processed: u64, valid: u64, invalid: u64, dup: u64) -> ChunkProgress {
        let mut c = ChunkProgress::new(JobId::new(), ChunkIndex::new(0), 0, 100);
        c.status = status;
        c.processed_rows = processed;
        c.valid_rows = valid;
        c.invalid_rows = invalid;
        c.duplicate_rows = dup;
        c
    }

    #[test]
    fn aggregation_counts_only_completed_chunks() {
        let mut chunks = BTreeMap::new();
        chunks.insert(0, chunk(ChunkStatus::Completed, 10, 10, 0, 0));
        chunks.insert(1, chunk(ChunkStatus::Processing, 5, 5, 0, 0));
        chunks.insert(2, chunk(ChunkStatus::Completed, 8, 6, 1, 1));

        let mut status = JobStatus::new(JobId::new());
        status.recompute_aggregates(&chunks);

        assert_eq!(status.completed_chunks, 2);
        assert_eq!(status.processed_rows, 23);
        assert_eq!(status.valid_rows, 21);
        assert_eq!(status.invalid_rows, 1);
        assert_eq!(status.duplicate_rows, 1);
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut a = BTreeMap::new();
        a.insert(0, chunk(ChunkStatus::Completed, 10, 10, 0, 0));
        a.insert(1, chunk(ChunkStatus::Completed, 5, 5, 0, 0));

        let mut b = BTreeMap::new();
        b.insert(1, chunk(ChunkStatus::Completed, 5, 5, 0, 0));
        b.insert(0, chunk(ChunkStatus::Completed, 10, 10, 0, 0));

        let mut status_a = JobStatus::new(JobId::new());
        status_a.recompute_aggregates(&a);
        let mut status_b = JobStatus::new(JobId::new());
        status_b.recompute_aggregates(&b);

        assert_eq!(status_a.processed_rows, status_b.processed_rows);
        assert_eq!(status_a.completed_chunks, status_b.completed_chunks);
    }

    #[test]
    fn reprocess_result_moves_rows_without_changing_processed_total() {
        let mut status = JobStatus::new(JobId::new());
        status.processed_rows = 10;
        status.valid_rows = 9;
        status.invalid_rows = 1;

        status.apply_reprocess_result(1);
        assert_eq!(status.valid_rows, 10);
        assert_eq!(status.invalid_rows, 0);
        assert_eq!(status.processed_rows, 10);
    }

    #[test]
    fn reprocess_result_never_goes_negative() {
        let mut status = JobStatus::new(JobId::new());
        status.invalid_rows = 0;
        status.apply_reprocess_result(5);
        assert_eq!(status.invalid_rows, 0);
    }
}
