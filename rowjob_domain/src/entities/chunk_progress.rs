// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Progress
//!
//! Mutable progress record for one chunk of a job, keyed by
//! `(job_id, chunk_index)`. Chunk progress is owned exclusively by its own
//! chunk workflow; the job workflow only ever reads a snapshot after a
//! chunk-level update.

use crate::value_objects::{ChunkIndex, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkStatus {
    Pending,
    Reading,
    Processing,
    Completed,
    Failed,
    Retrying,
}

impl ChunkStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChunkStatus::Completed | ChunkStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkProgress {
    pub job_id: JobId,
    pub chunk_index: ChunkIndex,
    pub start_offset: u64,
    pub end_offset: u64,
    pub status: ChunkStatus,
    pub total_rows: u64,
    pub processed_rows: u64,
    pub valid_rows: u64,
    pub invalid_rows: u64,
    pub duplicate_rows: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub retry_attempt: u32,
}

impl ChunkProgress {
    pub fn new(job_id: JobId, chunk_index: ChunkIndex, start_offset: u64, end_offset: u64) -> Self {
        Self {
            job_id,
            chunk_index,
            start_offset,
            end_offset,
            status: ChunkStatus::Pending,
            total_rows: 0,
            processed_rows: 0,
            valid_rows: 0,
            invalid_rows: 0,
            duplicate_rows: 0,
            start_time: Utc::now(),
            end_time: None,
            error_message: None,
            retry_attempt: 0,
        }
    }

    /// `processed_rows = valid_rows + invalid_rows + duplicate_rows` must
    /// hold for any stored record.
    pub fn counters_are_consistent(&self) -> bool {
        self.processed_rows == self.valid_rows + self.invalid_rows + self.duplicate_rows
    }

    /// Idempotent upsert: applies `update` only if it represents progress
    /// at least as advanced as the current record, keyed on `processed_rows`.
    /// A retried activity replaying an earlier batch result never regresses
    /// the stored counters.
    pub fn merge_upsert(&mut self, update: ChunkProgress) {
        if update.processed_rows >= self.processed_rows {
            let job_id = self.job_id;
            let chunk_index = self.chunk_index;
            let start_time = self.start_time;
            *self = update;
            self.job_id = job_id;
            self.chunk_index = chunk_index;
            self.start_time = start_time;
        }
    }

    pub fn mark_completed(&mut self) {
        self.status = ChunkStatus::Completed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, error_message: impl Into<String>) {
        self.status = ChunkStatus::Failed;
        self.error_message = Some(error_message.into());
        self.end_time = Some(Utc::now());
    }
}
