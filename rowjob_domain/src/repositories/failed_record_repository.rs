// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Failed Record Repository Port

use crate::entities::FailedRecord;
use crate::value_objects::JobId;
use crate::JobEngineError;
use async_trait::async_trait;

#[async_trait]
pub trait FailedRecordRepository: Send + Sync {
    /// Appends a failed row. Identity is `(job_id, chunk_index,
    /// line_number)`; callers are expected to have already deduplicated by
    /// that key if a retry replays the same failure.
    async fn append(&self, record: FailedRecord) -> Result<(), JobEngineError>;

    /// Failed rows for a job, optionally restricted to ones not yet
    /// reprocessed.
    async fn find_for_job(&self, job_id: JobId, only_unreprocessed: bool) -> Result<Vec<FailedRecord>, JobEngineError>;

    async fn mark_reprocessed(&self, job_id: JobId, chunk_index: crate::value_objects::ChunkIndex, line_number: u64)
        -> Result<(), JobEngineError>;
}
