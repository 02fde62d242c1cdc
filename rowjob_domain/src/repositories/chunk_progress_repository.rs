// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Progress Repository Port

use crate::entities::ChunkProgress;
use crate::value_objects::{ChunkIndex, JobId};
use crate::JobEngineError;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
pub trait ChunkProgressRepository: Send + Sync {
    /// Idempotent upsert keyed by `(job_id, chunk_index)`, latest-wins per
    /// [`ChunkProgress::merge_upsert`].
    async fn upsert(&self, progress: ChunkProgress) -> Result<(), JobEngineError>;

    async fn find(&self, job_id: JobId, chunk_index: ChunkIndex) -> Result<Option<ChunkProgress>, JobEngineError>;

    /// All chunk progress for a job, keyed by chunk index, for aggregate
    /// recomputation.
    async fn find_all_for_job(&self, job_id: JobId) -> Result<BTreeMap<u32, ChunkProgress>, JobEngineError>;
}
