// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Repository Port

use crate::entities::JobStatus;
use crate::value_objects::JobId;
use crate::JobEngineError;
use async_trait::async_trait;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Upserts a job's status record. Called after every aggregate
    /// recompute, so implementations should treat this as a full overwrite
    /// keyed by `job_id`, not an append.
    async fn save(&self, status: &JobStatus) -> Result<(), JobEngineError>;

    async fn find_by_id(&self, job_id: JobId) -> Result<Option<JobStatus>, JobEngineError>;

    /// Jobs ordered most-recently-started first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<JobStatus>, JobEngineError>;

    async fn delete(&self, job_id: JobId) -> Result<bool, JobEngineError>;
}
