// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Get Job Status / Progress Use Case
//!
//! A query, not a command: `get_status` returns whatever is currently
//! persisted, while `get_progress` is the same read - the job workflow
//! itself is the only writer, and it persists on every aggregate recompute,
//! so a freshly read record is already as current as this process can make
//! it without reaching into the running task directly.

use rowjob_domain::entities::JobStatus;
use rowjob_domain::repositories::JobRepository;
use rowjob_domain::value_objects::JobId;
use rowjob_domain::JobEngineError;
use std::sync::Arc;

pub async fn get_job_status(job_repository: &Arc<dyn JobRepository>, job_id: JobId) -> Result<Option<JobStatus>, JobEngineError> {
    job_repository.find_by_id(job_id).await
}

pub async fn get_job_progress(job_repository: &Arc<dyn JobRepository>, job_id: JobId) -> Result<JobStatus, JobEngineError> {
    job_repository
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| JobEngineError::JobNotFound(job_id.to_string()))
}
