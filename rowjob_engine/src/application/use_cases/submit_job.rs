// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Submit Job Use Case
//!
//! Accepts a [`SubmitJobCommand`], registers its control handle, and spawns
//! the job workflow as a detached task so `start_job` returns immediately
//! with the job's identity rather than blocking for the whole run.

use rowjob_domain::value_objects::JobId;
use rowjob_domain::JobEngineError;
use std::sync::Arc;

use crate::application::commands::SubmitJobCommand;
use crate::application::services::{run_job_workflow, JobWorkflowDeps};
use crate::control_plane::ControlPlaneRegistry;

pub struct SubmitJobResult {
    pub job_id: JobId,
    pub workflow_id: String,
}

pub async fn submit_job(
    deps: Arc<JobWorkflowDeps>,
    registry: Arc<ControlPlaneRegistry>,
    command: SubmitJobCommand,
) -> Result<SubmitJobResult, JobEngineError> {
    command.request.validate()?;

    let job_id = command.request.job_id;
    let workflow_id = format!("file-processing-{job_id}");
    let control = registry.register(job_id);

    tokio::spawn(async move {
        let result = run_job_workflow(deps, command.request, control.clone()).await;
        registry.unregister(job_id);
        if let Err(err) = result {
            tracing::warn!(job_id = %job_id, error = %err, "job workflow ended with an error");
        }
    });

    Ok(SubmitJobResult { job_id, workflow_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::TokioFileByteProvider;
    use crate::infrastructure::repositories::{InMemoryChunkProgressRepository, InMemoryFailedRecordRepository, InMemoryJobRepository};
    use crate::application::services::ChunkWorkflowDeps;
    use async_trait::async_trait;
    use rowjob_domain::entities::FileProcessingRequest;
    use rowjob_domain::repositories::JobRepository;
    use rowjob_domain::services::{BatchProcessingResult, RowBatchProcessor};
    use rowjob_domain::value_objects::ChunkIndex;
    use std::io::Write;
    use tempfile::tempdir;

    struct EchoProcessor;

    #[async_trait]
    impl RowBatchProcessor for EchoProcessor {
        async fn process_batch(
            &self,
            _job_id: JobId,
            _chunk_index: ChunkIndex,
            _batch_start_line: u64,
            rows: &[String],
            _enable_deduplication: bool,
        ) -> Result<BatchProcessingResult, JobEngineError> {
            Ok(BatchProcessingResult {
                processed_count: rows.len() as u64,
                valid_count: rows.len() as u64,
                invalid_count: 0,
                duplicate_count: 0,
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn submit_returns_immediately_with_job_identity() {
        let dir = tempdir().unwrap();
        std::fs::File::create(dir.path().join("data.csv")).unwrap().write_all(b"id,name\n1,a\n").unwrap();

        let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let deps = Arc::new(JobWorkflowDeps {
            chunk_workflow: Arc::new(ChunkWorkflowDeps {
                byte_provider: Arc::new(TokioFileByteProvider::new()),
                row_processor: Arc::new(EchoProcessor),
                chunk_progress_repository: Arc::new(InMemoryChunkProgressRepository::new()),
                failed_record_repository: Arc::new(InMemoryFailedRecordRepository::new()),
            }),
            job_repository: job_repository.clone(),
        });
        let registry = Arc::new(ControlPlaneRegistry::new());

        let request = FileProcessingRequest::new(dir.path(), "data.csv");
        let job_id = request.job_id;
        let result = submit_job(deps, registry, SubmitJobCommand::new(request)).await.unwrap();
        assert_eq!(result.job_id, job_id);
        assert_eq!(result.workflow_id, format!("file-processing-{job_id}"));
    }

    #[tokio::test]
    async fn submit_rejects_invalid_request() {
        let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let deps = Arc::new(JobWorkflowDeps {
            chunk_workflow: Arc::new(ChunkWorkflowDeps {
                byte_provider: Arc::new(TokioFileByteProvider::new()),
                row_processor: Arc::new(EchoProcessor),
                chunk_progress_repository: Arc::new(InMemoryChunkProgressRepository::new()),
                failed_record_repository: Arc::new(InMemoryFailedRecordRepository::new()),
            }),
            job_repository,
        });
        let registry = Arc::new(ControlPlaneRegistry::new());

        let request = FileProcessingRequest::new("/data", "");
        let result = submit_job(deps, registry, SubmitJobCommand::new(request)).await;
        assert!(result.is_err());
    }
}
