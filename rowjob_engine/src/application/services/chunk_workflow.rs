// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Workflow
//!
//! Drives one chunk through `Pending -> Reading -> Processing -> Completed`
//! (or `-> Failed`): calculate boundaries, read the chunk, iterate batches
//! through the row processor, periodically persist progress, then finalize.
//! Each step runs under the retry profile appropriate to its cost.

use rowjob_domain::entities::{ChunkProgress, ChunkStatus};
use rowjob_domain::repositories::{ChunkProgressRepository, FailedRecordRepository};
use rowjob_domain::services::{FileByteProvider, RowBatchProcessor};
use rowjob_domain::value_objects::{ChunkIndex, JobId};
use rowjob_domain::JobEngineError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::infrastructure::runtime::resource_manager;

use super::retry::{with_retry, RetryProfile};
use super::row_range_activities::{
    calculate_chunk_boundaries, finalize_chunk, process_user_batch, read_chunk_from_file, record_batch_failures, split_rows,
    update_chunk_progress,
};

/// Progress is flushed to the repository every `PROGRESS_FLUSH_INTERVAL`
/// batches, and always on the final batch.
const PROGRESS_FLUSH_INTERVAL: usize = 10;

pub struct ChunkWorkflowDeps {
    pub byte_provider: Arc<dyn FileByteProvider>,
    pub row_processor: Arc<dyn RowBatchProcessor>,
    pub chunk_progress_repository: Arc<dyn ChunkProgressRepository>,
    pub failed_record_repository: Arc<dyn FailedRecordRepository>,
}

pub struct ChunkWorkflowInput {
    pub job_id: JobId,
    pub chunk_index: ChunkIndex,
    pub directory: PathBuf,
    pub filename: String,
    pub chunk_size_bytes: u64,
    pub scan_window_bytes: u64,
    pub batch_size: usize,
    pub enable_deduplication: bool,
}

/// Runs one chunk to completion, returning its final progress record even
/// on failure (the failure is recorded in `progress.error_message` and also
/// re-raised so the caller's scheduler can fail the parent job).
pub async fn run_chunk_workflow(deps: &ChunkWorkflowDeps, input: ChunkWorkflowInput) -> Result<ChunkProgress, JobEngineError> {
    match run_chunk_workflow_inner(deps, &input).await {
        Ok(progress) => Ok(progress),
        Err(err) => {
            let mut progress = ChunkProgress::new(input.job_id, input.chunk_index, 0, 0);
            progress.mark_failed(err.to_string());
            deps.chunk_progress_repository.upsert(progress.clone()).await.ok();
            Err(err)
        }
    }
}

async fn run_chunk_workflow_inner(deps: &ChunkWorkflowDeps, input: &ChunkWorkflowInput) -> Result<ChunkProgress, JobEngineError> {
    let directory: &Path = &input.directory;

    let boundaries = with_retry(RetryProfile::SHORT, || {
        calculate_chunk_boundaries(
            deps.byte_provider.as_ref(),
            directory,
            &input.filename,
            input.chunk_index.value() as u64,
            input.chunk_size_bytes,
            input.scan_window_bytes,
        )
    })
    .await?;

    let mut progress = ChunkProgress::new(input.job_id, input.chunk_index, boundaries.start_offset, boundaries.end_offset);
    progress.status = ChunkStatus::Reading;

    let chunk_data = {
        let _io_permit = resource_manager().acquire_io().await?;
        with_retry(RetryProfile::LONG, || {
            read_chunk_from_file(deps.byte_provider.as_ref(), directory, &input.filename, boundaries, input.chunk_index)
        })
        .await?
    };

    let rows = split_rows(&chunk_data.bytes, input.chunk_index.value() == 0);
    progress.total_rows = rows.len() as u64;
    progress.status = ChunkStatus::Processing;

    for (batch_number, batch) in rows.chunks(input.batch_size.max(1)).enumerate() {
        let batch_start_line = (batch_number * input.batch_size.max(1)) as u64;
        let batch = batch.to_vec();

        let result = {
            let _cpu_permit = resource_manager().acquire_cpu().await?;
            with_retry(RetryProfile::LONG, || {
                process_user_batch(
                    deps.row_processor.as_ref(),
                    input.job_id,
                    input.chunk_index,
                    batch_start_line,
                    &batch,
                    input.enable_deduplication,
                )
            })
            .await?
        };

        progress.processed_rows += result.processed_count;
        progress.valid_rows += result.valid_count;
        progress.invalid_rows += result.invalid_count;
        progress.duplicate_rows += result.duplicate_count;

        if result.invalid_count > 0 || result.duplicate_count > 0 {
            record_batch_failures(&deps.failed_record_repository, input.job_id, input.chunk_index, batch_start_line, &result).await;
        }

        let is_final_batch = (batch_number + 1) * input.batch_size.max(1) >= rows.len();
        if (batch_number + 1) % PROGRESS_FLUSH_INTERVAL == 0 || is_final_batch {
            with_retry(RetryProfile::SHORT, || update_chunk_progress(&deps.chunk_progress_repository, progress.clone())).await?;
        }
    }

    with_retry(RetryProfile::SHORT, || finalize_chunk(&deps.chunk_progress_repository, progress.clone())).await?;
    progress.mark_completed();
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::TokioFileByteProvider;
    use crate::infrastructure::repositories::{InMemoryChunkProgressRepository, InMemoryFailedRecordRepository};
    use async_trait::async_trait;
    use rowjob_domain::services::BatchProcessingResult;
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

    fn deps() -> ChunkWorkflowDeps {
        ChunkWorkflowDeps {
            byte_provider: Arc::new(TokioFileByteProvider::new()),
            row_processor: Arc::new(EchoProcessor),
            chunk_progress_repository: Arc::new(InMemoryChunkProgressRepository::new()),
            failed_record_repository: Arc::new(InMemoryFailedRecordRepository::new()),
        }
    }

    #[tokio::test]
    async fn three_row_file_processes_completely_in_one_chunk() {
        let dir = tempdir().unwrap();
        std::fs::File::create(dir.path().join("data.csv"))
            .unwrap()
            .write_all(b"id,name\n1,a\n2,b\n3,c\n")
            .unwrap();

        let input = ChunkWorkflowInput {
            job_id: JobId::new(),
            chunk_index: ChunkIndex::new(0),
            directory: dir.path().to_path_buf(),
            filename: "data.csv".to_string(),
            chunk_size_bytes: 1024,
            scan_window_bytes: 64,
            batch_size: 1000,
            enable_deduplication: true,
        };

        let progress = run_chunk_workflow(&deps(), input).await.unwrap();
        assert_eq!(progress.total_rows, 3);
        assert_eq!(progress.processed_rows, 3);
        assert_eq!(progress.status, ChunkStatus::Completed);
    }

    #[tokio::test]
    async fn header_only_file_reaches_completed_with_zero_rows() {
        let dir = tempdir().unwrap();
        std::fs::File::create(dir.path().join("data.csv")).unwrap().write_all(b"id,name,email,company,addr\n").unwrap();

        let input = ChunkWorkflowInput {
            job_id: JobId::new(),
            chunk_index: ChunkIndex::new(0),
            directory: dir.path().to_path_buf(),
            filename: "data.csv".to_string(),
            chunk_size_bytes: 1024,
            scan_window_bytes: 64,
            batch_size: 1000,
            enable_deduplication: true,
        };

        let progress = run_chunk_workflow(&deps(), input).await.unwrap();
        assert_eq!(progress.total_rows, 0);
        assert_eq!(progress.processed_rows, 0);
        assert_eq!(progress.status, ChunkStatus::Completed);
    }
}
