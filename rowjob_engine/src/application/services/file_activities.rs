// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File-Level Activities
//!
//! Job-scoped activities that run once, outside the per-chunk loop: file
//! analysis at job start, the reprocess pass before finalization, and job
//! finalization itself.

use rowjob_domain::entities::{estimate_row_count, FileAnalysisResult, JobStatus};
use rowjob_domain::repositories::{FailedRecordRepository, JobRepository};
use rowjob_domain::services::{FileByteProvider, RowBatchProcessor};
use rowjob_domain::value_objects::{ChunkIndex, ChunkSizeBytes, JobId};
use rowjob_domain::JobEngineError;
use std::path::Path;
use std::sync::Arc;

/// Reads file size and samples its prefix to estimate row count and total
/// chunk count.
pub async fn analyze_file(
    byte_provider: &dyn FileByteProvider,
    directory: &Path,
    filename: &str,
    chunk_size_bytes: ChunkSizeBytes,
    sample_bytes: u64,
) -> Result<FileAnalysisResult, JobEngineError> {
    let file_size_bytes = byte_provider.file_size(directory, filename).await?;
    let sample = byte_provider.read_prefix_sample(directory, filename, sample_bytes).await?;
    let estimated_row_count = estimate_row_count(file_size_bytes, &sample);
    Ok(FileAnalysisResult::new(file_size_bytes, estimated_row_count, chunk_size_bytes))
}

pub struct ReprocessOutcome {
    pub total_records: u64,
    pub successfully_processed: u64,
    pub still_failed: u64,
}

/// Replays every unreprocessed failed row for a job through the row
/// processor, treating each row's outcome independently: no single row's
/// failure is ever raised as an activity error. Deduplication is disabled
/// for the replay itself - a row earning a second look here should be
/// judged on validity alone, not flagged a duplicate of the very attempt
/// that failed it the first time.
pub async fn reprocess_failed_records(
    failed_records: &Arc<dyn FailedRecordRepository>,
    row_processor: &Arc<dyn RowBatchProcessor>,
    job_id: JobId,
) -> Result<ReprocessOutcome, JobEngineError> {
    let records = failed_records.find_for_job(job_id, true).await?;
    let total_records = records.len() as u64;
    let mut successfully_processed = 0u64;
    let mut still_failed = 0u64;

    for (i, record) in records.iter().enumerate() {
        if i % 100 == 0 {
            tracing::debug!(job_id = %job_id, reprocessed = i, total = total_records, "reprocess heartbeat");
        }

        let outcome = row_processor
            .process_batch(job_id, record.chunk_index, record.line_number, std::slice::from_ref(&record.raw_row), false)
            .await?;

        if outcome.valid_count == 1 {
            failed_records
                .mark_reprocessed(job_id, ChunkIndex::new(record.chunk_index.value()), record.line_number)
                .await?;
            successfully_processed += 1;
        } else {
            still_failed += 1;
        }
    }

    Ok(ReprocessOutcome {
        total_records,
        successfully_processed,
        still_failed,
    })
}

/// Idempotent: persists the job's final status, safe to call more than once.
pub async fn finalize_job(job_repository: &Arc<dyn JobRepository>, status: &JobStatus) -> Result<(), JobEngineError> {
    job_repository.save(status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::DelimitedRowProcessor;
    use crate::infrastructure::repositories::InMemoryFailedRecordRepository;
    use rowjob_domain::entities::{FailedRecord, FailureType};

    #[tokio::test]
    async fn reprocess_moves_successful_rows_out_of_unreprocessed_set() {
        let repo: Arc<dyn FailedRecordRepository> = Arc::new(InMemoryFailedRecordRepository::new());
        let row_processor: Arc<dyn RowBatchProcessor> = Arc::new(DelimitedRowProcessor::new());
        let job_id = JobId::new();
        repo.append(FailedRecord::new(job_id, ChunkIndex::new(0), 5, "42,ok", FailureType::ValidationError, "bad email"))
            .await
            .unwrap();

        let outcome = reprocess_failed_records(&repo, &row_processor, job_id).await.unwrap();
        assert_eq!(outcome.total_records, 1);
        assert_eq!(outcome.successfully_processed, 1);
        assert_eq!(outcome.still_failed, 0);

        let remaining = repo.find_for_job(job_id, true).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn reprocess_counts_rows_that_still_fail() {
        let repo: Arc<dyn FailedRecordRepository> = Arc::new(InMemoryFailedRecordRepository::new());
        let row_processor: Arc<dyn RowBatchProcessor> = Arc::new(DelimitedRowProcessor::new());
        let job_id = JobId::new();
        repo.append(FailedRecord::new(job_id, ChunkIndex::new(0), 1, ",,", FailureType::ParseError, "unreadable"))
            .await
            .unwrap();

        let outcome = reprocess_failed_records(&repo, &row_processor, job_id).await.unwrap();
        assert_eq!(outcome.still_failed, 1);
        assert_eq!(outcome.successfully_processed, 0);
    }
}
