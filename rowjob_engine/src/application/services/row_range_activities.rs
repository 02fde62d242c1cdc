// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Row-Range Activities
//!
//! The per-chunk operations a chunk workflow drives in sequence:
//! boundary calculation, reading, batch processing, progress bookkeeping,
//! failure recording, and finalization. Each is a thin call into a domain
//! port plus the glue needed to turn raw bytes into rows.

use rowjob_domain::entities::{ChunkProgress, FailedRecord, FailureType};
use rowjob_domain::repositories::{ChunkProgressRepository, FailedRecordRepository};
use rowjob_domain::services::{BatchProcessingResult, ChunkData, FileByteProvider, RowBatchProcessor};
use rowjob_domain::value_objects::{align_chunk_boundaries, ChunkBoundaries, ChunkIndex, JobId};
use rowjob_domain::JobEngineError;
use std::path::Path;
use std::sync::Arc;

use crate::infrastructure::adapters::to_chunk_data;

/// `raw_start = chunk_index * chunk_size_bytes`, `raw_end = min(raw_start +
/// chunk_size_bytes, file_size)`, then row-aligned by scanning forward for
/// the next `\n` within `scan_window_bytes` of each raw edge.
pub async fn calculate_chunk_boundaries(
    byte_provider: &dyn FileByteProvider,
    directory: &Path,
    filename: &str,
    chunk_index: u64,
    chunk_size_bytes: u64,
    scan_window_bytes: u64,
) -> Result<ChunkBoundaries, JobEngineError> {
    let file_size = byte_provider.file_size(directory, filename).await?;
    let (raw_start, raw_end) = ChunkBoundaries::raw_range(chunk_index, chunk_size_bytes, file_size);

    let start_window = if raw_start == 0 {
        Vec::new()
    } else {
        byte_provider.read_window(directory, filename, raw_start, scan_window_bytes).await?
    };
    let end_window = if raw_end >= file_size {
        Vec::new()
    } else {
        byte_provider.read_window(directory, filename, raw_end, scan_window_bytes).await?
    };

    align_chunk_boundaries(raw_start, raw_end, file_size, &start_window, &end_window)
}

/// Reads the row-aligned byte range for a chunk and derives its row count,
/// excluding the header row when this is chunk 0.
pub async fn read_chunk_from_file(
    byte_provider: &dyn FileByteProvider,
    directory: &Path,
    filename: &str,
    boundaries: ChunkBoundaries,
    chunk_index: ChunkIndex,
) -> Result<ChunkData, JobEngineError> {
    let bytes = byte_provider
        .read_range(directory, filename, boundaries.start_offset, boundaries.end_offset)
        .await?;
    Ok(to_chunk_data(boundaries.start_offset, boundaries.end_offset, bytes, chunk_index.value() == 0))
}

/// Splits chunk bytes into `\n`-terminated rows, dropping the header row
/// when `chunk_index == 0`. `\r\n` is tolerated: the `\r` is left as
/// trailing row content for the row processor to deal with.
pub fn split_rows(bytes: &[u8], drop_header: bool) -> Vec<String> {
    let mut rows: Vec<String> = bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect();
    if drop_header && !rows.is_empty() {
        rows.remove(0);
    }
    rows
}

/// Processes one batch of rows through the row processor port.
pub async fn process_user_batch(
    processor: &dyn RowBatchProcessor,
    job_id: JobId,
    chunk_index: ChunkIndex,
    batch_start_line: u64,
    rows: &[String],
    enable_deduplication: bool,
) -> Result<BatchProcessingResult, JobEngineError> {
    processor
        .process_batch(job_id, chunk_index, batch_start_line, rows, enable_deduplication)
        .await
}

/// Idempotent upsert of a chunk's progress record.
pub async fn update_chunk_progress(
    repository: &Arc<dyn ChunkProgressRepository>,
    progress: ChunkProgress,
) -> Result<(), JobEngineError> {
    repository.upsert(progress).await
}

/// Records a row-level failure. Never fatal to the parent chunk workflow -
/// callers should log and continue on error rather than propagate it.
pub async fn record_chunk_failure(
    repository: &Arc<dyn FailedRecordRepository>,
    record: FailedRecord,
) -> Result<(), JobEngineError> {
    repository.append(record).await
}

/// Appends a [`FailedRecord`] for every row a batch result counted as
/// invalid or duplicate, so the reprocess pass has something to read back.
/// `batch_start_line` is the 0-based line offset of the batch within the
/// chunk (header already excluded), matching the offsets carried in
/// `result.invalid_rows`/`duplicate_rows`. Per-row append failures are
/// logged and skipped rather than propagated, consistent with
/// [`record_chunk_failure`]'s contract - losing a `FailedRecord` entry
/// should not fail the chunk whose rows were otherwise processed fine.
pub async fn record_batch_failures(
    repository: &Arc<dyn FailedRecordRepository>,
    job_id: JobId,
    chunk_index: ChunkIndex,
    batch_start_line: u64,
    result: &BatchProcessingResult,
) {
    for (offset, raw_row) in &result.invalid_rows {
        let record = FailedRecord::new(
            job_id,
            chunk_index,
            batch_start_line + offset,
            raw_row.clone(),
            FailureType::ValidationError,
            "row failed batch validation",
        );
        if let Err(err) = record_chunk_failure(repository, record).await {
            tracing::warn!(job_id = %job_id, chunk = chunk_index.value(), line = batch_start_line + offset, error = %err, "failed to record invalid row");
        }
    }

    for (offset, raw_row) in &result.duplicate_rows {
        let record = FailedRecord::new(
            job_id,
            chunk_index,
            batch_start_line + offset,
            raw_row.clone(),
            FailureType::DuplicateRow,
            "row already seen for this job",
        );
        if let Err(err) = record_chunk_failure(repository, record).await {
            tracing::warn!(job_id = %job_id, chunk = chunk_index.value(), line = batch_start_line + offset, error = %err, "failed to record duplicate row");
        }
    }
}

/// Idempotent: marking an already-completed chunk complete again is a no-op
/// beyond refreshing its end time.
pub async fn finalize_chunk(
    repository: &Arc<dyn ChunkProgressRepository>,
    mut progress: ChunkProgress,
) -> Result<(), JobEngineError> {
    progress.mark_completed();
    repository.upsert(progress).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_rows_drops_header_on_chunk_zero() {
        let bytes = b"id,name\n1,a\n2,b\n";
        let rows = split_rows(bytes, true);
        assert_eq!(rows, vec!["1,a".to_string(), "2,b".to_string()]);
    }

    #[test]
    fn split_rows_keeps_all_rows_for_non_header_chunks() {
        let bytes = b"3,c\n4,d\n";
        let rows = split_rows(bytes, false);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn split_rows_tolerates_crlf_as_trailing_content() {
        let bytes = b"1,a\r\n2,b\r\n";
        let rows = split_rows(bytes, false);
        assert_eq!(rows[0], "1,a\r");
    }

    #[tokio::test]
    async fn record_batch_failures_appends_one_entry_per_failed_row() {
        let repository: Arc<dyn FailedRecordRepository> = Arc::new(crate::infrastructure::repositories::InMemoryFailedRecordRepository::new());
        let job_id = JobId::new();
        let chunk_index = ChunkIndex::new(0);
        let result = BatchProcessingResult {
            processed_count: 3,
            valid_count: 1,
            invalid_count: 1,
            duplicate_count: 1,
            invalid_rows: vec![(0, ",,".to_string())],
            duplicate_rows: vec![(2, "1,a".to_string())],
        };

        record_batch_failures(&repository, job_id, chunk_index, 10, &result).await;

        let recorded = repository.find_for_job(job_id, true).await.unwrap();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.iter().any(|r| r.line_number == 10 && r.failure_type == FailureType::ValidationError));
        assert!(recorded.iter().any(|r| r.line_number == 12 && r.failure_type == FailureType::DuplicateRow));
    }
}
