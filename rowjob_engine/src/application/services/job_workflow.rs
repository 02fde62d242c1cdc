// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Workflow
//!
//! The top-level per-job orchestration task: `Started -> AnalyzingFile ->
//! ProcessingChunks -> Completed` (or `Failed`/`Cancelled`). Runs as a single
//! async task with a bounded scheduler underneath it - children are spawned
//! up to `max_parallel_chunks` at a time and may complete in any order;
//! aggregation is deterministic because it only ever sums the stored
//! chunk-progress map, never a running total threaded through completion
//! order.

use parking_lot::Mutex;
use rowjob_domain::entities::{ChunkProgress, ChunkStatus, FileProcessingRequest, JobState, JobStatus};
use rowjob_domain::repositories::JobRepository;
use rowjob_domain::services::FileByteProvider;
use rowjob_domain::value_objects::{ChunkIndex, JobId};
use rowjob_domain::JobEngineError;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::control_plane::JobControl;

use super::chunk_workflow::{run_chunk_workflow, ChunkWorkflowDeps, ChunkWorkflowInput};
use super::file_activities::{analyze_file, finalize_job, reprocess_failed_records};

pub struct JobWorkflowDeps {
    pub chunk_workflow: Arc<ChunkWorkflowDeps>,
    pub job_repository: Arc<dyn JobRepository>,
}

/// Runs a job to a terminal state. The returned `JobStatus` always reflects
/// the final, persisted state - callers that need live progress during the
/// run should poll the job repository instead of awaiting this future.
pub async fn run_job_workflow(
    deps: Arc<JobWorkflowDeps>,
    request: FileProcessingRequest,
    control: Arc<JobControl>,
) -> Result<JobStatus, JobEngineError> {
    let job_id = request.job_id;
    let mut status = JobStatus::new(job_id);
    deps.job_repository.save(&status).await?;

    status.status = JobState::AnalyzingFile;
    deps.job_repository.save(&status).await?;

    let analysis = match analyze_file(
        deps.chunk_workflow.byte_provider.as_ref(),
        &request.directory,
        &request.filename,
        request.chunk_size_bytes,
        1024 * 1024,
    )
    .await
    {
        Ok(analysis) => analysis,
        Err(err) => {
            status.mark_failed(err.to_string());
            deps.job_repository.save(&status).await?;
            return Err(err);
        }
    };

    status.total_chunks = analysis.total_chunks;
    status.status = JobState::ProcessingChunks;
    deps.job_repository.save(&status).await?;

    let chunk_map = Arc::new(Mutex::new(BTreeMap::<u32, ChunkProgress>::new()));
    let semaphore = Arc::new(Semaphore::new(request.max_parallel_chunks.value() as usize));
    let mut children = JoinSet::new();
    let mut any_chunk_failed = false;

    for chunk_index in ChunkIndex::range(analysis.total_chunks) {
        let permit = semaphore.clone().acquire_owned().await.expect("semaphore never closed");

        control.wait_while_paused().await;
        if control.is_cancelled() {
            drop(permit);
            break;
        }

        let chunk_deps = deps.chunk_workflow.clone();
        let input = ChunkWorkflowInput {
            job_id,
            chunk_index,
            directory: request.directory.clone(),
            filename: request.filename.clone(),
            chunk_size_bytes: analysis.chunk_size_bytes,
            scan_window_bytes: rowjob_domain::value_objects::DEFAULT_BOUNDARY_SCAN_WINDOW_BYTES,
            batch_size: 1000,
            enable_deduplication: request.enable_deduplication,
        };

        children.spawn(async move {
            let _permit = permit;
            run_chunk_workflow(&chunk_deps, input).await.map_err(|err| (chunk_index, err))
        });

        // Drain whatever already finished while we were blocked acquiring
        // this permit, so the job's persisted aggregates track the run
        // instead of lagging behind the entire spawn loop.
        while let Some(result) = children.try_join_next() {
            record_chunk_result(result, job_id, &chunk_map, &mut any_chunk_failed);
            recompute_and_save(&deps.job_repository, &mut status, &chunk_map).await?;
        }
    }

    while let Some(result) = children.join_next().await {
        record_chunk_result(result, job_id, &chunk_map, &mut any_chunk_failed);
        recompute_and_save(&deps.job_repository, &mut status, &chunk_map).await?;
    }

    if control.is_cancelled() {
        status.mark_cancelled();
        deps.job_repository.save(&status).await?;
        return Ok(status);
    }

    if any_chunk_failed {
        status.mark_failed("one or more chunks exhausted retries");
        deps.job_repository.save(&status).await?;
        return Ok(status);
    }

    if request.reprocess_failures {
        let outcome = reprocess_failed_records(
            &deps.chunk_workflow.failed_record_repository,
            &deps.chunk_workflow.row_processor,
            job_id,
        )
        .await?;
        status.apply_reprocess_result(outcome.successfully_processed);
    }

    finalize_job(&deps.job_repository, &status).await?;
    status.mark_completed();
    deps.job_repository.save(&status).await?;
    Ok(status)
}

async fn recompute_and_save(
    job_repository: &Arc<dyn JobRepository>,
    status: &mut JobStatus,
    chunk_map: &Arc<Mutex<BTreeMap<u32, ChunkProgress>>>,
) -> Result<(), JobEngineError> {
    let snapshot = chunk_map.lock().clone();
    status.recompute_aggregates(&snapshot);
    job_repository.save(status).await
}

/// Records one settled child's outcome into the shared progress map. A
/// panicked child task is still a bug worth surfacing loudly rather than
/// folding into the job's own failure accounting.
fn record_chunk_result(
    result: Result<Result<ChunkProgress, (ChunkIndex, JobEngineError)>, tokio::task::JoinError>,
    job_id: JobId,
    chunk_map: &Arc<Mutex<BTreeMap<u32, ChunkProgress>>>,
    any_chunk_failed: &mut bool,
) {
    match result.expect("chunk task panicked") {
        Ok(progress) => {
            chunk_map.lock().insert(progress.chunk_index.value(), progress);
        }
        Err((chunk_index, err)) => {
            *any_chunk_failed = true;
            let mut failed_progress = ChunkProgress::new(job_id, chunk_index, 0, 0);
            failed_progress.mark_failed(err.to_string());
            chunk_map.lock().insert(chunk_index.value(), failed_progress);
        }
    }
}

/// `completed_chunks` counted directly from the map, matching
/// `JobStatus::recompute_aggregates`'s own filter so a caller never needs to
/// recompute it differently.
pub fn completed_chunk_count(chunk_map: &BTreeMap<u32, ChunkProgress>) -> u64 {
    chunk_map.values().filter(|c| c.status == ChunkStatus::Completed).count() as u64
}
