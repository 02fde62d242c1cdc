// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # rowjob
//!
//! Composition root: parses and validates CLI arguments, wires the engine's
//! in-memory repositories and adapters, installs the Ctrl-C/SIGTERM handler,
//! dispatches the requested command, and maps the result to a `sysexits.h`
//! exit code.

use std::process::ExitCode;
use std::sync::Arc;

use rowjob_bootstrap::cli::{ValidatedCli, ValidatedCommand};
use rowjob_bootstrap::config::AppConfig;
use rowjob_bootstrap::exit_code::result_to_exit_code;
use rowjob_bootstrap::shutdown::ShutdownCoordinator;
use rowjob_bootstrap::signals;

use rowjob_domain::entities::FileProcessingRequest;
use rowjob_domain::repositories::JobRepository;
use rowjob_domain::value_objects::{ChunkSizeBytes, JobId, MaxParallelChunks};
use rowjob_domain::JobEngineError;

use rowjob_engine::application::commands::{ControlAction, ControlJobCommand, SubmitJobCommand};
use rowjob_engine::application::services::{ChunkWorkflowDeps, JobWorkflowDeps};
use rowjob_engine::application::use_cases::{control_job, get_job_progress, get_job_status, submit_job, ControlAck};
use rowjob_engine::control_plane::ControlPlaneRegistry;
use rowjob_engine::infrastructure::adapters::{DelimitedRowProcessor, TokioFileByteProvider};
use rowjob_engine::infrastructure::repositories::InMemoryRepositories;
use rowjob_engine::infrastructure::runtime::init_resource_manager;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match rowjob_bootstrap::bootstrap_cli() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(64);
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => result_to_exit_code(Err::<(), JobEngineError>(err)),
    }
}

async fn run(cli: ValidatedCli) -> Result<(), JobEngineError> {
    let app_config = AppConfig::from_cli(&cli)?;

    rowjob_engine::infrastructure::logging::init_tracing();

    let platform = rowjob_bootstrap::platform::create_platform();
    tracing::info!(
        platform = platform.platform_name(),
        cpu_count = platform.cpu_count(),
        "starting rowjob"
    );

    init_resource_manager(app_config.resources.clone())?;

    let repositories = Arc::new(InMemoryRepositories::new());
    let job_repository: Arc<dyn JobRepository> = repositories.jobs.clone();
    let registry = Arc::new(ControlPlaneRegistry::new());

    let shutdown = ShutdownCoordinator::new(registry.clone());
    let _signal_task = signals::install_signal_handler(shutdown.clone());

    let workflow_deps = Arc::new(JobWorkflowDeps {
        chunk_workflow: Arc::new(ChunkWorkflowDeps {
            byte_provider: Arc::new(TokioFileByteProvider::new()),
            row_processor: Arc::new(DelimitedRowProcessor::new()),
            chunk_progress_repository: repositories.chunk_progress.clone(),
            failed_record_repository: repositories.failed_records.clone(),
        }),
        job_repository: job_repository.clone(),
    });

    match cli.command {
        ValidatedCommand::Submit {
            directory,
            filename,
            chunk_size_mb,
            max_parallel_chunks,
            enable_deduplication,
            reprocess_failures,
        } => {
            let mut request = FileProcessingRequest::new(directory, filename);
            request.enable_deduplication = enable_deduplication;
            request.reprocess_failures = reprocess_failures;
            if let Some(mb) = chunk_size_mb {
                request = request.with_chunk_size(ChunkSizeBytes::new(mb * 1024 * 1024)?);
            }
            if let Some(n) = max_parallel_chunks {
                request = request.with_max_parallel_chunks(MaxParallelChunks::new(n)?);
            }

            let result = submit_job(workflow_deps, registry.clone(), SubmitJobCommand::new(request)).await?;
            println!("job submitted: {} (workflow {})", result.job_id, result.workflow_id);

            shutdown.cancelled().await;
            println!("shutdown signal received, job {} cancelled", result.job_id);
            Ok(())
        }
        ValidatedCommand::Status { job_id } => {
            let job_id = parse_job_id(&job_id)?;
            match get_job_status(&job_repository, job_id).await? {
                Some(status) => {
                    println!("{job_id}: {:?}", status.status);
                    Ok(())
                }
                None => Err(JobEngineError::JobNotFound(job_id.to_string())),
            }
        }
        ValidatedCommand::Progress { job_id } => {
            let job_id = parse_job_id(&job_id)?;
            let status = get_job_progress(&job_repository, job_id).await?;
            println!(
                "{job_id}: {}/{} chunks, {}/{} rows ({} valid, {} invalid, {} duplicate)",
                status.completed_chunks,
                status.total_chunks,
                status.processed_rows,
                status.total_rows,
                status.valid_rows,
                status.invalid_rows,
                status.duplicate_rows
            );
            Ok(())
        }
        ValidatedCommand::Pause { job_id } => dispatch_control(&registry, &job_repository, &job_id, ControlAction::Pause).await,
        ValidatedCommand::Resume { job_id } => dispatch_control(&registry, &job_repository, &job_id, ControlAction::Resume).await,
        ValidatedCommand::Cancel { job_id } => dispatch_control(&registry, &job_repository, &job_id, ControlAction::Cancel).await,
    }
}

fn parse_job_id(raw: &str) -> Result<JobId, JobEngineError> {
    JobId::from_string(raw)
}

async fn dispatch_control(
    registry: &Arc<ControlPlaneRegistry>,
    job_repository: &Arc<dyn JobRepository>,
    job_id: &str,
    action: ControlAction,
) -> Result<(), JobEngineError> {
    let job_id = parse_job_id(job_id)?;
    let ack = control_job(registry, job_repository, ControlJobCommand::new(job_id, action)).await?;
    match ack {
        ControlAck::Applied => println!("{job_id}: {action:?} applied"),
        ControlAck::NotRunning => println!("{job_id}: not currently running, no-op"),
    }
    Ok(())
}
