// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Control Job Use Case
//!
//! Dispatches a [`ControlJobCommand`] to the job's registered control
//! handle. A job with no registered handle has already reached a terminal
//! state (or never existed); control actions against it are a no-op ack
//! rather than an error, matching cancel's documented idempotence.

use rowjob_domain::repositories::JobRepository;
use rowjob_domain::value_objects::JobId;
use rowjob_domain::JobEngineError;
use std::sync::Arc;

use crate::application::commands::{ControlAction, ControlJobCommand};
use crate::control_plane::ControlPlaneRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAck {
    Applied,
    /// The job is not currently running under this process (already
    /// terminal, or unknown); the action is a safe no-op.
    NotRunning,
}

pub async fn control_job(
    registry: &Arc<ControlPlaneRegistry>,
    job_repository: &Arc<dyn JobRepository>,
    command: ControlJobCommand,
) -> Result<ControlAck, JobEngineError> {
    if job_repository.find_by_id(command.job_id).await?.is_none() {
        return Err(JobEngineError::JobNotFound(command.job_id.to_string()));
    }

    match registry.get(command.job_id) {
        Some(control) => {
            match command.action {
                ControlAction::Pause => control.pause(),
                ControlAction::Resume => control.resume(),
                ControlAction::Cancel => control.cancel(),
            }
            Ok(ControlAck::Applied)
        }
        None => Ok(ControlAck::NotRunning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryJobRepository;
    use rowjob_domain::entities::JobStatus;

    #[tokio::test]
    async fn control_unknown_job_returns_not_found() {
        let registry = Arc::new(ControlPlaneRegistry::new());
        let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let result = control_job(&registry, &job_repository, ControlJobCommand::new(JobId::new(), ControlAction::Pause)).await;
        assert!(matches!(result, Err(JobEngineError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn control_on_terminal_job_is_a_no_op_ack() {
        let registry = Arc::new(ControlPlaneRegistry::new());
        let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let status = JobStatus::new(JobId::new());
        job_repository.save(&status).await.unwrap();

        let ack = control_job(&registry, &job_repository, ControlJobCommand::new(status.job_id, ControlAction::Cancel))
            .await
            .unwrap();
        assert_eq!(ack, ControlAck::NotRunning);
    }

    #[tokio::test]
    async fn control_on_running_job_applies_the_action() {
        let registry = Arc::new(ControlPlaneRegistry::new());
        let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let status = JobStatus::new(JobId::new());
        job_repository.save(&status).await.unwrap();
        let control = registry.register(status.job_id);

        let ack = control_job(&registry, &job_repository, ControlJobCommand::new(status.job_id, ControlAction::Pause))
            .await
            .unwrap();
        assert_eq!(ack, ControlAck::Applied);
        assert!(control.is_paused());
    }
}
