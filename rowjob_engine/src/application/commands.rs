// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Commands
//!
//! Immutable, self-contained instructions that change job state, following
//! the same command/query split the rest of this application layer uses:
//! submitting, pausing, resuming, and cancelling a job are commands; reading
//! its status is a query (see [`crate::application::use_cases::get_job_status`]).

use rowjob_domain::entities::FileProcessingRequest;
use rowjob_domain::value_objects::JobId;

/// Submits a new file-processing job.
#[derive(Debug, Clone)]
pub struct SubmitJobCommand {
    pub request: FileProcessingRequest,
}

impl SubmitJobCommand {
    pub fn new(request: FileProcessingRequest) -> Self {
        Self { request }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Pause,
    Resume,
    Cancel,
}

/// Sends a pause, resume, or cancel signal to a running job.
#[derive(Debug, Clone, Copy)]
pub struct ControlJobCommand {
    pub job_id: JobId,
    pub action: ControlAction,
}

impl ControlJobCommand {
    pub fn new(job_id: JobId, action: ControlAction) -> Self {
        Self { job_id, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_command_carries_the_request() {
        let request = FileProcessingRequest::new("/data", "customers.csv");
        let command = SubmitJobCommand::new(request.clone());
        assert_eq!(command.request.filename, request.filename);
    }

    #[test]
    fn control_command_carries_action() {
        let command = ControlJobCommand::new(JobId::new(), ControlAction::Pause);
        assert_eq!(command.action, ControlAction::Pause);
    }
}
