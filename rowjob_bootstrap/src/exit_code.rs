// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Codes
//!
//! Maps application outcomes to the subset of `sysexits.h` codes relevant to
//! a CLI that validates input, talks to a file, and runs a job orchestrator.

use rowjob_domain::JobEngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Ok = 0,
    /// EX_USAGE: command line usage error
    Usage = 64,
    /// EX_DATAERR: invalid or malformed input data
    DataErr = 65,
    /// EX_NOINPUT: input file does not exist or is unreadable
    NoInput = 66,
    /// EX_UNAVAILABLE: a required resource or service is unavailable
    Unavailable = 69,
    /// EX_SOFTWARE: internal software error
    Software = 70,
    /// EX_IOERR: an I/O error occurred
    IoErr = 74,
    /// EX_TEMPFAIL: temporary failure, retry may succeed later
    TempFail = 75,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Classifies a domain error into an exit code using its recoverability and
/// category, so a script driving this CLI can distinguish "fix your input"
/// from "try again later" from "this is a bug".
pub fn map_error_to_exit_code(error: &JobEngineError) -> ExitCode {
    match error {
        JobEngineError::InvalidRequest(_) | JobEngineError::ValidationError(_) => ExitCode::DataErr,
        JobEngineError::JobNotFound(_) => ExitCode::NoInput,
        JobEngineError::IoError(_) => ExitCode::IoErr,
        JobEngineError::ResourceExhausted(_) => ExitCode::Unavailable,
        JobEngineError::Cancelled(_) => ExitCode::Ok,
        _ if error.is_recoverable() => ExitCode::TempFail,
        _ => ExitCode::Software,
    }
}

pub fn result_to_exit_code<T>(result: Result<T, JobEngineError>) -> std::process::ExitCode {
    match result {
        Ok(_) => ExitCode::Ok.into(),
        Err(err) => {
            eprintln!("error: {err}");
            map_error_to_exit_code(&err).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_noinput() {
        let err = JobEngineError::JobNotFound("01J0000000000000000000000".to_string());
        assert_eq!(map_error_to_exit_code(&err), ExitCode::NoInput);
    }

    #[test]
    fn invalid_request_maps_to_dataerr() {
        let err = JobEngineError::InvalidRequest("empty filename".to_string());
        assert_eq!(map_error_to_exit_code(&err), ExitCode::DataErr);
    }

    #[test]
    fn ok_result_maps_to_zero() {
        let code: std::process::ExitCode = result_to_exit_code::<()>(Ok(()));
        assert_eq!(format!("{code:?}"), format!("{:?}", std::process::ExitCode::SUCCESS));
    }
}
