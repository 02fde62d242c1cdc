// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface Module
//!
//! Bootstrap-layer CLI handling with security-first design.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  1. parser::parse()                 │  Parse CLI with clap
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  2. validator::validate()           │  Security validation
//! └─────────────────┬───────────────────┘
//!                   ↓
//! ┌─────────────────────────────────────┐
//! │  3. ValidatedCli                    │  Safe, validated config
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `parser` - CLI structure and clap parsing
//! - `validator` - Security validation layer

pub mod parser;
pub mod validator;

pub use parser::{parse_cli, Cli, Commands};
pub use validator::{ParseError, SecureArgParser};

use std::path::PathBuf;

/// Validated CLI configuration.
///
/// Holds all CLI arguments after security validation; paths that must exist
/// are canonicalized and numeric values are range-checked.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub config: Option<PathBuf>,
    pub cpu_threads: Option<usize>,
    pub io_threads: Option<usize>,
    pub storage_type: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Submit {
        directory: PathBuf,
        filename: String,
        chunk_size_mb: Option<u64>,
        max_parallel_chunks: Option<u32>,
        enable_deduplication: bool,
        reprocess_failures: bool,
    },
    Status { job_id: String },
    Progress { job_id: String },
    Pause { job_id: String },
    Resume { job_id: String },
    Cancel { job_id: String },
}

/// Parse and validate CLI arguments in one step.
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = parser::parse_cli();
    validate_cli(cli)
}

fn validate_job_id(job_id: &str) -> Result<(), ParseError> {
    SecureArgParser::validate_argument(job_id)?;
    rowjob_domain::value_objects::JobId::from_string(job_id).map_err(|err| ParseError::InvalidValue {
        arg: "job-id".to_string(),
        reason: err.to_string(),
    })?;
    Ok(())
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let config = if let Some(ref path) = cli.config {
        SecureArgParser::validate_argument(&path.to_string_lossy())?;
        Some(path.clone())
    } else {
        None
    };

    if let Some(threads) = cli.cpu_threads {
        if threads == 0 || threads > 128 {
            return Err(ParseError::InvalidValue {
                arg: "cpu-threads".to_string(),
                reason: "must be between 1 and 128".to_string(),
            });
        }
    }

    if let Some(threads) = cli.io_threads {
        if threads == 0 || threads > 256 {
            return Err(ParseError::InvalidValue {
                arg: "io-threads".to_string(),
                reason: "must be between 1 and 256".to_string(),
            });
        }
    }

    let command = match cli.command {
        Commands::Submit {
            directory,
            filename,
            chunk_size_mb,
            max_parallel_chunks,
            no_dedup,
            no_reprocess,
        } => {
            let validated_directory = SecureArgParser::validate_path(&directory.to_string_lossy())?;
            SecureArgParser::validate_argument(&filename)?;

            if let Some(mb) = chunk_size_mb {
                if mb == 0 {
                    return Err(ParseError::InvalidValue {
                        arg: "chunk-size-mb".to_string(),
                        reason: "must be greater than 0".to_string(),
                    });
                }
            }

            if let Some(max) = max_parallel_chunks {
                if max == 0 {
                    return Err(ParseError::InvalidValue {
                        arg: "max-parallel-chunks".to_string(),
                        reason: "must be greater than 0".to_string(),
                    });
                }
            }

            ValidatedCommand::Submit {
                directory: validated_directory,
                filename,
                chunk_size_mb,
                max_parallel_chunks,
                enable_deduplication: !no_dedup,
                reprocess_failures: !no_reprocess,
            }
        }
        Commands::Status { job_id } => {
            validate_job_id(&job_id)?;
            ValidatedCommand::Status { job_id }
        }
        Commands::Progress { job_id } => {
            validate_job_id(&job_id)?;
            ValidatedCommand::Progress { job_id }
        }
        Commands::Pause { job_id } => {
            validate_job_id(&job_id)?;
            ValidatedCommand::Pause { job_id }
        }
        Commands::Resume { job_id } => {
            validate_job_id(&job_id)?;
            ValidatedCommand::Resume { job_id }
        }
        Commands::Cancel { job_id } => {
            validate_job_id(&job_id)?;
            ValidatedCommand::Cancel { job_id }
        }
    };

    Ok(ValidatedCli {
        command,
        verbose: cli.verbose,
        config,
        cpu_threads: cli.cpu_threads,
        io_threads: cli.io_threads,
        storage_type: cli.storage_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_job_id() {
        assert!(validate_job_id("not-a-ulid").is_err());
    }

    #[test]
    fn accepts_real_job_id() {
        let id = rowjob_domain::value_objects::JobId::new();
        assert!(validate_job_id(&id.to_string()).is_ok());
    }
}
