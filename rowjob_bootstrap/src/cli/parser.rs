// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Structure
//!
//! `clap`-derived argument structure. Parsing happens here; security
//! validation happens one layer up in `validator`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowjob")]
#[command(about = "Row-oriented file processing job engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override global CPU token count
    #[arg(long, global = true)]
    pub cpu_threads: Option<usize>,

    /// Override global I/O token count
    #[arg(long, global = true)]
    pub io_threads: Option<usize>,

    /// Storage device profile, affects default I/O token count
    #[arg(long, global = true, value_parser = ["nvme", "ssd", "hdd"])]
    pub storage_type: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a file for processing; returns immediately with the job id
    Submit {
        /// Directory containing the file
        #[arg(short, long)]
        directory: PathBuf,

        /// File name within the directory
        #[arg(short, long)]
        filename: String,

        /// Chunk size in megabytes
        #[arg(long)]
        chunk_size_mb: Option<u64>,

        /// Maximum number of chunks processed concurrently
        #[arg(long)]
        max_parallel_chunks: Option<u32>,

        /// Disable per-job row deduplication
        #[arg(long)]
        no_dedup: bool,

        /// Skip the final reprocess-failures pass
        #[arg(long)]
        no_reprocess: bool,
    },

    /// Print the current persisted status of a job
    Status {
        /// Job id (ULID) returned by `submit`
        job_id: String,
    },

    /// Print the current persisted progress counters of a job
    Progress {
        /// Job id (ULID) returned by `submit`
        job_id: String,
    },

    /// Pause a running job
    Pause {
        /// Job id (ULID) returned by `submit`
        job_id: String,
    },

    /// Resume a paused job
    Resume {
        /// Job id (ULID) returned by `submit`
        job_id: String,
    },

    /// Cancel a job; idempotent, a no-op once the job is already terminal
    Cancel {
        /// Job id (ULID) returned by `submit`
        job_id: String,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
