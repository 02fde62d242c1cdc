// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Infrastructure Logging
//!
//! Structured logging for the running engine, layered on top of the
//! bootstrap crate's early-startup logger: that one exists to report
//! problems before configuration is even loaded, this one is the steady
//! state the engine runs under once a job is accepted.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global `tracing` subscriber for the engine process.
/// Safe to call once; a second call is a no-op logged at debug level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt().with_env_filter(filter).with_target(true).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already initialized");
    }
}

/// Emits a structured log line for a job lifecycle transition, used by the
/// job workflow at every state change so operators can reconstruct a job's
/// timeline from logs alone.
pub fn log_job_transition(job_id: &str, from: &str, to: &str) {
    tracing::info!(job_id, from, to, "job state transition");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
