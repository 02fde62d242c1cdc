// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Retry Profiles
//!
//! Exponential backoff policies applied around activity calls inside a
//! chunk workflow. Two profiles cover the whole activity surface: a long
//! one for read/process batches, a short one for the lighter-weight
//! bookkeeping calls.

use rowjob_domain::JobEngineError;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryProfile {
    pub start_to_close: Duration,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub backoff_coefficient: f64,
    pub max_attempts: u32,
}

impl RetryProfile {
    /// Applies to reading and processing batches: the expensive, slow
    /// activities in a chunk's lifecycle.
    pub const LONG: RetryProfile = RetryProfile {
        start_to_close: Duration::from_secs(2 * 60 * 60),
        initial_interval: Duration::from_secs(30),
        max_interval: Duration::from_secs(10 * 60),
        backoff_coefficient: 2.0,
        max_attempts: 3,
    };

    /// Applies to boundary calculation, progress updates, chunk
    /// finalization, and failure recording: cheap, fast bookkeeping calls.
    pub const SHORT: RetryProfile = RetryProfile {
        start_to_close: Duration::from_secs(5 * 60),
        initial_interval: Duration::from_secs(5),
        max_interval: Duration::from_secs(2 * 60),
        backoff_coefficient: 1.5,
        max_attempts: 5,
    };

    fn interval_for_attempt(&self, attempt: u32) -> Duration {
        let scaled = self.initial_interval.as_secs_f64() * self.backoff_coefficient.powi(attempt as i32);
        Duration::from_secs_f64(scaled.min(self.max_interval.as_secs_f64()))
    }
}

/// Runs `operation` under `profile`, retrying recoverable errors with
/// exponential backoff up to `max_attempts`. Non-recoverable errors
/// (boundary alignment, validation, cancellation) return immediately
/// without consuming an attempt budget on a doomed retry loop. The whole
/// retry loop - every attempt and every backoff sleep between them - is
/// bounded by `profile.start_to_close`; exceeding it surfaces a
/// `JobEngineError::TimeoutError` regardless of how many attempts remain.
pub async fn with_retry<T, F, Fut>(profile: RetryProfile, mut operation: F) -> Result<T, JobEngineError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, JobEngineError>>,
{
    let attempts = async {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_recoverable() => return Err(err),
                Err(err) => {
                    attempt += 1;
                    if attempt >= profile.max_attempts {
                        return Err(err);
                    }
                    tokio::time::sleep(profile.interval_for_attempt(attempt)).await;
                }
            }
        }
    };

    match tokio::time::timeout(profile.start_to_close, attempts).await {
        Ok(result) => result,
        Err(_) => Err(JobEngineError::TimeoutError(format!(
            "operation exceeded its {:?} start-to-close budget",
            profile.start_to_close
        ))),
    }
}
