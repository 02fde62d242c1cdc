// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Metrics
//!
//! Prometheus counters and gauges tracking job throughput and the
//! resource-governance pools, registered once per process.

use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::OnceLock;

pub struct JobMetrics {
    pub chunks_completed_total: IntCounterVec,
    pub chunks_failed_total: IntCounterVec,
    pub rows_processed_total: IntCounter,
    pub active_jobs: IntGauge,
}

impl JobMetrics {
    fn new(registry: &Registry) -> Self {
        let chunks_completed_total = IntCounterVec::new(
            Opts::new("rowjob_chunks_completed_total", "Chunks that reached Completed status"),
            &["job_id"],
        )
        .expect("metric options are valid");
        let chunks_failed_total = IntCounterVec::new(
            Opts::new("rowjob_chunks_failed_total", "Chunks that exhausted retries and failed"),
            &["job_id"],
        )
        .expect("metric options are valid");
        let rows_processed_total =
            IntCounter::new("rowjob_rows_processed_total", "Rows processed across all jobs").expect("metric options are valid");
        let active_jobs = IntGauge::new("rowjob_active_jobs", "Jobs currently in ProcessingChunks").expect("metric options are valid");

        registry.register(Box::new(chunks_completed_total.clone())).ok();
        registry.register(Box::new(chunks_failed_total.clone())).ok();
        registry.register(Box::new(rows_processed_total.clone())).ok();
        registry.register(Box::new(active_jobs.clone())).ok();

        Self {
            chunks_completed_total,
            chunks_failed_total,
            rows_processed_total,
            active_jobs,
        }
    }
}

static METRICS: OnceLock<JobMetrics> = OnceLock::new();
static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

pub fn metrics() -> &'static JobMetrics {
    METRICS.get_or_init(|| JobMetrics::new(registry()))
}
