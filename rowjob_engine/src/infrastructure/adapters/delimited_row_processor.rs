// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Delimited Row Processor
//!
//! A reference [`RowBatchProcessor`] for plain comma-delimited rows: a row
//! is invalid if it has no non-blank fields, a duplicate if an identical row
//! has already been seen within the same job. Row schema parsing and
//! persistence are genuinely out of scope here - this adapter exists so the
//! engine has something real to run out of the box, not to be a CSV parser.

use async_trait::async_trait;
use parking_lot::Mutex;
use rowjob_domain::services::{BatchProcessingResult, RowBatchProcessor};
use rowjob_domain::value_objects::{ChunkIndex, JobId};
use rowjob_domain::JobEngineError;
use std::collections::{HashMap, HashSet};

pub struct DelimitedRowProcessor {
    seen_per_job: Mutex<HashMap<JobId, HashSet<String>>>,
}

impl DelimitedRowProcessor {
    pub fn new() -> Self {
        Self {
            seen_per_job: Mutex::new(HashMap::new()),
        }
    }

    fn is_valid(row: &str) -> bool {
        row.split(',').any(|field| !field.trim().is_empty())
    }
}

impl Default for DelimitedRowProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowBatchProcessor for DelimitedRowProcessor {
    async fn process_batch(
        &self,
        job_id: JobId,
        _chunk_index: ChunkIndex,
        _batch_start_line: u64,
        rows: &[String],
        enable_deduplication: bool,
    ) -> Result<BatchProcessingResult, JobEngineError> {
        let mut valid_count = 0u64;
        let mut invalid_rows = Vec::new();
        let mut duplicate_rows = Vec::new();

        let mut seen_guard = self.seen_per_job.lock();
        let seen = seen_guard.entry(job_id).or_default();

        for (offset, row) in rows.iter().enumerate() {
            if !Self::is_valid(row) {
                invalid_rows.push((offset as u64, row.clone()));
                continue;
            }

            if enable_deduplication && !seen.insert(row.clone()) {
                duplicate_rows.push((offset as u64, row.clone()));
                continue;
            }

            valid_count += 1;
        }

        Ok(BatchProcessingResult {
            processed_count: rows.len() as u64,
            valid_count,
            invalid_count: invalid_rows.len() as u64,
            duplicate_count: duplicate_rows.len() as u64,
            invalid_rows,
            duplicate_rows,
        })
    }
}
