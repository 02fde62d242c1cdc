// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Failed Record
//!
//! A single row that failed processing, retained for the job's reprocess
//! pass. Identity is `(job_id, chunk_index, line_number)` — a row is never
//! deduplicated against itself across retries of the same chunk.

use crate::value_objects::{ChunkIndex, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureType {
    ValidationError,
    ProcessingError,
    DuplicateRow,
    ParseError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRecord {
    pub job_id: JobId,
    pub chunk_index: ChunkIndex,
    pub line_number: u64,
    pub raw_row: String,
    pub failure_type: FailureType,
    pub validation_errors: Vec<String>,
    pub error_message: String,
    pub recorded_at: DateTime<Utc>,
    pub reprocessed: bool,
    pub row_id: Option<String>,
}

impl FailedRecord {
    pub fn new(
        job_id: JobId,
        chunk_index: ChunkIndex,
        line_number: u64,
        raw_row: impl Into<String>,
        failure_type: FailureType,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            job_id,
            chunk_index,
            line_number,
            raw_row: raw_row.into(),
            failure_type,
            validation_errors: Vec::new(),
            error_message: error_message.into(),
            recorded_at: Utc::now(),
            reprocessed: false,
            row_id: None,
        }
    }

    pub fn with_validation_errors(mut self, errors: Vec<String>) -> Self {
        self.validation_errors = errors;
        self
    }

    pub fn with_row_id(mut self, row_id: impl Into<String>) -> Self {
        self.row_id = Some(row_id.into());
        self
    }

    pub fn mark_reprocessed(&mut self) {
        self.reprocessed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_not_reprocessed() {
        let record = FailedRecord::new(
            JobId::new(),
            ChunkIndex::new(2),
            57,
            "42,bad-row,,,",
            FailureType::ValidationError,
            "email missing",
        );
        assert!(!record.reprocessed);
        assert!(record.validation_errors.is_empty());
    }

    #[test]
    fn mark_reprocessed_flips_flag() {
        let mut record = FailedRecord::new(
            JobId::new(),
            ChunkIndex::new(0),
            1,
            "row",
            FailureType::ParseError,
            "bad encoding",
        );
        record.mark_reprocessed();
        assert!(record.reprocessed);
    }
}
