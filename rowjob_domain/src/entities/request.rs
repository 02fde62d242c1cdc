// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # File Processing Request
//!
//! The caller-supplied description of a job: which file to process and
//! under what partitioning and processing options.

use crate::value_objects::{ChunkSizeBytes, JobId, MaxParallelChunks};
use crate::JobEngineError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessingRequest {
    pub job_id: JobId,
    pub directory: PathBuf,
    pub filename: String,
    pub chunk_size_bytes: ChunkSizeBytes,
    pub max_parallel_chunks: MaxParallelChunks,
    pub enable_deduplication: bool,
    pub reprocess_failures: bool,
}

impl FileProcessingRequest {
    pub fn new(directory: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            job_id: JobId::new(),
            directory: directory.into(),
            filename: filename.into(),
            chunk_size_bytes: ChunkSizeBytes::default(),
            max_parallel_chunks: MaxParallelChunks::default(),
            enable_deduplication: true,
            reprocess_failures: true,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size_bytes: ChunkSizeBytes) -> Self {
        self.chunk_size_bytes = chunk_size_bytes;
        self
    }

    pub fn with_max_parallel_chunks(mut self, max_parallel_chunks: MaxParallelChunks) -> Self {
        self.max_parallel_chunks = max_parallel_chunks;
        self
    }

    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn validate(&self) -> Result<(), JobEngineError> {
        if self.filename.trim().is_empty() {
            return Err(JobEngineError::InvalidRequest("filename must not be empty".into()));
        }
        if self.directory.as_os_str().is_empty() {
            return Err(JobEngineError::InvalidRequest("directory must not be empty".into()));
        }
        Ok(())
    }
}
