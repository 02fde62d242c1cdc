// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory Repositories
//!
//! Default repository implementations backing a single-process run: every
//! job, its chunk progress, and its failed rows live in process memory for
//! the lifetime of the run. Durable backends can implement the same
//! domain-crate traits without the orchestration logic changing.

use async_trait::async_trait;
use parking_lot::RwLock;
use rowjob_domain::entities::{ChunkProgress, FailedRecord, JobStatus};
use rowjob_domain::repositories::{ChunkProgressRepository, FailedRecordRepository, JobRepository};
use rowjob_domain::value_objects::{ChunkIndex, JobId};
use rowjob_domain::JobEngineError;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<BTreeMap<JobId, JobStatus>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn save(&self, status: &JobStatus) -> Result<(), JobEngineError> {
        self.jobs.write().insert(status.job_id, status.clone());
        Ok(())
    }

    async fn find_by_id(&self, job_id: JobId) -> Result<Option<JobStatus>, JobEngineError> {
        Ok(self.jobs.read().get(&job_id).cloned())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<JobStatus>, JobEngineError> {
        let mut jobs: Vec<_> = self.jobs.read().values().cloned().collect();
        jobs.sort_by(|a, b| b.job_id.cmp(&a.job_id));
        jobs.truncate(limit);
        Ok(jobs)
    }

    async fn delete(&self, job_id: JobId) -> Result<bool, JobEngineError> {
        Ok(self.jobs.write().remove(&job_id).is_some())
    }
}

type ChunkKey = (JobId, u32);

#[derive(Default)]
pub struct InMemoryChunkProgressRepository {
    progress: RwLock<BTreeMap<ChunkKey, ChunkProgress>>,
}

impl InMemoryChunkProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChunkProgressRepository for InMemoryChunkProgressRepository {
    async fn upsert(&self, progress: ChunkProgress) -> Result<(), JobEngineError> {
        let key = (progress.job_id, progress.chunk_index.value());
        let mut map = self.progress.write();
        match map.get_mut(&key) {
            Some(existing) => existing.merge_upsert(progress),
            None => {
                map.insert(key, progress);
            }
        }
        Ok(())
    }

    async fn find(&self, job_id: JobId, chunk_index: ChunkIndex) -> Result<Option<ChunkProgress>, JobEngineError> {
        Ok(self.progress.read().get(&(job_id, chunk_index.value())).cloned())
    }

    async fn find_all_for_job(&self, job_id: JobId) -> Result<BTreeMap<u32, ChunkProgress>, JobEngineError> {
        Ok(self
            .progress
            .read()
            .iter()
            .filter(|((id, _), _)| *id == job_id)
            .map(|((_, idx), progress)| (*idx, progress.clone()))
            .collect())
    }
}

type FailedRecordKey = (JobId, u32, u64);

#[derive(Default)]
pub struct InMemoryFailedRecordRepository {
    records: RwLock<BTreeMap<FailedRecordKey, FailedRecord>>,
}

impl InMemoryFailedRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FailedRecordRepository for InMemoryFailedRecordRepository {
    async fn append(&self, record: FailedRecord) -> Result<(), JobEngineError> {
        let key = (record.job_id, record.chunk_index.value(), record.line_number);
        self.records.write().insert(key, record);
        Ok(())
    }

    async fn find_for_job(&self, job_id: JobId, only_unreprocessed: bool) -> Result<Vec<FailedRecord>, JobEngineError> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| r.job_id == job_id && (!only_unreprocessed || !r.reprocessed))
            .cloned()
            .collect())
    }

    async fn mark_reprocessed(&self, job_id: JobId, chunk_index: ChunkIndex, line_number: u64) -> Result<(), JobEngineError> {
        if let Some(record) = self.records.write().get_mut(&(job_id, chunk_index.value(), line_number)) {
            record.mark_reprocessed();
        }
        Ok(())
    }
}

/// Bundled in-memory repositories sharing no state beyond their own map,
/// constructed once per job-engine process.
pub struct InMemoryRepositories {
    pub jobs: Arc<InMemoryJobRepository>,
    pub chunk_progress: Arc<InMemoryChunkProgressRepository>,
    pub failed_records: Arc<InMemoryFailedRecordRepository>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(InMemoryJobRepository::new()),
            chunk_progress: Arc::new(InMemoryChunkProgressRepository::new()),
            failed_records: Arc::new(InMemoryFailedRecordRepository::new()),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}
