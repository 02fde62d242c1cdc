// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Global Resource Manager
//!
//! Centralized resource governance across all concurrently running jobs,
//! separate from any single job's `max_parallel_chunks` cap.
//!
//! ## Two-level resource governance
//!
//! A job's own scheduler only knows about its own chunks: ten jobs each
//! running ten chunks in parallel would submit a hundred concurrent chunk
//! workflows to the host. This manager sits a level above that, capping
//! total CPU-bound and I/O-bound work across the whole process:
//!
//! 1. **Global limits** (this module) - caps total system resources.
//! 2. **Local limits** (per-job semaphore in the job scheduler) - caps
//!    per-job concurrency.
//!
//! A chunk workflow acquires a global token before it starts its batch loop
//! and holds it until the chunk finishes, on top of the per-job
//! `max_parallel_chunks` permit it already holds.

use rowjob_domain::JobEngineError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    NVMe,
    Ssd,
    Hdd,
    Auto,
    Custom(usize),
}

#[derive(Debug, Clone)]
pub struct ResourceConfig {
    /// CPU-bound token count (default: cores - 1).
    pub cpu_tokens: Option<usize>,
    /// I/O-bound token count (default: device-specific).
    pub io_tokens: Option<usize>,
    pub storage_type: StorageType,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            cpu_tokens: None,
            io_tokens: None,
            storage_type: StorageType::Auto,
        }
    }
}

/// Cross-job CPU/IO token pools, independent of any single job's own
/// parallelism cap.
pub struct GlobalResourceManager {
    cpu_tokens: Arc<Semaphore>,
    io_tokens: Arc<Semaphore>,
    memory_used: Arc<AtomicUsize>,
    cpu_token_count: usize,
    io_token_count: usize,
}

impl GlobalResourceManager {
    pub fn new(config: ResourceConfig) -> Result<Self, JobEngineError> {
        let available_cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
        let cpu_token_count = config.cpu_tokens.unwrap_or_else(|| (available_cores - 1).max(1));
        let io_token_count = config.io_tokens.unwrap_or_else(|| Self::detect_optimal_io_tokens(config.storage_type));

        Ok(Self {
            cpu_tokens: Arc::new(Semaphore::new(cpu_token_count)),
            io_tokens: Arc::new(Semaphore::new(io_token_count)),
            memory_used: Arc::new(AtomicUsize::new(0)),
            cpu_token_count,
            io_token_count,
        })
    }

    fn detect_optimal_io_tokens(storage_type: StorageType) -> usize {
        match storage_type {
            StorageType::NVMe => 24,
            StorageType::Ssd => 12,
            StorageType::Hdd => 4,
            StorageType::Auto => 12,
            StorageType::Custom(n) => n,
        }
    }

    /// Acquires a CPU-bound token, waiting if the global pool is saturated.
    /// Held for the duration of a chunk's batch-processing loop.
    pub async fn acquire_cpu(&self) -> Result<SemaphorePermit<'_>, JobEngineError> {
        self.cpu_tokens
            .acquire()
            .await
            .map_err(|_| JobEngineError::internal_error("CPU semaphore closed"))
    }

    /// Acquires an I/O-bound token, waiting if the global pool is saturated.
    /// Held for the duration of a chunk's file read.
    pub async fn acquire_io(&self) -> Result<SemaphorePermit<'_>, JobEngineError> {
        self.io_tokens
            .acquire()
            .await
            .map_err(|_| JobEngineError::internal_error("I/O semaphore closed"))
    }

    pub fn track_memory(&self, bytes: usize) {
        self.memory_used.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn untrack_memory(&self, bytes: usize) {
        self.memory_used.fetch_sub(bytes, Ordering::Relaxed);
    }

    pub fn memory_used(&self) -> usize {
        self.memory_used.load(Ordering::Relaxed)
    }

    pub fn cpu_tokens_available(&self) -> usize {
        self.cpu_tokens.available_permits()
    }

    pub fn cpu_tokens_total(&self) -> usize {
        self.cpu_token_count
    }

    pub fn io_tokens_available(&self) -> usize {
        self.io_tokens.available_permits()
    }

    pub fn io_tokens_total(&self) -> usize {
        self.io_token_count
    }
}

static RESOURCE_MANAGER_CELL: std::sync::OnceLock<GlobalResourceManager> = std::sync::OnceLock::new();

/// Initializes the global resource manager. Must be called exactly once,
/// early in `main`, before any job is submitted.
pub fn init_resource_manager(config: ResourceConfig) -> Result<(), JobEngineError> {
    let manager = GlobalResourceManager::new(config)?;
    RESOURCE_MANAGER_CELL
        .set(manager)
        .map_err(|_| JobEngineError::internal_error("resource manager already initialized"))
}

/// Returns the global resource manager, initializing it with defaults on
/// first access if `init_resource_manager` was never called.
pub fn resource_manager() -> &'static GlobalResourceManager {
    RESOURCE_MANAGER_CELL.get_or_init(|| GlobalResourceManager::new(ResourceConfig::default()).expect("default resource config is always valid"))
}
