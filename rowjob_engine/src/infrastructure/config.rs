// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Engine Configuration
//!
//! Layered configuration: built-in defaults, overridden by an optional TOML
//! file, overridden by `ROWJOB_`-prefixed environment variables. Command-line
//! flags (handled in the bootstrap crate) take precedence over all of these.

use rowjob_domain::value_objects::{ChunkSizeBytes, MaxParallelChunks};
use rowjob_domain::JobEngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub chunk_size_bytes: u64,
    pub max_parallel_chunks: u32,
    pub enable_deduplication: bool,
    pub reprocess_failures: bool,
    pub batch_size: usize,
    pub boundary_scan_window_bytes: u64,
    pub analysis_sample_bytes: u64,
    /// Global cross-job CPU token count; `None` means cores - 1.
    pub global_cpu_tokens: Option<usize>,
    /// Global cross-job I/O token count; `None` means device-default (12).
    pub global_io_tokens: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size_bytes: ChunkSizeBytes::DEFAULT_SIZE,
            max_parallel_chunks: MaxParallelChunks::DEFAULT,
            enable_deduplication: true,
            reprocess_failures: true,
            batch_size: 1000,
            boundary_scan_window_bytes: 1024,
            analysis_sample_bytes: 1024 * 1024,
            global_cpu_tokens: None,
            global_io_tokens: None,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from the default stack: built-in defaults, then
    /// `rowjob.toml` in the current directory if present, then `ROWJOB_*`
    /// environment variables.
    pub fn load() -> Result<Self, JobEngineError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("chunk_size_bytes", defaults.chunk_size_bytes)
            .map_err(config_err)?
            .set_default("max_parallel_chunks", defaults.max_parallel_chunks)
            .map_err(config_err)?
            .set_default("enable_deduplication", defaults.enable_deduplication)
            .map_err(config_err)?
            .set_default("reprocess_failures", defaults.reprocess_failures)
            .map_err(config_err)?
            .set_default("batch_size", defaults.batch_size as i64)
            .map_err(config_err)?
            .set_default("boundary_scan_window_bytes", defaults.boundary_scan_window_bytes)
            .map_err(config_err)?
            .set_default("analysis_sample_bytes", defaults.analysis_sample_bytes)
            .map_err(config_err)?
            .add_source(config::File::with_name("rowjob").required(false))
            .add_source(config::Environment::with_prefix("ROWJOB"))
            .build()
            .map_err(config_err)?;

        settings.try_deserialize().map_err(config_err)
    }

    pub fn chunk_size(&self) -> Result<ChunkSizeBytes, JobEngineError> {
        ChunkSizeBytes::new(self.chunk_size_bytes)
    }

    pub fn max_parallel_chunks(&self) -> Result<MaxParallelChunks, JobEngineError> {
        MaxParallelChunks::new(self.max_parallel_chunks)
    }
}

fn config_err(err: impl std::fmt::Display) -> JobEngineError {
    JobEngineError::invalid_config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.chunk_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.max_parallel_chunks, 10);
        assert_eq!(config.batch_size, 1000);
        assert!(config.enable_deduplication);
        assert!(config.reprocess_failures);
    }

    #[test]
    fn defaults_produce_valid_value_objects() {
        let config = EngineConfig::default();
        assert!(config.chunk_size().is_ok());
        assert!(config.max_parallel_chunks().is_ok());
    }
}
