// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Configuration
//!
//! Layers CLI overrides on top of the engine's own layered configuration
//! (compiled-in defaults -> TOML file -> `ROWJOB_*` environment -> here).
//! The bootstrap layer only owns the resource-manager and logging knobs that
//! exist before the engine is wired up; everything else belongs to
//! `rowjob_engine::infrastructure::config::EngineConfig`.

use crate::cli::ValidatedCli;
use rowjob_engine::infrastructure::config::EngineConfig;
use rowjob_engine::infrastructure::runtime::{ResourceConfig, StorageType};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub resources: ResourceConfig,
    pub verbose: bool,
}

impl AppConfig {
    pub fn from_cli(cli: &ValidatedCli) -> Result<Self, rowjob_domain::JobEngineError> {
        let engine = EngineConfig::load()?;

        let storage_type = match cli.storage_type.as_deref() {
            Some("nvme") => StorageType::NVMe,
            Some("ssd") => StorageType::Ssd,
            Some("hdd") => StorageType::Hdd,
            _ => StorageType::Auto,
        };

        let resources = ResourceConfig {
            cpu_tokens: cli.cpu_threads,
            io_tokens: cli.io_threads,
            storage_type,
        };

        Ok(Self {
            engine,
            resources,
            verbose: cli.verbose,
        })
    }
}
