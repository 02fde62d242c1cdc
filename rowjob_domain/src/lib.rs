// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Job Orchestration Domain
//!
//! Pure, reusable business logic for partitioning a large delimited text
//! file into row-aligned chunks, tracking per-chunk and per-job progress,
//! and reacting to pause/resume/cancel control signals.
//!
//! ## Layering
//!
//! This crate holds only domain concepts: value objects, entities,
//! service ports, and repository ports. It has no dependency on `tokio`,
//! no file-system access, and no logging - those live in the engine crate,
//! which implements the ports declared here against real infrastructure.
//! This mirrors the domain/application/infrastructure split the rest of
//! this codebase uses.
//!
//! ## Modules
//!
//! - [`value_objects`]: immutable, self-validating primitives
//!   (`JobId`, `ChunkIndex`, `ChunkSizeBytes`, `MaxParallelChunks`,
//!   `ChunkBoundaries`).
//! - [`entities`]: mutable records with identity and lifecycle
//!   (`FileProcessingRequest`, `FileAnalysisResult`, `ChunkProgress`,
//!   `JobStatus`, `FailedRecord`).
//! - [`services`]: async ports for I/O the domain depends on but does not
//!   implement (`FileByteProvider`, `RowBatchProcessor`).
//! - [`repositories`]: async ports for durable state
//!   (`JobRepository`, `ChunkProgressRepository`, `FailedRecordRepository`).

pub mod entities;
mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use error::JobEngineError;
