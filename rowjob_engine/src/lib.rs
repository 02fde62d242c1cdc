// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Row Job Engine
//!
//! Orchestrates the processing of very large delimited text files by
//! partitioning them into row-aligned byte ranges and running each partition
//! as a bounded-concurrency child workflow.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Application Layer                          │
//! │  (Use Cases, Commands, Job/Chunk Workflows, Activities)      │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (rowjob_domain)              │
//! │  (Entities, Value Objects, Repository/Service Ports)         │
//! └─────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Infrastructure Layer                          │
//! │  (Tokio File I/O, In-Memory Repositories, Config, Metrics)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Job
//! A job processes one file end to end: analyze, partition into chunks,
//! process chunks with bounded parallelism, aggregate progress, and
//! optionally reprocess rows that failed validation.
//!
//! ### Chunk
//! A row-aligned byte range of the source file, processed independently as
//! its own retryable unit of work.
//!
//! ### Control Plane
//! Pause, resume, and cancel are cooperative signals delivered to a running
//! job's workflow task through a per-job [`control_plane::JobControl`]
//! handle rather than by killing the task outright.
//!
//! ## Testing
//!
//! ```bash
//! cargo test
//! ```

pub mod application;
pub mod control_plane;
pub mod infrastructure;

// Tests are organized as:
// - Unit tests: #[cfg(test)] modules within each source file
// - Integration tests: tests/ directory

pub use control_plane::{ControlPlaneRegistry, JobControl};
