// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Immutable, self-validating domain primitives.

mod chunk_boundaries;
mod chunk_index;
mod chunk_size_bytes;
mod job_id;
mod max_parallel_chunks;

pub use chunk_boundaries::{align_chunk_boundaries, ChunkBoundaries, DEFAULT_BOUNDARY_SCAN_WINDOW_BYTES};
pub use chunk_index::ChunkIndex;
pub use chunk_size_bytes::ChunkSizeBytes;
pub use job_id::JobId;
pub use max_parallel_chunks::MaxParallelChunks;
