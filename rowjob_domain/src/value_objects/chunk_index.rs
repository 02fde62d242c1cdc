// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Index Value Object
//!
//! Zero-based position of a chunk within a job's partition plan. Kept as a
//! distinct type instead of a bare `u32` so chunk-workflow keys, progress
//! map keys, and retry bookkeeping all read unambiguously at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChunkIndex(u32);

impl ChunkIndex {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Generates indices `0..total_chunks`, matching `total_chunks` from
    /// `FileAnalysisResult`.
    pub fn range(total_chunks: u64) -> impl Iterator<Item = ChunkIndex> {
        (0..total_chunks).map(|i| ChunkIndex(i as u32))
    }
}

impl fmt::Display for ChunkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ChunkIndex {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ChunkIndex> for u32 {
    fn from(value: ChunkIndex) -> Self {
        value.0
    }
}
