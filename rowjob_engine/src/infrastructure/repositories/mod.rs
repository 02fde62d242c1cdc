// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

mod in_memory;

pub use in_memory::{
    InMemoryChunkProgressRepository, InMemoryFailedRecordRepository, InMemoryJobRepository, InMemoryRepositories,
};
