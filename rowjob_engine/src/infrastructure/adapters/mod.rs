// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

mod delimited_row_processor;
mod tokio_file_byte_provider;

pub use delimited_row_processor::DelimitedRowProcessor;
pub use tokio_file_byte_provider::{to_chunk_data, TokioFileByteProvider};
