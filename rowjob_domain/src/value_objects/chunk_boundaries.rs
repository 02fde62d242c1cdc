// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Chunk Boundaries
//!
//! Row-aligned byte range for a single chunk. The raw partition math divides
//! the file into equal-sized slices; [`align_chunk_boundaries`] then nudges
//! each edge forward to the next row terminator so no row is ever split
//! across two chunks. The alignment itself is pure and operates on a small
//! caller-supplied scan window, so it is independent of how that window was
//! read (file, memory map, test fixture).

use crate::JobEngineError;
use serde::{Deserialize, Serialize};

/// Default width of the forward scan used to find a row terminator near a
/// raw chunk edge.
pub const DEFAULT_BOUNDARY_SCAN_WINDOW_BYTES: u64 = 1024;

/// Row-aligned byte range for one chunk, half-open on `end_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkBoundaries {
    pub start_offset: u64,
    pub end_offset: u64,
}

impl ChunkBoundaries {
    pub fn new(start_offset: u64, end_offset: u64) -> Self {
        Self {
            start_offset,
            end_offset,
        }
    }

    /// Size of this chunk in bytes after alignment.
    pub fn actual_chunk_size(&self) -> u64 {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// Raw (pre-alignment) byte range for `chunk_index` given a uniform
    /// `chunk_size_bytes`, clamped to `file_size_bytes`.
    pub fn raw_range(chunk_index: u64, chunk_size_bytes: u64, file_size_bytes: u64) -> (u64, u64) {
        let raw_start = chunk_index.saturating_mul(chunk_size_bytes);
        let raw_end = raw_start.saturating_add(chunk_size_bytes).min(file_size_bytes);
        (raw_start, raw_end)
    }
}

/// Scans forward from `raw_offset` for the first `\n` within `window`, which
/// must contain the bytes `[raw_offset, raw_offset + window.len())` of the
/// file. Returns the offset just past the terminator.
///
/// `raw_offset == 0` is never realigned: the start of the file is always a
/// valid chunk start by definition, header row included.
fn align_offset_forward(
    raw_offset: u64,
    window: &[u8],
    window_is_at_eof: bool,
) -> Result<u64, JobEngineError> {
    if raw_offset == 0 {
        return Ok(0);
    }
    match window.iter().position(|&b| b == b'\n') {
        Some(pos) => Ok(raw_offset + pos as u64 + 1),
        None if window_is_at_eof => {
            // No more newlines before EOF: the remainder of the file belongs
            // to this chunk.
            Ok(raw_offset + window.len() as u64)
        }
        None => Err(JobEngineError::boundary_alignment_failure(format!(
            "no row terminator found within {} bytes of offset {}",
            window.len(),
            raw_offset
        ))),
    }
}

/// Aligns a raw `[raw_start, raw_end)` byte range to row boundaries.
///
/// `start_window` must hold up to `scan_window_bytes` bytes starting at
/// `raw_start` (empty/not provided when `raw_start == 0`). `end_window` must
/// hold up to `scan_window_bytes` bytes starting at `raw_end`, unless
/// `raw_end == file_size_bytes`, in which case no scan is needed because the
/// end of the file is always a valid chunk end.
pub fn align_chunk_boundaries(
    raw_start: u64,
    raw_end: u64,
    file_size_bytes: u64,
    start_window: &[u8],
    end_window: &[u8],
) -> Result<ChunkBoundaries, JobEngineError> {
    let start_offset = align_offset_forward(raw_start, start_window, false)?;

    let end_offset = if raw_end >= file_size_bytes {
        file_size_bytes
    } else {
        let end_window_is_at_eof = raw_end + end_window.len() as u64 >= file_size_bytes;
        align_offset_forward(raw_end, end_window, end_window_is_at_eof)?
    };

    Ok(ChunkBoundaries::new(start_offset, end_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_chunk_starts_at_zero_unaligned() {
        let boundaries = align_chunk_boundaries(0, 10, 100, b"", b"rest\nof\nfile").unwrap();
        assert_eq!(boundaries.start_offset, 0);
    }

    #[test]
    fn end_aligns_to_next_newline() {
        // raw_end lands mid-row; window contains the rest of that row then a newline.
        let boundaries = align_chunk_boundaries(0, 10, 100, b"", b"ail\n").unwrap();
        assert_eq!(boundaries.end_offset, 10 + 4);
    }

    #[test]
    fn end_at_file_size_is_not_scanned() {
        let boundaries = align_chunk_boundaries(50, 100, 100, b"", b"").unwrap();
        assert_eq!(boundaries.end_offset, 100);
    }

    #[test]
    fn missing_terminator_within_window_fails() {
        let window = vec![b'x'; 16];
        let err = align_chunk_boundaries(0, 10, 1000, b"", &window).unwrap_err();
        assert!(matches!(err, JobEngineError::BoundaryAlignmentFailure(_)));
    }

    #[test]
    fn trailing_chunk_with_no_final_newline_extends_to_eof() {
        // file_size_bytes=20, raw_end=15, remaining 5 bytes have no newline and are the EOF tail.
        let window = b"nolf\0"; // no '\n' present, window reaches file end
        let boundaries = align_chunk_boundaries(0, 15, 20, b"", window).unwrap();
        assert_eq!(boundaries.end_offset, 15 + window.len() as u64);
    }

    #[test]
    fn actual_chunk_size_is_half_open_width() {
        let boundaries = ChunkBoundaries::new(100, 250);
        assert_eq!(boundaries.actual_chunk_size(), 150);
    }

    #[test]
    fn raw_range_clamps_to_file_size() {
        let (start, end) = ChunkBoundaries::raw_range(9, 100, 950);
        assert_eq!(start, 900);
        assert_eq!(end, 950);
    }

    proptest::proptest! {
        /// Independently-aligned chunks chain with no gap or overlap and
        /// jointly cover the whole file, for arbitrary row layouts and chunk
        /// sizes. `scan_window` spans the whole file so alignment can never
        /// fail to find the trailing row terminator every row is given.
        #[test]
        fn chunks_chain_with_no_gap_or_overlap(row_lens in proptest::collection::vec(1usize..40, 1..60), chunk_size_bytes in 1u64..500) {
            let mut bytes = Vec::new();
            for len in &row_lens {
                bytes.extend(std::iter::repeat(b'x').take(*len));
                bytes.push(b'\n');
            }
            let file_size = bytes.len() as u64;
            let scan_window = file_size;

            let total_chunks = file_size.div_ceil(chunk_size_bytes);
            let mut previous_end = 0u64;

            for chunk_index in 0..total_chunks {
                let (raw_start, raw_end) = ChunkBoundaries::raw_range(chunk_index, chunk_size_bytes, file_size);

                let start_window: &[u8] = if raw_start == 0 {
                    &[]
                } else {
                    let hi = (raw_start + scan_window).min(file_size) as usize;
                    &bytes[raw_start as usize..hi]
                };
                let end_window: &[u8] = if raw_end >= file_size {
                    &[]
                } else {
                    let hi = (raw_end + scan_window).min(file_size) as usize;
                    &bytes[raw_end as usize..hi]
                };

                let boundaries = align_chunk_boundaries(raw_start, raw_end, file_size, start_window, end_window).unwrap();
                proptest::prop_assert_eq!(boundaries.start_offset, previous_end);
                previous_end = boundaries.end_offset;
            }

            proptest::prop_assert_eq!(previous_end, file_size);
        }
    }
}
