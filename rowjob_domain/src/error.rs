// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A hierarchical error type for the job orchestration domain. Errors are
//! categorized so the chunk workflow's retry loop and the control surface's
//! exit-code mapping can reason about them without matching on message text.

use thiserror::Error;

/// Domain-specific errors for the job orchestration engine.
#[derive(Error, Debug, Clone)]
pub enum JobEngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Boundary alignment failure: {0}")]
    BoundaryAlignmentFailure(String),

    #[error("Chunk processing failed: {0}")]
    ChunkProcessingFailed(String),

    #[error("Row validation error: {0}")]
    ValidationError(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Job cancelled: {0}")]
    Cancelled(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl JobEngineError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn boundary_alignment_failure(msg: impl Into<String>) -> Self {
        Self::BoundaryAlignmentFailure(msg.into())
    }

    pub fn chunk_processing_failed(msg: impl Into<String>) -> Self {
        Self::ChunkProcessingFailed(msg.into())
    }

    pub fn resource_exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::IoError(msg.into())
    }

    pub fn repository_error(msg: impl Into<String>) -> Self {
        Self::RepositoryError(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Whether a retry loop should attempt this operation again.
    ///
    /// Boundary alignment failures, validation errors, and cancellation are
    /// never retried - the first two are structural, the third is
    /// intentional.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            JobEngineError::TimeoutError(_)
                | JobEngineError::ResourceExhausted(_)
                | JobEngineError::IoError(_)
                | JobEngineError::RepositoryError(_)
        )
    }

    pub fn category(&self) -> &'static str {
        match self {
            JobEngineError::InvalidConfiguration(_) => "configuration",
            JobEngineError::InvalidRequest(_) => "configuration",
            JobEngineError::BoundaryAlignmentFailure(_) => "boundary",
            JobEngineError::ChunkProcessingFailed(_) => "processing",
            JobEngineError::ValidationError(_) => "validation",
            JobEngineError::ResourceExhausted(_) => "resource",
            JobEngineError::IoError(_) => "io",
            JobEngineError::RepositoryError(_) => "repository",
            JobEngineError::SerializationError(_) => "serialization",
            JobEngineError::TimeoutError(_) => "timeout",
            JobEngineError::Cancelled(_) => "cancellation",
            JobEngineError::JobNotFound(_) => "job",
            JobEngineError::InternalError(_) => "internal",
        }
    }
}

impl From<std::io::Error> for JobEngineError {
    fn from(err: std::io::Error) -> Self {
        JobEngineError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for JobEngineError {
    fn from(err: serde_json::Error) -> Self {
        JobEngineError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_errors_are_flagged() {
        assert!(JobEngineError::TimeoutError("x".into()).is_recoverable());
        assert!(JobEngineError::resource_exhausted("x").is_recoverable());
        assert!(!JobEngineError::boundary_alignment_failure("x").is_recoverable());
        assert!(!JobEngineError::ValidationError("x".into()).is_recoverable());
        assert!(!JobEngineError::Cancelled("x".into()).is_recoverable());
    }

    #[test]
    fn category_mapping_is_stable() {
        assert_eq!(JobEngineError::invalid_config("x").category(), "configuration");
        assert_eq!(JobEngineError::boundary_alignment_failure("x").category(), "boundary");
    }
}
