// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Security Validation Layer
//!
//! Arguments reach this module already parsed by `clap`; this pass rejects
//! path traversal and shell-injection patterns and canonicalizes paths that
//! must already exist, before anything reaches the engine.

use std::path::{Path, PathBuf};

const DANGEROUS_PATTERNS: &[&str] = &["..", "~", "$(", "`", "|", ";", "&&", "\0"];

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("argument '{arg}' is invalid: {reason}")]
    InvalidValue { arg: String, reason: String },

    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("argument contains a disallowed pattern: {0}")]
    DangerousPattern(String),

    #[error("failed to canonicalize path: {0}")]
    Io(#[from] std::io::Error),
}

pub struct SecureArgParser;

impl SecureArgParser {
    /// Rejects arguments containing path-traversal or shell-metacharacter
    /// patterns. Does not touch the filesystem - safe for arguments that
    /// name a path which may not exist yet.
    pub fn validate_argument(value: &str) -> Result<(), ParseError> {
        for pattern in DANGEROUS_PATTERNS {
            if value.contains(pattern) {
                return Err(ParseError::DangerousPattern(format!(
                    "'{value}' contains disallowed sequence '{pattern}'"
                )));
            }
        }
        Ok(())
    }

    /// Validates and canonicalizes a path that must already exist on disk.
    pub fn validate_path(value: &str) -> Result<PathBuf, ParseError> {
        Self::validate_argument(value)?;
        let path = Path::new(value);
        if !path.exists() {
            return Err(ParseError::PathNotFound(path.to_path_buf()));
        }
        Ok(path.canonicalize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_directory_traversal() {
        assert!(matches!(
            SecureArgParser::validate_argument("../etc/passwd"),
            Err(ParseError::DangerousPattern(_))
        ));
    }

    #[test]
    fn rejects_command_substitution() {
        assert!(matches!(
            SecureArgParser::validate_argument("job-$(whoami)"),
            Err(ParseError::DangerousPattern(_))
        ));
    }

    #[test]
    fn accepts_plain_filename() {
        assert!(SecureArgParser::validate_argument("data.csv").is_ok());
    }

    #[test]
    fn validate_path_rejects_missing_file() {
        assert!(matches!(
            SecureArgParser::validate_path("/does/not/exist/on/this/machine.csv"),
            Err(ParseError::PathNotFound(_))
        ));
    }

    #[test]
    fn validate_path_canonicalizes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.csv");
        std::fs::write(&file, b"id\n1\n").unwrap();

        let validated = SecureArgParser::validate_path(file.to_str().unwrap()).unwrap();
        assert!(validated.is_absolute());
    }
}
