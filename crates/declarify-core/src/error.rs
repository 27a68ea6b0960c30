//! Error types for declarify core
//!
//! Provides error handling for:
//! - Source and document parse failures, naming the offending file
//! - Malformed calls (repeated keywords)
//! - Internal consistency failures during the rewrite
//! - Run configuration loading

use crate::state_machine::MigrationState;
use declarify_config::DocumentError;
use declarify_syntax::{AnalyzeError, SyntaxError, TransformError};
use std::path::PathBuf;

/// Main migration error type
///
/// Every variant stops the run before any output is produced.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// The source file is not valid Python
    #[error("failed to parse {file}: {source}")]
    SourceParse {
        /// Name of the source file
        file: String,
        /// Underlying parse error
        #[source]
        source: SyntaxError,
    },

    /// The document file is not a valid INI document
    #[error("failed to parse {file}: {source}")]
    DocumentParse {
        /// Name of the document file
        file: String,
        /// Underlying parse error
        #[source]
        source: DocumentError,
    },

    /// The target call repeats a keyword
    #[error("keyword argument `{keyword}` repeated in call (lines {first_line} and {second_line})")]
    DuplicateKeyword {
        /// Repeated keyword
        keyword: String,
        /// 1-based line of the first occurrence
        first_line: usize,
        /// 1-based line of the repeat
        second_line: usize,
    },

    /// The call rewrite was applied to a tree it did not come from
    #[error("internal error: call at bytes {start}..{end} is not part of the source tree")]
    StaleNodeReference {
        /// Start byte of the call
        start: usize,
        /// End byte of the call
        end: usize,
    },

    /// The rewritten source no longer parses
    #[error("internal error: {0}")]
    RewriteFailed(#[source] TransformError),

    /// The orchestrator attempted an illegal state change
    #[error("internal error: illegal migration transition {from:?} -> {to:?}")]
    InvalidTransition {
        /// State before
        from: MigrationState,
        /// Requested state
        to: MigrationState,
    },
}

impl MigrateError {
    /// Check if the error points at a bug rather than at bad input
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::StaleNodeReference { .. }
                | Self::RewriteFailed(_)
                | Self::InvalidTransition { .. }
        )
    }
}

impl From<AnalyzeError> for MigrateError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::DuplicateKeyword {
                keyword,
                first_line,
                second_line,
            } => Self::DuplicateKeyword {
                keyword,
                first_line,
                second_line,
            },
        }
    }
}

impl From<TransformError> for MigrateError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::StaleCallSite { start, end } => Self::StaleNodeReference { start, end },
            other @ TransformError::Reparse(_) => Self::RewriteFailed(other),
        }
    }
}

/// Errors loading a run configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML
    #[error("invalid configuration: {0}")]
    Invalid(#[from] toml::de::Error),
}
