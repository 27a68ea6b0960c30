//! Error types for the syntax layer
//!
//! Provides error handling for:
//! - Parse operations (text → tree)
//! - Call-site analysis (malformed keyword lists)
//! - Keyword removal (stale call sites)

/// Errors while turning source text into a tree
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    /// The text is not valid Python
    #[error("syntax error at line {line}, column {column}: {message}")]
    ParseFailed {
        /// 1-based line of the first error node
        line: usize,
        /// 1-based column of the first error node
        column: usize,
        /// What the parser reported
        message: String,
    },

    /// tree-sitter could not be set up for Python
    #[error("parser initialisation failed: {0}")]
    ParserInit(String),
}

impl SyntaxError {
    /// Create parse failure at a tree-sitter position
    pub fn parse_failed(point: tree_sitter::Point, message: impl Into<String>) -> Self {
        Self::ParseFailed {
            line: point.row + 1,
            column: point.column + 1,
            message: message.into(),
        }
    }
}

/// Errors found while reading the target call
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The same keyword was passed twice
    #[error("keyword '{keyword}' given more than once (lines {first_line} and {second_line})")]
    DuplicateKeyword {
        /// The repeated keyword
        keyword: String,
        /// 1-based line of the first occurrence
        first_line: usize,
        /// 1-based line of the repeated occurrence
        second_line: usize,
    },
}

/// Errors during keyword removal
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// The call site does not belong to the tree being rewritten
    #[error("call site at bytes {start}..{end} does not belong to this source tree")]
    StaleCallSite {
        /// Start byte of the stale call
        start: usize,
        /// End byte of the stale call
        end: usize,
    },

    /// The rewritten text no longer parses
    #[error("rewritten source does not parse: {0}")]
    Reparse(#[source] SyntaxError),
}
