//! Error types for the config layer

use crate::encoding::Encoding;

/// Errors while parsing a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// A line could not be understood
    #[error("line {line}: {message}")]
    ParseFailed {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },
}

impl DocumentError {
    /// Create parse failure for a 1-based line
    pub fn parse_failed(line: usize, message: impl Into<String>) -> Self {
        Self::ParseFailed {
            line,
            message: message.into(),
        }
    }

    /// Line the error points at
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::ParseFailed { line, .. } => *line,
        }
    }
}

/// Errors while encoding a value for a document entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The encoding cannot represent this kind of value
    #[error("{encoding} encoding cannot represent a {found} value")]
    Unsupported {
        /// Requested encoding
        encoding: Encoding,
        /// Kind of value supplied
        found: &'static str,
    },

    /// The value holds text that would break the document structure
    #[error("{encoding} encoding cannot represent {reason}")]
    Unrepresentable {
        /// Requested encoding
        encoding: Encoding,
        /// What could not be written
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failed_display() {
        let err = DocumentError::parse_failed(3, "expected `key = value`");
        assert_eq!(err.to_string(), "line 3: expected `key = value`");
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn unsupported_display() {
        let err = EncodeError::Unsupported {
            encoding: Encoding::Boolean,
            found: "text",
        };
        assert_eq!(err.to_string(), "boolean encoding cannot represent a text value");
    }
}
