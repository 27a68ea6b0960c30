//! Value encodings
//!
//! Each document field is written with one of four rules. Encoding produces
//! an [`EncodedValue`]: the text for the entry's first line plus any
//! continuation lines. Indentation and line endings are added by the
//! document, which knows the file's style.

use crate::document::{inline_comment_start, is_comment};
use crate::error::EncodeError;
use std::fmt;

/// Rule for writing a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Text as-is; embedded newlines become continuation lines
    Plain,
    /// Elements joined with `;`
    ListSemicolon,
    /// One `key = value` pair per continuation line
    Map,
    /// `true` / `false`
    Boolean,
}

impl Encoding {
    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Plain => "plain",
            Encoding::ListSemicolon => "list-semicolon",
            Encoding::Map => "map",
            Encoding::Boolean => "boolean",
        }
    }

    /// Encode a value under this rule
    ///
    /// # Errors
    /// - `EncodeError::Unsupported` if the value's kind does not fit the rule
    /// - `EncodeError::Unrepresentable` if the text would break the entry
    pub fn encode(self, value: &IniValue) -> Result<EncodedValue, EncodeError> {
        let encoded = self.encode_lines(value)?;
        if let Some(line) = encoded.comment_lookalike() {
            return Err(self.unrepresentable(format!("{line:?}, which reads back as a comment")));
        }
        Ok(encoded)
    }

    fn encode_lines(self, value: &IniValue) -> Result<EncodedValue, EncodeError> {
        match (self, value) {
            (Encoding::Plain, IniValue::Text(text)) => Ok(EncodedValue::from_text(text)),

            (Encoding::ListSemicolon, IniValue::Text(item)) => {
                self.list(std::slice::from_ref(item))
            }
            (Encoding::ListSemicolon, IniValue::List(items)) => self.list(items),

            (Encoding::Map, IniValue::Map(pairs)) => {
                let mut lines = Vec::with_capacity(pairs.len());
                for (key, val) in pairs {
                    if key.contains(['\n', '\r', '=']) || key.trim().is_empty() {
                        return Err(self.unrepresentable(format!("map key {key:?}")));
                    }
                    if val.contains(['\n', '\r']) {
                        return Err(self.unrepresentable(format!("multi-line value for {key:?}")));
                    }
                    lines.push(format!("{} = {}", key.trim(), val.trim()));
                }
                Ok(EncodedValue {
                    first: String::new(),
                    continuation: lines,
                })
            }

            (Encoding::Boolean, IniValue::Bool(flag)) => {
                Ok(EncodedValue::single(if *flag { "true" } else { "false" }))
            }

            (encoding, other) => Err(EncodeError::Unsupported {
                encoding,
                found: other.kind(),
            }),
        }
    }

    fn list(self, items: &[String]) -> Result<EncodedValue, EncodeError> {
        if let Some(bad) = items.iter().find(|i| i.contains(['\n', '\r', ';'])) {
            return Err(self.unrepresentable(format!("list element {bad:?}")));
        }
        Ok(EncodedValue::single(items.join(";")))
    }

    fn unrepresentable(self, reason: String) -> EncodeError {
        EncodeError::Unrepresentable {
            encoding: self,
            reason,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value ready to be encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniValue {
    /// Text (strings and numbers)
    Text(String),
    /// Ordered list of text items
    List(Vec<String>),
    /// Ordered key/value pairs
    Map(Vec<(String, String)>),
    /// Boolean flag
    Bool(bool),
}

impl IniValue {
    /// Kind name used in diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            IniValue::Text(_) => "text",
            IniValue::List(_) => "list",
            IniValue::Map(_) => "map",
            IniValue::Bool(_) => "boolean",
        }
    }
}

/// Encoded entry text, without indentation or line endings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedValue {
    first: String,
    continuation: Vec<String>,
}

impl EncodedValue {
    /// Single-line value
    #[inline]
    #[must_use]
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            first: text.into(),
            continuation: Vec::new(),
        }
    }

    /// Split text on newlines; trailing empty lines are dropped
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<String> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        while lines.len() > 1 && lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let first = lines.remove(0);
        Self {
            first,
            continuation: lines,
        }
    }

    /// Text on the key's own line
    #[inline]
    #[must_use]
    pub fn first_line(&self) -> &str {
        &self.first
    }

    /// Lines written below the key, indented
    #[inline]
    #[must_use]
    pub fn continuation_lines(&self) -> &[String] {
        &self.continuation
    }

    /// Check if the value spans several lines
    #[inline]
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        !self.continuation.is_empty()
    }

    /// First line that the document parser would read as a comment
    ///
    /// On the key's line that is a leading `#`/`;` or one preceded by
    /// whitespace; on a continuation line only a leading one counts.
    fn comment_lookalike(&self) -> Option<&str> {
        let first = self.first.trim();
        if is_comment(first) || inline_comment_start(first).is_some() {
            return Some(self.first.as_str());
        }
        self.continuation
            .iter()
            .find(|line| is_comment(line.trim()))
            .map(String::as_str)
    }

    /// Logical value as [`ConfigDocument::get`](crate::ConfigDocument::get) reports it
    #[must_use]
    pub fn logical(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(self.continuation.len() + 1);
        lines.push(self.first.trim());
        lines.extend(self.continuation.iter().map(|l| l.trim()));
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let start = lines.iter().take_while(|l| l.is_empty()).count();
        lines[start..].join("\n")
    }
}
