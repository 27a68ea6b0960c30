//! Format-preserving INI document
//!
//! The document keeps every input line verbatim, grouped into sections and
//! entries. Comments and blank lines are attached to the item that follows
//! them, so edits never move them. Only entries touched by
//! [`ConfigDocument::set`] are re-rendered.
//!
//! Parsing follows the conventions of Python's `configparser`:
//!
//! - `[name]` opens a section; duplicate sections are rejected
//! - `key = value` or `key: value` inside a section; duplicate keys are rejected
//! - lines starting with `#` or `;` are comments
//! - indented lines after an entry continue its value
//! - keys are matched case-insensitively

use crate::encoding::EncodedValue;
use crate::error::DocumentError;
use crate::style::{Style, StyleDetector};
use std::fmt;
use std::mem;

/// Parsed INI document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
    /// Lines after the last entry (or the whole file if it has no sections)
    trailing: Vec<String>,
    style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    leading: Vec<String>,
    header: String,
    name: String,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    leading: Vec<String>,
    key: String,
    /// First line plus continuation lines, terminators included
    lines: Vec<String>,
}

impl ConfigDocument {
    /// Parse document text
    ///
    /// # Errors
    /// Returns `DocumentError::ParseFailed` with the 1-based line number of
    /// the first line that is not a comment, blank, header, entry or
    /// continuation, or that repeats a section or key.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let mut sections: Vec<Section> = Vec::new();
        let mut pending: Vec<String> = Vec::new();
        let mut detector = StyleDetector::default();

        for (index, line) in text.split_inclusive('\n').enumerate() {
            let number = index + 1;
            detector.observe_line(line);

            let body = content(line);
            let trimmed = body.trim();
            if trimmed.is_empty() || is_comment(trimmed) {
                pending.push(line.to_string());
                continue;
            }

            if body.starts_with([' ', '\t']) {
                if let Some(entry) = sections.last_mut().and_then(|s| s.entries.last_mut()) {
                    detector.observe_continuation(body);
                    entry.lines.append(&mut pending);
                    entry.lines.push(line.to_string());
                    continue;
                }
            }

            if trimmed.starts_with('[') {
                let name = parse_header(trimmed).map_err(|m| DocumentError::parse_failed(number, m))?;
                if sections.iter().any(|s| s.name == name) {
                    return Err(DocumentError::parse_failed(
                        number,
                        format!("duplicate section [{name}]"),
                    ));
                }
                sections.push(Section {
                    leading: mem::take(&mut pending),
                    header: line.to_string(),
                    name,
                    entries: Vec::new(),
                });
                continue;
            }

            let Some(section) = sections.last_mut() else {
                return Err(DocumentError::parse_failed(
                    number,
                    "entry before any section header",
                ));
            };
            let Some(delim) = body.find(['=', ':']) else {
                return Err(DocumentError::parse_failed(
                    number,
                    format!("expected `key = value`, found `{trimmed}`"),
                ));
            };
            let key = body[..delim].trim();
            if key.is_empty() {
                return Err(DocumentError::parse_failed(number, "entry has no key"));
            }
            if section.entry(key).is_some() {
                return Err(DocumentError::parse_failed(
                    number,
                    format!("duplicate key `{key}` in section [{}]", section.name),
                ));
            }
            detector.observe_entry(body, delim);
            section.entries.push(Entry {
                leading: mem::take(&mut pending),
                key: key.to_string(),
                lines: vec![line.to_string()],
            });
        }

        let document = Self {
            sections,
            trailing: pending,
            style: detector.finish(),
        };
        tracing::trace!(sections = document.sections.len(), "parsed document");
        Ok(document)
    }

    /// Set `key` in `section` to an encoded value
    ///
    /// Replaces the value of an existing entry in place, keeping the key's
    /// spelling and its delimiter. Otherwise appends a new entry at the end
    /// of the section, creating the section at the end of the document when
    /// it is missing. Setting the same value twice is a no-op.
    pub fn set(&mut self, section: &str, key: &str, value: &EncodedValue) {
        let style = self.style.clone();

        let Some(target) = self.sections.iter_mut().find(|s| s.name == section) else {
            self.push_section(section, key, value);
            return;
        };

        if let Some(entry) = target.entry_mut(key) {
            tracing::trace!(section, key, "replacing entry");
            entry.replace_value(value, &style);
            return;
        }

        tracing::trace!(section, key, "appending entry");
        let last = match target.entries.last_mut() {
            Some(entry) => entry.lines.last_mut(),
            None => Some(&mut target.header),
        };
        if let Some(last) = last {
            terminate(last, style.newline);
        }
        target.entries.push(Entry::new(key, value, &style));
    }

    fn push_section(&mut self, section: &str, key: &str, value: &EncodedValue) {
        tracing::trace!(section, key, "creating section");
        let style = self.style.clone();
        let mut leading = mem::take(&mut self.trailing);

        if let Some(last) = leading.last_mut() {
            terminate(last, style.newline);
        } else if let Some(last) = self.last_section_line() {
            terminate(last, style.newline);
        }

        let needs_gap = match leading.last() {
            Some(line) => !content(line).trim().is_empty(),
            None => !self.sections.is_empty(),
        };
        if needs_gap {
            leading.push(style.newline.to_string());
        }

        self.sections.push(Section {
            leading,
            header: format!("[{section}]{}", style.newline),
            name: section.to_string(),
            entries: vec![Entry::new(key, value, &style)],
        });
    }

    fn last_section_line(&mut self) -> Option<&mut String> {
        let section = self.sections.last_mut()?;
        match section.entries.last_mut() {
            Some(entry) => entry.lines.last_mut(),
            None => Some(&mut section.header),
        }
    }

    /// Logical value of `key` in `section`
    ///
    /// Continuation lines are trimmed and joined with `\n`; inline comments
    /// and comment lines inside the value are left out.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.section(section)?.entry(key).map(Entry::value)
    }

    /// Section names in document order
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Keys of a section in document order, as spelled in the file
    pub fn keys<'a>(&'a self, section: &str) -> impl Iterator<Item = &'a str> {
        self.section(section)
            .into_iter()
            .flat_map(|s| s.entries.iter().map(|e| e.key.as_str()))
    }

    /// Check if a section exists
    #[inline]
    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    /// Check if the document has no sections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Line terminator new lines are written with
    #[inline]
    #[must_use]
    pub fn newline(&self) -> &str {
        self.style.newline
    }

    /// Print the document
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            write_lines(f, &section.leading)?;
            f.write_str(&section.header)?;
            for entry in &section.entries {
                write_lines(f, &entry.leading)?;
                write_lines(f, &entry.lines)?;
            }
        }
        write_lines(f, &self.trailing)
    }
}

impl std::str::FromStr for ConfigDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Section {
    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key.eq_ignore_ascii_case(key))
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| e.key.eq_ignore_ascii_case(key))
    }
}

impl Entry {
    fn new(key: &str, value: &EncodedValue, style: &Style) -> Self {
        let head = format!("{key}{}", style.delimiter);
        Self {
            leading: Vec::new(),
            key: key.to_string(),
            lines: render(&head, value, None, style),
        }
    }

    fn first_line(&self) -> FirstLine<'_> {
        FirstLine::split(self.lines.first().map_or("", |l| content(l)))
    }

    fn replace_value(&mut self, value: &EncodedValue, style: &Style) {
        let first = self.first_line();
        let mut head = first.head.to_string();
        if first.padding.is_empty() && !value.first_line().trim().is_empty() {
            head.push_str(style.delimiter_padding());
        } else {
            head.push_str(first.padding);
        }

        let comment = first.comment.map(str::to_string);
        let inline = match comment {
            Some(comment) if value.is_multiline() => {
                // a comment cannot trail a value that continues below
                self.leading
                    .push(format!("{}{}", comment.trim_start(), style.newline));
                None
            }
            other => other,
        };
        self.lines = render(&head, value, inline.as_deref(), style);
    }

    fn value(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(self.lines.len());
        lines.push(self.first_line().value);
        for line in self.lines.iter().skip(1) {
            let trimmed = content(line).trim();
            if !is_comment(trimmed) {
                lines.push(trimmed);
            }
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let start = lines.iter().take_while(|l| l.is_empty()).count();
        lines[start..].join("\n")
    }
}

/// First line of an entry split into its parts
#[derive(Debug, PartialEq, Eq)]
struct FirstLine<'a> {
    /// Key and delimiter, e.g. `name =`
    head: &'a str,
    /// Whitespace between the delimiter and the value
    padding: &'a str,
    value: &'a str,
    /// Inline comment with the whitespace before it
    comment: Option<&'a str>,
}

impl<'a> FirstLine<'a> {
    fn split(body: &'a str) -> Self {
        let Some(delim) = body.find(['=', ':']) else {
            return Self {
                head: body,
                padding: "",
                value: "",
                comment: None,
            };
        };
        let head = &body[..=delim];
        let rest = &body[delim + 1..];

        let comment_start = inline_comment_start(rest);
        let (before, comment) = match comment_start {
            Some(start) => (&rest[..start], Some(&rest[start..])),
            None => (rest, None),
        };
        let padding_len = before.len() - before.trim_start().len();
        Self {
            head,
            padding: &before[..padding_len],
            value: before.trim(),
            comment,
        }
    }
}

/// Byte offset of the whitespace run that precedes an inline comment
pub(crate) fn inline_comment_start(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let marker = (1..bytes.len()).find(|&i| {
        matches!(bytes[i], b'#' | b';') && matches!(bytes[i - 1], b' ' | b'\t')
    })?;
    Some(rest[..marker].trim_end().len())
}

fn render(head: &str, value: &EncodedValue, comment: Option<&str>, style: &Style) -> Vec<String> {
    let text = value.first_line().trim();
    let mut first = if text.is_empty() {
        head.trim_end().to_string()
    } else {
        format!("{head}{text}")
    };
    if let Some(comment) = comment {
        first.push_str(comment);
    }
    first.push_str(style.newline);

    let mut lines = Vec::with_capacity(value.continuation_lines().len() + 1);
    lines.push(first);
    for line in value.continuation_lines() {
        if line.trim().is_empty() {
            lines.push(style.newline.to_string());
        } else {
            lines.push(format!("{}{line}{}", style.indent, style.newline));
        }
    }
    lines
}

fn parse_header(trimmed: &str) -> Result<String, String> {
    let Some(close) = trimmed.find(']') else {
        return Err(format!("unterminated section header `{trimmed}`"));
    };
    let name = &trimmed[1..close];
    if name.trim().is_empty() {
        return Err("empty section name".to_string());
    }
    let after = trimmed[close + 1..].trim();
    if !after.is_empty() && !is_comment(after) {
        return Err(format!("unexpected text after section header: `{after}`"));
    }
    Ok(name.to_string())
}

/// Line without its terminator
fn content(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

pub(crate) fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with(['#', ';'])
}

fn terminate(line: &mut String, newline: &str) {
    if !line.ends_with('\n') {
        line.push_str(newline);
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
    lines.iter().try_for_each(|line| f.write_str(line))
}
