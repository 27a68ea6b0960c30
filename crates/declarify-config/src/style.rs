//! Formatting conventions learnt from an existing document

/// How new lines are written into a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Style {
    /// Line terminator
    pub(crate) newline: &'static str,
    /// Prefix of continuation lines
    pub(crate) indent: String,
    /// Text between a key and its value, e.g. `" = "`
    pub(crate) delimiter: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            newline: "\n",
            indent: "    ".to_string(),
            delimiter: " = ".to_string(),
        }
    }
}

impl Style {
    /// Whitespace written after the delimiter when a value follows
    pub(crate) fn delimiter_padding(&self) -> &str {
        &self.delimiter[self.delimiter.trim_end().len()..]
    }
}

/// Collects the first example of each convention while parsing
#[derive(Debug, Default)]
pub(crate) struct StyleDetector {
    newline: Option<&'static str>,
    indent: Option<String>,
    delimiter: Option<String>,
}

impl StyleDetector {
    /// Look at a raw line (with its terminator)
    pub(crate) fn observe_line(&mut self, line: &str) {
        if self.newline.is_none() && line.ends_with('\n') {
            self.newline = Some(if line.ends_with("\r\n") { "\r\n" } else { "\n" });
        }
    }

    /// Look at a continuation line's content
    pub(crate) fn observe_continuation(&mut self, body: &str) {
        if self.indent.is_none() {
            let width = body.len() - body.trim_start().len();
            self.indent = Some(body[..width].to_string());
        }
    }

    /// Look at an entry line whose delimiter sits at byte `delim`
    pub(crate) fn observe_entry(&mut self, body: &str, delim: usize) {
        if self.delimiter.is_some() {
            return;
        }
        let after = &body[delim + 1..];
        if after.trim().is_empty() {
            // spacing after the delimiter is unknowable without a value
            return;
        }
        let key_end = body[..delim].trim_end().len();
        let padding = after.len() - after.trim_start().len();
        self.delimiter = Some(body[key_end..delim + 1 + padding].to_string());
    }

    pub(crate) fn finish(self) -> Style {
        let default = Style::default();
        Style {
            newline: self.newline.unwrap_or(default.newline),
            indent: self.indent.unwrap_or(default.indent),
            delimiter: self.delimiter.unwrap_or(default.delimiter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_observations() {
        assert_eq!(StyleDetector::default().finish(), Style::default());
    }

    #[test]
    fn learns_crlf_and_tab_indent() {
        let mut detector = StyleDetector::default();
        detector.observe_line("[metadata]\r\n");
        detector.observe_continuation("\tvalue");
        let style = detector.finish();
        assert_eq!(style.newline, "\r\n");
        assert_eq!(style.indent, "\t");
    }

    #[test]
    fn learns_delimiter_from_first_valued_entry() {
        let mut detector = StyleDetector::default();
        detector.observe_entry("install_requires =", 17);
        detector.observe_entry("name=demo", 4);
        detector.observe_entry("version : 1.0", 8);
        let style = detector.finish();
        assert_eq!(style.delimiter, "=");
        assert_eq!(style.delimiter_padding(), "");
    }

    #[test]
    fn colon_delimiter() {
        let mut detector = StyleDetector::default();
        detector.observe_entry("name: demo", 4);
        assert_eq!(detector.finish().delimiter, ": ");
    }
}
