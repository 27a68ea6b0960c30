//! Call-site transformer
//!
//! Removes keyword arguments from the target call by splicing the original
//! text. Bytes outside the removed arguments (and the separators that belong
//! to them) are never touched, so the rest of the file keeps its formatting.

use crate::analyzer::CallSite;
use crate::error::TransformError;
use crate::source::SourceFile;
use std::collections::HashSet;
use std::ops::Range;
use tree_sitter::Node;

/// Drop the named keyword arguments from `call`
///
/// Keywords the call does not carry are ignored. An empty `keywords` set
/// yields a file whose text equals the input.
///
/// # Errors
/// - `TransformError::StaleCallSite` if `call` was not produced from `source`
/// - `TransformError::Reparse` if the rewritten text fails to parse
pub fn remove_keywords<I, S>(
    source: &SourceFile,
    call: &CallSite<'_>,
    keywords: I,
) -> Result<SourceFile, TransformError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ensure_current(source, call.node())?;

    let keywords: HashSet<String> = keywords
        .into_iter()
        .map(|k| k.as_ref().to_string())
        .collect();

    let Some(arguments) = call.node().child_by_field_name("arguments") else {
        return SourceFile::parse(source.text()).map_err(TransformError::Reparse);
    };

    let children: Vec<Node<'_>> = {
        let mut cursor = arguments.walk();
        let children = arguments.children(&mut cursor).collect();
        children
    };

    let mut removals: Vec<Range<usize>> = children
        .iter()
        .enumerate()
        .filter(|(_, child)| child.kind() == "keyword_argument")
        .filter(|(_, child)| {
            child
                .child_by_field_name("name")
                .is_some_and(|name| keywords.contains(source.node_text(name)))
        })
        .map(|(position, _)| removal_range(source.text(), &children, position))
        .collect();

    if removals.is_empty() {
        return SourceFile::parse(source.text()).map_err(TransformError::Reparse);
    }

    tracing::debug!(removed = removals.len(), "removing keyword arguments");
    widen_removals(source.text(), &mut removals);
    let text = splice_out(source.text(), &mut removals);
    SourceFile::parse(text).map_err(TransformError::Reparse)
}

/// Verify `call` is a node of `source`'s own tree
fn ensure_current(source: &SourceFile, call: Node<'_>) -> Result<(), TransformError> {
    let range = call.byte_range();
    let stale = || TransformError::StaleCallSite {
        start: range.start,
        end: range.end,
    };

    if range.end > source.text().len() {
        return Err(stale());
    }
    let current = source
        .root()
        .descendant_for_byte_range(range.start, range.end)
        .ok_or_else(stale)?;

    let mut node = Some(current);
    while let Some(candidate) = node {
        if candidate.byte_range() != range {
            break;
        }
        if candidate.id() == call.id() {
            return Ok(());
        }
        node = candidate.parent();
    }
    Err(stale())
}

/// Byte range to delete for the argument at `position` among `children`
fn removal_range(text: &str, children: &[Node<'_>], position: usize) -> Range<usize> {
    let item = children[position];
    let bytes = text.as_bytes();

    let next_comma = children[position + 1..]
        .iter()
        .find(|c| c.kind() != "comment")
        .filter(|c| c.kind() == ",");
    let previous_comma = children[..position]
        .iter()
        .rev()
        .find(|c| c.kind() != "comment")
        .filter(|c| c.kind() == ",");

    let line_start = text[..item.start_byte()]
        .rfind('\n')
        .map_or(0, |n| n + 1);
    let alone_before = text[line_start..item.start_byte()]
        .bytes()
        .all(|b| b == b' ' || b == b'\t');

    let tail = next_comma.map_or(item.end_byte(), Node::end_byte);
    let mut cursor = skip_blanks(bytes, tail);
    if bytes.get(cursor) == Some(&b'#') {
        while cursor < bytes.len() && bytes[cursor] != b'\n' && bytes[cursor] != b'\r' {
            cursor += 1;
        }
    }
    let line_end = match bytes.get(cursor) {
        None => Some(cursor),
        Some(b'\n') => Some(cursor + 1),
        Some(b'\r') if bytes.get(cursor + 1) == Some(&b'\n') => Some(cursor + 2),
        Some(_) => None,
    };

    if let (true, Some(end)) = (alone_before, line_end) {
        // argument owns its line(s)
        return line_start..end;
    }

    match (next_comma, previous_comma) {
        (Some(comma), _) => item.start_byte()..skip_blanks(bytes, comma.end_byte()),
        (None, Some(comma)) => comma.start_byte()..item.end_byte(),
        (None, None) => item.byte_range(),
    }
}

fn skip_blanks(bytes: &[u8], mut at: usize) -> usize {
    while matches!(bytes.get(at), Some(b' ' | b'\t')) {
        at += 1;
    }
    at
}

/// Merge the ranges and widen any that would leave a blank line or a
/// dangling separator behind
///
/// Both happen when several inline arguments sharing one line are removed.
fn widen_removals(text: &str, ranges: &mut Vec<Range<usize>>) {
    ranges.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges.drain(..) {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }

    let bytes = text.as_bytes();
    for range in &mut merged {
        if range.end > 0 && bytes.get(range.end - 1) == Some(&b'\n') {
            // already ends at a line boundary
            continue;
        }
        let line_start = text[..range.start].rfind('\n').map_or(0, |n| n + 1);
        let cursor = skip_blanks(bytes, range.end);
        let line_end = match bytes.get(cursor) {
            None => Some(cursor),
            Some(b'\n') => Some(cursor + 1),
            Some(b'\r') if bytes.get(cursor + 1) == Some(&b'\n') => Some(cursor + 2),
            Some(_) => None,
        };

        let blank_before = text[line_start..range.start]
            .bytes()
            .all(|b| b == b' ' || b == b'\t');
        if blank_before {
            if let Some(end) = line_end {
                *range = line_start..end;
            }
            continue;
        }

        let closes_call = bytes.get(cursor) == Some(&b')');
        if closes_call || line_end.is_some() {
            let mut start = range.start;
            while start > line_start && matches!(bytes[start - 1], b' ' | b'\t') {
                start -= 1;
            }
            if closes_call && start > line_start && bytes[start - 1] == b',' {
                start -= 1;
            }
            range.start = start;
        }
    }
    *ranges = merged;
}

/// Remove the (possibly overlapping) ranges from `text`
fn splice_out(text: &str, ranges: &mut [Range<usize>]) -> String {
    ranges.sort_by_key(|r| r.start);

    let mut out = String::with_capacity(text.len());
    let mut kept_from = 0;
    for range in ranges.iter() {
        if range.start > kept_from {
            out.push_str(&text[kept_from..range.start]);
        }
        kept_from = kept_from.max(range.end);
    }
    out.push_str(&text[kept_from..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use pretty_assertions::assert_eq;

    fn drop_keywords(text: &str, keywords: &[&str]) -> String {
        let source = SourceFile::parse(text).unwrap();
        let analysis = analyze(&source, "setup").unwrap();
        let call = analysis.call_site().unwrap();
        remove_keywords(&source, call, keywords).unwrap().into_text()
    }

    #[test]
    fn empty_set_is_identity() {
        let text = "setup(\n    name='demo',  # the name\n    url=get_url(),\n)\n";
        assert_eq!(drop_keywords(text, &[]), text);
    }

    #[test]
    fn removes_whole_lines() {
        let text = "setup(\n    name=\"demo\",\n    version=\"1.0\",\n    url=get_url(),\n)\n";
        assert_eq!(
            drop_keywords(text, &["name", "version"]),
            "setup(\n    url=get_url(),\n)\n"
        );
    }

    #[test]
    fn removes_trailing_comment_with_its_line() {
        let text = "setup(\n    # keep me\n    name=\"demo\",  # project name\n    url=u,\n)\n";
        assert_eq!(
            drop_keywords(text, &["name"]),
            "setup(\n    # keep me\n    url=u,\n)\n"
        );
    }

    #[test]
    fn removes_multiline_value() {
        let text = "setup(\n    long_description=\"\"\"\nline one\nline two\n\"\"\",\n    url=u,\n)\n";
        assert_eq!(drop_keywords(text, &["long_description"]), "setup(\n    url=u,\n)\n");
    }

    #[test]
    fn removes_inline_arguments() {
        assert_eq!(
            drop_keywords("setup(name='a', url=u)\n", &["name"]),
            "setup(url=u)\n"
        );
        assert_eq!(
            drop_keywords("setup(url=u, name='a')\n", &["name"]),
            "setup(url=u)\n"
        );
        assert_eq!(
            drop_keywords("setup(a=1, name='a', url=u)\n", &["name"]),
            "setup(a=1, url=u)\n"
        );
        assert_eq!(
            drop_keywords("setup(packages=p, name='a', version='1')\n", &["name", "version"]),
            "setup(packages=p)\n"
        );
        assert_eq!(
            drop_keywords("setup(packages=p, name='a', version='1',)\n", &["name", "version"]),
            "setup(packages=p)\n"
        );
        assert_eq!(
            drop_keywords("setup(\n    packages=p, name='a', version='1',\n)\n", &["name", "version"]),
            "setup(\n    packages=p,\n)\n"
        );
    }

    #[test]
    fn removes_every_argument() {
        assert_eq!(
            drop_keywords("setup(name='a', version='1')\n", &["name", "version"]),
            "setup()\n"
        );
        assert_eq!(
            drop_keywords("setup(\n    name='a',\n    version='1',\n)\n", &["name", "version"]),
            "setup(\n)\n"
        );
    }

    #[test]
    fn removes_line_emptied_by_inline_arguments() {
        let text = "setup(\n    author='a', author_email='e',\n    url=u,\n)\n";
        assert_eq!(
            drop_keywords(text, &["author", "author_email"]),
            "setup(\n    url=u,\n)\n"
        );
        let text = "setup(\n    url=u,\n    author='a', author_email='e'\n)\n";
        assert_eq!(
            drop_keywords(text, &["author", "author_email"]),
            "setup(\n    url=u,\n)\n"
        );
    }

    #[test]
    fn last_argument_without_trailing_comma() {
        let text = "setup(\n    url=u,\n    name='a'\n)\n";
        assert_eq!(drop_keywords(text, &["name"]), "setup(\n    url=u,\n)\n");

        let text = "setup(\n    url=u,\n    name='a')\n";
        assert_eq!(drop_keywords(text, &["name"]), "setup(\n    url=u)\n");
    }

    #[test]
    fn unknown_keywords_are_ignored() {
        let text = "setup(name='a')\n";
        assert_eq!(drop_keywords(text, &["version"]), text);
    }

    #[test]
    fn rest_of_file_untouched() {
        let text = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nimport os\n\n\nsetup(\n    name='a',\n    packages=find_packages(),\n)\n\nprint('done')   # tail\n";
        assert_eq!(
            drop_keywords(text, &["name"]),
            "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nimport os\n\n\nsetup(\n    packages=find_packages(),\n)\n\nprint('done')   # tail\n"
        );
    }

    #[test]
    fn crlf_lines() {
        let text = "setup(\r\n    name='a',\r\n    url=u,\r\n)\r\n";
        assert_eq!(drop_keywords(text, &["name"]), "setup(\r\n    url=u,\r\n)\r\n");
    }

    #[test]
    fn stale_call_site_is_rejected() {
        let original = SourceFile::parse("setup(name='a')\n").unwrap();
        let analysis = analyze(&original, "setup").unwrap();
        let call = analysis.call_site().unwrap();

        let other = SourceFile::parse("setup(name='a')\n").unwrap();
        let err = remove_keywords(&other, call, ["name"]).unwrap_err();
        assert!(matches!(err, TransformError::StaleCallSite { .. }));
    }

    #[test]
    fn widen_merges_and_takes_whole_lines() {
        let text = "f(\n  a, b,\n  c)\n";
        let mut ranges = vec![8..10, 5..8];
        widen_removals(text, &mut ranges);
        assert_eq!(ranges, vec![3..11]);

        let mut ranges = vec![13..14];
        widen_removals(text, &mut ranges);
        assert_eq!(ranges, vec![13..14]);
    }

    #[test]
    fn widen_takes_separator_before_closing_paren() {
        let text = "f(a, b, c)\n";
        let mut ranges = vec![5..8, 6..9];
        widen_removals(text, &mut ranges);
        assert_eq!(ranges, vec![3..9]);
    }

    #[test]
    fn splice_merges_overlaps() {
        let mut ranges = vec![4..8, 0..2, 6..10];
        assert_eq!(splice_out("0123456789ab", &mut ranges), "23ab");
    }
}
