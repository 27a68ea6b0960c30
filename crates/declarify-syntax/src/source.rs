//! Lossless Python source model
//!
//! A [`SourceFile`] owns the exact input text together with its tree-sitter
//! tree. Every node carries a byte span into that text, so printing the file
//! is just returning the text: `SourceFile::parse(t)?.text() == t`.

use crate::error::SyntaxError;
use tree_sitter::{Node, Tree};

/// Parsed Python source with its concrete syntax tree
pub struct SourceFile {
    text: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse Python source text
    ///
    /// # Errors
    /// - `SyntaxError::ParserInit` if the Python grammar cannot be loaded
    /// - `SyntaxError::ParseFailed` if the tree contains error or missing nodes
    pub fn parse(text: impl Into<String>) -> Result<Self, SyntaxError> {
        let text = text.into();

        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| SyntaxError::ParserInit(e.to_string()))?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| SyntaxError::ParserInit("parser returned no tree".to_string()))?;

        if let Some(bad) = first_error(tree.root_node()) {
            let message = if bad.is_missing() {
                format!("missing `{}`", bad.kind())
            } else {
                let snippet = text.get(bad.byte_range()).unwrap_or("");
                let snippet = snippet.lines().next().unwrap_or("");
                format!("unexpected `{}`", snippet.trim())
            };
            return Err(SyntaxError::parse_failed(bad.start_position(), message));
        }

        tracing::trace!(bytes = text.len(), "parsed python source");
        Ok(Self { text, tree })
    }

    /// Exact source text (the printed form of the tree)
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the file, returning its text
    #[inline]
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Root `module` node
    #[inline]
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by a node
    ///
    /// Nodes from another tree may point outside this text; those yield `""`.
    #[inline]
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text.get(node.byte_range()).unwrap_or("")
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("bytes", &self.text.len())
            .field("root", &self.tree.root_node().kind())
            .finish()
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Depth-first search for the first `ERROR` or `MISSING` node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error)
        .or(Some(node))
}

/// Collect every node of `kind` below `node`, in source order
pub(crate) fn descendants_of_kind<'t>(node: Node<'t>, kind: &str, out: &mut Vec<Node<'t>>) {
    if node.kind() == kind {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        descendants_of_kind(child, kind, out);
    }
}
