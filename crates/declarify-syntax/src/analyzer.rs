//! Call-site analyzer
//!
//! Finds the single call to the target function by simple name match (no
//! symbol resolution: `setup(...)` and `setuptools.setup(...)` both match
//! `"setup"`) and lists its keyword arguments in source order.

use crate::classify::classify;
use crate::error::AnalyzeError;
use crate::literal::ClassifiedValue;
use crate::source::{descendants_of_kind, SourceFile};
use tree_sitter::Node;

/// One keyword argument of the target call
#[derive(Debug, Clone, Copy)]
pub struct Argument<'t> {
    name: &'t str,
    value: Node<'t>,
    node: Node<'t>,
    index: usize,
}

impl<'t> Argument<'t> {
    /// Keyword name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'t str {
        self.name
    }

    /// Value expression node
    #[inline]
    #[must_use]
    pub fn value(&self) -> Node<'t> {
        self.value
    }

    /// Whole `keyword_argument` node
    #[inline]
    #[must_use]
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Position among the call's keyword arguments
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Classify this argument's value
    #[inline]
    #[must_use]
    pub fn classify(&self, source: &SourceFile) -> ClassifiedValue {
        classify(source, self.value)
    }
}

/// The located target call
#[derive(Debug, Clone)]
pub struct CallSite<'t> {
    node: Node<'t>,
    arguments: Vec<Argument<'t>>,
}

impl<'t> CallSite<'t> {
    /// The `call` node
    #[inline]
    #[must_use]
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// Keyword arguments in source order
    #[inline]
    #[must_use]
    pub fn arguments(&self) -> &[Argument<'t>] {
        &self.arguments
    }

    /// Keyword names in source order
    pub fn keyword_names(&self) -> impl Iterator<Item = &'t str> + '_ {
        self.arguments.iter().map(Argument::name)
    }

    /// Find an argument by keyword
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Argument<'t>> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Outcome of looking for the target call
#[derive(Debug, Clone)]
pub enum Analysis<'t> {
    /// Exactly one matching call
    Found(CallSite<'t>),
    /// No matching call
    NotFound,
    /// Several matching calls; none is picked
    Ambiguous {
        /// Number of matching calls
        count: usize,
    },
}

impl<'t> Analysis<'t> {
    /// Check if a single call was found
    #[inline]
    #[must_use]
    pub fn found(&self) -> bool {
        matches!(self, Analysis::Found(_))
    }

    /// The call site, when exactly one was found
    #[inline]
    #[must_use]
    pub fn call_site(&self) -> Option<&CallSite<'t>> {
        match self {
            Analysis::Found(call) => Some(call),
            _ => None,
        }
    }
}

/// Locate the call to `target` and collect its keyword arguments
///
/// # Errors
/// `AnalyzeError::DuplicateKeyword` if the single matching call repeats a keyword.
pub fn analyze<'t>(source: &'t SourceFile, target: &str) -> Result<Analysis<'t>, AnalyzeError> {
    let mut calls = Vec::new();
    descendants_of_kind(source.root(), "call", &mut calls);
    calls.retain(|call| callee_matches(source, *call, target));

    let call = match calls.as_slice() {
        [] => {
            tracing::debug!(target_function = target, "no matching call");
            return Ok(Analysis::NotFound);
        }
        [call] => *call,
        many => {
            tracing::debug!(target_function = target, count = many.len(), "ambiguous call");
            return Ok(Analysis::Ambiguous { count: many.len() });
        }
    };

    let Some(arguments_node) = call.child_by_field_name("arguments") else {
        return Ok(Analysis::Found(CallSite {
            node: call,
            arguments: Vec::new(),
        }));
    };

    let mut arguments: Vec<Argument<'t>> = Vec::new();
    let mut cursor = arguments_node.walk();
    for child in arguments_node.named_children(&mut cursor) {
        if child.kind() != "keyword_argument" {
            continue;
        }
        let (Some(name_node), Some(value)) = (
            child.child_by_field_name("name"),
            child.child_by_field_name("value"),
        ) else {
            continue;
        };
        let name = source.node_text(name_node);

        if let Some(first) = arguments.iter().find(|a| a.name == name) {
            return Err(AnalyzeError::DuplicateKeyword {
                keyword: name.to_string(),
                first_line: first.node.start_position().row + 1,
                second_line: child.start_position().row + 1,
            });
        }

        arguments.push(Argument {
            name,
            value,
            node: child,
            index: arguments.len(),
        });
    }

    tracing::debug!(
        target_function = target,
        line = call.start_position().row + 1,
        keywords = arguments.len(),
        "found call"
    );
    Ok(Analysis::Found(CallSite {
        node: call,
        arguments,
    }))
}

fn callee_matches(source: &SourceFile, call: Node<'_>, target: &str) -> bool {
    let Some(function) = call.child_by_field_name("function") else {
        return false;
    };
    match function.kind() {
        "identifier" => source.node_text(function) == target,
        "attribute" => function
            .child_by_field_name("attribute")
            .is_some_and(|attr| source.node_text(attr) == target),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::{Literal, Scalar};

    #[test]
    fn finds_keywords_in_source_order() {
        let source = SourceFile::parse(
            "from setuptools import setup\n\nsetup(\n    name=\"demo\",\n    version=\"1.0\",\n    install_requires=[\"a\", \"b\"],\n)\n",
        )
        .unwrap();
        let analysis = analyze(&source, "setup").unwrap();
        let call = analysis.call_site().unwrap();

        let names: Vec<&str> = call.keyword_names().collect();
        assert_eq!(names, vec!["name", "version", "install_requires"]);
        assert_eq!(call.arguments()[2].index(), 2);
    }

    #[test]
    fn attribute_callee_matches() {
        let source = SourceFile::parse("import setuptools\nsetuptools.setup(name='x')\n").unwrap();
        assert!(analyze(&source, "setup").unwrap().found());
    }

    #[test]
    fn positional_and_splat_arguments_ignored() {
        let source = SourceFile::parse("setup('pos', *extra, name='x', **kwargs)\n").unwrap();
        let analysis = analyze(&source, "setup").unwrap();
        let names: Vec<&str> = analysis.call_site().unwrap().keyword_names().collect();
        assert_eq!(names, vec!["name"]);
    }

    #[test]
    fn missing_call() {
        let source = SourceFile::parse("print('hello')\n").unwrap();
        assert!(matches!(analyze(&source, "setup").unwrap(), Analysis::NotFound));
    }

    #[test]
    fn multiple_calls_are_ambiguous() {
        let source =
            SourceFile::parse("if x:\n    setup(name='a')\nelse:\n    setup(name='b')\n").unwrap();
        match analyze(&source, "setup").unwrap() {
            Analysis::Ambiguous { count } => assert_eq!(count, 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn other_functions_named_like_target_suffix_do_not_match() {
        let source = SourceFile::parse("my_setup(name='a')\nsetup_helper()\n").unwrap();
        assert!(!analyze(&source, "setup").unwrap().found());
    }

    #[test]
    fn duplicate_keyword_is_an_error() {
        let source = SourceFile::parse("setup(\n    name='a',\n    name='b',\n)\n").unwrap();
        match analyze(&source, "setup") {
            Err(AnalyzeError::DuplicateKeyword {
                keyword,
                first_line,
                second_line,
            }) => {
                assert_eq!(keyword, "name");
                assert_eq!(first_line, 2);
                assert_eq!(second_line, 3);
            }
            other => panic!("expected duplicate keyword, got {other:?}"),
        }
    }

    #[test]
    fn argument_classification() {
        let source = SourceFile::parse("setup(name='demo', url=get_url())\n").unwrap();
        let analysis = analyze(&source, "setup").unwrap();
        let call = analysis.call_site().unwrap();

        assert_eq!(
            call.argument("name").unwrap().classify(&source),
            ClassifiedValue::Literal(Literal::Scalar(Scalar::Str("demo".into())))
        );
        assert!(!call.argument("url").unwrap().classify(&source).is_literal());
    }
}
