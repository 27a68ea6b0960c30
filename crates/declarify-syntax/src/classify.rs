//! Value classifier
//!
//! Whitelist-only: string, number and boolean literals, flat lists/tuples of
//! them, dicts of them keyed by strings, and `None`. Everything else is
//! opaque. There is no evaluation and no constant folding.

use crate::literal::{ClassifiedValue, Literal, Opaque, Scalar};
use crate::source::SourceFile;
use crate::strings::decode_string_literal;
use tree_sitter::Node;

/// Classify an argument value expression
///
/// # Arguments
/// * `source` - File the node belongs to
/// * `value` - The value expression of a keyword argument
#[must_use]
pub fn classify(source: &SourceFile, value: Node<'_>) -> ClassifiedValue {
    match literal(source, value) {
        Ok(lit) => ClassifiedValue::Literal(lit),
        Err(opaque) => ClassifiedValue::Opaque(opaque),
    }
}

fn literal(source: &SourceFile, node: Node<'_>) -> Result<Literal, Opaque> {
    match node.kind() {
        "parenthesized_expression" => {
            let inner = significant_children(node);
            match inner.as_slice() {
                [only] => literal(source, *only),
                _ => Err(opaque(node)),
            }
        }
        "list" | "tuple" => significant_children(node)
            .into_iter()
            .map(|element| scalar(source, element))
            .collect::<Result<Vec<_>, _>>()
            .map(Literal::Sequence),
        "dictionary" => significant_children(node)
            .into_iter()
            .map(|pair| entry(source, pair))
            .collect::<Result<Vec<_>, _>>()
            .map(Literal::Mapping),
        "none" => Ok(Literal::Absent),
        _ => scalar(source, node).map(Literal::Scalar),
    }
}

fn entry(source: &SourceFile, pair: Node<'_>) -> Result<(String, Scalar), Opaque> {
    if pair.kind() != "pair" {
        return Err(opaque(pair));
    }
    let key = pair.child_by_field_name("key").ok_or_else(|| opaque(pair))?;
    let value = pair.child_by_field_name("value").ok_or_else(|| opaque(pair))?;

    match scalar(source, key)? {
        Scalar::Str(key) => Ok((key, scalar(source, value)?)),
        _ => Err(opaque(key)),
    }
}

fn scalar(source: &SourceFile, node: Node<'_>) -> Result<Scalar, Opaque> {
    let text = source.node_text(node);
    match node.kind() {
        "string" => decode_string_literal(text)
            .map(Scalar::Str)
            .ok_or_else(|| opaque(node)),
        "integer" => parse_integer(text).map(Scalar::Int).ok_or_else(|| opaque(node)),
        "float" => {
            // complex literals (`1.5j`) are not plain numbers
            if text.ends_with(['j', 'J']) {
                return Err(opaque(node));
            }
            text.replace('_', "")
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Scalar::Float)
                .ok_or_else(|| opaque(node))
        }
        "true" => Ok(Scalar::Bool(true)),
        "false" => Ok(Scalar::Bool(false)),
        "parenthesized_expression" => match significant_children(node).as_slice() {
            [only] => scalar(source, *only),
            _ => Err(opaque(node)),
        },
        _ => Err(opaque(node)),
    }
}

fn parse_integer(text: &str) -> Option<i128> {
    let digits = text.replace('_', "").to_ascii_lowercase();
    if digits.ends_with('j') {
        return None;
    }
    // Python 2 long suffix
    let digits = digits.trim_end_matches('l');

    let (radix, body) = match digits.get(..2) {
        Some("0x") => (16, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        Some("0b") => (2, &digits[2..]),
        _ => (10, digits),
    };
    i128::from_str_radix(body, radix).ok()
}

/// Named children that carry meaning (comments are extras and skipped)
fn significant_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

#[inline]
fn opaque(node: Node<'_>) -> Opaque {
    Opaque { kind: node.kind() }
}
