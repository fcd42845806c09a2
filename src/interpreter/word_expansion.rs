//! Word Expansion
//!
//! Turns a value node into its runtime string. Expansion never fails: unknown
//! or absent nodes and unset variables all become the empty string.
//!
//! Handles:
//! - Literal words and numbers (verbatim)
//! - Double-quoted strings (one pair of quotes stripped, no interpolation)
//! - Single-quoted strings (one pair of quotes stripped)
//! - Variable references ($VAR, ${VAR})
//! - Concatenations (foo$VAR)

use crate::ast::{Node, NodeKind};
use crate::interpreter::context::Context;

/// Expand an optional value node against the current context.
pub fn expand(node: Option<&Node>, ctx: &Context) -> String {
    match node {
        Some(node) => expand_node(node, ctx),
        None => String::new(),
    }
}

/// Expand a value node against the current context.
pub fn expand_node(node: &Node, ctx: &Context) -> String {
    match &node.kind {
        NodeKind::Word
        | NodeKind::Number
        | NodeKind::StringContent
        | NodeKind::CommandName
        | NodeKind::VariableName => node.text.clone(),

        NodeKind::String { .. } => strip_quotes(&node.text, '"').to_string(),
        NodeKind::RawString => strip_quotes(&node.text, '\'').to_string(),

        NodeKind::SimpleExpansion { children } => match children.first() {
            Some(name) => ctx.get_variable(&name.text, ""),
            None => String::new(),
        },

        // Only the plain ${NAME} form; operator forms are not modelled
        NodeKind::Expansion { children } => match children.as_slice() {
            [name] if matches!(name.kind, NodeKind::VariableName) => ctx.get_variable(&name.text, ""),
            _ => String::new(),
        },

        NodeKind::Concatenation { children } => {
            children.iter().map(|child| expand_node(child, ctx)).collect()
        }

        _ => String::new(),
    }
}

/// Expand every node of a list, in order.
pub fn expand_all(nodes: &[Node], ctx: &Context) -> Vec<String> {
    nodes.iter().map(|node| expand_node(node, ctx)).collect()
}

/// Strip one surrounding pair of `quote`, if present.
fn strip_quotes(text: &str, quote: char) -> &str {
    text.strip_prefix(quote)
        .and_then(|inner| inner.strip_suffix(quote))
        .unwrap_or(text)
}
