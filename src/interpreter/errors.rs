//! Interpreter Errors
//!
//! Only structural faults travel as `Err`. Command failures, loop caps and
//! recursion limits are recorded in the `Context` and never abort a walk.

use thiserror::Error;

/// A fault in the shape of the tree, found while walking it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("malformed {kind} node at {line}:{column}: {reason}")]
    MalformedNode {
        kind: String,
        line: usize,
        column: usize,
        reason: String,
    },
}

impl NodeError {
    pub fn malformed(node: &crate::ast::Node, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            kind: node.kind_name().to_string(),
            line: node.span.start.line + 1,
            column: node.span.start.column + 1,
            reason: reason.into(),
        }
    }
}

/// The single failure a caller of `execute` can observe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("execution error: {0}")]
    Node(#[from] NodeError),

    #[error("execution error: builtin panicked: {0}")]
    Panicked(String),
}

/// Errors loading interpreter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown execution mode '{0}' (expected simulate, capture or real)")]
    UnknownMode(String),

    #[error("invalid interpreter configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, NodeKind, Span};

    #[test]
    fn test_malformed_message() {
        let node = Node::new(
            NodeKind::Command { name: None, arguments: vec![], prefix: vec![] },
            Span::new(3, 2, 3, 9),
            "",
        );
        let err = ExecutionError::from(NodeError::malformed(&node, "missing command name"));
        assert_eq!(
            err.to_string(),
            "execution error: malformed command node at 4:3: missing command name"
        );
    }

    #[test]
    fn test_unknown_mode_message() {
        assert_eq!(
            ConfigError::UnknownMode("dry".into()).to_string(),
            "unknown execution mode 'dry' (expected simulate, capture or real)"
        );
    }
}
