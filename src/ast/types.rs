//! Syntax Tree Types for Shell Scripts
//!
//! Typed node taxonomy consumed by the interpreter. Trees are produced by an
//! external grammar-driven parser and are never mutated after construction.

use serde::Serialize;
use std::fmt;

// =============================================================================
// BASE TYPES
// =============================================================================

/// Position in the source text (0-based, as reported by the parser)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Span in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start: Position { line: start_line, column: start_column },
            end: Position { line: end_line, column: end_column },
        }
    }
}

// =============================================================================
// NODES
// =============================================================================

/// A syntax tree node: its variant, where it came from, and its source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub span: Span,
    pub text: String,
}

/// Union of all node variants.
///
/// Child slots mirror the grammar's named fields; statements that the grammar
/// does not name land in `children`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Root node: a complete script
    Program { children: Vec<Node> },

    /// NAME=value
    VariableAssignment {
        name: Option<Box<Node>>,
        value: Option<Box<Node>>,
    },

    /// Simple command: [NAME=value...] name args...
    Command {
        name: Option<Box<Node>>,
        arguments: Vec<Node>,
        /// Assignments before the command name
        prefix: Vec<Node>,
    },

    /// if COND; then ...; [elif ...;] [else ...;] fi
    ///
    /// `children` holds the then-body followed by elif/else clauses.
    IfStatement {
        condition: Vec<Node>,
        children: Vec<Node>,
    },
    ElifClause {
        condition: Vec<Node>,
        children: Vec<Node>,
    },
    ElseClause { children: Vec<Node> },

    /// while COND; do ...; done (or until)
    WhileStatement {
        condition: Vec<Node>,
        body: Option<Box<Node>>,
        until: bool,
    },

    /// for VAR [in WORDS]; do ...; done
    ForStatement {
        variable: Option<Box<Node>>,
        /// Empty when the `in` list is absent
        values: Vec<Node>,
        body: Option<Box<Node>>,
    },

    /// case WORD in ... esac
    CaseStatement {
        value: Option<Box<Node>>,
        items: Vec<Node>,
    },
    CaseItem {
        patterns: Vec<Node>,
        children: Vec<Node>,
    },

    /// name() { ... }
    FunctionDefinition {
        name: Option<Box<Node>>,
        body: Option<Box<Node>>,
    },

    /// { ...; }
    CompoundStatement { children: Vec<Node> },
    /// do ...; done
    DoGroup { children: Vec<Node> },
    /// ( ... )
    Subshell { children: Vec<Node> },
    /// cmd1 | cmd2
    Pipeline { children: Vec<Node> },
    /// cmd1 && cmd2, cmd1 || cmd2
    List { children: Vec<Node> },

    /// body > target
    RedirectedStatement {
        body: Option<Box<Node>>,
        redirects: Vec<Node>,
    },

    Comment,

    // -------------------------------------------------------------------------
    // Value leaves
    // -------------------------------------------------------------------------
    Word,
    Number,
    /// '...'
    RawString,
    /// "..."
    String { children: Vec<Node> },
    StringContent,
    CommandName,
    VariableName,
    /// $NAME
    SimpleExpansion { children: Vec<Node> },
    /// ${NAME...}
    Expansion { children: Vec<Node> },
    /// Adjacent words without separator: foo$X
    Concatenation { children: Vec<Node> },

    /// Any grammar kind the interpreter does not model
    Other { kind: String, children: Vec<Node> },
}

impl Node {
    pub fn new(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        Self { kind, span, text: text.into() }
    }

    /// The grammar name of this node's variant.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            NodeKind::Program { .. } => "program",
            NodeKind::VariableAssignment { .. } => "variable_assignment",
            NodeKind::Command { .. } => "command",
            NodeKind::IfStatement { .. } => "if_statement",
            NodeKind::ElifClause { .. } => "elif_clause",
            NodeKind::ElseClause { .. } => "else_clause",
            NodeKind::WhileStatement { .. } => "while_statement",
            NodeKind::ForStatement { .. } => "for_statement",
            NodeKind::CaseStatement { .. } => "case_statement",
            NodeKind::CaseItem { .. } => "case_item",
            NodeKind::FunctionDefinition { .. } => "function_definition",
            NodeKind::CompoundStatement { .. } => "compound_statement",
            NodeKind::DoGroup { .. } => "do_group",
            NodeKind::Subshell { .. } => "subshell",
            NodeKind::Pipeline { .. } => "pipeline",
            NodeKind::List { .. } => "list",
            NodeKind::RedirectedStatement { .. } => "redirected_statement",
            NodeKind::Comment => "comment",
            NodeKind::Word => "word",
            NodeKind::Number => "number",
            NodeKind::RawString => "raw_string",
            NodeKind::String { .. } => "string",
            NodeKind::StringContent => "string_content",
            NodeKind::CommandName => "command_name",
            NodeKind::VariableName => "variable_name",
            NodeKind::SimpleExpansion { .. } => "simple_expansion",
            NodeKind::Expansion { .. } => "expansion",
            NodeKind::Concatenation { .. } => "concatenation",
            NodeKind::Other { kind, .. } => kind,
        }
    }

    /// Ordered unnamed children, for variants that have them.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Program { children }
            | NodeKind::IfStatement { children, .. }
            | NodeKind::ElifClause { children, .. }
            | NodeKind::ElseClause { children }
            | NodeKind::CaseItem { children, .. }
            | NodeKind::CompoundStatement { children }
            | NodeKind::DoGroup { children }
            | NodeKind::Subshell { children }
            | NodeKind::Pipeline { children }
            | NodeKind::List { children }
            | NodeKind::String { children }
            | NodeKind::SimpleExpansion { children }
            | NodeKind::Expansion { children }
            | NodeKind::Concatenation { children }
            | NodeKind::Other { children, .. } => children,
            NodeKind::CaseStatement { items, .. } => items,
            _ => &[],
        }
    }

    /// True for elif/else clauses of an if statement.
    pub fn is_alternative_clause(&self) -> bool {
        matches!(self.kind, NodeKind::ElifClause { .. } | NodeKind::ElseClause { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.kind_name(),
            self.span.start.line + 1,
            self.span.start.column + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: NodeKind, text: &str) -> Node {
        Node::new(kind, Span::default(), text)
    }

    #[test]
    fn test_kind_name_of_other_uses_grammar_kind() {
        let node = leaf(
            NodeKind::Other { kind: "c_style_for_statement".to_string(), children: vec![] },
            "for ((;;)); do :; done",
        );
        assert_eq!(node.kind_name(), "c_style_for_statement");
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        assert!(leaf(NodeKind::Word, "echo").children().is_empty());
    }

    #[test]
    fn test_alternative_clause() {
        let else_clause = leaf(NodeKind::ElseClause { children: vec![] }, "else :");
        let word = leaf(NodeKind::Word, "x");
        assert!(else_clause.is_alternative_clause());
        assert!(!word.is_alternative_clause());
    }

    #[test]
    fn test_display_is_one_based() {
        let node = Node::new(NodeKind::Word, Span::new(2, 4, 2, 7), "foo");
        assert_eq!(node.to_string(), "word at 3:5");
    }
}
