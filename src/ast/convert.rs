//! Tree Ingestion
//!
//! Converts the map-shaped trees emitted by the grammar-driven parser into
//! the typed node taxonomy. Every parser node arrives as:
//!
//! ```json
//! { "type": "command", "start_row": 0, "start_col": 0, "end_row": 0, "end_col": 8,
//!   "text": "echo hi", "is_error": false,
//!   "name": { "type": "command_name", ... },
//!   "argument": { "type": "word", ... },
//!   "children": [ ... ] }
//! ```
//!
//! Named grammar fields hold either one node map or a list of them; unnamed
//! children are listed under `children`. Conversion is lenient: unknown kinds
//! become `NodeKind::Other` and missing fields become empty slots.

use std::collections::HashMap;

use serde::Deserialize;

use crate::ast::types::{Node, NodeKind, Span};

/// A node exactly as the parser emits it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub start_row: usize,
    #[serde(default)]
    pub start_col: usize,
    #[serde(default)]
    pub end_row: usize,
    #[serde(default)]
    pub end_col: usize,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<RawNode>,
    /// Named fields plus parser metadata (error flags, change ranges)
    #[serde(flatten)]
    pub fields: HashMap<String, RawField>,
}

/// Value of a named field: one node, several nodes, or parser metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    One(Box<RawNode>),
    Many(Vec<RawNode>),
    Other(serde_json::Value),
}

impl RawNode {
    /// Remove a named field, normalizing it to a list of nodes.
    fn take_field(&mut self, name: &str) -> Vec<RawNode> {
        match self.fields.remove(name) {
            Some(RawField::One(node)) => vec![*node],
            Some(RawField::Many(nodes)) => nodes,
            Some(RawField::Other(_)) | None => Vec::new(),
        }
    }

    fn take_one(&mut self, name: &str) -> Option<Box<Node>> {
        self.take_field(name).into_iter().next().map(|raw| Box::new(Node::from(raw)))
    }

    fn take_many(&mut self, name: &str) -> Vec<Node> {
        convert_all(self.take_field(name))
    }

    fn take_children(&mut self) -> Vec<Node> {
        convert_all(std::mem::take(&mut self.children))
    }

    /// True when the parser flagged this node as an error or missing token.
    pub fn is_error(&self) -> bool {
        ["is_error", "is_missing"].iter().any(|flag| {
            matches!(self.fields.get(*flag), Some(RawField::Other(serde_json::Value::Bool(true))))
        })
    }
}

fn convert_all(raw: Vec<RawNode>) -> Vec<Node> {
    raw.into_iter().map(Node::from).collect()
}

impl From<RawNode> for Node {
    fn from(mut raw: RawNode) -> Self {
        let span = Span::new(raw.start_row, raw.start_col, raw.end_row, raw.end_col);

        let kind = match raw.kind.as_str() {
            "program" => NodeKind::Program { children: raw.take_children() },
            "variable_assignment" => NodeKind::VariableAssignment {
                name: raw.take_one("name"),
                value: raw.take_one("value"),
            },
            "command" => {
                let name = raw.take_one("name");
                let arguments = raw.take_many("argument");
                // Leading NAME=value words arrive unnamed; redirects are dropped
                let prefix = raw
                    .take_children()
                    .into_iter()
                    .filter(|child| matches!(child.kind, NodeKind::VariableAssignment { .. }))
                    .collect();
                NodeKind::Command { name, arguments, prefix }
            }
            "if_statement" => NodeKind::IfStatement {
                condition: raw.take_many("condition"),
                children: raw.take_children(),
            },
            "elif_clause" => NodeKind::ElifClause {
                condition: raw.take_many("condition"),
                children: raw.take_children(),
            },
            "else_clause" => NodeKind::ElseClause { children: raw.take_children() },
            "while_statement" => NodeKind::WhileStatement {
                condition: raw.take_many("condition"),
                body: raw.take_one("body"),
                until: starts_with_keyword(&raw.text, "until"),
            },
            "for_statement" => NodeKind::ForStatement {
                variable: raw.take_one("variable"),
                values: raw.take_many("value"),
                body: raw.take_one("body"),
            },
            "case_statement" => NodeKind::CaseStatement {
                value: raw.take_one("value"),
                items: raw.take_children(),
            },
            "case_item" => NodeKind::CaseItem {
                patterns: raw.take_many("value"),
                children: raw.take_children(),
            },
            "function_definition" => NodeKind::FunctionDefinition {
                name: raw.take_one("name"),
                body: raw.take_one("body"),
            },
            "compound_statement" => NodeKind::CompoundStatement { children: raw.take_children() },
            "do_group" => NodeKind::DoGroup { children: raw.take_children() },
            "subshell" => NodeKind::Subshell { children: raw.take_children() },
            "pipeline" => NodeKind::Pipeline { children: raw.take_children() },
            "list" => NodeKind::List { children: raw.take_children() },
            "redirected_statement" => NodeKind::RedirectedStatement {
                body: raw.take_one("body"),
                redirects: raw.take_many("redirect"),
            },
            "comment" => NodeKind::Comment,
            "word" => NodeKind::Word,
            "number" => NodeKind::Number,
            "raw_string" => NodeKind::RawString,
            "string" => NodeKind::String { children: raw.take_children() },
            "string_content" => NodeKind::StringContent,
            "command_name" => NodeKind::CommandName,
            "variable_name" | "special_variable_name" => NodeKind::VariableName,
            "simple_expansion" => NodeKind::SimpleExpansion { children: raw.take_children() },
            "expansion" => NodeKind::Expansion { children: raw.take_children() },
            "concatenation" => NodeKind::Concatenation { children: raw.take_children() },
            _ => NodeKind::Other {
                kind: std::mem::take(&mut raw.kind),
                children: raw.take_children(),
            },
        };

        Node { kind, span, text: raw.text }
    }
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.trim_start()
        .strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace()))
}

impl Node {
    /// Parse a parser-emitted tree from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawNode = serde_json::from_str(json)?;
        Ok(Node::from(raw))
    }

    /// Convert an already-decoded parser tree.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let raw: RawNode = serde_json::from_value(value)?;
        Ok(Node::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_with_single_argument_field() {
        let node = Node::from_value(json!({
            "type": "command",
            "text": "echo hi",
            "start_row": 0, "start_col": 0, "end_row": 0, "end_col": 7,
            "is_error": false,
            "name": { "type": "command_name", "text": "echo" },
            "argument": { "type": "word", "text": "hi" }
        }))
        .unwrap();

        match &node.kind {
            NodeKind::Command { name, arguments, prefix } => {
                assert_eq!(name.as_ref().unwrap().text, "echo");
                assert_eq!(arguments.len(), 1);
                assert_eq!(arguments[0].text, "hi");
                assert!(prefix.is_empty());
            }
            other => panic!("expected command, got {:?}", other),
        }
        assert_eq!(node.span, Span::new(0, 0, 0, 7));
    }

    #[test]
    fn test_command_with_argument_list_and_prefix() {
        let node = Node::from_value(json!({
            "type": "command",
            "text": "A=1 ls -l /",
            "name": { "type": "command_name", "text": "ls" },
            "argument": [
                { "type": "word", "text": "-l" },
                { "type": "word", "text": "/" }
            ],
            "children": [
                { "type": "variable_assignment", "text": "A=1",
                  "name": { "type": "variable_name", "text": "A" },
                  "value": { "type": "number", "text": "1" } },
                { "type": "file_redirect", "text": "> out" }
            ]
        }))
        .unwrap();

        match &node.kind {
            NodeKind::Command { arguments, prefix, .. } => {
                let args: Vec<&str> = arguments.iter().map(|a| a.text.as_str()).collect();
                assert_eq!(args, vec!["-l", "/"]);
                assert_eq!(prefix.len(), 1);
                assert_eq!(prefix[0].text, "A=1");
            }
            other => panic!("expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_until_is_detected_from_text() {
        let until = Node::from_value(json!({
            "type": "while_statement",
            "text": "until false; do :; done",
            "condition": { "type": "command", "text": "false",
                           "name": { "type": "command_name", "text": "false" } },
            "body": { "type": "do_group", "text": "do :; done" }
        }))
        .unwrap();
        let while_loop = Node::from_value(json!({
            "type": "while_statement",
            "text": "while untilx; do :; done"
        }))
        .unwrap();

        assert!(matches!(until.kind, NodeKind::WhileStatement { until: true, .. }));
        assert!(matches!(while_loop.kind, NodeKind::WhileStatement { until: false, .. }));
    }

    #[test]
    fn test_unknown_kind_becomes_other() {
        let node = Node::from_value(json!({
            "type": "declaration_command",
            "text": "export A=1",
            "children": [ { "type": "word", "text": "export" } ]
        }))
        .unwrap();

        match &node.kind {
            NodeKind::Other { kind, children } => {
                assert_eq!(kind, "declaration_command");
                assert_eq!(children.len(), 1);
            }
            other => panic!("expected other, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_fields_are_ignored() {
        let json = r#"{
            "type": "program",
            "text": "echo",
            "has_errors": false,
            "changed_ranges": [ { "start_byte": 0, "end_byte": 4 } ],
            "changed_nodes": [],
            "children": [
                { "type": "command", "text": "echo",
                  "name": { "type": "command_name", "text": "echo" } }
            ]
        }"#;
        let node = Node::from_json(json).unwrap();
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_error_flags() {
        let raw: RawNode = serde_json::from_value(json!({
            "type": "ERROR", "text": "fi", "is_error": true
        }))
        .unwrap();
        assert!(raw.is_error());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Node::from_json("{\"text\": \"no type\"}").is_err());
        assert!(Node::from_json("not json").is_err());
    }
}
