//! Builders for parser-shaped test trees.

use serde_json::{json, Value};

use crate::ast::Node;

pub fn node(value: Value) -> Node {
    Node::from_value(value).expect("test tree should deserialize")
}

pub fn word(text: &str) -> Value {
    json!({ "type": "word", "text": text })
}

pub fn number(text: &str) -> Value {
    json!({ "type": "number", "text": text })
}

/// Double-quoted string; `inner` is the text between the quotes.
pub fn string(inner: &str) -> Value {
    json!({
        "type": "string",
        "text": format!("\"{}\"", inner),
        "children": [ { "type": "string_content", "text": inner } ]
    })
}

/// Single-quoted string; `inner` is the text between the quotes.
pub fn raw_string(inner: &str) -> Value {
    json!({ "type": "raw_string", "text": format!("'{}'", inner) })
}

pub fn var(name: &str) -> Value {
    json!({
        "type": "simple_expansion",
        "text": format!("${}", name),
        "children": [ { "type": "variable_name", "text": name } ]
    })
}

pub fn cmd(name: &str, args: Vec<Value>) -> Value {
    json!({
        "type": "command",
        "text": name,
        "name": { "type": "command_name", "text": name,
                  "children": [ { "type": "word", "text": name } ] },
        "argument": args
    })
}

pub fn assign(name: &str, value: Value) -> Value {
    json!({
        "type": "variable_assignment",
        "text": format!("{}=", name),
        "name": { "type": "variable_name", "text": name },
        "value": value
    })
}

pub fn program(children: Vec<Value>) -> Value {
    json!({ "type": "program", "text": "", "children": children })
}

pub fn if_statement(condition: Vec<Value>, children: Vec<Value>) -> Value {
    json!({ "type": "if_statement", "text": "if", "condition": condition, "children": children })
}

pub fn elif_clause(condition: Vec<Value>, children: Vec<Value>) -> Value {
    json!({ "type": "elif_clause", "text": "elif", "condition": condition, "children": children })
}

pub fn else_clause(children: Vec<Value>) -> Value {
    json!({ "type": "else_clause", "text": "else", "children": children })
}

pub fn do_group(children: Vec<Value>) -> Value {
    json!({ "type": "do_group", "text": "do", "children": children })
}

pub fn while_statement(condition: Vec<Value>, body: Vec<Value>) -> Value {
    json!({
        "type": "while_statement",
        "text": "while",
        "condition": condition,
        "body": do_group(body)
    })
}

pub fn until_statement(condition: Vec<Value>, body: Vec<Value>) -> Value {
    json!({
        "type": "while_statement",
        "text": "until",
        "condition": condition,
        "body": do_group(body)
    })
}

pub fn for_statement(variable: &str, values: Vec<Value>, body: Vec<Value>) -> Value {
    json!({
        "type": "for_statement",
        "text": format!("for {}", variable),
        "variable": { "type": "variable_name", "text": variable },
        "value": values,
        "body": do_group(body)
    })
}

pub fn case_statement(value: Value, items: Vec<Value>) -> Value {
    json!({ "type": "case_statement", "text": "case", "value": value, "children": items })
}

pub fn case_item(patterns: Vec<Value>, children: Vec<Value>) -> Value {
    json!({ "type": "case_item", "text": "", "value": patterns, "children": children })
}

pub fn compound(children: Vec<Value>) -> Value {
    json!({ "type": "compound_statement", "text": "{", "children": children })
}

pub fn function_definition(name: &str, body: Vec<Value>) -> Value {
    json!({
        "type": "function_definition",
        "text": format!("{}()", name),
        "name": { "type": "word", "text": name },
        "body": compound(body)
    })
}

pub fn subshell(children: Vec<Value>) -> Value {
    json!({ "type": "subshell", "text": "(", "children": children })
}
