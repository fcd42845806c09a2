//! Control Flow Execution
//!
//! Handles control flow constructs:
//! - if/elif/else
//! - while/until loops
//! - for loops
//! - case statements

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::ast::{Node, NodeKind};
use crate::interpreter::context::Context;
use crate::interpreter::errors::NodeError;
use crate::interpreter::interpreter::Interpreter;
use crate::interpreter::word_expansion::{expand, expand_all, expand_node};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier pattern is valid");
}

/// Validate that a variable name is a valid identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Case patterns match literally, except `*` which matches anything.
pub fn case_pattern_matches(pattern: &str, subject: &str) -> bool {
    pattern == "*" || pattern == subject
}

impl Interpreter {
    /// if/elif: run the condition, then the body on success or the first
    /// else/elif clause otherwise.
    pub(crate) fn execute_if(
        &self,
        condition: &[Node],
        children: &[Node],
        ctx: Context,
    ) -> Result<Context, NodeError> {
        let ctx = self.execute_sequence(condition, ctx)?;
        if ctx.exit_code() == 0 {
            let body = children.iter().filter(|child| !child.is_alternative_clause());
            return self.execute_sequence(body, ctx);
        }
        let alternatives = children.iter().filter(|child| child.is_alternative_clause());
        self.execute_alternatives(alternatives, ctx)
    }

    fn execute_alternatives<'a>(
        &self,
        mut clauses: impl Iterator<Item = &'a Node>,
        ctx: Context,
    ) -> Result<Context, NodeError> {
        let Some(clause) = clauses.next() else {
            // No clause taken: the failed condition's exit code stands
            return Ok(ctx);
        };
        match &clause.kind {
            NodeKind::ElseClause { children } => self.execute_sequence(children, ctx),
            NodeKind::ElifClause { condition, children } => {
                let ctx = self.execute_sequence(condition, ctx)?;
                if ctx.exit_code() == 0 {
                    self.execute_sequence(children, ctx)
                } else {
                    self.execute_alternatives(clauses, ctx)
                }
            }
            _ => Ok(ctx),
        }
    }

    /// while/until: bounded by `ExecutionLimits::max_iterations`.
    pub(crate) fn execute_while(
        &self,
        condition: &[Node],
        body: Option<&Node>,
        until: bool,
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let keyword = if until { "until" } else { "while" };
        let max_iterations = self.limits().max_iterations;

        for _ in 0..max_iterations {
            ctx = self.execute_sequence(condition, ctx)?;
            let proceed = (ctx.exit_code() == 0) != until;
            if !proceed {
                return Ok(ctx);
            }
            if let Some(body) = body {
                ctx = self.execute_node(body, ctx)?;
            }
            if ctx.is_strict() && ctx.exit_code() != 0 {
                return Ok(ctx);
            }
        }

        // A loop that ends right at the cap has not exceeded it
        ctx = self.execute_sequence(condition, ctx)?;
        if (ctx.exit_code() == 0) != until {
            tracing::warn!(max_iterations, "{} loop stopped at iteration cap", keyword);
            ctx.add_error(format!(
                "{} loop exceeded maximum iterations ({})",
                keyword, max_iterations
            ));
        }
        Ok(ctx)
    }

    /// for: values are expanded once, up front; the loop variable keeps the
    /// last item after the loop.
    pub(crate) fn execute_for(
        &self,
        node: &Node,
        variable: Option<&Node>,
        values: &[Node],
        body: Option<&Node>,
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let variable = variable.ok_or_else(|| NodeError::malformed(node, "missing loop variable"))?;
        let name = variable.text.as_str();
        if !is_valid_identifier(name) {
            ctx.add_error(format!("for: `{}': not a valid identifier", name));
            ctx.set_exit_code(1);
            return Ok(ctx);
        }

        // No `in` list: iterate the positional parameters
        let items = if values.is_empty() {
            ctx.positional().to_vec()
        } else {
            expand_all(values, &ctx)
        };

        for item in items {
            ctx.set_variable(name, item);
            if let Some(body) = body {
                ctx = self.execute_node(body, ctx)?;
            }
            if ctx.is_strict() && ctx.exit_code() != 0 {
                break;
            }
        }
        Ok(ctx)
    }

    /// case: first item with a matching pattern runs; no fall-through.
    pub(crate) fn execute_case(
        &self,
        value: Option<&Node>,
        items: &[Node],
        ctx: Context,
    ) -> Result<Context, NodeError> {
        let subject = expand(value, &ctx);

        for item in items {
            let NodeKind::CaseItem { patterns, children } = &item.kind else {
                continue;
            };
            let matched = patterns
                .iter()
                .any(|pattern| case_pattern_matches(&pattern_text(pattern, &ctx), &subject));
            if matched {
                return self.execute_sequence(children, ctx);
            }
        }
        Ok(ctx)
    }
}

/// Glob-like patterns arrive as kinds the expander does not model; they
/// match on their source text.
fn pattern_text(pattern: &Node, ctx: &Context) -> String {
    match pattern.kind {
        NodeKind::Other { .. } => pattern.text.clone(),
        _ => expand_node(pattern, ctx),
    }
}
