//! Subshell, Group, and Redirected Execution
//!
//! - Subshell `(...)`: children run in a pushed scope, dropped afterwards
//! - Groups `{...}`, `do ... done` and friends: children run in the current scope
//! - Redirected statements: the redirections are ignored, the body runs as-is

use crate::ast::Node;
use crate::interpreter::context::Context;
use crate::interpreter::errors::NodeError;
use crate::interpreter::interpreter::Interpreter;

impl Interpreter {
    /// Variables set inside the subshell do not survive it. Output, errors,
    /// the exit code and function definitions do.
    pub(crate) fn execute_subshell(&self, children: &[Node], mut ctx: Context) -> Result<Context, NodeError> {
        ctx.push_scope();
        let mut ctx = self.execute_sequence(children, ctx)?;
        ctx.pop_scope();
        Ok(ctx)
    }

    pub(crate) fn execute_group(&self, children: &[Node], ctx: Context) -> Result<Context, NodeError> {
        self.execute_sequence(children, ctx)
    }

    pub(crate) fn execute_redirected(&self, body: Option<&Node>, ctx: Context) -> Result<Context, NodeError> {
        match body {
            Some(body) => self.execute_node(body, ctx),
            None => Ok(ctx),
        }
    }
}
