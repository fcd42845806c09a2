//! Command Dispatch
//!
//! Resolves a simple command: user functions first, then the builtin
//! registry (which falls back to host programs in `Real` mode).

use crate::ast::{Node, NodeKind};
use crate::interpreter::context::Context;
use crate::interpreter::errors::NodeError;
use crate::interpreter::interpreter::Interpreter;
use crate::interpreter::word_expansion::expand_all;

impl Interpreter {
    /// Arguments are expanded before any prefix assignment takes effect, so
    /// `X=1 echo $X` sees the outer `X`.
    pub(crate) fn execute_command(
        &self,
        node: &Node,
        name: Option<&Node>,
        arguments: &[Node],
        prefix: &[Node],
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let name = name.ok_or_else(|| NodeError::malformed(node, "missing command name"))?;
        // The name is taken literally, never expanded
        let command_name = name.text.as_str();
        let args = expand_all(arguments, &ctx);

        if prefix.is_empty() {
            return self.dispatch(command_name, &args, ctx);
        }

        if ctx.has_function(command_name) {
            return self.call_with_prefix(command_name, &args, prefix, ctx);
        }

        // Prefix assignments live only for the duration of the command
        ctx.push_scope();
        for assignment in prefix {
            ctx = self.execute_node(assignment, ctx)?;
        }
        let mut ctx = self.dispatch(command_name, &args, ctx)?;
        ctx.pop_scope();
        Ok(ctx)
    }

    /// A function body writes into the caller's scope, so the prefix names
    /// are bound there and only they are rolled back afterwards.
    fn call_with_prefix(
        &self,
        name: &str,
        args: &[String],
        prefix: &[Node],
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let saved: Vec<(String, Option<String>)> = prefix
            .iter()
            .filter_map(assignment_name)
            .map(|var| {
                let previous = ctx.local_variable(var).map(str::to_string);
                (var.to_string(), previous)
            })
            .collect();

        for assignment in prefix {
            ctx = self.execute_node(assignment, ctx)?;
        }
        let mut ctx = self.dispatch(name, args, ctx)?;

        for (var, previous) in saved.into_iter().rev() {
            match previous {
                Some(value) => ctx.set_variable(var, value),
                None => {
                    ctx.unset_variable(&var);
                }
            }
        }
        Ok(ctx)
    }

    fn dispatch(&self, name: &str, args: &[String], ctx: Context) -> Result<Context, NodeError> {
        if let Some(body) = ctx.function(name).cloned() {
            tracing::debug!(function = %name, ?args, "calling function");
            return self.call_function(name, &body, args, ctx);
        }
        tracing::debug!(command = %name, ?args, "running builtin");
        Ok(self.builtins().execute(name, args, ctx))
    }
}

fn assignment_name(node: &Node) -> Option<&str> {
    match &node.kind {
        NodeKind::VariableAssignment { name: Some(name), .. } => Some(name.text.as_str()),
        _ => None,
    }
}
