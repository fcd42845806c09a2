//! Interpreter - AST Execution Engine
//!
//! Walks a parsed tree and threads a single `Context` through every node.
//! The walk is synchronous and depth-first; each node hands back the context
//! it was given, updated with whatever it did.
//!
//! Delegates to specialized modules for:
//! - Command dispatch (builtin_dispatch.rs)
//! - Control flow (control_flow.rs)
//! - Functions (functions.rs)
//! - Subshells and groups (subshell_group.rs)
//! - Word expansion (word_expansion.rs)

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::ast::{Node, NodeKind};
use crate::commands::BuiltinRegistry;
use crate::interpreter::context::Context;
use crate::interpreter::errors::{ExecutionError, NodeError};
use crate::interpreter::types::{ExecutionLimits, ExecutionOptions, ExecutionResult, InterpreterOptions};
use crate::interpreter::word_expansion::expand;

/// Tree-walking interpreter.
///
/// Holds no per-walk state, so one instance can run any number of trees,
/// including concurrently from several threads.
pub struct Interpreter {
    builtins: BuiltinRegistry,
    limits: ExecutionLimits,
}

impl Interpreter {
    pub fn new(builtins: BuiltinRegistry) -> Self {
        Self::with_options(builtins, InterpreterOptions::default())
    }

    pub fn with_options(builtins: BuiltinRegistry, options: InterpreterOptions) -> Self {
        Self {
            builtins,
            limits: options.limits,
        }
    }

    pub fn builtins(&self) -> &BuiltinRegistry {
        &self.builtins
    }

    pub fn builtins_mut(&mut self) -> &mut BuiltinRegistry {
        &mut self.builtins
    }

    pub fn limits(&self) -> &ExecutionLimits {
        &self.limits
    }

    /// Execute a whole tree from a fresh context.
    ///
    /// Command failures are reported through the result's exit code and
    /// error log. `Err` is returned only for a malformed tree or a panicking
    /// builtin; no partial result is produced in either case.
    #[tracing::instrument(level = "debug", skip_all, fields(root = %program.kind_name(), mode = %options.mode, strict = options.strict))]
    pub fn execute(&self, program: &Node, options: ExecutionOptions) -> Result<ExecutionResult, ExecutionError> {
        let ctx = Context::new(options.mode, options.initial_env, options.strict);

        let walk = panic::catch_unwind(AssertUnwindSafe(|| self.execute_node(program, ctx)));
        match walk {
            Ok(Ok(ctx)) => {
                tracing::debug!(exit_code = ctx.exit_code(), "execution finished");
                Ok(ExecutionResult::from_context(ctx))
            }
            Ok(Err(e)) => {
                tracing::error!("{}", e);
                Err(e.into())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!("builtin panicked: {}", message);
                Err(ExecutionError::Panicked(message))
            }
        }
    }

    /// Execute one node and everything below it.
    pub fn execute_node(&self, node: &Node, ctx: Context) -> Result<Context, NodeError> {
        match &node.kind {
            NodeKind::Program { children } => self.execute_sequence(children, ctx),

            NodeKind::VariableAssignment { name, value } => {
                self.execute_assignment(node, name.as_deref(), value.as_deref(), ctx)
            }

            NodeKind::Command { name, arguments, prefix } => {
                self.execute_command(node, name.as_deref(), arguments, prefix, ctx)
            }

            NodeKind::IfStatement { condition, children }
            | NodeKind::ElifClause { condition, children } => self.execute_if(condition, children, ctx),

            NodeKind::WhileStatement { condition, body, until } => {
                self.execute_while(condition, body.as_deref(), *until, ctx)
            }

            NodeKind::ForStatement { variable, values, body } => {
                self.execute_for(node, variable.as_deref(), values, body.as_deref(), ctx)
            }

            NodeKind::CaseStatement { value, items } => self.execute_case(value.as_deref(), items, ctx),

            NodeKind::FunctionDefinition { name, body } => {
                self.execute_function_definition(node, name.as_deref(), body.as_deref(), ctx)
            }

            NodeKind::CompoundStatement { children }
            | NodeKind::DoGroup { children }
            | NodeKind::ElseClause { children }
            | NodeKind::Pipeline { children }
            | NodeKind::List { children } => self.execute_group(children, ctx),

            NodeKind::Subshell { children } => self.execute_subshell(children, ctx),

            NodeKind::RedirectedStatement { body, .. } => self.execute_redirected(body.as_deref(), ctx),

            // Comments, bare words and anything unrecognised
            _ => {
                tracing::trace!(kind = %node.kind_name(), "skipping node");
                Ok(ctx)
            }
        }
    }

    /// Run nodes in order. In strict mode the first nonzero exit code ends
    /// the sequence.
    pub(crate) fn execute_sequence<'a>(
        &self,
        nodes: impl IntoIterator<Item = &'a Node>,
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        for node in nodes {
            ctx = self.execute_node(node, ctx)?;
            if ctx.is_strict() && ctx.exit_code() != 0 {
                tracing::debug!(exit_code = ctx.exit_code(), at = %node, "strict mode stop");
                break;
            }
        }
        Ok(ctx)
    }

    fn execute_assignment(
        &self,
        node: &Node,
        name: Option<&Node>,
        value: Option<&Node>,
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let name = name.ok_or_else(|| NodeError::malformed(node, "missing variable name"))?;
        let value = expand(value, &ctx);
        ctx.set_variable(name.text.clone(), value);
        Ok(ctx)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(BuiltinRegistry::with_defaults())
    }
}

/// Execute `program` with the default builtins and limits.
pub fn execute(program: &Node, options: ExecutionOptions) -> Result<ExecutionResult, ExecutionError> {
    Interpreter::default().execute(program, options)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
