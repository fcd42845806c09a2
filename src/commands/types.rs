// src/commands/types.rs
use crate::interpreter::context::Context;

/// Exit code for a command that cannot be found.
pub const COMMAND_NOT_FOUND: i32 = 127;

/// What a command produced, before it is folded into the context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(stdout: String) -> Self {
        Self { stdout, stderr: String::new(), exit_code: 0 }
    }

    pub fn error(stderr: String) -> Self {
        Self { stdout: String::new(), stderr, exit_code: 1 }
    }

    pub fn with_exit_code(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code }
    }

    pub fn not_found(name: &str) -> Self {
        Self::with_exit_code(String::new(), format!("{}: command not found\n", name), COMMAND_NOT_FOUND)
    }

    /// Fold into the context: one output entry per stdout line, one error
    /// entry per stderr line, and the exit code.
    pub fn apply(self, mut ctx: Context) -> Context {
        for line in self.stdout.lines() {
            ctx.add_output(line);
        }
        for line in self.stderr.lines() {
            ctx.add_error(line);
        }
        ctx.set_exit_code(self.exit_code);
        ctx
    }
}

/// A command handler.
///
/// Handlers receive the invoked name (several names may share one handler),
/// the expanded arguments and the current context, and return the context
/// with the exit code set and any output or errors appended. The active
/// `ExecutionMode` decides which side effects a handler may perform.
pub trait Builtin: Send + Sync {
    fn name(&self) -> &str;
    fn execute(&self, name: &str, args: &[String], ctx: Context) -> Context;
}

/// Adapts a closure into a `Builtin`.
pub struct FnBuiltin<F> {
    name: String,
    handler: F,
}

impl<F> FnBuiltin<F>
where
    F: Fn(&str, &[String], Context) -> Context + Send + Sync,
{
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self { name: name.into(), handler }
    }
}

impl<F> Builtin for FnBuiltin<F>
where
    F: Fn(&str, &[String], Context) -> Context + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, name: &str, args: &[String], ctx: Context) -> Context {
        (self.handler)(name, args, ctx)
    }
}
