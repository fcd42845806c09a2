use crate::commands::{Builtin, CommandResult};
use crate::interpreter::context::Context;

pub struct TrueCommand;

impl Builtin for TrueCommand {
    fn name(&self) -> &str {
        "true"
    }

    fn execute(&self, _name: &str, _args: &[String], ctx: Context) -> Context {
        CommandResult::success(String::new()).apply(ctx)
    }
}

pub struct FalseCommand;

impl Builtin for FalseCommand {
    fn name(&self) -> &str {
        "false"
    }

    fn execute(&self, _name: &str, _args: &[String], ctx: Context) -> Context {
        CommandResult::with_exit_code(String::new(), String::new(), 1).apply(ctx)
    }
}

/// `:` - does nothing, successfully
pub struct ColonCommand;

impl Builtin for ColonCommand {
    fn name(&self) -> &str {
        ":"
    }

    fn execute(&self, _name: &str, _args: &[String], ctx: Context) -> Context {
        CommandResult::success(String::new()).apply(ctx)
    }
}
