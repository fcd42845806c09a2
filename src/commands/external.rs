//! External program execution for `Real` mode.

use std::process::{Command, Stdio};

use crate::commands::CommandResult;
use crate::interpreter::context::Context;

/// Run `name` as a host program with the visible variables as its environment.
pub fn run_external(name: &str, args: &[String], ctx: Context) -> Context {
    let output = Command::new(name)
        .args(args)
        .envs(ctx.variables())
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) => {
            let exit_code = output.status.code().unwrap_or(1);
            tracing::debug!(command = %name, exit_code, "external command finished");
            CommandResult::with_exit_code(
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code,
            )
            .apply(ctx)
        }
        Err(e) => {
            tracing::debug!(command = %name, error = %e, "failed to spawn external command");
            CommandResult::not_found(name).apply(ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::types::COMMAND_NOT_FOUND;
    use crate::interpreter::types::ExecutionMode;

    #[test]
    fn test_missing_program_is_not_found() {
        let ctx = Context::new(ExecutionMode::Real, Default::default(), false);
        let ctx = run_external("rshell-definitely-not-a-program", &[], ctx);
        assert_eq!(ctx.exit_code(), COMMAND_NOT_FOUND);
        assert_eq!(ctx.errors(), ["rshell-definitely-not-a-program: command not found"]);
    }
}
