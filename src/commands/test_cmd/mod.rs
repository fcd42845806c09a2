// src/commands/test_cmd/mod.rs
use std::path::Path;

use crate::commands::{Builtin, CommandResult};
use crate::interpreter::context::Context;
use crate::interpreter::types::ExecutionMode;

pub struct TestCommand;

impl Builtin for TestCommand {
    fn name(&self) -> &str {
        "test"
    }

    fn execute(&self, name: &str, args: &[String], ctx: Context) -> Context {
        let args: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        run_test(name, &args, ctx)
    }
}

// `[` is `test` with a mandatory closing bracket
pub struct BracketCommand;

impl Builtin for BracketCommand {
    fn name(&self) -> &str {
        "["
    }

    fn execute(&self, name: &str, args: &[String], ctx: Context) -> Context {
        match args.split_last() {
            Some((last, rest)) if last == "]" => {
                let args: Vec<&str> = rest.iter().map(|s| s.as_str()).collect();
                run_test(name, &args, ctx)
            }
            _ => CommandResult::with_exit_code(String::new(), format!("{}: missing ']'\n", name), 2)
                .apply(ctx),
        }
    }
}

fn run_test(name: &str, args: &[&str], ctx: Context) -> Context {
    if args.is_empty() {
        return CommandResult::with_exit_code(String::new(), String::new(), 1).apply(ctx);
    }

    match evaluate_expression(args, ctx.mode()) {
        Ok(passed) => {
            let exit_code = if passed { 0 } else { 1 };
            CommandResult::with_exit_code(String::new(), String::new(), exit_code).apply(ctx)
        }
        Err(message) => {
            CommandResult::with_exit_code(String::new(), format!("{}: {}\n", name, message), 2).apply(ctx)
        }
    }
}

fn evaluate_expression(args: &[&str], mode: ExecutionMode) -> Result<bool, String> {
    // Single argument: true when non-empty
    if args.len() == 1 {
        return Ok(!args[0].is_empty());
    }

    if args[0] == "!" {
        return evaluate_expression(&args[1..], mode).map(|passed| !passed);
    }

    // -o binds looser than -a
    for op in ["-o", "-a"] {
        if let Some(i) = args.iter().skip(1).position(|a| *a == op).map(|i| i + 1) {
            if i + 1 < args.len() {
                let left = evaluate_expression(&args[..i], mode)?;
                let right = evaluate_expression(&args[i + 1..], mode)?;
                return Ok(if op == "-o" { left || right } else { left && right });
            }
        }
    }

    match args {
        [left, op, right] => evaluate_binary(left, op, right),
        [op, operand] => evaluate_unary(op, operand, mode),
        _ => Err("too many arguments".to_string()),
    }
}

fn evaluate_binary(left: &str, op: &str, right: &str) -> Result<bool, String> {
    match op {
        "=" | "==" => Ok(left == right),
        "!=" => Ok(left != right),
        "-eq" | "-ne" | "-lt" | "-le" | "-gt" | "-ge" => {
            let l = parse_integer(left)?;
            let r = parse_integer(right)?;
            Ok(match op {
                "-eq" => l == r,
                "-ne" => l != r,
                "-lt" => l < r,
                "-le" => l <= r,
                "-gt" => l > r,
                _ => l >= r,
            })
        }
        _ => Err(format!("{}: binary operator expected", op)),
    }
}

fn evaluate_unary(op: &str, operand: &str, mode: ExecutionMode) -> Result<bool, String> {
    match op {
        "-z" => Ok(operand.is_empty()),
        "-n" => Ok(!operand.is_empty()),
        // File tests touch the real file system; a simulation sees none
        "-e" | "-f" | "-d" => {
            if mode == ExecutionMode::Simulate {
                return Ok(false);
            }
            let path = Path::new(operand);
            Ok(match op {
                "-e" => path.exists(),
                "-f" => path.is_file(),
                _ => path.is_dir(),
            })
        }
        _ => Err(format!("{}: unary operator expected", op)),
    }
}

fn parse_integer(s: &str) -> Result<i64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("{}: integer expression expected", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(args: &[&str]) -> Context {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        TestCommand.execute("test", &args, Context::default())
    }

    fn bracket(args: &[&str]) -> Context {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        BracketCommand.execute("[", &args, Context::default())
    }

    #[test]
    fn test_empty_args() {
        assert_eq!(test(&[]).exit_code(), 1);
    }

    #[test]
    fn test_single_arg() {
        assert_eq!(test(&["hello"]).exit_code(), 0);
        assert_eq!(test(&[""]).exit_code(), 1);
    }

    #[test]
    fn test_string_comparison() {
        assert_eq!(test(&["hello", "=", "hello"]).exit_code(), 0);
        assert_eq!(test(&["hello", "==", "world"]).exit_code(), 1);
        assert_eq!(test(&["a", "!=", "b"]).exit_code(), 0);
    }

    #[test]
    fn test_numeric_comparison() {
        assert_eq!(test(&["3", "-lt", "5"]).exit_code(), 0);
        assert_eq!(test(&["5", "-le", "5"]).exit_code(), 0);
        assert_eq!(test(&["7", "-gt", "9"]).exit_code(), 1);
        assert_eq!(test(&["10", "-eq", "10"]).exit_code(), 0);
        assert_eq!(test(&["1", "-ne", "1"]).exit_code(), 1);
        assert_eq!(test(&["2", "-ge", "3"]).exit_code(), 1);
    }

    #[test]
    fn test_numeric_comparison_rejects_words() {
        let ctx = test(&["x", "-eq", "1"]);
        assert_eq!(ctx.exit_code(), 2);
        assert_eq!(ctx.errors(), ["test: x: integer expression expected"]);
    }

    #[test]
    fn test_unary_string_tests() {
        assert_eq!(test(&["-z", ""]).exit_code(), 0);
        assert_eq!(test(&["-n", ""]).exit_code(), 1);
        assert_eq!(test(&["-n", "x"]).exit_code(), 0);
    }

    #[test]
    fn test_negation_and_logic() {
        assert_eq!(test(&["!", "a", "=", "b"]).exit_code(), 0);
        assert_eq!(test(&["a", "=", "a", "-a", "b", "=", "c"]).exit_code(), 1);
        assert_eq!(test(&["a", "=", "a", "-o", "b", "=", "c"]).exit_code(), 0);
    }

    #[test]
    fn test_file_tests_are_false_in_simulation() {
        assert_eq!(test(&["-e", "/"]).exit_code(), 1);
        assert_eq!(test(&["-d", "/"]).exit_code(), 1);
    }

    #[test]
    fn test_file_tests_in_capture_mode() {
        let ctx = TestCommand.execute(
            "test",
            &["-d".to_string(), "/".to_string()],
            Context::new(ExecutionMode::Capture, Default::default(), false),
        );
        assert_eq!(ctx.exit_code(), 0);
    }

    #[test]
    fn test_bracket_requires_closing() {
        assert_eq!(bracket(&["a", "=", "a", "]"]).exit_code(), 0);
        let ctx = bracket(&["a", "=", "a"]);
        assert_eq!(ctx.exit_code(), 2);
        assert_eq!(ctx.errors(), ["[: missing ']'"]);
    }

    #[test]
    fn test_bracket_empty_expression() {
        assert_eq!(bracket(&["]"]).exit_code(), 1);
    }
}
