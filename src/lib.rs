//! rshell - A tree-walking interpreter for parsed shell scripts
//!
//! This library executes the syntax tree a shell parser produces, threading
//! an explicit execution context through the walk. Commands run against a
//! pluggable builtin registry and, depending on the execution mode, are
//! simulated, captured, or run for real.

pub mod ast;
pub mod commands;
pub mod interpreter;

#[cfg(test)]
mod testing;

pub use ast::{Node, NodeKind, RawNode, Span};
pub use commands::{Builtin, BuiltinRegistry, CommandResult};
pub use interpreter::{
    execute, Context, ExecutionError, ExecutionLimits, ExecutionMode, ExecutionOptions, ExecutionResult,
    Interpreter, InterpreterOptions,
};
