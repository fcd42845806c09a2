// src/commands/registry.rs
use std::collections::HashMap;

use super::echo::EchoCommand;
use super::external;
use super::printf::PrintfCommand;
use super::test_cmd::{BracketCommand, TestCommand};
use super::true_cmd::{ColonCommand, FalseCommand, TrueCommand};
use super::types::{Builtin, CommandResult, FnBuiltin};
use crate::interpreter::context::Context;
use crate::interpreter::types::ExecutionMode;

/// Name -> handler table consulted at command dispatch time.
pub struct BuiltinRegistry {
    commands: HashMap<String, Box<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// An empty registry: every command is unknown.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// A registry holding the default handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_defaults(&mut registry);
        registry
    }

    /// Register a handler under its own name, replacing any previous one.
    pub fn register(&mut self, cmd: Box<dyn Builtin>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Register a closure as the handler for `name`.
    pub fn register_fn<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&str, &[String], Context) -> Context + Send + Sync + 'static,
    {
        self.register(Box::new(FnBuiltin::new(name, handler)));
    }

    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Builtin>> {
        self.commands.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Run `name` with already-expanded arguments.
    ///
    /// Unregistered names run as external programs in `Real` mode; otherwise
    /// they fail with "command not found" and exit code 127.
    pub fn execute(&self, name: &str, args: &[String], ctx: Context) -> Context {
        if let Some(cmd) = self.get(name) {
            return cmd.execute(name, args, ctx);
        }

        match ctx.mode() {
            ExecutionMode::Real => external::run_external(name, args, ctx),
            ExecutionMode::Simulate | ExecutionMode::Capture => {
                tracing::debug!(command = %name, "no builtin registered");
                CommandResult::not_found(name).apply(ctx)
            }
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Register the default handlers.
pub fn register_defaults(registry: &mut BuiltinRegistry) {
    registry.register(Box::new(EchoCommand));
    registry.register(Box::new(PrintfCommand));
    registry.register(Box::new(TrueCommand));
    registry.register(Box::new(FalseCommand));
    registry.register(Box::new(ColonCommand));
    registry.register(Box::new(TestCommand));
    registry.register(Box::new(BracketCommand));
}
