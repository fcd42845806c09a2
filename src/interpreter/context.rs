//! Execution Context
//!
//! The complete state of one walk: variable scopes, function table, exit code,
//! output and error logs. A `Context` is owned by exactly one walk and is
//! threaded through it by value.
//!
//! Variables are looked up from the innermost scope outwards; when every scope
//! misses, the shell special parameters (`$?`, `$#`, `$@`, `$1`...) answer.

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::Node;
use crate::interpreter::types::ExecutionMode;

/// Value reported for `$0`.
pub const SHELL_NAME: &str = "rshell";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    /// Stack of variable scopes. Last element is the active scope.
    scopes: Vec<IndexMap<String, String>>,
    /// Function definitions (name -> body)
    functions: IndexMap<String, Node>,
    exit_code: i32,
    output: Vec<String>,
    errors: Vec<String>,
    mode: ExecutionMode,
    strict: bool,
    /// Positional parameters of the current function call
    positional: Vec<String>,
    /// Current function call depth
    call_depth: u32,
}

impl Context {
    /// Create a context with one base scope seeded from `env`.
    pub fn new(mode: ExecutionMode, env: IndexMap<String, String>, strict: bool) -> Self {
        Self {
            scopes: vec![env],
            functions: IndexMap::new(),
            exit_code: 0,
            output: Vec::new(),
            errors: Vec::new(),
            mode,
            strict,
            positional: Vec::new(),
            call_depth: 0,
        }
    }

    // =========================================================================
    // Variables and scopes
    // =========================================================================

    /// Set a variable in the active (innermost) scope.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value.into());
        }
    }

    /// Look up a variable, falling back to `default` when it is unset everywhere.
    pub fn get_variable(&self, name: &str, default: &str) -> String {
        self.lookup(name).unwrap_or_else(|| default.to_string())
    }

    /// Look up a variable by name, searching from innermost to outermost scope,
    /// then the special parameters.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).cloned())
            .or_else(|| self.special_parameter(name))
    }

    fn special_parameter(&self, name: &str) -> Option<String> {
        match name {
            "?" => Some(self.exit_code.to_string()),
            "#" => Some(self.positional.len().to_string()),
            "@" | "*" => Some(self.positional.join(" ")),
            "0" => Some(SHELL_NAME.to_string()),
            _ => {
                let index: usize = name.parse().ok()?;
                self.positional.get(index.checked_sub(1)?).cloned()
            }
        }
    }

    /// The binding of `name` in the active scope only.
    pub fn local_variable(&self, name: &str) -> Option<&str> {
        self.scopes.last().and_then(|scope| scope.get(name)).map(String::as_str)
    }

    /// Remove `name` from the active scope, returning its value.
    pub fn unset_variable(&mut self, name: &str) -> Option<String> {
        self.scopes.last_mut().and_then(|scope| scope.shift_remove(name))
    }

    /// Push a new empty scope on top of the stack.
    pub fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Discard the active scope and everything defined only in it.
    ///
    /// # Panics
    /// Panics when called on the base scope; every pop must match a push.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        } else {
            panic!("cannot pop the base scope");
        }
    }

    /// Number of scopes on the stack (always at least 1).
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// All visible bindings, inner scopes shadowing outer ones.
    pub fn variables(&self) -> IndexMap<String, String> {
        let mut merged = IndexMap::new();
        for scope in &self.scopes {
            for (name, value) in scope {
                merged.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub fn define_function(&mut self, name: impl Into<String>, body: Node) {
        self.functions.insert(name.into(), body);
    }

    pub fn function(&self, name: &str) -> Option<&Node> {
        self.functions.get(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn functions(&self) -> &IndexMap<String, Node> {
        &self.functions
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Replace the positional parameters, returning the previous ones.
    pub fn set_positional(&mut self, args: Vec<String>) -> Vec<String> {
        std::mem::replace(&mut self.positional, args)
    }

    pub fn call_depth(&self) -> u32 {
        self.call_depth
    }

    pub(crate) fn enter_call(&mut self) {
        self.call_depth += 1;
    }

    pub(crate) fn leave_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    // =========================================================================
    // Status and logs
    // =========================================================================

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = code;
    }

    pub fn add_output(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Append to the error log. The exit code is left alone.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(ExecutionMode::default(), IndexMap::new(), false)
    }
}
