//! Interpreter Types
//!
//! Execution options, limits, and the result handed back to callers.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::interpreter::context::Context;
use crate::interpreter::errors::ConfigError;

/// How builtins treat side effects. The interpreter passes it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// No side effects
    #[default]
    Simulate,
    /// Collect output without full side effects
    Capture,
    /// Full side effects
    Real,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simulate => "simulate",
            Self::Capture => "capture",
            Self::Real => "real",
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simulate" => Ok(Self::Simulate),
            "capture" => Ok(Self::Capture),
            "real" => Ok(Self::Real),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    pub mode: ExecutionMode,
    /// Seed bindings for the base scope
    pub initial_env: IndexMap<String, String>,
    /// Stop a statement sequence after the first failing statement
    pub strict: bool,
}

impl ExecutionOptions {
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_env<K, V>(mut self, env: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.initial_env
            .extend(env.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Hard bounds that guarantee every walk terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionLimits {
    /// Maximum body executions of a single while/until loop
    pub max_iterations: u64,
    /// Maximum nesting of user-defined function calls
    pub max_recursion_depth: u32,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_recursion_depth: 100,
        }
    }
}

/// Options for creating an interpreter instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterOptions {
    pub limits: ExecutionLimits,
}

impl InterpreterOptions {
    /// Load options from a TOML document:
    ///
    /// ```toml
    /// [limits]
    /// max_iterations = 500
    /// max_recursion_depth = 50
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

/// Outcome of a completed walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub context: Context,
    pub exit_code: i32,
    pub output: Vec<String>,
    pub errors: Vec<String>,
}

impl ExecutionResult {
    pub fn from_context(context: Context) -> Self {
        Self {
            exit_code: context.exit_code(),
            output: context.output().to_vec(),
            errors: context.errors().to_vec(),
            context,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
