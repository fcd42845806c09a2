//! Interpreter module
//!
//! This module contains the tree-walking interpreter.

pub mod builtin_dispatch;
pub mod context;
pub mod control_flow;
pub mod errors;
pub mod functions;
pub mod interpreter;
pub mod subshell_group;
pub mod types;
pub mod word_expansion;

pub use context::Context;
pub use control_flow::{case_pattern_matches, is_valid_identifier};
pub use errors::*;
pub use interpreter::{execute, Interpreter};
pub use types::*;
pub use word_expansion::{expand, expand_all, expand_node};
