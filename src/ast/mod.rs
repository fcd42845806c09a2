//! Syntax Tree for Shell Scripts
//!
//! This module defines the typed node taxonomy the interpreter walks, and the
//! conversion from the parser's map-shaped output into it.
//!
//! Architecture:
//!   Parser output (JSON) → RawNode → Node → Interpreter → ExecutionResult

pub mod convert;
pub mod types;

pub use convert::{RawField, RawNode};
pub use types::*;
