// src/commands/mod.rs
pub mod echo;
pub mod external;
pub mod printf;
pub mod registry;
pub mod test_cmd;
pub mod true_cmd;
pub mod types;

pub use registry::BuiltinRegistry;
pub use types::{Builtin, CommandResult, FnBuiltin};
