//! Function Handling
//!
//! Definition stores the body in the context's function table; invocation
//! runs it with the call arguments as positional parameters.

use crate::ast::Node;
use crate::interpreter::context::Context;
use crate::interpreter::errors::NodeError;
use crate::interpreter::interpreter::Interpreter;

impl Interpreter {
    /// Redefinition replaces the previous body.
    pub(crate) fn execute_function_definition(
        &self,
        node: &Node,
        name: Option<&Node>,
        body: Option<&Node>,
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let name = name.ok_or_else(|| NodeError::malformed(node, "missing function name"))?;
        let body = body.ok_or_else(|| NodeError::malformed(node, "missing function body"))?;
        tracing::trace!(function = %name.text, "defining function");
        ctx.define_function(name.text.clone(), body.clone());
        Ok(ctx)
    }

    pub(crate) fn call_function(
        &self,
        name: &str,
        body: &Node,
        args: &[String],
        mut ctx: Context,
    ) -> Result<Context, NodeError> {
        let max_depth = self.limits().max_recursion_depth;
        if ctx.call_depth() >= max_depth {
            tracing::warn!(function = %name, max_depth, "function nesting limit reached");
            ctx.add_error(format!(
                "{}: maximum function nesting level exceeded ({})",
                name, max_depth
            ));
            ctx.set_exit_code(1);
            return Ok(ctx);
        }

        let saved = ctx.set_positional(args.to_vec());
        ctx.enter_call();
        let mut ctx = self.execute_node(body, ctx)?;
        ctx.leave_call();
        ctx.set_positional(saved);
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::BuiltinRegistry;
    use crate::interpreter::errors::ExecutionError;
    use crate::interpreter::types::{ExecutionLimits, ExecutionOptions, InterpreterOptions};
    use crate::testing::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn run(tree: serde_json::Value) -> crate::ExecutionResult {
        Interpreter::default()
            .execute(&node(tree), ExecutionOptions::default())
            .unwrap()
    }

    #[test]
    fn test_definition_does_not_run_body() {
        let result = run(program(vec![function_definition(
            "greet",
            vec![cmd("echo", vec![word("hello")])],
        )]));
        assert!(result.output.is_empty());
        assert!(result.context.has_function("greet"));
    }

    #[test]
    fn test_call_runs_body_each_time() {
        let result = run(program(vec![
            function_definition("greet", vec![cmd("echo", vec![word("hello")])]),
            cmd("greet", vec![]),
            cmd("greet", vec![]),
        ]));
        assert_eq!(result.output, vec!["hello", "hello"]);
    }

    #[test]
    fn test_redefinition_replaces_body() {
        let result = run(program(vec![
            function_definition("f", vec![cmd("echo", vec![word("one")])]),
            function_definition("f", vec![cmd("echo", vec![word("two")])]),
            cmd("f", vec![]),
        ]));
        assert_eq!(result.output, vec!["two"]);
    }

    #[test]
    fn test_function_shadows_builtin() {
        let result = run(program(vec![
            function_definition("echo", vec![cmd("printf", vec![word("shadowed\\n")])]),
            cmd("echo", vec![word("ignored")]),
        ]));
        assert_eq!(result.output, vec!["shadowed"]);
    }

    #[test]
    fn test_positional_parameters_are_scoped_to_call() {
        let result = run(program(vec![
            function_definition(
                "show",
                vec![cmd("echo", vec![var("1"), var("2"), var("#")])],
            ),
            cmd("show", vec![word("a"), word("b")]),
            cmd("echo", vec![var("#")]),
        ]));
        assert_eq!(result.output, vec!["a b 2", "0"]);
        assert!(result.context.positional().is_empty());
        assert_eq!(result.context.call_depth(), 0);
    }

    #[test]
    fn test_function_body_shares_caller_scope() {
        let result = run(program(vec![
            function_definition("setter", vec![assign("RESULT", word("done"))]),
            cmd("setter", vec![]),
            cmd("echo", vec![var("RESULT")]),
        ]));
        assert_eq!(result.output, vec!["done"]);
    }

    #[test]
    fn test_runaway_recursion_is_cut_off() {
        let options = InterpreterOptions {
            limits: ExecutionLimits { max_recursion_depth: 5, ..ExecutionLimits::default() },
        };
        let interpreter = Interpreter::with_options(BuiltinRegistry::with_defaults(), options);
        let tree = program(vec![
            function_definition("recurse", vec![cmd("echo", vec![word("down")]), cmd("recurse", vec![])]),
            cmd("recurse", vec![]),
        ]);
        let result = interpreter.execute(&node(tree), ExecutionOptions::default()).unwrap();
        assert_eq!(result.output.len(), 5);
        assert_eq!(result.errors, vec!["recurse: maximum function nesting level exceeded (5)"]);
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.context.call_depth(), 0);
    }

    #[test]
    fn test_definition_without_name_is_malformed() {
        let tree = program(vec![json!({
            "type": "function_definition",
            "text": "() { :; }",
            "body": compound(vec![cmd(":", vec![])])
        })]);
        let err = Interpreter::default()
            .execute(&node(tree), ExecutionOptions::default())
            .unwrap_err();
        assert_matches!(err, ExecutionError::Node(NodeError::MalformedNode { ref kind, .. }) if kind == "function_definition");
    }
}
