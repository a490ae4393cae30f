//! Reference handler library for a Python-flavoured target.
//!
//! Covers enough node kinds (numbers, text, variables, arithmetic, logic, lists, control flow, procedures) to drive
//! the engine end to end from the CLI and the snapshot tests. Field and input names follow the usual visual-block
//! conventions (`NUM`, `OP`, `A`/`B`, `DO0`, `ARG0`, ...).

mod control;
mod operators;
mod procedures;
mod values;

use blockgen_tree::Node;

use crate::codegen::{GenError, HandlerRegistry};

/// Build a registry with every handler of the reference library.
pub fn standard_handlers() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    values::register(&mut registry);
    operators::register(&mut registry);
    control::register(&mut registry);
    procedures::register(&mut registry);
    registry
}

/// Text of a required field.
pub(crate) fn required_text<'n>(node: &'n Node, field: &str) -> Result<&'n str, GenError> {
    node.field(field)
        .and_then(|value| value.as_text())
        .ok_or_else(|| GenError::handler(node, format!("missing text field `{field}`")))
}

/// Text of an optional field, or `default`.
pub(crate) fn text_or<'n>(node: &'n Node, field: &str, default: &'n str) -> &'n str {
    node.field(field).and_then(|value| value.as_text()).unwrap_or(default)
}

/// Reject an `OP` (or similar) field value the handler does not know.
pub(crate) fn unknown_option(node: &Node, field: &str, value: &str) -> GenError {
    GenError::handler(node, format!("unknown {field} `{value}`"))
}

/// Names of numbered inputs (`ADD0`, `ADD1`, ...) present on `node`, connected or not.
pub(crate) fn numbered_inputs(node: &Node, prefix: &str) -> Vec<String> {
    (0..)
        .map(|i| format!("{prefix}{i}"))
        .take_while(|name| node.input(name).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_handlers_cover_reference_kinds() {
        let registry = standard_handlers();
        for kind in [
            "math_number",
            "text",
            "logic_boolean",
            "logic_null",
            "variables_get",
            "variables_set",
            "math_arithmetic",
            "math_single",
            "math_on_list",
            "logic_compare",
            "logic_operation",
            "logic_negate",
            "logic_ternary",
            "lists_create_with",
            "lists_get_index",
            "text_print",
            "controls_if",
            "controls_repeat_ext",
            "controls_whileUntil",
            "controls_flow_statements",
            "procedures_defnoreturn",
            "procedures_defreturn",
            "procedures_callnoreturn",
            "procedures_callreturn",
        ] {
            assert!(registry.contains(kind), "missing handler for {kind}");
        }
    }

    #[test]
    fn test_numbered_inputs_stop_at_first_gap() {
        use blockgen_tree::InputKind;

        let node = Node::value("l", "lists_create_with")
            .with_empty_input("ADD0", InputKind::Value)
            .with_empty_input("ADD1", InputKind::Value)
            .with_empty_input("ADD3", InputKind::Value);
        assert_eq!(numbered_inputs(&node, "ADD"), vec!["ADD0", "ADD1"]);
    }
}
