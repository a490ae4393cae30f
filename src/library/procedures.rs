//! User-defined procedures.
//!
//! Definitions are pooled as helpers under `%<name>` and contribute nothing to the body; calls may appear before
//! or after the definition since both sides allocate the name from the same entity.

use blockgen_core::Rank;
use blockgen_tree::Node;

use super::{numbered_inputs, required_text, text_or};
use crate::codegen::{GenContext, GenError, Generated, HandlerRegistry, NameCategory};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry
        .register_fn("procedures_defnoreturn", |node, cx| define(node, cx, false))
        .register_fn("procedures_defreturn", |node, cx| define(node, cx, true))
        .register_fn("procedures_callnoreturn", |node, cx| {
            let call = call(node, cx)?;
            Ok(Generated::statement(format!("{call}\n")))
        })
        .register_fn("procedures_callreturn", |node, cx| {
            let call = call(node, cx)?;
            Ok(Generated::expr(call, Rank::FUNCTION_CALL))
        });
}

fn procedure_name(node: &Node, cx: &mut GenContext<'_>) -> Result<String, GenError> {
    let desired = required_text(node, "NAME")?;
    Ok(cx.allocate(desired, desired, NameCategory::Procedure))
}

fn define(node: &Node, cx: &mut GenContext<'_>, returns: bool) -> Result<Generated, GenError> {
    let desired = required_text(node, "NAME")?;
    let name = procedure_name(node, cx)?;
    let params: Vec<String> = text_or(node, "PARAMS", "")
        .split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(|param| cx.allocate(param, param, NameCategory::Variable))
        .collect();

    let mut body = cx.resolve_statement(node, "STACK")?;
    if returns {
        let value = cx.resolve_value(node, "RETURN", Rank::NONE)?;
        if !value.is_empty() {
            body.push_str(&format!("{}return {value}\n", cx.indent()));
        }
    }
    if body.is_empty() {
        body = format!("{}pass\n", cx.indent());
    }

    let comments = cx.comment_block(node);
    let text = format!("{comments}def {name}({}):\n{body}", params.join(", "));
    cx.add_fragment(&format!("%{desired}"), text.trim_end());
    Ok(Generated::Nothing)
}

fn call(node: &Node, cx: &mut GenContext<'_>) -> Result<String, GenError> {
    let name = procedure_name(node, cx)?;
    let mut args = Vec::new();
    for slot in numbered_inputs(node, "ARG") {
        args.push(cx.resolve_value_or(node, &slot, Rank::NONE, "None")?);
    }
    Ok(format!("{name}({})", args.join(", ")))
}
