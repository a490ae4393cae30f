//! Conditionals and loops.

use blockgen_core::Rank;
use blockgen_core::strings::format_number;
use blockgen_tree::Node;

use super::{numbered_inputs, text_or, unknown_option};
use crate::codegen::{GenContext, GenError, Generated, HandlerRegistry, NameCategory};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry
        .register_fn("controls_if", controls_if)
        .register_fn("controls_repeat_ext", controls_repeat_ext)
        .register_fn("controls_whileUntil", controls_while_until)
        .register_fn("controls_flow_statements", controls_flow_statements);
}

/// Indented body at `slot`, or an indented `pass` when it is empty.
fn branch_or_pass(cx: &mut GenContext<'_>, node: &Node, slot: &str) -> Result<String, GenError> {
    let branch = cx.resolve_statement(node, slot)?;
    Ok(or_pass(cx, branch))
}

fn or_pass(cx: &GenContext<'_>, branch: String) -> String {
    if branch.is_empty() {
        format!("{}pass\n", cx.indent())
    } else {
        branch
    }
}

/// Loop body at `DO` with the loop trap in front.
fn loop_body(cx: &mut GenContext<'_>, node: &Node) -> Result<String, GenError> {
    let branch = cx.resolve_statement(node, "DO")?;
    let branch = cx.add_loop_trap(branch, node);
    Ok(or_pass(cx, branch))
}

fn controls_if(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let conditions = numbered_inputs(node, "IF");
    if conditions.is_empty() {
        return Err(GenError::handler(node, "missing input `IF0`"));
    }
    let mut code = String::new();
    for (i, slot) in conditions.iter().enumerate() {
        let condition = cx.resolve_value_or(node, slot, Rank::NONE, "False")?;
        let branch = branch_or_pass(cx, node, &format!("DO{i}"))?;
        let keyword = if i == 0 { "if" } else { "elif" };
        code.push_str(&format!("{keyword} {condition}:\n{branch}"));
    }
    if node.input("ELSE").is_some() {
        let branch = branch_or_pass(cx, node, "ELSE")?;
        code.push_str(&format!("else:\n{branch}"));
    }
    Ok(Generated::statement(code))
}

fn controls_repeat_ext(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let times = match cx.resolve_expr(node, "TIMES", Rank::NONE)? {
        Some(expr) if !expr.is_empty() => match expr.literal() {
            Some(n) => format_number(n.trunc()),
            None => format!("int({})", expr.code),
        },
        _ => "0".to_string(),
    };
    let counter = cx.distinct_name("count", NameCategory::Variable);
    let body = loop_body(cx, node)?;
    Ok(Generated::statement(format!("for {counter} in range({times}):\n{body}")))
}

fn controls_while_until(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let condition = match text_or(node, "MODE", "WHILE") {
        "WHILE" => cx.resolve_value_or(node, "BOOL", Rank::NONE, "False")?,
        "UNTIL" => {
            let condition = cx.resolve_value_or(node, "BOOL", Rank::LOGICAL_NOT, "False")?;
            format!("not {condition}")
        }
        other => return Err(unknown_option(node, "MODE", other)),
    };
    let body = loop_body(cx, node)?;
    Ok(Generated::statement(format!("while {condition}:\n{body}")))
}

fn controls_flow_statements(node: &Node, _cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    match text_or(node, "FLOW", "BREAK") {
        "BREAK" => Ok(Generated::statement("break\n")),
        "CONTINUE" => Ok(Generated::statement("continue\n")),
        other => Err(unknown_option(node, "FLOW", other)),
    }
}
