//! Literals, variables, lists and printing.

use blockgen_core::Rank;
use blockgen_tree::Node;

use super::{numbered_inputs, required_text, text_or, unknown_option};
use crate::codegen::{Expr, GenContext, GenError, Generated, HandlerRegistry, NameCategory};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry
        .register_fn("math_number", math_number)
        .register_fn("text", text)
        .register_fn("logic_boolean", logic_boolean)
        .register_fn("logic_null", |_node, _cx| Ok(Generated::expr("None", Rank::ATOMIC)))
        .register_fn("variables_get", variables_get)
        .register_fn("variables_set", variables_set)
        .register_fn("lists_create_with", lists_create_with)
        .register_fn("lists_get_index", lists_get_index)
        .register_fn("text_print", text_print);
}

fn math_number(node: &Node, _cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let n = node
        .field("NUM")
        .and_then(|value| value.as_number())
        .ok_or_else(|| GenError::handler(node, "missing numeric field `NUM`"))?;
    if n.is_nan() {
        return Ok(Generated::expr("float('nan')", Rank::FUNCTION_CALL));
    }
    if n.is_infinite() {
        return Ok(if n > 0.0 {
            Generated::expr("float('inf')", Rank::FUNCTION_CALL)
        } else {
            Generated::expr("-float('inf')", Rank::UNARY_SIGN)
        });
    }
    Ok(Expr::number(n).into())
}

fn text(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let raw = text_or(node, "TEXT", "");
    if raw.contains('\n') {
        return Ok(Generated::expr(cx.quote_multiline(raw), Rank::ADDITIVE));
    }
    Ok(Generated::expr(cx.quote(raw), Rank::ATOMIC))
}

fn logic_boolean(node: &Node, _cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let value = node
        .field("BOOL")
        .and_then(|value| value.as_bool())
        .ok_or_else(|| GenError::handler(node, "missing boolean field `BOOL`"))?;
    Ok(Generated::expr(if value { "True" } else { "False" }, Rank::ATOMIC))
}

/// Variable name for the `VAR` field, keyed on the user-visible name.
fn variable_name(node: &Node, cx: &mut GenContext<'_>) -> Result<String, GenError> {
    let var = required_text(node, "VAR")?;
    Ok(cx.allocate(var, var, NameCategory::Variable))
}

fn variables_get(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let name = variable_name(node, cx)?;
    Ok(Generated::expr(name, Rank::ATOMIC))
}

fn variables_set(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let name = variable_name(node, cx)?;
    let value = cx.resolve_value_or(node, "VALUE", Rank::NONE, "0")?;
    Ok(Generated::statement(format!("{name} = {value}\n")))
}

fn lists_create_with(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let mut items = Vec::new();
    for slot in numbered_inputs(node, "ADD") {
        items.push(cx.resolve_value_or(node, &slot, Rank::NONE, "None")?);
    }
    Ok(Generated::expr(format!("[{}]", items.join(", ")), Rank::ATOMIC))
}

/// `list[i]` with one-based `FROM_START` and `FROM_END` positions.
fn lists_get_index(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let mode = text_or(node, "MODE", "GET");
    if mode != "GET" {
        return Err(unknown_option(node, "MODE", mode));
    }
    let list = cx.resolve_value_or(node, "VALUE", Rank::MEMBER, "[]")?;
    let position = text_or(node, "WHERE", "FROM_START");
    let index = match position {
        "FIRST" => "0".to_string(),
        "LAST" => "-1".to_string(),
        "FROM_START" => cx.resolve_adjusted(node, "AT", -1, false, Rank::NONE)?,
        "FROM_END" => cx.resolve_adjusted(node, "AT", 0, true, Rank::NONE)?,
        "RANDOM" => {
            cx.add_import("import_random", "import random");
            return Ok(Generated::expr(format!("random.choice({list})"), Rank::FUNCTION_CALL));
        }
        other => return Err(unknown_option(node, "WHERE", other)),
    };
    Ok(Generated::expr(format!("{list}[{index}]"), Rank::MEMBER))
}

fn text_print(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let message = cx.resolve_value_or(node, "TEXT", Rank::NONE, "''")?;
    Ok(Generated::statement(format!("print({message})\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{CodeGenerator, GenConfig};
    use crate::library::standard_handlers;

    fn generate(roots: &[Node]) -> String {
        CodeGenerator::new(standard_handlers(), GenConfig::default())
            .generate(roots)
            .unwrap()
    }

    fn num(id: &str, n: f64) -> Node {
        Node::value(id, "math_number").with_number("NUM", n)
    }

    fn var(id: &str, name: &str) -> Node {
        Node::value(id, "variables_get").with_text("VAR", name)
    }

    #[test]
    fn test_set_and_print() {
        let root = Node::statement("s", "variables_set")
            .with_text("VAR", "total")
            .with_value("VALUE", num("n", 3.0))
            .with_next(Node::statement("p", "text_print").with_value("TEXT", var("v", "total")));
        assert_eq!(generate(&[root]), "seq(\n    total = 3,\n    print(total)\n)\n");
    }

    #[test]
    fn test_reserved_variable_name_is_renamed() {
        let root = Node::statement("s", "variables_set")
            .with_text("VAR", "print")
            .with_value("VALUE", Node::value("t", "text").with_text("TEXT", "hi"));
        assert_eq!(generate(&[root]), "print2 = 'hi'\n");
    }

    #[test]
    fn test_imported_module_and_sequence_call_are_not_shadowed() {
        let root = Node::statement("s1", "variables_set")
            .with_text("VAR", "math")
            .with_value(
                "VALUE",
                Node::value("r", "math_single").with_text("OP", "ROOT").with_value("NUM", num("n", 2.0)),
            )
            .with_next(
                Node::statement("s2", "variables_set")
                    .with_text("VAR", "seq")
                    .with_value("VALUE", num("m", 1.0)),
            );
        assert_eq!(
            generate(&[root]),
            "import math\n\nseq(\n    math2 = math.sqrt(2),\n    seq2 = 1\n)\n"
        );
    }

    #[test]
    fn test_multiline_text() {
        let root = Node::statement("p", "text_print").with_value("TEXT", Node::value("t", "text").with_text("TEXT", "a\nb"));
        assert_eq!(generate(&[root]), "print('a' + '\\n' + 'b')\n");
    }

    #[test]
    fn test_list_literal_with_empty_slot() {
        use blockgen_tree::InputKind;

        let list = Node::value("l", "lists_create_with")
            .with_value("ADD0", num("a", 1.0))
            .with_empty_input("ADD1", InputKind::Value)
            .with_value("ADD2", Node::value("b", "logic_boolean").with_text("BOOL", "TRUE"));
        assert_eq!(generate(&[list]), "[1, None, True]\n");
    }

    #[test]
    fn test_get_index_folds_literal_position() {
        let get = Node::value("g", "lists_get_index")
            .with_text("WHERE", "FROM_START")
            .with_value("VALUE", var("v", "items"))
            .with_value("AT", num("n", 2.0));
        assert_eq!(generate(&[get]), "items[1]\n");
    }

    #[test]
    fn test_get_index_symbolic_positions() {
        let from_start = Node::value("g1", "lists_get_index")
            .with_value("VALUE", var("v1", "items"))
            .with_value("AT", var("i1", "i"));
        let from_end = Node::value("g2", "lists_get_index")
            .with_text("WHERE", "FROM_END")
            .with_value("VALUE", var("v2", "items"))
            .with_value("AT", var("i2", "i"));
        assert_eq!(generate(&[from_start, from_end]), "items[i - 1]\n\nitems[-i]\n");
    }

    #[test]
    fn test_get_random_imports_random() {
        let get = Node::value("g", "lists_get_index")
            .with_text("WHERE", "RANDOM")
            .with_value("VALUE", var("v", "items"));
        assert_eq!(generate(&[get]), "import random\n\nrandom.choice(items)\n");
    }

    #[test]
    fn test_missing_field_is_handler_error() {
        let err = CodeGenerator::new(standard_handlers(), GenConfig::default())
            .generate(&[Node::value("n", "math_number")])
            .unwrap_err();
        assert!(matches!(err, GenError::Handler { .. }));
    }
}
