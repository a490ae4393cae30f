//! Arithmetic and logic operators.
//!
//! Binary operators take their rank and operand ranks from the shared operator table, so associativity is handled
//! in one place.

use blockgen_core::Rank;
use blockgen_core::rank::{OperatorId, info_for};
use blockgen_tree::Node;

use super::{text_or, unknown_option};
use crate::codegen::{GenContext, GenError, Generated, HandlerRegistry};

pub(super) fn register(registry: &mut HandlerRegistry) {
    registry
        .register_fn("math_arithmetic", math_arithmetic)
        .register_fn("math_single", math_single)
        .register_fn("math_on_list", math_on_list)
        .register_fn("logic_compare", logic_compare)
        .register_fn("logic_operation", logic_operation)
        .register_fn("logic_negate", logic_negate)
        .register_fn("logic_ternary", logic_ternary);
}

/// `A <op> B` for an infix operator, with missing operands replaced by `fallback`.
fn binary(node: &Node, cx: &mut GenContext<'_>, id: OperatorId, fallback: &str) -> Result<Generated, GenError> {
    let info = info_for(id);
    let a = cx.resolve_value_or(node, "A", info.left_operand_rank(), fallback)?;
    let b = cx.resolve_value_or(node, "B", info.right_operand_rank(), fallback)?;
    Ok(Generated::expr(format!("{a} {} {b}", info.spelling), info.rank))
}

fn math_arithmetic(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let id = match text_or(node, "OP", "ADD") {
        "ADD" => OperatorId::Add,
        "MINUS" => OperatorId::Subtract,
        "MULTIPLY" => OperatorId::Multiply,
        "DIVIDE" => OperatorId::Divide,
        "POWER" => OperatorId::Power,
        other => return Err(unknown_option(node, "OP", other)),
    };
    binary(node, cx, id, "0")
}

fn math_single(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let op = text_or(node, "OP", "ROOT");
    match op {
        "NEG" => {
            let arg = cx.resolve_value_or(node, "NUM", Rank::UNARY_SIGN, "0")?;
            // keep `- -x` from reading as a decrement
            let arg = if arg.starts_with('-') { format!(" {arg}") } else { arg };
            return Ok(Generated::expr(format!("-{arg}"), Rank::UNARY_SIGN));
        }
        "POW10" => {
            let power = info_for(OperatorId::Power);
            let arg = cx.resolve_value_or(node, "NUM", power.right_operand_rank(), "0")?;
            return Ok(Generated::expr(format!("10 ** {arg}"), power.rank));
        }
        _ => {}
    }
    let function = match op {
        "ABS" => "abs",
        "ROOT" => "math.sqrt",
        "LN" => "math.log",
        "LOG10" => "math.log10",
        "EXP" => "math.exp",
        other => return Err(unknown_option(node, "OP", other)),
    };
    if function.starts_with("math.") {
        cx.add_import("import_math", "import math");
    }
    let arg = cx.resolve_value_or(node, "NUM", Rank::NONE, "0")?;
    Ok(Generated::expr(format!("{function}({arg})"), Rank::FUNCTION_CALL))
}

fn math_on_list(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let list = cx.resolve_value_or(node, "LIST", Rank::NONE, "[]")?;
    let function = match text_or(node, "OP", "SUM") {
        "SUM" => "sum".to_string(),
        "MIN" => "min".to_string(),
        "MAX" => "max".to_string(),
        "AVERAGE" => cx.provide_definition("math_mean", |cx, name| {
            cx.add_import("import_numbers", "from numbers import Number");
            Ok(vec![
                format!("def {name}(values):"),
                "    numbers = [e for e in values if isinstance(e, Number)]".to_string(),
                "    if not numbers:".to_string(),
                "        return None".to_string(),
                "    return float(sum(numbers)) / len(numbers)".to_string(),
            ])
        })?,
        other => return Err(unknown_option(node, "OP", other)),
    };
    Ok(Generated::expr(format!("{function}({list})"), Rank::FUNCTION_CALL))
}

fn logic_compare(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let id = match text_or(node, "OP", "EQ") {
        "EQ" => OperatorId::Eq,
        "NEQ" => OperatorId::NotEq,
        "LT" => OperatorId::Lt,
        "LTE" => OperatorId::LtEq,
        "GT" => OperatorId::Gt,
        "GTE" => OperatorId::GtEq,
        other => return Err(unknown_option(node, "OP", other)),
    };
    binary(node, cx, id, "0")
}

/// `and` / `or`. A single missing operand becomes the operator's identity (`True` for `and`, `False` for `or`);
/// both missing gives `False`.
fn logic_operation(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let (id, identity) = match text_or(node, "OP", "AND") {
        "AND" => (OperatorId::And, "True"),
        "OR" => (OperatorId::Or, "False"),
        other => return Err(unknown_option(node, "OP", other)),
    };
    let info = info_for(id);
    let a = cx.resolve_value(node, "A", info.left_operand_rank())?;
    let b = cx.resolve_value(node, "B", info.right_operand_rank())?;
    let (a, b) = match (a.is_empty(), b.is_empty()) {
        (true, true) => ("False".to_string(), "False".to_string()),
        (true, false) => (identity.to_string(), b),
        (false, true) => (a, identity.to_string()),
        (false, false) => (a, b),
    };
    Ok(Generated::expr(format!("{a} {} {b}", info.spelling), info.rank))
}

fn logic_negate(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let info = info_for(OperatorId::Not);
    let operand = cx.resolve_value_or(node, "BOOL", info.rank, "True")?;
    Ok(Generated::expr(format!("not {operand}"), info.rank))
}

/// `THEN if IF else ELSE`. The condition and the `then` branch cannot themselves be unparenthesized conditionals.
fn logic_ternary(node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
    let condition = cx.resolve_value_or(node, "IF", Rank::CONDITIONAL.tighter(), "False")?;
    let then = cx.resolve_value_or(node, "THEN", Rank::CONDITIONAL.tighter(), "None")?;
    let otherwise = cx.resolve_value_or(node, "ELSE", Rank::CONDITIONAL, "None")?;
    Ok(Generated::expr(format!("{then} if {condition} else {otherwise}"), Rank::CONDITIONAL))
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

    fn arith(id: &str, op: &str, a: Node, b: Node) -> Node {
        Node::value(id, "math_arithmetic")
            .with_text("OP", op)
            .with_value("A", a)
            .with_value("B", b)
    }

    // ========================================
    // Arithmetic
    // ========================================

    #[test]
    fn test_sum_times_value_is_parenthesized() {
        let sum = arith("s", "ADD", var("a", "a"), var("b", "b"));
        let product = arith("p", "MULTIPLY", sum, var("c", "c"));
        assert_eq!(generate(&[product]), "(a + b) * c\n");
    }

    #[test]
    fn test_left_associative_chain_stays_bare() {
        let inner = arith("i", "MINUS", var("a", "a"), var("b", "b"));
        let outer = arith("o", "MINUS", inner, var("c", "c"));
        assert_eq!(generate(&[outer]), "a - b - c\n");
    }

    #[test]
    fn test_right_nested_subtraction_is_parenthesized() {
        let inner = arith("i", "MINUS", var("b", "b"), var("c", "c"));
        let outer = arith("o", "MINUS", var("a", "a"), inner);
        assert_eq!(generate(&[outer]), "a - (b - c)\n");
    }

    #[test]
    fn test_power_is_right_associative() {
        let right = arith("r", "POWER", var("b", "b"), var("c", "c"));
        let left = arith("l", "POWER", var("a", "a"), var("b2", "b"));
        assert_eq!(
            generate(&[
                arith("o1", "POWER", var("a", "a"), right),
                arith("o2", "POWER", left, var("c", "c")),
            ]),
            "a ** b ** c\n\n(a ** b) ** c\n"
        );
    }

    #[test]
    fn test_negative_literal_base_is_parenthesized() {
        let pow = arith("p", "POWER", num("n", -2.0), num("m", 2.0));
        assert_eq!(generate(&[pow]), "(-2) ** 2\n");
    }

    #[test]
    fn test_missing_operands_default_to_zero() {
        let node = Node::value("a", "math_arithmetic").with_text("OP", "ADD");
        assert_eq!(generate(&[node]), "0 + 0\n");
    }

    #[test]
    fn test_unknown_op_is_handler_error() {
        let node = Node::value("a", "math_arithmetic").with_text("OP", "MODULO");
        let err = CodeGenerator::new(standard_handlers(), GenConfig::default())
            .generate(&[node])
            .unwrap_err();
        assert!(err.to_string().contains("unknown OP `MODULO`"));
    }

    // ========================================
    // Single-operand math
    // ========================================

    #[test]
    fn test_root_imports_math_once() {
        let a = Node::value("r1", "math_single").with_text("OP", "ROOT").with_value("NUM", num("n", 2.0));
        let b = Node::value("r2", "math_single").with_text("OP", "ROOT").with_value("NUM", num("m", 9.0));
        assert_eq!(generate(&[a, b]), "import math\n\nmath.sqrt(2)\n\nmath.sqrt(9)\n");
    }

    #[test]
    fn test_negate_negative_literal_keeps_space() {
        let neg = Node::value("n", "math_single").with_text("OP", "NEG").with_value("NUM", num("m", -3.0));
        assert_eq!(generate(&[neg]), "- -3\n");
    }

    #[test]
    fn test_negate_sum_is_parenthesized() {
        let sum = arith("s", "ADD", var("a", "a"), var("b", "b"));
        let neg = Node::value("n", "math_single").with_text("OP", "NEG").with_value("NUM", sum);
        assert_eq!(generate(&[neg]), "-(a + b)\n");
    }

    #[test]
    fn test_average_pools_one_helper_and_import() {
        let list = || var("l", "scores");
        let avg = |id: &str| {
            Node::value(id, "math_on_list")
                .with_text("OP", "AVERAGE")
                .with_value("LIST", list())
        };
        let out = generate(&[avg("a1"), avg("a2")]);
        assert_eq!(
            out,
            "from numbers import Number\n\n\
             def math_mean(values):\n    \
             numbers = [e for e in values if isinstance(e, Number)]\n    \
             if not numbers:\n        \
             return None\n    \
             return float(sum(numbers)) / len(numbers)\n\n\
             math_mean(scores)\n\n\
             math_mean(scores)\n"
        );
    }

    // ========================================
    // Logic
    // ========================================

    #[test]
    fn test_comparison_operands_are_not_chained() {
        let inner = Node::value("i", "logic_compare")
            .with_text("OP", "LT")
            .with_value("A", var("a", "a"))
            .with_value("B", var("b", "b"));
        let outer = Node::value("o", "logic_compare")
            .with_text("OP", "EQ")
            .with_value("A", inner)
            .with_value("B", Node::value("t", "logic_boolean").with_text("BOOL", "TRUE"));
        assert_eq!(generate(&[outer]), "(a < b) == True\n");
    }

    #[test]
    fn test_logic_operation_identities() {
        let one_sided = Node::value("o", "logic_operation")
            .with_text("OP", "AND")
            .with_value("A", var("a", "a"));
        let empty = Node::value("e", "logic_operation").with_text("OP", "OR");
        assert_eq!(generate(&[one_sided, empty]), "a and True\n\nFalse or False\n");
    }

    #[test]
    fn test_not_over_and_is_parenthesized() {
        let and = Node::value("a", "logic_operation")
            .with_text("OP", "AND")
            .with_value("A", var("x", "x"))
            .with_value("B", var("y", "y"));
        let not = Node::value("n", "logic_negate").with_value("BOOL", and);
        assert_eq!(generate(&[not]), "not (x and y)\n");
    }

    #[test]
    fn test_nested_ternary_in_condition_is_parenthesized() {
        let inner = Node::value("i", "logic_ternary")
            .with_value("IF", var("c", "c"))
            .with_value("THEN", var("a", "a"))
            .with_value("ELSE", var("b", "b"));
        let outer = Node::value("o", "logic_ternary")
            .with_value("IF", inner)
            .with_value("THEN", num("one", 1.0))
            .with_value("ELSE", num("two", 2.0));
        assert_eq!(generate(&[outer]), "1 if (a if c else b) else 2\n");
    }
}
