//! Expression emission and precedence-driven parenthesization.
//!
//! Every expression carries the [`Rank`] of its outermost operator. When a handler embeds a child it states the
//! loosest rank the slot tolerates; a child that binds more loosely than that is wrapped in parentheses. Equal ranks
//! are left bare, so handlers of non-associative operators ask for [`Rank::tighter`] on the side that needs it.
//!
//! ## Notes
//!
//! - Literal numbers are tagged with [`ExprValue::Literal`] so index arithmetic can be folded at generation time
//!   (`resolve_adjusted`).

use blockgen_core::Rank;
use blockgen_core::strings::format_number;
use blockgen_tree::Node;

use super::context::GenContext;
use super::errors::GenError;
use super::handlers::Generated;

/// What is known about an expression's value at generation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExprValue {
    /// A numeric literal whose value is known.
    Literal(f64),
    /// Anything else.
    Text,
}

/// Emitted expression text with its binding rank.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub code: String,
    pub rank: Option<Rank>,
    pub value: ExprValue,
}

impl Expr {
    pub fn new(code: impl Into<String>, rank: Rank) -> Self {
        Self {
            code: code.into(),
            rank: Some(rank),
            value: ExprValue::Text,
        }
    }

    /// Expression text without a rank. Only legal transiently; the emitter rejects it.
    pub fn unranked(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            rank: None,
            value: ExprValue::Text,
        }
    }

    /// Numeric literal. Negative values carry the unary-sign rank.
    pub fn number(n: f64) -> Self {
        let rank = if n < 0.0 { Rank::UNARY_SIGN } else { Rank::ATOMIC };
        Self {
            code: format_number(n),
            rank: Some(rank),
            value: ExprValue::Literal(n),
        }
    }

    /// The empty expression: no code, no binding constraint.
    pub fn empty() -> Self {
        Self::new(String::new(), Rank::NONE)
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn literal(&self) -> Option<f64> {
        match self.value {
            ExprValue::Literal(n) => Some(n),
            ExprValue::Text => None,
        }
    }
}

impl<'a> GenContext<'a> {
    /// Emit a value-producing node.
    ///
    /// A disabled node delegates to its `next` link, or yields [`Expr::empty`] when there is none.
    ///
    /// ## Errors
    /// - [`GenError::TypeMismatch`] if `node` is statement-only.
    /// - [`GenError::UnknownNodeKind`] if no handler is registered.
    /// - [`GenError::MissingPrecedence`] if the handler's expression has no rank.
    /// - [`GenError::InvalidHandlerResult`] if the handler returned statement text.
    pub fn emit_expression(&mut self, node: &Node) -> Result<Expr, GenError> {
        self.emit_expression_at(node, "<top-level>")
    }

    fn emit_expression_at(&mut self, node: &Node, slot: &str) -> Result<Expr, GenError> {
        let mut node = node;
        while node.is_disabled() {
            match node.next() {
                Some(next) => node = next,
                None => return Ok(Expr::empty()),
            }
        }
        if !node.produces_value() {
            return Err(GenError::TypeMismatch {
                id: node.id().clone(),
                kind: node.kind().to_string(),
                slot: slot.to_string(),
                expected: "value",
            });
        }
        match self.dispatch(node)? {
            Generated::Expression(expr) if expr.rank.is_none() => Err(GenError::MissingPrecedence {
                id: node.id().clone(),
                kind: node.kind().to_string(),
            }),
            Generated::Expression(expr) => Ok(expr),
            Generated::Nothing => Ok(Expr::empty()),
            other @ Generated::Statement(_) => Err(GenError::InvalidHandlerResult {
                id: node.id().clone(),
                kind: node.kind().to_string(),
                expected: "an expression",
                found: other.describe(),
            }),
        }
    }

    /// Emit the child at `slot` of `node`, parenthesized for a context that tolerates at most `min_rank`.
    ///
    /// Returns `None` when nothing is connected. A parenthesized result has rank [`Rank::ATOMIC`]; the value tag
    /// is preserved.
    pub fn resolve_expr(&mut self, node: &Node, slot: &str, min_rank: Rank) -> Result<Option<Expr>, GenError> {
        let Some(child) = node.input_target(slot) else {
            return Ok(None);
        };
        let expr = self.emit_expression_at(child, slot)?;
        Ok(Some(self.parenthesize(expr, min_rank)))
    }

    /// Code for the child at `slot`, or the empty string when unconnected.
    pub fn resolve_value(&mut self, node: &Node, slot: &str, min_rank: Rank) -> Result<String, GenError> {
        Ok(self
            .resolve_expr(node, slot, min_rank)?
            .map(|expr| expr.code)
            .unwrap_or_default())
    }

    /// Code for the child at `slot`, or `fallback` when unconnected or empty.
    pub fn resolve_value_or(
        &mut self,
        node: &Node,
        slot: &str,
        min_rank: Rank,
        fallback: &str,
    ) -> Result<String, GenError> {
        let code = self.resolve_value(node, slot, min_rank)?;
        Ok(if code.is_empty() { fallback.to_string() } else { code })
    }

    /// Code for a numeric child adjusted by `delta` and optionally negated.
    ///
    /// Literal children are folded (`4` with delta `-1` becomes `3`); anything else is emitted as an arithmetic
    /// expression. An unconnected slot counts as the literal `0`.
    ///
    /// ## Examples
    /// - literal `1`, delta `-1` → `0`
    /// - `i`, delta `-1` → `i - 1`
    /// - `i`, delta `1`, negated → `-(i + 1)`
    pub fn resolve_adjusted(
        &mut self,
        node: &Node,
        slot: &str,
        delta: i64,
        negate: bool,
        min_rank: Rank,
    ) -> Result<String, GenError> {
        let inner_rank = if delta != 0 {
            Rank::ADDITIVE
        } else if negate {
            Rank::UNARY_SIGN
        } else {
            min_rank
        };
        let at = self
            .resolve_expr(node, slot, inner_rank)?
            .filter(|expr| !expr.is_empty())
            .unwrap_or_else(|| Expr::number(0.0));

        if let Some(n) = at.literal() {
            let mut folded = n + delta as f64;
            if negate {
                folded = -folded;
            }
            return Ok(self.parenthesize(Expr::number(folded), min_rank).code);
        }

        let mut adjusted = match delta {
            0 => at,
            d if d > 0 => Expr::new(format!("{} + {}", at.code, d), Rank::ADDITIVE),
            d => Expr::new(format!("{} - {}", at.code, d.unsigned_abs()), Rank::ADDITIVE),
        };
        if negate {
            adjusted = if delta == 0 {
                // `- -x`, never `--x`
                let sep = if adjusted.code.starts_with('-') { " " } else { "" };
                Expr::new(format!("-{sep}{}", adjusted.code), Rank::UNARY_SIGN)
            } else {
                Expr::new(format!("-({})", adjusted.code), Rank::UNARY_SIGN)
            };
        }
        Ok(self.parenthesize(adjusted, min_rank).code)
    }

    /// Wrap `expr` in parentheses if it binds more loosely than `min_rank` allows.
    pub fn parenthesize(&self, expr: Expr, min_rank: Rank) -> Expr {
        let rank = expr.rank.unwrap_or(Rank::NONE);
        if expr.is_empty() || !self.needs_parens(rank, min_rank) {
            return expr;
        }
        Expr {
            code: format!("({})", expr.code),
            rank: Some(Rank::ATOMIC),
            value: expr.value,
        }
    }

    fn needs_parens(&self, inner: Rank, outer: Rank) -> bool {
        if inner <= outer || inner.is_sentinel() {
            return false;
        }
        !self.config.order_overrides.contains(&(outer, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::config::GenConfig;
    use crate::codegen::handlers::HandlerRegistry;

    /// `num` yields its NUM field as a literal; `sym` yields its NAME field at the rank in its RANK field;
    /// `stmt` is statement text.
    fn registry() -> HandlerRegistry {
        HandlerRegistry::new()
            .with_fn("num", |node, _cx| {
                let n = node.field("NUM").and_then(|f| f.as_number()).unwrap_or(0.0);
                Ok(Expr::number(n).into())
            })
            .with_fn("sym", |node, _cx| {
                let name = node.field("NAME").and_then(|f| f.as_text()).unwrap_or("x").to_string();
                let rank = node.field("RANK").and_then(|f| f.as_number()).unwrap_or(0.0) as u16;
                Ok(Generated::expr(name, Rank::new(rank)))
            })
            .with_fn("unranked", |_node, _cx| Ok(Generated::expr_with("oops", None)))
            .with_fn("bad_value", |_node, _cx| Ok(Generated::statement("pass\n")))
            .with_fn("stmt", |_node, _cx| Ok(Generated::statement("pass\n")))
    }

    fn with_cx<T>(f: impl FnOnce(&mut GenContext<'_>) -> T) -> T {
        let handlers = registry();
        let config = GenConfig::default();
        let mut cx = GenContext::new(&handlers, &config);
        f(&mut cx)
    }

    fn sym(id: &str, name: &str, rank: Rank) -> Node {
        Node::value(id, "sym")
            .with_text("NAME", name)
            .with_number("RANK", rank.value() as f64)
    }

    fn holder(child: Node) -> Node {
        Node::statement("holder", "stmt").with_value("A", child)
    }

    // ========================================
    // Parenthesization
    // ========================================

    #[test]
    fn test_looser_child_is_wrapped() {
        with_cx(|cx| {
            let parent = holder(sym("c", "a + b", Rank::ADDITIVE));
            let code = cx.resolve_value(&parent, "A", Rank::MULTIPLICATIVE).unwrap();
            assert_eq!(code, "(a + b)");
        });
    }

    #[test]
    fn test_equal_rank_is_not_wrapped() {
        with_cx(|cx| {
            let parent = holder(sym("c", "a + b", Rank::ADDITIVE));
            assert_eq!(cx.resolve_value(&parent, "A", Rank::ADDITIVE).unwrap(), "a + b");
        });
    }

    #[test]
    fn test_tighter_child_is_not_wrapped() {
        with_cx(|cx| {
            let parent = holder(sym("c", "a * b", Rank::MULTIPLICATIVE));
            assert_eq!(cx.resolve_value(&parent, "A", Rank::ADDITIVE).unwrap(), "a * b");
        });
    }

    #[test]
    fn test_sentinel_ranks_are_never_wrapped() {
        with_cx(|cx| {
            let parent = holder(sym("c", "whatever", Rank::NONE));
            assert_eq!(cx.resolve_value(&parent, "A", Rank::ATOMIC).unwrap(), "whatever");
        });
    }

    #[test]
    fn test_order_override_suppresses_parens() {
        with_cx(|cx| {
            let parent = holder(sym("c", "f()", Rank::FUNCTION_CALL));
            assert_eq!(cx.resolve_value(&parent, "A", Rank::MEMBER).unwrap(), "f()");
        });
    }

    #[test]
    fn test_wrapped_result_is_atomic_and_keeps_literal_tag() {
        with_cx(|cx| {
            let parent = holder(Node::value("n", "num").with_number("NUM", -2.0));
            let expr = cx.resolve_expr(&parent, "A", Rank::EXPONENTIATION).unwrap().unwrap();
            assert_eq!(expr.code, "(-2)");
            assert_eq!(expr.rank, Some(Rank::ATOMIC));
            assert_eq!(expr.literal(), Some(-2.0));
        });
    }

    // ========================================
    // Slots and fallbacks
    // ========================================

    #[test]
    fn test_unconnected_slot() {
        with_cx(|cx| {
            let parent = Node::statement("p", "stmt");
            assert_eq!(cx.resolve_value(&parent, "A", Rank::NONE).unwrap(), "");
            assert_eq!(cx.resolve_value_or(&parent, "A", Rank::NONE, "None").unwrap(), "None");
            assert!(cx.resolve_expr(&parent, "A", Rank::NONE).unwrap().is_none());
        });
    }

    #[test]
    fn test_disabled_child_yields_empty_expression() {
        with_cx(|cx| {
            let parent = holder(sym("c", "x", Rank::ATOMIC).disabled());
            assert_eq!(cx.resolve_value_or(&parent, "A", Rank::NONE, "0").unwrap(), "0");
        });
    }

    // ========================================
    // Errors
    // ========================================

    #[test]
    fn test_statement_child_is_type_mismatch() {
        with_cx(|cx| {
            let parent = holder(Node::statement("s", "stmt"));
            let err = cx.resolve_value(&parent, "A", Rank::NONE).unwrap_err();
            match err {
                GenError::TypeMismatch { id, slot, expected, .. } => {
                    assert_eq!(id.as_str(), "s");
                    assert_eq!(slot, "A");
                    assert_eq!(expected, "value");
                }
                other => panic!("unexpected {:?}", other),
            }
        });
    }

    #[test]
    fn test_missing_rank_is_rejected() {
        with_cx(|cx| {
            let err = cx.emit_expression(&Node::value("u", "unranked")).unwrap_err();
            assert!(matches!(err, GenError::MissingPrecedence { .. }));
        });
    }

    #[test]
    fn test_statement_text_from_value_handler_is_rejected() {
        with_cx(|cx| {
            let err = cx.emit_expression(&Node::value("b", "bad_value")).unwrap_err();
            assert!(matches!(err, GenError::InvalidHandlerResult { found: "statement text", .. }));
        });
    }

    #[test]
    fn test_unknown_kind_in_value_position() {
        with_cx(|cx| {
            let err = cx.emit_expression(&Node::value("z", "zzz")).unwrap_err();
            assert!(matches!(err, GenError::UnknownNodeKind { .. }));
        });
    }

    // ========================================
    // Adjusted indices
    // ========================================

    #[test]
    fn test_adjusted_literal_is_folded() {
        with_cx(|cx| {
            let parent = holder(Node::value("n", "num").with_number("NUM", 4.0));
            assert_eq!(cx.resolve_adjusted(&parent, "A", -1, false, Rank::NONE).unwrap(), "3");
            assert_eq!(cx.resolve_adjusted(&parent, "A", 0, true, Rank::NONE).unwrap(), "-4");
        });
    }

    #[test]
    fn test_adjusted_negative_fold_is_wrapped_when_needed() {
        with_cx(|cx| {
            let parent = holder(Node::value("n", "num").with_number("NUM", 1.0));
            assert_eq!(cx.resolve_adjusted(&parent, "A", 0, true, Rank::ATOMIC).unwrap(), "(-1)");
        });
    }

    #[test]
    fn test_adjusted_symbolic_index() {
        with_cx(|cx| {
            let parent = holder(sym("i", "i", Rank::ATOMIC));
            assert_eq!(cx.resolve_adjusted(&parent, "A", -1, false, Rank::NONE).unwrap(), "i - 1");
            assert_eq!(cx.resolve_adjusted(&parent, "A", 2, false, Rank::NONE).unwrap(), "i + 2");
            assert_eq!(cx.resolve_adjusted(&parent, "A", 1, true, Rank::NONE).unwrap(), "-(i + 1)");
            assert_eq!(cx.resolve_adjusted(&parent, "A", 0, true, Rank::NONE).unwrap(), "-i");
        });
    }

    #[test]
    fn test_adjusted_negation_of_signed_child_keeps_space() {
        with_cx(|cx| {
            let parent = holder(sym("s", "-x", Rank::UNARY_SIGN));
            assert_eq!(cx.resolve_adjusted(&parent, "A", 0, true, Rank::NONE).unwrap(), "- -x");
        });
    }

    #[test]
    fn test_adjusted_wraps_loose_child_and_result() {
        with_cx(|cx| {
            let parent = holder(sym("c", "a or b", Rank::LOGICAL_OR));
            let code = cx.resolve_adjusted(&parent, "A", -1, false, Rank::MULTIPLICATIVE).unwrap();
            assert_eq!(code, "((a or b) - 1)");
        });
    }

    #[test]
    fn test_adjusted_unconnected_slot_folds_default() {
        with_cx(|cx| {
            let parent = Node::statement("p", "stmt");
            assert_eq!(cx.resolve_adjusted(&parent, "A", 1, false, Rank::NONE).unwrap(), "1");
        });
    }
}
