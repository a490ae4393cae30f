//! Precedence vocabulary.
//!
//! This module defines the total order of binding strengths ([`Rank`]) used to decide when an embedded expression
//! must be parenthesized, plus the canonical operator table of the default target with each operator's rank,
//! associativity and fixity.
//!
//! ## Notes
//! - A **lower** rank binds **tighter**. `ATOMIC` never needs parentheses; `NONE` means "no constraint".
//! - Values are scaled by ten so that intermediate steps (`MEMBER` vs `FUNCTION_CALL`) stay integral.
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use blockgen_core::rank::{self, OperatorId, Rank};
//!
//! assert_eq!(rank::from_str("+"), Some(OperatorId::Add));
//! assert_eq!(rank::info_for(OperatorId::Add).rank, Rank::ADDITIVE);
//! ```

use std::fmt;

/// Binding strength of an emitted expression.
///
/// Ordering follows the numeric value: `a < b` means `a` binds tighter than `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(u16);

impl Rank {
    /// Literals, identifiers and already-parenthesized forms.
    pub const ATOMIC: Rank = Rank(0);
    /// Tuple/list/dict displays: `()`, `[]`, `{}`.
    pub const COLLECTION: Rank = Rank(10);
    /// String conversion / string literals.
    pub const STRING_CONVERSION: Rank = Rank(10);
    /// Attribute access and subscription: `a.b`, `a[b]`.
    pub const MEMBER: Rank = Rank(21);
    /// Calls: `f(x)`.
    pub const FUNCTION_CALL: Rank = Rank(22);
    /// `**`
    pub const EXPONENTIATION: Rank = Rank(30);
    /// Unary `+` / `-`.
    pub const UNARY_SIGN: Rank = Rank(40);
    /// `~`
    pub const BITWISE_NOT: Rank = Rank(40);
    /// `*` `/` `//` `%`
    pub const MULTIPLICATIVE: Rank = Rank(50);
    /// `+` `-`
    pub const ADDITIVE: Rank = Rank(60);
    /// `<<` `>>`
    pub const BITWISE_SHIFT: Rank = Rank(70);
    /// `&`
    pub const BITWISE_AND: Rank = Rank(80);
    /// `^`
    pub const BITWISE_XOR: Rank = Rank(90);
    /// `|`
    pub const BITWISE_OR: Rank = Rank(100);
    /// Comparisons, `in`, `is`.
    pub const RELATIONAL: Rank = Rank(110);
    /// `not`
    pub const LOGICAL_NOT: Rank = Rank(120);
    /// `and`
    pub const LOGICAL_AND: Rank = Rank(130);
    /// `or`
    pub const LOGICAL_OR: Rank = Rank(140);
    /// `a if c else b`
    pub const CONDITIONAL: Rank = Rank(150);
    /// `lambda`
    pub const LAMBDA: Rank = Rank(160);
    /// No constraint: the context accepts anything without parentheses.
    pub const NONE: Rank = Rank(990);

    /// Build a rank from a raw value (for target ladders that need extra steps).
    pub const fn new(value: u16) -> Self {
        Rank(value)
    }

    /// Return the raw numeric value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Check whether this rank is one of the two sentinels that never take parentheses.
    pub fn is_sentinel(self) -> bool {
        self == Rank::ATOMIC || self == Rank::NONE
    }

    /// Return a rank one step tighter than `self`.
    ///
    /// Handlers resolve the right operand of a non-associative operator with this, so that an equal-rank child
    /// (`b - c` inside `a - _`) is wrapped.
    pub fn tighter(self) -> Rank {
        Rank(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outer/inner rank pairs that are safe to print without parentheses even though the inner rank is looser.
///
/// `(MEMBER, FUNCTION_CALL)`: `foo().bar` rather than `(foo()).bar`.
pub const DEFAULT_ORDER_OVERRIDES: &[(Rank, Rank)] = &[(Rank::MEMBER, Rank::FUNCTION_CALL)];

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator of the default target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Power,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Add,
    Subtract,
    Negate,

    // Bitwise
    BitNot,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitXor,
    BitOr,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    Is,

    // Logical
    Not,
    And,
    Or,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub rank: Rank,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

impl OperatorInfo {
    /// Rank to resolve the right-hand operand with.
    ///
    /// Left-associative operators need the right operand to bind strictly tighter; right-associative operators
    /// need the same of the left operand (see [`OperatorInfo::left_operand_rank`]).
    pub fn right_operand_rank(&self) -> Rank {
        match self.associativity {
            Associativity::Left | Associativity::None => self.rank.tighter(),
            Associativity::Right => self.rank,
        }
    }

    /// Rank to resolve the left-hand operand with.
    pub fn left_operand_rank(&self) -> Rank {
        match self.associativity {
            Associativity::Right | Associativity::None => self.rank.tighter(),
            Associativity::Left => self.rank,
        }
    }
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Power, "**", Rank::EXPONENTIATION, Associativity::Right, Fixity::Infix, false),
    op(OperatorId::Multiply, "*", Rank::MULTIPLICATIVE, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Divide, "/", Rank::MULTIPLICATIVE, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::FloorDivide, "//", Rank::MULTIPLICATIVE, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Modulo, "%", Rank::MULTIPLICATIVE, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Add, "+", Rank::ADDITIVE, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Subtract, "-", Rank::ADDITIVE, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Negate, "-", Rank::UNARY_SIGN, Associativity::Right, Fixity::Prefix, false),
    // Bitwise
    op(OperatorId::BitNot, "~", Rank::BITWISE_NOT, Associativity::Right, Fixity::Prefix, false),
    op(OperatorId::ShiftLeft, "<<", Rank::BITWISE_SHIFT, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::ShiftRight, ">>", Rank::BITWISE_SHIFT, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::BitAnd, "&", Rank::BITWISE_AND, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::BitXor, "^", Rank::BITWISE_XOR, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::BitOr, "|", Rank::BITWISE_OR, Associativity::Left, Fixity::Infix, false),
    // Comparison
    op(OperatorId::Eq, "==", Rank::RELATIONAL, Associativity::None, Fixity::Infix, false),
    op(OperatorId::NotEq, "!=", Rank::RELATIONAL, Associativity::None, Fixity::Infix, false),
    op(OperatorId::Lt, "<", Rank::RELATIONAL, Associativity::None, Fixity::Infix, false),
    op(OperatorId::LtEq, "<=", Rank::RELATIONAL, Associativity::None, Fixity::Infix, false),
    op(OperatorId::Gt, ">", Rank::RELATIONAL, Associativity::None, Fixity::Infix, false),
    op(OperatorId::GtEq, ">=", Rank::RELATIONAL, Associativity::None, Fixity::Infix, false),
    op(OperatorId::In, "in", Rank::RELATIONAL, Associativity::None, Fixity::Infix, true),
    op(OperatorId::Is, "is", Rank::RELATIONAL, Associativity::None, Fixity::Infix, true),
    // Logical (keyword spellings)
    op(OperatorId::Not, "not", Rank::LOGICAL_NOT, Associativity::Right, Fixity::Prefix, true),
    op(OperatorId::And, "and", Rank::LOGICAL_AND, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::Or, "or", Rank::LOGICAL_OR, Associativity::Left, Fixity::Infix, true),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("INVARIANT: every OperatorId has an OPERATORS entry")
}

/// Resolve an infix operator spelling to its identifier.
///
/// Prefix spellings that collide with an infix one (`-`) resolve to the infix operator; use
/// [`prefix_from_str`] for unary position.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.fixity == Fixity::Infix && o.spelling == spelling)
        .map(|o| o.id)
}

/// Resolve a prefix operator spelling to its identifier.
pub fn prefix_from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.fixity == Fixity::Prefix && o.spelling == spelling)
        .map(|o| o.id)
}

/// Return the rank of an infix operator spelling, if it is known.
pub fn rank_of(spelling: &str) -> Option<Rank> {
    from_str(spelling).map(|id| info_for(id).rank)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    rank: Rank,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        rank,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}
