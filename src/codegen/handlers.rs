//! Node handlers and the registry that maps node kinds to them.
//!
//! The engine knows nothing about individual node kinds. A handler receives the node plus the pass context and
//! returns what the node contributes: statement text, an expression, or nothing.

use std::collections::HashMap;
use std::fmt;

use blockgen_core::Rank;
use blockgen_tree::Node;

use super::context::GenContext;
use super::errors::GenError;
use super::expressions::Expr;

/// What a handler produced for one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// Statement text, normally ending with a newline.
    Statement(String),
    /// A value-producing expression with its rank.
    Expression(Expr),
    /// The handler took care of its own output (e.g. registered a definition) and contributes nothing here.
    Nothing,
}

impl Generated {
    pub fn statement(code: impl Into<String>) -> Self {
        Generated::Statement(code.into())
    }

    pub fn expr(code: impl Into<String>, rank: Rank) -> Self {
        Generated::Expression(Expr::new(code, rank))
    }

    /// Build an expression whose rank comes from a lookup that may fail.
    ///
    /// A `None` rank is rejected by the emitter with [`GenError::MissingPrecedence`].
    pub fn expr_with(code: impl Into<String>, rank: Option<Rank>) -> Self {
        Generated::Expression(Expr {
            rank,
            ..Expr::unranked(code)
        })
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Generated::Statement(_) => "statement text",
            Generated::Expression(_) => "an expression",
            Generated::Nothing => "nothing",
        }
    }
}

impl From<Expr> for Generated {
    fn from(expr: Expr) -> Self {
        Generated::Expression(expr)
    }
}

/// Generates code for one node kind.
pub trait NodeHandler: Send + Sync {
    fn generate(&self, node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError>;
}

impl<F> NodeHandler for F
where
    F: Fn(&Node, &mut GenContext<'_>) -> Result<Generated, GenError> + Send + Sync,
{
    fn generate(&self, node: &Node, cx: &mut GenContext<'_>) -> Result<Generated, GenError> {
        self(node, cx)
    }
}

/// Map from node kind to handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn NodeHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler value for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: impl Into<String>, handler: impl NodeHandler + 'static) -> &mut Self {
        self.handlers.insert(kind.into(), Box::new(handler));
        self
    }

    /// Register a function or closure for `kind`, replacing any previous one.
    pub fn register_fn<F>(&mut self, kind: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Node, &mut GenContext<'_>) -> Result<Generated, GenError> + Send + Sync + 'static,
    {
        self.handlers.insert(kind.into(), Box::new(f));
        self
    }

    /// Builder form of [`HandlerRegistry::register_fn`].
    pub fn with_fn<F>(mut self, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Node, &mut GenContext<'_>) -> Result<Generated, GenError> + Send + Sync + 'static,
    {
        self.register_fn(kind, f);
        self
    }

    pub fn get(&self, kind: &str) -> Option<&dyn NodeHandler> {
        self.handlers.get(kind).map(|h| h.as_ref())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry").field("kinds", &self.kinds()).finish()
    }
}
