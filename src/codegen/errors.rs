//! Define error types for node-tree → source emission.
//!
//! Every variant is fatal: the pass aborts and no partial output is returned. Each carries the identity and kind of
//! the node that triggered it so callers can point at the offending block.
//!
//! ## Notes
//!
//! - These represent problems in the handler registry or a malformed input tree, not runtime conditions a caller is
//!   expected to recover from.

use miette::Diagnostic;
use thiserror::Error;

use blockgen_tree::NodeId;

/// Error during code generation.
#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    #[error("no handler registered for node kind `{kind}` (node `{id}`)")]
    #[diagnostic(
        code(blockgen::unknown_kind),
        help("register a handler for this kind in the HandlerRegistry passed to the generator")
    )]
    UnknownNodeKind { id: NodeId, kind: String },

    #[error("handler for `{kind}` (node `{id}`) returned {found}, expected {expected}")]
    #[diagnostic(
        code(blockgen::invalid_handler_result),
        help("value nodes must return an expression and statement nodes must return statement text")
    )]
    InvalidHandlerResult {
        id: NodeId,
        kind: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("node `{id}` (`{kind}`) used at `{slot}` is not a {expected} node")]
    #[diagnostic(code(blockgen::type_mismatch))]
    TypeMismatch {
        id: NodeId,
        kind: String,
        slot: String,
        expected: &'static str,
    },

    #[error("handler for `{kind}` (node `{id}`) returned an expression without a precedence rank")]
    #[diagnostic(
        code(blockgen::missing_precedence),
        help("every expression must declare the rank of its outermost operator")
    )]
    MissingPrecedence { id: NodeId, kind: String },

    #[error("node `{id}` (`{kind}`): {message}")]
    #[diagnostic(code(blockgen::handler))]
    Handler { id: NodeId, kind: String, message: String },
}

impl GenError {
    /// Build a handler-reported error for `node`.
    pub fn handler(node: &blockgen_tree::Node, message: impl Into<String>) -> Self {
        GenError::Handler {
            id: node.id().clone(),
            kind: node.kind().to_string(),
            message: message.into(),
        }
    }

    /// Identity of the node that caused the error.
    pub fn node_id(&self) -> &NodeId {
        match self {
            GenError::UnknownNodeKind { id, .. }
            | GenError::InvalidHandlerResult { id, .. }
            | GenError::TypeMismatch { id, .. }
            | GenError::MissingPrecedence { id, .. }
            | GenError::Handler { id, .. } => id,
        }
    }

    /// Kind of the node that caused the error.
    pub fn kind(&self) -> &str {
        match self {
            GenError::UnknownNodeKind { kind, .. }
            | GenError::InvalidHandlerResult { kind, .. }
            | GenError::TypeMismatch { kind, .. }
            | GenError::MissingPrecedence { kind, .. }
            | GenError::Handler { kind, .. } => kind,
        }
    }
}
