#![forbid(unsafe_code)]
//! blockgen: tree-to-text code generation for visual block programs.
//!
//! This crate provides the generation engine (`codegen`), a reference handler library for a Python-flavoured
//! target (`library`), and the command line front end (`cli`). The node tree model lives in `blockgen_tree`; the
//! precedence ladder, reserved words and string helpers live in `blockgen_core`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod cli;
pub mod codegen;
pub mod library;

pub use codegen::{
    CodeGenerator, Expr, ExprValue, GenConfig, GenContext, GenError, Generated, HandlerRegistry, NameCategory,
    NodeHandler, SequenceStyle,
};
pub use library::standard_handlers;

pub use blockgen_core::Rank;
pub use blockgen_tree::{LoadError, Node, Program, load_program};
