//! Tree-to-text code generation engine.
//!
//! ## Pipeline
//!
//! 1. [`CodeGenerator::generate`] starts a pass with a fresh [`GenContext`].
//! 2. Each top-level node goes through the statement sequencer (or, for a naked value, the expression emitter).
//!    Handlers looked up in the [`HandlerRegistry`] recurse back into the context to resolve their inputs.
//! 3. [`GenContext::finish`] prepends pooled imports and helper definitions to the body.
//!
//! ## Modules
//!
//! - [`names`]: collision-free identifiers per category
//! - [`definitions`]: deduplicating helper/import pool
//! - [`expressions`]: expression emission and parenthesization
//! - [`statements`]: statement chains, comments, sequencing
//! - [`assembler`]: the top-level driver and final layout
//!
//! ## Examples
//!
//! ```rust
//! use blockgen::codegen::{CodeGenerator, GenConfig, Generated, HandlerRegistry};
//! use blockgen_core::Rank;
//! use blockgen_tree::Node;
//!
//! let handlers = HandlerRegistry::new()
//!     .with_fn("num", |node, _cx| {
//!         let n = node.field("NUM").and_then(|f| f.as_number()).unwrap_or(0.0);
//!         Ok(Generated::expr(n.to_string(), Rank::ATOMIC))
//!     })
//!     .with_fn("show", |node, cx| {
//!         let value = cx.resolve_value_or(node, "VALUE", Rank::NONE, "None")?;
//!         Ok(Generated::statement(format!("show({value})\n")))
//!     });
//!
//! let generator = CodeGenerator::new(handlers, GenConfig::default());
//! let root = Node::statement("s", "show").with_value("VALUE", Node::value("n", "num").with_number("NUM", 3.0));
//! assert_eq!(generator.generate(&[root]).unwrap(), "show(3)\n");
//! ```

pub mod assembler;
pub mod config;
pub mod context;
pub mod definitions;
pub mod errors;
pub mod expressions;
pub mod handlers;
pub mod names;
pub mod statements;

pub use assembler::CodeGenerator;
pub use config::{GenConfig, SequenceStyle};
pub use context::GenContext;
pub use definitions::{DefinitionPool, Fragment, SELF_NAME_PLACEHOLDER};
pub use errors::GenError;
pub use expressions::{Expr, ExprValue};
pub use handlers::{Generated, HandlerRegistry, NodeHandler};
pub use names::{NameCategory, NameRegistry};
