//! Visual-program node tree for the blockgen code generator: node model, builder API and JSON loader.
//!
//! ## Notes
//! - This crate is "tree-only": it knows nothing about handlers, precedence or emitted text.
//! - The tree is read-only input to code generation; builders exist for tests and embedding callers.
//!
//! ## Examples
//! ```rust
//! use blockgen_tree::{load_program, Node};
//!
//! let program = load_program(r#"{ "nodes": [ { "id": "a", "kind": "text_print" } ] }"#).unwrap();
//! assert_eq!(program.nodes[0], Node::statement("a", "text_print"));
//! ```

pub mod load;
pub mod node;

pub use load::{LoadError, Program, load_program};
pub use node::{FieldValue, Input, InputKind, Node, NodeId};
