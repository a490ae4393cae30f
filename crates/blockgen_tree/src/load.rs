//! Load a visual program from JSON.
//!
//! The document shape is `{ "nodes": [ <top-level node>, ... ] }`; top-level order is the order in which code is
//! generated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Deserializer;
use thiserror::Error;

use crate::node::{Node, NodeId};

/// A whole program: the ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// Errors that occur while loading a program.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed program: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node id `{0}` is used more than once")]
    DuplicateId(NodeId),
}

impl Program {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Check that every node identity in the program is unique.
    pub fn validate(&self) -> Result<(), LoadError> {
        let mut seen: HashSet<&NodeId> = HashSet::new();
        let mut duplicate: Option<NodeId> = None;
        for root in &self.nodes {
            root.walk(|node| {
                if duplicate.is_none() && !seen.insert(node.id()) {
                    duplicate = Some(node.id().clone());
                }
            });
        }
        match duplicate {
            Some(id) => Err(LoadError::DuplicateId(id)),
            None => Ok(()),
        }
    }

    /// Count every node in the program.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        for root in &self.nodes {
            root.walk(|_| count += 1);
        }
        count
    }
}

/// Parse and validate a program from JSON text.
///
/// Every `next` link nests one level deeper in the document, so the parser runs without serde_json's recursion
/// limit and grows the stack on demand instead.
///
/// ## Errors
/// - [`LoadError::Json`] if the text is not a well-formed program document.
/// - [`LoadError::DuplicateId`] if two nodes share an identity.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn load_program(source: &str) -> Result<Program, LoadError> {
    let mut de = Deserializer::from_str(source);
    de.disable_recursion_limit();
    let program = Program::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    program.validate()?;
    tracing::debug!(top_level = program.nodes.len(), total = program.node_count(), "loaded program");
    Ok(program)
}
