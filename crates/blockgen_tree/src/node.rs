//! Node tree definitions.
//!
//! A [`Node`] is one element of a visual program: either a value-producing node (an expression that plugs into a
//! value input) or a statement node (chained through `next` and nested in statement inputs). The tree is owned by
//! the caller and is never mutated by code generation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literal value stored in a node field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Return the field as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Return the field as a number. Numeric text is accepted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Bool(_) => None,
        }
    }

    /// Return the field as a boolean. `"TRUE"`/`"FALSE"` text is accepted.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            FieldValue::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Whether an input slot accepts a value subtree or a statement chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Value,
    Statement,
}

/// A named input slot and its optional connected child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    pub kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Node>>,
}

/// One element of the visual program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldValue>,
    /// Input slots in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Input>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    /// `true` for value-producing nodes.
    #[serde(default)]
    pub output: bool,
}

impl Node {
    /// Create a statement node with no fields, inputs or links.
    pub fn statement(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            kind: kind.into(),
            fields: BTreeMap::new(),
            inputs: Vec::new(),
            next: None,
            comment: None,
            disabled: false,
            output: false,
        }
    }

    /// Create a value-producing node with no fields or inputs.
    pub fn value(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            output: true,
            ..Self::statement(id, kind)
        }
    }

    // ---- builder -----------------------------------------------------------

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_field(name, FieldValue::Text(text.into()))
    }

    pub fn with_number(self, name: impl Into<String>, n: f64) -> Self {
        self.with_field(name, FieldValue::Number(n))
    }

    /// Add a value input, connected to `target`.
    pub fn with_value(mut self, name: impl Into<String>, target: Node) -> Self {
        self.inputs.push(Input {
            name: name.into(),
            kind: InputKind::Value,
            target: Some(Box::new(target)),
        });
        self
    }

    /// Add a statement input, connected to the chain starting at `target`.
    pub fn with_statements(mut self, name: impl Into<String>, target: Node) -> Self {
        self.inputs.push(Input {
            name: name.into(),
            kind: InputKind::Statement,
            target: Some(Box::new(target)),
        });
        self
    }

    /// Add an unconnected input slot.
    pub fn with_empty_input(mut self, name: impl Into<String>, kind: InputKind) -> Self {
        self.inputs.push(Input {
            name: name.into(),
            kind,
            target: None,
        });
        self
    }

    pub fn with_next(mut self, next: Node) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    // ---- read-only contract ------------------------------------------------

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// Return the child connected at `name`, if any.
    pub fn input_target(&self, name: &str) -> Option<&Node> {
        self.input(name).and_then(|i| i.target.as_deref())
    }

    pub fn next(&self) -> Option<&Node> {
        self.next.as_deref()
    }

    /// Return the comment text, treating an empty comment as absent.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn produces_value(&self) -> bool {
        self.output
    }

    /// Iterate over connected value-input children in declaration order.
    pub fn value_children(&self) -> impl Iterator<Item = &Node> {
        self.inputs
            .iter()
            .filter(|i| i.kind == InputKind::Value)
            .filter_map(|i| i.target.as_deref())
    }

    /// Visit this node and every node reachable through inputs and `next`, depth first.
    ///
    /// Uses an explicit work stack so deep statement chains do not exhaust the call stack.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Node)) {
        let mut stack: Vec<&'a Node> = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            if let Some(next) = node.next() {
                stack.push(next);
            }
            for input in node.inputs.iter().rev() {
                if let Some(child) = input.target.as_deref() {
                    stack.push(child);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_coercions() {
        assert_eq!(FieldValue::Text("12".into()).as_number(), Some(12.0));
        assert_eq!(FieldValue::Text("TRUE".into()).as_bool(), Some(true));
        assert_eq!(FieldValue::Number(1.0).as_text(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
    }

    #[test]
    fn test_input_lookup() {
        let node = Node::statement("s", "set")
            .with_value("VALUE", Node::value("v", "num"))
            .with_empty_input("DO", InputKind::Statement);
        assert_eq!(node.input_target("VALUE").map(|n| n.id().as_str()), Some("v"));
        assert!(node.input("DO").is_some());
        assert!(node.input_target("DO").is_none());
        assert!(node.input_target("MISSING").is_none());
    }

    #[test]
    fn test_empty_comment_is_absent() {
        assert_eq!(Node::statement("s", "k").with_comment("").comment(), None);
        assert_eq!(Node::statement("s", "k").with_comment("hi").comment(), Some("hi"));
    }

    #[test]
    fn test_value_children_skip_statement_inputs() {
        let node = Node::statement("if", "controls_if")
            .with_value("IF0", Node::value("c", "cond"))
            .with_statements("DO0", Node::statement("body", "stmt"));
        let ids: Vec<&str> = node.value_children().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_walk_visits_inputs_before_next() {
        let tree = Node::statement("a", "k")
            .with_value("X", Node::value("b", "k"))
            .with_statements("DO", Node::statement("c", "k"))
            .with_next(Node::statement("d", "k"));
        let mut order = Vec::new();
        tree.walk(|n| order.push(n.id().as_str()));
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }
}
