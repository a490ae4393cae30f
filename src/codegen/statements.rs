//! Statement emission, comment propagation, and sequencing.
//!
//! A statement chain is emitted as a list of fragments, one per enabled node, so composition can still tell the
//! statements apart. [`GenContext::make_sequence`] folds the list into text, either as plain concatenation or as
//! an explicit ordered-composition call.
//!
//! `next` chains are followed iteratively; only nesting (statement inputs, value inputs) recurses.

use blockgen_core::strings::{prefix_lines, wrap_text};
use blockgen_tree::Node;

use super::config::SequenceStyle;
use super::context::GenContext;
use super::errors::GenError;
use super::handlers::Generated;

impl<'a> GenContext<'a> {
    /// Emit `node` and everything reachable through its `next` link as a fragment list.
    ///
    /// Disabled nodes are skipped as if their predecessor were linked straight to their successor. A handler that
    /// returns [`Generated::Nothing`] ends the chain: the node produced its output elsewhere.
    ///
    /// ## Errors
    /// - [`GenError::TypeMismatch`] if a node in the chain is value-producing.
    /// - [`GenError::InvalidHandlerResult`] if a handler returned an expression.
    /// - Any error raised while emitting nested inputs.
    pub fn emit_statement(&mut self, node: &Node) -> Result<Vec<String>, GenError> {
        self.emit_chain(node, "<top-level>")
    }

    fn emit_chain(&mut self, node: &Node, slot: &str) -> Result<Vec<String>, GenError> {
        let mut fragments = Vec::new();
        let mut current = Some(node);
        while let Some(node) = current {
            if node.is_disabled() {
                current = node.next();
                continue;
            }
            if node.produces_value() {
                return Err(GenError::TypeMismatch {
                    id: node.id().clone(),
                    kind: node.kind().to_string(),
                    slot: slot.to_string(),
                    expected: "statement",
                });
            }
            match self.dispatch(node)? {
                Generated::Statement(code) => {
                    let code = self.instrument(code, node);
                    let mut fragment = self.comment_block(node);
                    fragment.push_str(&code);
                    fragments.push(fragment);
                    current = node.next();
                }
                Generated::Nothing => break,
                other @ Generated::Expression(_) => {
                    return Err(GenError::InvalidHandlerResult {
                        id: node.id().clone(),
                        kind: node.kind().to_string(),
                        expected: "statement text",
                        found: other.describe(),
                    });
                }
            }
        }
        Ok(fragments)
    }

    /// Raw fragments of the statement chain connected at `slot`. Empty when nothing is connected.
    ///
    /// ## Errors
    /// [`GenError::TypeMismatch`] if the connected child is value-producing.
    pub fn statement_fragments(&mut self, node: &Node, slot: &str) -> Result<Vec<String>, GenError> {
        match node.input_target(slot) {
            Some(child) => self.emit_chain(child, slot),
            None => Ok(Vec::new()),
        }
    }

    /// Sequenced statement chain at `slot`, indented one level.
    pub fn resolve_statement(&mut self, node: &Node, slot: &str) -> Result<String, GenError> {
        let fragments = self.statement_fragments(node, slot)?;
        let body = self.make_sequence(&fragments);
        Ok(self.indent_lines(&body))
    }

    /// Fold fragments into one piece of text.
    ///
    /// Empty fragments are dropped. No fragments gives the empty string and a single fragment is returned
    /// verbatim. Several fragments become either a composition call or plain concatenation, per
    /// [`SequenceStyle`].
    ///
    /// ## Examples
    /// `["a = 1\n", "print(a)\n"]` with the default config:
    /// ```text
    /// seq(
    ///     a = 1,
    ///     print(a)
    /// )
    /// ```
    pub fn make_sequence(&self, fragments: &[String]) -> String {
        let parts: Vec<&str> = fragments.iter().map(String::as_str).filter(|f| !f.is_empty()).collect();
        match parts.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            many => match &self.config.sequence {
                SequenceStyle::Lines => many
                    .iter()
                    .map(|f| if f.ends_with('\n') { (*f).to_string() } else { format!("{f}\n") })
                    .collect(),
                SequenceStyle::Composite { call } => {
                    let body = many
                        .iter()
                        .map(|f| prefix_lines(f.trim_end_matches('\n'), &self.config.indent))
                        .collect::<Vec<_>>()
                        .join(",\n");
                    format!("{call}(\n{body}\n)\n")
                }
            },
        }
    }

    /// Prepend the configured loop trap (if any) to a loop body.
    ///
    /// `branch` is expected to be indented already; the trap is indented one level to match.
    pub fn add_loop_trap(&self, branch: String, node: &Node) -> String {
        let Some(trap) = &self.config.loop_trap else {
            return branch;
        };
        let mut trap = self.indent_lines(&self.inject_id(trap, node));
        if !trap.ends_with('\n') {
            trap.push('\n');
        }
        trap + &branch
    }

    fn instrument(&self, code: String, node: &Node) -> String {
        let config = self.config;
        if config.statement_prefix.is_none() && config.statement_suffix.is_none() {
            return code;
        }
        let mut out = String::new();
        if let Some(prefix) = &config.statement_prefix {
            out.push_str(&self.inject_id(prefix, node));
        }
        out.push_str(&code);
        if let Some(suffix) = &config.statement_suffix {
            out.push_str(&self.inject_id(suffix, node));
        }
        out
    }

    // ---- comments -----------------------------------------------------------

    /// Comment lines for `node`: its own comment, then the comments nested under its value inputs.
    ///
    /// Statement inputs are never searched; those statements print their own comments.
    pub(crate) fn comment_block(&self, node: &Node) -> String {
        let mut block = String::new();
        if let Some(comment) = node.comment() {
            block.push_str(&self.format_comment(comment));
        }
        let mut stack: Vec<&Node> = node.value_children().collect();
        stack.reverse();
        while let Some(child) = stack.pop() {
            if let Some(comment) = child.comment() {
                block.push_str(&self.format_comment(comment));
            }
            let mut nested: Vec<&Node> = child.value_children().collect();
            nested.reverse();
            stack.extend(nested);
        }
        block
    }

    fn format_comment(&self, text: &str) -> String {
        let config = self.config;
        let text = match config.comment_wrap {
            Some(width) => wrap_text(text, width.saturating_sub(config.comment_prefix.chars().count())),
            None => text.to_string(),
        };
        let mut lines = prefix_lines(&text, &config.comment_prefix);
        if !lines.ends_with('\n') {
            lines.push('\n');
        }
        lines
    }
}
