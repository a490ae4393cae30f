//! Top-level driver: emit every root node and assemble the final source.
//!
//! Output layout is imports, then helper definitions, then the body, each block separated by one blank line.

use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use blockgen_tree::{Node, Program};

use super::config::GenConfig;
use super::context::GenContext;
use super::errors::GenError;
use super::handlers::HandlerRegistry;

#[allow(clippy::expect_used)]
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("INVARIANT: blank-line pattern is a valid regex"));

#[allow(clippy::expect_used)]
static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("INVARIANT: trailing-space pattern is a valid regex"));

/// Generates source text for whole programs.
///
/// Holds the handler registry and configuration; each call to [`CodeGenerator::generate`] runs an independent
/// pass with its own names and definitions, so one generator can serve concurrent passes.
#[derive(Debug)]
pub struct CodeGenerator {
    handlers: HandlerRegistry,
    config: GenConfig,
}

impl CodeGenerator {
    pub fn new(handlers: HandlerRegistry, config: GenConfig) -> Self {
        Self { handlers, config }
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// Generate source for the given top-level nodes, in order.
    ///
    /// ## Errors
    /// The first [`GenError`] raised anywhere in the tree. No partial output is returned.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub fn generate(&self, roots: &[Node]) -> Result<String, GenError> {
        let mut cx = GenContext::new(&self.handlers, &self.config);
        let mut sections = Vec::new();
        for (index, root) in roots.iter().enumerate() {
            let fragments = cx.emit_top_level(root)?;
            let section = cx.make_sequence(&fragments);
            if section.trim().is_empty() {
                continue;
            }
            tracing::debug!(index, id = %root.id(), fragments = fragments.len(), "emitted top-level section");
            sections.push(section.trim_end_matches('\n').to_string());
        }
        let body = normalize_body(&sections.join("\n\n"));
        Ok(cx.finish(&body))
    }

    /// Generate source for a loaded program.
    pub fn generate_program(&self, program: &Program) -> Result<String, GenError> {
        self.generate(&program.nodes)
    }
}

impl<'a> GenContext<'a> {
    /// Emit one top-level node: a statement chain, or a naked value printed on its own line.
    pub(crate) fn emit_top_level(&mut self, root: &Node) -> Result<Vec<String>, GenError> {
        let mut node = root;
        while node.is_disabled() {
            match node.next() {
                Some(next) => node = next,
                None => return Ok(Vec::new()),
            }
        }
        if !node.produces_value() {
            return self.emit_statement(node);
        }
        let expr = self.emit_expression(node)?;
        if expr.is_empty() {
            return Ok(Vec::new());
        }
        let mut fragment = self.comment_block(node);
        fragment.push_str(&expr.code);
        fragment.push('\n');
        Ok(vec![fragment])
    }

    /// Prepend pooled imports and helper definitions to `body`, consuming the pass.
    ///
    /// Imports come first, then helpers, each group in registration order. With nothing pooled, `body` is returned
    /// unchanged.
    #[instrument(skip_all, fields(definitions = self.definitions.len()))]
    pub fn finish(self, body: &str) -> String {
        let (imports, helpers) = self.definitions.partition(&self.config.import_pattern);
        if imports.is_empty() && helpers.is_empty() {
            return body.to_string();
        }
        tracing::debug!(imports = imports.len(), helpers = helpers.len(), "assembling header");
        let header = format!("{}\n\n{}", imports.join("\n"), helpers.join("\n\n"));
        let header = BLANK_LINE_RUN.replace_all(&header, "\n\n");
        let header = header.trim_matches('\n');
        if body.is_empty() {
            format!("{header}\n")
        } else {
            format!("{header}\n\n{body}")
        }
    }
}

/// Strip trailing whitespace from every line and leading blank lines; end with exactly one newline.
fn normalize_body(body: &str) -> String {
    let body = TRAILING_SPACE.replace_all(body, "");
    let body = body.trim_start_matches('\n').trim_end();
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n")
    }
}
