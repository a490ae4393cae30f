//! The pass-scoped generation context.
//!
//! A [`GenContext`] is created at the start of a pass and consumed by [`GenContext::finish`]. It owns the pass's
//! [`NameRegistry`] and [`DefinitionPool`] and borrows the shared handler registry and configuration, so two passes
//! never observe each other's names or helpers.
//!
//! The emitter, sequencer and assembler operations are implemented on this type in their own modules
//! (`expressions`, `statements`, `assembler`); this module holds construction, dispatch, and the small callbacks
//! handlers use for naming, pooling and quoting.

use blockgen_core::strings::{self, quote, quote_multiline};
use blockgen_tree::Node;

use super::config::{GenConfig, SequenceStyle};
use super::definitions::{DefinitionPool, SELF_NAME_PLACEHOLDER};
use super::errors::GenError;
use super::handlers::{Generated, HandlerRegistry};
use super::names::{NameCategory, NameRegistry};

/// State for a single generation pass.
#[derive(Debug)]
pub struct GenContext<'a> {
    pub(crate) config: &'a GenConfig,
    handlers: &'a HandlerRegistry,
    names: NameRegistry,
    pub(crate) definitions: DefinitionPool,
}

impl<'a> GenContext<'a> {
    /// Start a pass. Reserved words from `config` are merged into the fresh name registry, along with the
    /// composition call when statements are sequenced through one.
    pub fn new(handlers: &'a HandlerRegistry, config: &'a GenConfig) -> Self {
        let mut names = NameRegistry::new(config.reserved_words.iter().cloned());
        if let SequenceStyle::Composite { call } = &config.sequence {
            names.reserve([call.as_str()]);
        }
        Self {
            config,
            handlers,
            names,
            definitions: DefinitionPool::new(),
        }
    }

    pub fn config(&self) -> &'a GenConfig {
        self.config
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn names_mut(&mut self) -> &mut NameRegistry {
        &mut self.names
    }

    pub fn definitions(&self) -> &DefinitionPool {
        &self.definitions
    }

    /// Run the registered handler for `node`.
    ///
    /// ## Errors
    /// [`GenError::UnknownNodeKind`] when no handler is registered for the node's kind.
    pub(crate) fn dispatch(&mut self, node: &Node) -> Result<Generated, GenError> {
        let handlers = self.handlers;
        let handler = handlers.get(node.kind()).ok_or_else(|| GenError::UnknownNodeKind {
            id: node.id().clone(),
            kind: node.kind().to_string(),
        })?;
        handler.generate(node, self)
    }

    // ---- naming -------------------------------------------------------------

    /// Name for a logical entity, stable for the whole pass.
    pub fn allocate(&mut self, entity: &str, desired: &str, category: NameCategory) -> String {
        self.names.allocate(entity, desired, category)
    }

    /// Fresh name that nothing else in `category` uses.
    pub fn distinct_name(&mut self, desired: &str, category: NameCategory) -> String {
        self.names.distinct(desired, category)
    }

    // ---- definition pool ----------------------------------------------------

    /// Return the symbol of the helper registered under `key`, rendering it on first request.
    ///
    /// `render` receives the context and the self-reference placeholder; a body that needs to call itself writes
    /// the placeholder where its own name goes. The symbol is recorded before rendering so a nested request for
    /// the same key returns it. Nested helpers requested while rendering are stored first, which keeps every
    /// helper after the helpers it depends on.
    ///
    /// Callers sharing a key must supply equivalent bodies; a second body for a known key is never rendered.
    ///
    /// ## Errors
    /// Propagates any error returned by `render`.
    pub fn provide_definition<F>(&mut self, key: &str, render: F) -> Result<String, GenError>
    where
        F: FnOnce(&mut GenContext<'a>, &str) -> Result<Vec<String>, GenError>,
    {
        if let Some(symbol) = self.definitions.symbol(key) {
            return Ok(symbol.to_string());
        }
        let symbol = self.names.distinct(key, NameCategory::Function);
        self.definitions.reserve_symbol(key, &symbol);
        let lines = render(&mut *self, SELF_NAME_PLACEHOLDER)?;
        let text = lines.join("\n").replace(SELF_NAME_PLACEHOLDER, &symbol);
        tracing::debug!(key, symbol = %symbol, "registered helper definition");
        self.definitions.add_fragment(key, text);
        Ok(symbol)
    }

    /// Pool an import line under `key`.
    pub fn add_import(&mut self, key: &str, line: impl Into<String>) {
        self.definitions.add_fragment(key, line);
    }

    /// Pool arbitrary definition text under `key`. Last write wins.
    pub fn add_fragment(&mut self, key: &str, text: impl Into<String>) {
        self.definitions.add_fragment(key, text);
    }

    // ---- text helpers -------------------------------------------------------

    /// Quote `text` as a string literal in the configured style.
    pub fn quote(&self, text: &str) -> String {
        quote(text, self.config.quote_style)
    }

    /// Quote multi-line text as a concatenation of single-line literals.
    pub fn quote_multiline(&self, text: &str) -> String {
        quote_multiline(text, self.config.quote_style)
    }

    /// One level of indentation.
    pub fn indent(&self) -> &'a str {
        &self.config.indent
    }

    /// Indent every line of `text` by one level.
    pub fn indent_lines(&self, text: &str) -> String {
        strings::prefix_lines(text, &self.config.indent)
    }

    /// Replace `%1` in `template` with the quoted id of `node`.
    pub fn inject_id(&self, template: &str, node: &Node) -> String {
        strings::inject_id(template, node.id().as_str(), self.config.quote_style)
    }
}
