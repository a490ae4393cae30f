//! Deduplicating store for generated helper definitions and imports.
//!
//! Fragments are kept in first-registration order. Overwriting a key replaces its text but keeps its position, so
//! the order in which helpers first became necessary is what the assembler emits.

use std::collections::HashMap;

use regex::Regex;

/// Token a helper body uses to refer to its own (not yet allocated) name.
///
/// The body is rendered with this token, then every occurrence is replaced by the final symbol.
pub const SELF_NAME_PLACEHOLDER: &str = "{{__self_name__}}";

/// One pooled piece of emitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub key: String,
    pub text: String,
}

/// Pass-scoped definition pool.
#[derive(Debug, Default, Clone)]
pub struct DefinitionPool {
    fragments: Vec<Fragment>,
    index: HashMap<String, usize>,
    symbols: HashMap<String, String>,
}

impl DefinitionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the symbol already assigned to a helper key.
    pub fn symbol(&self, key: &str) -> Option<&str> {
        self.symbols.get(key).map(String::as_str)
    }

    /// Record the symbol for a helper key before its body exists.
    pub(crate) fn reserve_symbol(&mut self, key: &str, symbol: &str) {
        self.symbols.insert(key.to_string(), symbol.to_string());
    }

    /// Store or overwrite the fragment for `key`. Last write wins; first position is kept.
    pub fn add_fragment(&mut self, key: &str, text: impl Into<String>) {
        let text = text.into();
        match self.index.get(key) {
            Some(&i) => self.fragments[i].text = text,
            None => {
                self.index.insert(key.to_string(), self.fragments.len());
                self.fragments.push(Fragment {
                    key: key.to_string(),
                    text,
                });
            }
        }
    }

    /// Return the fragment text stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.fragments[i].text.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All fragments in first-registration order.
    pub fn all_fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Split fragment texts into `(imports, helpers)`, preserving order within each.
    pub fn partition(&self, import_pattern: &Regex) -> (Vec<&str>, Vec<&str>) {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .partition(|text| import_pattern.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_fragment_keeps_first_position_and_last_text() {
        let mut pool = DefinitionPool::new();
        pool.add_fragment("a", "one");
        pool.add_fragment("b", "two");
        pool.add_fragment("a", "three");
        let keys: Vec<&str> = pool.all_fragments().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(pool.get("a"), Some("three"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_partition_preserves_order() {
        let mut pool = DefinitionPool::new();
        pool.add_fragment("h1", "def h1():\n    pass");
        pool.add_fragment("import_math", "import math");
        pool.add_fragment("h2", "def h2():\n    pass");
        pool.add_fragment("import_random", "from random import randint");
        let pattern = Regex::new(crate::codegen::config::DEFAULT_IMPORT_PATTERN).unwrap();
        let (imports, helpers) = pool.partition(&pattern);
        assert_eq!(imports, vec!["import math", "from random import randint"]);
        assert_eq!(helpers, vec!["def h1():\n    pass", "def h2():\n    pass"]);
    }

    #[test]
    fn test_symbols_are_separate_from_fragments() {
        let mut pool = DefinitionPool::new();
        pool.reserve_symbol("mean", "math_mean");
        assert_eq!(pool.symbol("mean"), Some("math_mean"));
        assert!(!pool.contains("mean"));
        assert!(pool.is_empty());
    }
}
