//! Collision-free identifier allocation.
//!
//! The [`NameRegistry`] hands out identifiers per [`NameCategory`]. Categories keep separate entity mappings but
//! share one set of used names, since variables, procedures and helpers all land in the same namespace of the
//! emitted program. Every assigned name is distinct and never equal to a reserved word; asking again for the same
//! entity in the same category returns the same name.

use std::collections::{HashMap, HashSet};

use blockgen_core::strings::safe_identifier;

/// Kind of entity a name is allocated for. Entity identities are scoped to their category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameCategory {
    /// User variables and generated temporaries
    Variable,
    /// User-defined procedures
    Procedure,
    /// Generated helper functions from the definition pool
    Function,
}

/// Pass-scoped identifier allocator.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    reserved: HashSet<String>,
    assigned: HashMap<(NameCategory, String), String>,
    used: HashSet<String>,
}

impl NameRegistry {
    /// Create a registry seeded with reserved words.
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        registry.reserve(reserved);
        registry
    }

    /// Merge more reserved words.
    pub fn reserve<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(words.into_iter().map(Into::into));
    }

    /// Check whether a word is reserved.
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(word)
    }

    /// Return the name for `entity`, allocating one from `desired` on first use.
    ///
    /// ## Parameters
    /// - `entity`: stable identity of the logical entity (e.g. a variable id).
    /// - `desired`: preferred spelling; sanitized before use.
    /// - `category`: namespace to allocate in.
    pub fn allocate(&mut self, entity: &str, desired: &str, category: NameCategory) -> String {
        let key = (category, entity.to_string());
        if let Some(name) = self.assigned.get(&key) {
            return name.clone();
        }
        let name = self.distinct(desired, category);
        tracing::trace!(entity, name = %name, ?category, "allocated name");
        self.assigned.insert(key, name.clone());
        name
    }

    /// Allocate a fresh name from `desired` without memoizing it against an entity.
    ///
    /// Candidates are tried as `name`, `name2`, `name3`, ... until one is neither used by any category nor
    /// reserved.
    pub fn distinct(&mut self, desired: &str, category: NameCategory) -> String {
        let base = safe_identifier(desired);
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while self.used.contains(&candidate) || self.reserved.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}{}", base, suffix);
        }
        tracing::trace!(name = %candidate, ?category, "claimed name");
        self.used.insert(candidate.clone());
        candidate
    }

    /// Return the name already assigned to `entity`, if any.
    pub fn lookup(&self, entity: &str, category: NameCategory) -> Option<&str> {
        self.assigned
            .get(&(category, entity.to_string()))
            .map(String::as_str)
    }

    /// Forget every assignment and used name. Reserved words are kept.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.used.clear();
    }
}
