//! Reserved-word vocabulary of the default (Python-flavoured) target.
//!
//! The name registry seeds every category with these words so that generated identifiers never shadow a keyword or
//! a builtin the emitted code relies on.

/// Keywords of the default target. Using one as an identifier is a syntax error.
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Builtins the emitted code may call. Shadowing one would silently change generated helpers.
pub const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bool", "dict", "enumerate", "filter", "float", "input", "int", "isinstance", "len", "list",
    "map", "max", "min", "object", "print", "range", "reversed", "round", "set", "sorted", "str", "sum", "tuple",
    "type", "zip",
];

/// Module-level names bound by the imports the reference library emits (`import math`, `import random`,
/// `from numbers import Number`).
pub const IMPORTED: &[&str] = &["math", "random", "Number"];

/// Check whether a word is a keyword of the default target.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Iterate over every reserved word (keywords, then builtins, then imported names).
pub fn default_reserved_words() -> impl Iterator<Item = &'static str> {
    KEYWORDS.iter().chain(BUILTINS.iter()).chain(IMPORTED.iter()).copied()
}
