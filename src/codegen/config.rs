//! Generation configuration.
//!
//! Defaults target a Python-flavoured language with `#` comments and an explicit `seq(...)` composition call.

use regex::Regex;

use blockgen_core::rank::{DEFAULT_ORDER_OVERRIDES, Rank};
use blockgen_core::reserved;
use blockgen_core::strings::QuoteStyle;

/// Default pattern recognising import-like pooled fragments.
pub const DEFAULT_IMPORT_PATTERN: &str = r"^(from\s+\S+\s+)?import\s+";

/// How multiple statement fragments are folded into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceStyle {
    /// Wrap fragments in an explicit ordered-composition call: `call(\n    a,\n    b\n)`.
    Composite { call: String },
    /// Concatenate fragments one after another.
    Lines,
}

/// Code generation configuration
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Words no generated identifier may take (merged into every name category at pass start)
    pub reserved_words: Vec<String>,
    /// One level of indentation
    pub indent: String,
    /// Marker prefixed to every comment line
    pub comment_prefix: String,
    /// Wrap comment lines at this many columns (marker included)
    pub comment_wrap: Option<usize>,
    /// Quote character for string literals and injected node ids
    pub quote_style: QuoteStyle,
    /// How statement fragments are composed
    pub sequence: SequenceStyle,
    /// Template inserted before every statement (`%1` = quoted node id)
    pub statement_prefix: Option<String>,
    /// Template inserted after every statement (`%1` = quoted node id)
    pub statement_suffix: Option<String>,
    /// Template inserted at the top of every loop body (`%1` = quoted node id)
    pub loop_trap: Option<String>,
    /// Pooled fragments matching this are emitted as imports
    pub import_pattern: Regex,
    /// `(outer, inner)` rank pairs that never need parentheses
    pub order_overrides: Vec<(Rank, Rank)>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            reserved_words: reserved::default_reserved_words().map(str::to_string).collect(),
            indent: "    ".to_string(),
            comment_prefix: "# ".to_string(),
            comment_wrap: Some(60),
            quote_style: QuoteStyle::Single,
            sequence: SequenceStyle::Composite { call: "seq".to_string() },
            statement_prefix: None,
            statement_suffix: None,
            loop_trap: None,
            import_pattern: default_import_pattern(),
            order_overrides: DEFAULT_ORDER_OVERRIDES.to_vec(),
        }
    }
}

impl GenConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add reserved words on top of the current set
    pub fn with_reserved_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Set the indentation unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the comment marker
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = prefix.into();
        self
    }

    /// Set (or disable) comment wrapping
    pub fn with_comment_wrap(mut self, width: Option<usize>) -> Self {
        self.comment_wrap = width;
        self
    }

    /// Set the quote style
    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    /// Set the sequence style
    pub fn with_sequence(mut self, sequence: SequenceStyle) -> Self {
        self.sequence = sequence;
        self
    }

    /// Set the per-statement instrumentation prefix
    pub fn with_statement_prefix(mut self, template: impl Into<String>) -> Self {
        self.statement_prefix = Some(template.into());
        self
    }

    /// Set the per-statement instrumentation suffix
    pub fn with_statement_suffix(mut self, template: impl Into<String>) -> Self {
        self.statement_suffix = Some(template.into());
        self
    }

    /// Set the loop-safety injection template
    pub fn with_loop_trap(mut self, template: impl Into<String>) -> Self {
        self.loop_trap = Some(template.into());
        self
    }

    /// Set the import-recognition pattern
    ///
    /// ## Errors
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_import_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.import_pattern = Regex::new(pattern)?;
        Ok(self)
    }

    /// Replace the order overrides
    pub fn with_order_overrides(mut self, overrides: Vec<(Rank, Rank)>) -> Self {
        self.order_overrides = overrides;
        self
    }
}

#[allow(clippy::expect_used)]
fn default_import_pattern() -> Regex {
    Regex::new(DEFAULT_IMPORT_PATTERN).expect("INVARIANT: DEFAULT_IMPORT_PATTERN is a valid regex")
}
