//! Define shared text helpers (quoting, line layout, identifier sanitizing).
//!
//! These helpers are **pure/deterministic** and are used by both the engine (comment blocks, indentation,
//! instrumentation templates) and node handlers (string literals, numeric literals).
//!
//! ## Notes
//! - Line handling treats `\n` as the only line terminator; a trailing terminator is preserved.
//! - Identifier sanitizing is ASCII-only: anything outside `[A-Za-z0-9_]` is rewritten.

/// Token replaced by the quoted node identity in instrumentation templates.
pub const NODE_ID_TOKEN: &str = "%1";

/// Quote character used for emitted string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    /// Return the quote character.
    pub fn char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Convert arbitrary text into a string literal of the target language.
///
/// ## Parameters
/// - `text`: raw text.
/// - `style`: which quote character delimits the literal.
///
/// ## Returns
/// - (`String`): the literal, with backslashes, newlines and the active quote character escaped.
///
/// ## Examples
/// ```rust
/// use blockgen_core::strings::{quote, QuoteStyle};
///
/// assert_eq!(quote("it's", QuoteStyle::Single), r"'it\'s'");
/// assert_eq!(quote("a\nb", QuoteStyle::Double), r#""a\nb""#);
/// ```
pub fn quote(text: &str, style: QuoteStyle) -> String {
    let q = style.char();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(q);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Quote multi-line text as a concatenation of one literal per line.
///
/// Single-line text is quoted as-is. The result of a multi-line input is an additive expression, so callers should
/// report it with an additive rank.
pub fn quote_multiline(text: &str, style: QuoteStyle) -> String {
    let separator = format!(" + {} + ", quote("\n", style));
    text.split('\n')
        .map(|line| quote(line, style))
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Replace the node-identity token in an instrumentation template with the quoted identity.
pub fn inject_id(template: &str, id: &str, style: QuoteStyle) -> String {
    template.replace(NODE_ID_TOKEN, &quote(id, style))
}

/// Prefix every line of `text` with `prefix`.
///
/// Empty lines receive the prefix without trailing whitespace. A trailing newline stays a trailing newline (it does
/// not introduce an extra prefixed line).
pub fn prefix_lines(text: &str, prefix: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let (body, trailing_newline) = match text.strip_suffix('\n') {
        Some(body) => (body, true),
        None => (text, false),
    };
    let bare_prefix = prefix.trim_end();
    let mut out = String::with_capacity(text.len() + prefix.len() * 4);
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.is_empty() {
            out.push_str(bare_prefix);
        } else {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    if trailing_newline {
        out.push('\n');
    }
    out
}

/// Greedily word-wrap text so no line exceeds `width` columns where possible.
///
/// Existing line breaks are kept. A single word longer than `width` is left on its own line.
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines.join("\n")
}

/// Sanitize desired text into a legal bare identifier.
///
/// ## Rules
/// - Empty input becomes `unnamed`.
/// - Spaces become `_`.
/// - ASCII characters outside `[A-Za-z0-9_]` become `_`.
/// - Non-ASCII characters become `_XX` per UTF-8 byte (uppercase hex), so distinct inputs stay distinct.
/// - A leading digit gets a `my_` prefix.
///
/// ## Examples
/// ```rust
/// use blockgen_core::strings::safe_identifier;
///
/// assert_eq!(safe_identifier("my var"), "my_var");
/// assert_eq!(safe_identifier("2nd"), "my_2nd");
/// assert_eq!(safe_identifier("café"), "caf_C3_A9");
/// ```
pub fn safe_identifier(desired: &str) -> String {
    if desired.is_empty() {
        return "unnamed".to_string();
    }
    let mut out = String::with_capacity(desired.len());
    for c in desired.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if c.is_ascii() {
            out.push('_');
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("_{:02X}", byte));
            }
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "my_");
    }
    out
}

/// Format a numeric literal, dropping the fractional part of integral values.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
