//! Name and documentation helpers shared by every emitter.

use std::borrow::Cow;

/// Width of generated source lines that doc comments are wrapped to.
pub const LINE_WIDTH: usize = 79;

/// Words that must be escaped as raw identifiers when used as field names.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers at all.
const UNESCAPABLE_KEYWORDS: &[&str] = &["crate", "self", "super"];

/// Converts a `snake_case` node name to the `TitleCase` type name.
///
/// Each `_`-separated segment gets its first character upper-cased and the
/// segments are concatenated; nothing else changes.
#[must_use]
pub fn title_case(snake_case: &str) -> String {
    snake_case.split('_').map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns whether `name` matches `[a-z][a-z0-9_]*`.
#[must_use]
pub fn is_snake_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[must_use]
pub fn is_unescapable_keyword(name: &str) -> bool {
    UNESCAPABLE_KEYWORDS.contains(&name)
}

/// Spelling of `name` as a Rust identifier, raw-escaped when it is a keyword.
#[must_use]
pub fn field_ident(name: &str) -> Cow<'_, str> {
    if RUST_KEYWORDS.contains(&name) {
        Cow::Owned(format!("r#{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Greedily word-wraps `doc` so that no line exceeds `width` characters
/// (unless a single word does).
///
/// Line breaks in the input are kept; blank input lines become empty output
/// lines, which render as paragraph breaks. Leading and trailing blank lines
/// are dropped.
#[must_use]
pub fn wrap_doc(doc: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in doc.trim().lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.len() + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Turns an arbitrary file stem into a valid snake_case module identifier.
#[must_use]
pub fn module_ident(stem: &str) -> String {
    let mut ident: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if !ident.starts_with(|c: char| c.is_ascii_lowercase()) {
        ident.insert(0, 'm');
    }
    ident
}
