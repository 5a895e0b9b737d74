//! Identifier mapping for emitted Rust.
//!
//! Member names come from the provider as written on the target type
//! (`MinimumPrice`, `tags`, `type`). Backing fields and method names use the
//! snake-case form; keywords are escaped as raw identifiers.

/// Keywords that must be written as raw identifiers (2021 edition, strict and
/// reserved, plus `gen`).
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers either.
const UNESCAPABLE: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Convert a member name to snake case.
///
/// `MinimumPrice` → `minimum_price`, `URLPath` → `url_path`,
/// `Entity2List` → `entity2_list`. Names already in snake case are unchanged.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (index, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            if let Some(&prev) = index.checked_sub(1).and_then(|i| chars.get(i)) {
                let next_is_lower = chars.get(index + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && !out.ends_with('_') {
                    out.push('_');
                }
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Returns `true` if `word` is a Rust keyword that needs `r#`.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Returns `true` if `word` matches `[a-zA-Z_][a-zA-Z0-9_]*` (ignoring
/// keywords).
///
/// Non-ASCII names are rejected even where rustc would accept them.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && word != "_"
}

/// Render `word` as a usable identifier, escaping keywords.
///
/// Returns `None` for words that can never be identifiers.
pub fn escape(word: &str) -> Option<String> {
    if !is_identifier(word) || UNESCAPABLE.contains(&word) {
        return None;
    }
    if is_keyword(word) {
        Some(format!("r#{word}"))
    } else {
        Some(word.to_string())
    }
}

#[cfg(test)]
mod tests;
