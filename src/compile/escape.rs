//! Escaping applied to data tokens before interpretation.
//!
//! Generated makefile values pass back through a shell, so double quotes
//! and spaces always gain a backslash. Parentheses and angle brackets are
//! escaped too, except in include-style tokens where `$(...)` expansions
//! and `<header>` forms must survive untouched.

/// Escape shell metacharacters in one data token.
pub(crate) fn escape_token(token: &str) -> String {
    let include_like = token
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("-i"));
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        let needs_escape = matches!(ch, '"' | ' ')
            || (!include_like && matches!(ch, '(' | ')' | '<' | '>'));
        if needs_escape {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
