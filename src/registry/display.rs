//! Human-readable labels for method classes.

use super::class::MethodClass;

const METHOD_SUFFIX: &str = "Method";


/// Label for a method class.
///
/// The explicit display name wins when present. Otherwise the type name is
/// used with one trailing `"Method"` removed and camel-case boundaries
/// spaced out: `NewtonRaphsonMethod` → `"Newton Raphson"`.
pub fn display_name(class: &MethodClass) -> String {
    match class.explicit_display_name() {
        Some(label) => label.to_owned(),
        None        => humanize_type_name(class.name()),
    }
}

/// Strips one trailing `"Method"` and inserts a space before every ASCII
/// uppercase letter that follows a word character (alphanumeric or `_`).
pub fn humanize_type_name(type_name: &str) -> String {
    let base = type_name.strip_suffix(METHOD_SUFFIX).unwrap_or(type_name);

    let mut out = String::with_capacity(base.len() + 4);
    let mut prev: Option<char> = None;
    for ch in base.chars() {
        if ch.is_ascii_uppercase() && prev.is_some_and(is_word_char) {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
