//! Helpers for PHP namespaced names.

const NAMESPACE_SEPARATOR: char = '\\';
const CALLBACK_SEPARATOR: &str = "::";

/// Whether a PHP name is namespace qualified (e.g. "\core\event\base").
pub fn has_namespace(name: &str) -> bool {
    name.contains(NAMESPACE_SEPARATOR)
}

/// Last segment of a namespaced name ("\core\event\base" -> "base").
pub fn last_namespace_segment(name: &str) -> &str {
    name.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(name)
}

/// Split a static callback into its class and function parts.
///
/// Only the last namespace segment is considered, so
/// "\local_x\observer::created" yields ("observer", "created").
/// Returns `None` when either part is missing.
pub fn split_callback(callback: &str) -> Option<(&str, &str)> {
    let segment = last_namespace_segment(callback);
    let (class, function) = segment.split_once(CALLBACK_SEPARATOR)?;
    if class.is_empty() || function.is_empty() {
        return None;
    }
    Some((class, function))
}

/// Whether a name is a valid PHP class or function identifier.
pub fn is_php_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strip surrounding single and double quotes.
pub fn trim_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Readable form of an identifier: `something_created` -> `Something created`.
pub fn humanize(name: &str) -> String {
    let words = name.replace('_', " ");
    let mut chars = words.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
