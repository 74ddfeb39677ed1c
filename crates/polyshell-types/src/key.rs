//! Environment-key convention.
//!
//! Variable names are path-like: the scope chain of a command plus a field
//! name, joined with `_` and uppercased. `STATUS_FORMAT` round-trips to
//! `["status", "format"]`.

/// Separator between key parts.
pub const SPLIT_KEY: &str = "_";

/// Join key parts into a single uppercase key.
pub fn join_key<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(SPLIT_KEY)
        .to_uppercase()
}

/// Split a key into its lowercase parts.
pub fn split_key(key: &str) -> Vec<String> {
    if key.is_empty() {
        return Vec::new();
    }
    key.split(SPLIT_KEY).map(|k| k.to_lowercase()).collect()
}
