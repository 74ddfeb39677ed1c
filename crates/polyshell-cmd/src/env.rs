//! Flat key/value environment store.
//!
//! One store is created per top-level dispatch and threaded by mutable
//! reference through the whole recursive chain, so the latest value for a
//! key wins and is visible when the terminating node materializes
//! variable lines. Keys are normalized through the workspace key
//! convention; iteration is in sorted key order so generated assignments
//! are deterministic.

use std::collections::BTreeMap;

use polyshell_types::key::join_key;
use serde::Serialize;

/// Separator between the parts of a list-valued entry. Distinct from the
/// key separator.
pub const SPLIT_VAL: &str = " ";

/// Flat mapping from normalized keys to string values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvStore {
    values: BTreeMap<String, String>,
}

impl EnvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a key, if present.
    pub fn get<S: AsRef<str>>(&self, key: &[S]) -> Option<&str> {
        self.values.get(&join_key(key)).map(String::as_str)
    }

    /// Value for a key split into its list parts; empty when absent.
    pub fn get_split<S: AsRef<str>>(&self, key: &[S]) -> Vec<String> {
        match self.get(key) {
            Some(value) => value.split(SPLIT_VAL).map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

    /// Set a key, replacing any previous value.
    pub fn set<S: AsRef<str>>(&mut self, key: &[S], value: &str) {
        self.values.insert(join_key(key), value.to_string());
    }

    /// Append to a key's list value, or set it when absent or empty.
    pub fn set_append<S: AsRef<str>>(&mut self, key: &[S], value: &str) {
        let key = join_key(key);
        match self.values.get_mut(&key) {
            Some(existing) if !existing.is_empty() => {
                existing.push_str(SPLIT_VAL);
                existing.push_str(value);
            },
            _ => {
                self.values.insert(key, value.to_string());
            },
        }
    }

    /// All entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
