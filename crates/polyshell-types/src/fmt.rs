//! Textual formats for structured records.
//!
//! Help records and debug dumps are handed back to the caller as text in
//! one of two human-readable formats. YAML is the default; JSON is chosen
//! by name.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fmt {
    #[default]
    Yaml,
    Json,
}

impl Fmt {
    /// Resolve a format from its name. Anything other than `"json"`
    /// falls back to YAML.
    pub fn from_name(input: &str) -> Self {
        if input == "json" { Fmt::Json } else { Fmt::Yaml }
    }

    /// The format names, default first.
    pub fn names() -> [&'static str; 2] {
        ["yaml", "json"]
    }
}

/// Serialize `input` in the requested format, trimming trailing whitespace.
pub fn stringify<T: Serialize>(input: &T, format: Fmt) -> Result<String> {
    let output = match format {
        Fmt::Yaml => serde_yaml::to_string(input)?,
        Fmt::Json => serde_json::to_string_pretty(input)?,
    };
    Ok(output.trim_end().to_string())
}

/// Parse `input` in the requested format. Empty input parses to `None`.
pub fn parse<T: DeserializeOwned>(input: &str, format: Fmt) -> Result<Option<T>> {
    if input.is_empty() {
        return Ok(None);
    }
    let value = match format {
        Fmt::Yaml => serde_yaml::from_str(input)?,
        Fmt::Json => serde_json::from_str(input)?,
    };
    Ok(Some(value))
}
