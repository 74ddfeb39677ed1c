//! zsh backend.
//!
//! Print payloads are consumed by `echo`, which interprets backslash
//! escapes, so `to_inner` doubles backslashes before protecting single
//! quotes with the close-escape-reopen sequence.

use polyshell_types::key::join_key;

use crate::client::{Buffer, Client};

/// Shell-output backend targeting zsh.
#[derive(Debug, Default)]
pub struct Zshell {
    buffer: Buffer,
}

impl Zshell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Client for Zshell {
    fn name(&self) -> &str {
        "zsh"
    }

    fn extension(&self) -> &str {
        "zsh"
    }

    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn to_inner(&self, value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('\'', "'\\''");
        format!("'{escaped}'")
    }

    fn to_outer(&self, value: &str) -> String {
        format!("'{value}'")
    }

    fn trace(&self) -> String {
        "set -x".to_string()
    }

    fn var_set(&self, key: &[&str], value: &str) -> String {
        format!("{}={value}", join_key(key))
    }

    fn var_set_arr(&self, key: &[&str], values: &[String]) -> String {
        format!("{}=( {} )", join_key(key), values.join(" "))
    }

    fn var_unset(&self, key: &[&str]) -> String {
        format!("unset {}", join_key(key))
    }

    fn gated_func(&self, name: &str, lines: &[String]) -> Vec<String> {
        let mut out = vec![
            "function () {".to_string(),
            "  local yn=''".to_string(),
            "  if [[ $YES ]]; then".to_string(),
            "    yn='y'".to_string(),
            "  else".to_string(),
            format!("    read \"yn?? {name} [y, [n]]: \""),
            "  fi".to_string(),
            "  if [[ $yn != 'n' ]]; then".to_string(),
        ];
        out.extend(lines.iter().cloned());
        out.push("  fi".to_string());
        out.push("}".to_string());
        out
    }

    fn exec_str(&self, command: &str) -> String {
        format!("zsh --no-rcs -c {command}")
    }
}
