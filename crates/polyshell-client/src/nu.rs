//! Nushell backend.

use polyshell_types::key::join_key;

use crate::client::{Buffer, Client};

/// Shell-output backend targeting Nushell.
#[derive(Debug, Default)]
pub struct Nushell {
    buffer: Buffer,
}

impl Nushell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Client for Nushell {
    fn name(&self) -> &str {
        "nu"
    }

    fn extension(&self) -> &str {
        "nu"
    }

    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn to_inner(&self, value: &str) -> String {
        // Raw strings need no escaping, but the hash run must be long
        // enough that the value cannot terminate the literal.
        let mut hashes = 1;
        while value.contains(&format!("'{}", "#".repeat(hashes))) {
            hashes += 1;
        }
        let h = "#".repeat(hashes);
        format!("r{h}'{value}'{h}")
    }

    fn to_outer(&self, value: &str) -> String {
        format!("`{value}`")
    }

    fn trace(&self) -> String {
        String::new() // no direct equivalent
    }

    fn var_set(&self, key: &[&str], value: &str) -> String {
        format!("$env.{} = {value}", join_key(key))
    }

    fn var_set_arr(&self, key: &[&str], values: &[String]) -> String {
        format!("$env.{} = [ {} ]", join_key(key), values.join(", "))
    }

    fn var_unset(&self, key: &[&str]) -> String {
        format!("hide-env {}", join_key(key))
    }

    fn gated_func(&self, name: &str, lines: &[String]) -> Vec<String> {
        // External commands that exit non-zero raise an error carrying an
        // exit_code field; those are absorbed, everything else re-raised.
        let prompt = self.to_inner(&format!("? {name} [y, [n]]: "));
        let mut out = vec![
            "do {".to_string(),
            "  try {".to_string(),
            "    mut yn = ''".to_string(),
            "    if 'YES' in $env {".to_string(),
            "      $yn = 'y'".to_string(),
            "    } else {".to_string(),
            format!("      $yn = input {prompt}"),
            "    }".to_string(),
            "    if $yn != 'n' {".to_string(),
        ];
        out.extend(lines.iter().cloned());
        out.push("    }".to_string());
        out.push("  } catch { |err|".to_string());
        out.push("    if ($err.exit_code? == null) {".to_string());
        out.push("      error make { msg: $err.msg }".to_string());
        out.push("    }".to_string());
        out.push("  }".to_string());
        out.push("}".to_string());
        out
    }

    fn exec_str(&self, command: &str) -> String {
        format!("nu --no-config-file -c {command}")
    }
}
