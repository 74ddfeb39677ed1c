//! PowerShell backend.

use polyshell_types::key::join_key;

use crate::client::{Buffer, Client};

/// Shell-output backend targeting PowerShell.
#[derive(Debug, Default)]
pub struct Powershell {
    buffer: Buffer,
}

impl Powershell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Client for Powershell {
    fn name(&self) -> &str {
        "pwsh"
    }

    fn extension(&self) -> &str {
        "ps1"
    }

    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    fn to_inner(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn to_outer(&self, value: &str) -> String {
        format!("'{value}'")
    }

    fn trace(&self) -> String {
        "Set-PSDebug -Trace 1".to_string()
    }

    fn var_set(&self, key: &[&str], value: &str) -> String {
        format!("${} = {value}", join_key(key))
    }

    fn var_set_arr(&self, key: &[&str], values: &[String]) -> String {
        format!("${} = @( {} )", join_key(key), values.join(", "))
    }

    fn var_unset(&self, key: &[&str]) -> String {
        format!("Remove-Variable {} -ErrorAction SilentlyContinue", join_key(key))
    }

    fn gated_func(&self, name: &str, lines: &[String]) -> Vec<String> {
        // Read-Host appends its own ": " to the prompt.
        let mut out = vec![
            "& {".to_string(),
            "  $yn = ''".to_string(),
            "  if ($YES) {".to_string(),
            "    $yn = 'y'".to_string(),
            "  } else {".to_string(),
            format!("    $yn = Read-Host \"? {name} [y, [n]]\""),
            "  }".to_string(),
            "  if ($yn -ne 'n') {".to_string(),
        ];
        out.extend(lines.iter().cloned());
        out.push("  }".to_string());
        out.push("}".to_string());
        out
    }

    fn exec_str(&self, command: &str) -> String {
        format!("pwsh -noprofile -c {command}")
    }
}
