//! Shared surface for server-style commands.
//!
//! Every command a server exposes carries the same ambient flags: print
//! format, debug/trace output, help, prompt skipping. Declaring them once
//! keeps the per-node surface down to what the node actually adds.

use polyshell_types::fmt::Fmt;

use crate::command::{CommandSpec, Flag};

/// The shared option set: the client print format.
pub fn standard_options() -> Vec<Flag> {
    let formats = Fmt::names()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                (*name).to_string()
            } else {
                format!("[{name}]")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    vec![Flag::new(
        &["-f", "--format"],
        &format!("client print format <{formats}>"),
    )]
}

/// The shared switch set.
pub fn standard_switches() -> Vec<Flag> {
    vec![
        Flag::new(&["-d", "--debug"], "client print debug"),
        Flag::new(&["-g", "--grayscale"], "client print skip color"),
        Flag::new(&["-h", "--help"], "client print help"),
        Flag::new(&["-l", "--log"], "server print log"),
        Flag::new(&["-n", "--noop"], "client run skip"),
        Flag::new(&["-s", "--succinct"], "client print skip"),
        Flag::new(&["-t", "--trace"], "client print trace"),
        Flag::new(&["-y", "--yes"], "client run skip prompt"),
    ]
}

impl CommandSpec {
    /// A spec pre-populated with the standard options and switches.
    pub fn standard(scopes: Vec<String>, name: &str, description: &str) -> Self {
        let mut spec = Self::new(scopes, name, description);
        spec.options = standard_options();
        spec.switches = standard_switches();
        spec
    }
}
