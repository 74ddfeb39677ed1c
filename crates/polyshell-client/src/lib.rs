//! Shell-output contract and dialect backends.
//!
//! A `Client` turns abstract output operations (print lines, variable
//! assignments, gated blocks) into one target shell's source text. Three
//! dialects are provided: Nushell, PowerShell, and zsh. Each backend owns
//! an append-only line buffer that `build()` serializes into the final
//! script.

mod client;
mod loader;
mod nu;
mod pwsh;
mod zsh;

/// Append-only buffer of line groups.
pub use client::Buffer;
/// The shell-output contract implemented by every dialect backend.
pub use client::Client;
/// One buffered entry: a single line or a group of lines.
pub use client::Lines;
/// Look up a dialect backend by identifier ("nu", "pwsh", "zsh").
pub use client::client_for;
/// Prefix lines with a print opcode, quoting each through `to_inner`.
pub use client::to_print;
/// The six fixed print opcodes, one per channel.
pub use client::{OP_PRINT, OP_PRINT_CMD, OP_PRINT_ERR, OP_PRINT_INFO, OP_PRINT_SUCC, OP_PRINT_WARN};
/// Capability for loading dialect snippets by path.
pub use loader::FileLoader;
/// Filesystem-backed snippet loader rooted at a base directory.
pub use loader::DirLoader;
/// Nushell backend.
pub use nu::Nushell;
/// PowerShell backend.
pub use pwsh::Powershell;
/// zsh backend.
pub use zsh::Zshell;
