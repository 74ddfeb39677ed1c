//! Declarative command tree and recursive dispatch.
//!
//! A command describes its surface (arguments, options, switches,
//! children) as data; `process` consumes a token list against that
//! surface, fills the environment store, and ends in either help
//! rendering or the command's work, both written through a shell-output
//! client.

mod command;
mod env;
mod standard;

/// One positional argument declaration.
pub use command::Arg;
/// The command contract: a declared surface plus dispatch and work.
pub use command::Command;
/// The declared surface of one command.
pub use command::CommandSpec;
/// One option or switch declaration.
pub use command::Flag;
/// A plain grouping node whose work is help rendering.
pub use command::GroupCommand;
/// Expand shorthand flag tokens (`-abc` into `-a -b -c`).
pub use command::to_expanded_parts;
/// Flat key/value store threaded through one dispatch chain.
pub use env::EnvStore;
/// The shared option set for server-style commands.
pub use standard::standard_options;
/// The shared switch set for server-style commands.
pub use standard::standard_switches;
