//! The shell-output contract.
//!
//! A `Client` accumulates output operations into a line buffer and knows
//! how to render them as one dialect's source text: quoting, variable
//! statements, trace enabling, and confirmation-gated blocks. Print
//! channels prefix a fixed opcode per channel; a renderer on the consuming
//! side turns the opcodes into colors and formatting.

use crate::loader::FileLoader;

/// Print opcode for the standard channel.
pub const OP_PRINT: &str = "opPrint";
/// Print opcode for the command channel.
pub const OP_PRINT_CMD: &str = "opPrintCmd";
/// Print opcode for the error channel.
pub const OP_PRINT_ERR: &str = "opPrintErr";
/// Print opcode for the info channel.
pub const OP_PRINT_INFO: &str = "opPrintInfo";
/// Print opcode for the success channel.
pub const OP_PRINT_SUCC: &str = "opPrintSucc";
/// Print opcode for the warning channel.
pub const OP_PRINT_WARN: &str = "opPrintWarn";

/// One buffered entry: a single line or an ordered group of lines that
/// belong together (a gated block, a help record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lines {
    One(String),
    Many(Vec<String>),
}

impl From<String> for Lines {
    fn from(line: String) -> Self {
        Lines::One(line)
    }
}

impl From<&str> for Lines {
    fn from(line: &str) -> Self {
        Lines::One(line.to_string())
    }
}

impl From<Vec<String>> for Lines {
    fn from(lines: Vec<String>) -> Self {
        Lines::Many(lines)
    }
}

/// Append-only buffer of line groups.
///
/// Rendering emits every entry's lines with one blank line after each
/// entry. Entries are never reordered or rewritten once pushed.
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    entries: Vec<Lines>,
}

impl Buffer {
    /// Append one entry.
    pub fn push(&mut self, lines: Lines) {
        self.entries.push(lines);
    }

    /// Number of buffered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been buffered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize all entries, each followed by one blank separator line.
    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for entry in &self.entries {
            match entry {
                Lines::One(line) => lines.push(line),
                Lines::Many(group) => lines.extend(group.iter().map(String::as_str)),
            }
            lines.push("");
        }
        lines.join("\n")
    }
}

/// The contract every dialect backend implements.
///
/// Dialect-specific methods have no defaults: a backend that misses one
/// does not compile. The shared behavior (buffering, print-channel
/// prefixing, snippet path resolution) is provided on top of them.
pub trait Client {
    /// Dialect identifier ("nu", "pwsh", "zsh").
    fn name(&self) -> &str;

    /// File extension for on-disk snippets of this dialect.
    fn extension(&self) -> &str;

    /// The output buffer.
    fn buffer(&self) -> &Buffer;

    /// The output buffer, mutable.
    fn buffer_mut(&mut self) -> &mut Buffer;

    /// Render `value` as a dialect string literal that preserves its exact
    /// content when interpolated into generated code.
    fn to_inner(&self, value: &str) -> String;

    /// Render `value` as the dialect's interpolable string fragment.
    fn to_outer(&self, value: &str) -> String;

    /// The statement enabling command echoing, or an empty string when
    /// the dialect has no equivalent.
    fn trace(&self) -> String;

    /// A variable assignment statement. Key parts are joined with `_`
    /// and uppercased.
    fn var_set(&self, key: &[&str], value: &str) -> String;

    /// An array-variable assignment statement.
    fn var_set_arr(&self, key: &[&str], values: &[String]) -> String;

    /// A variable removal statement.
    fn var_unset(&self, key: &[&str]) -> String;

    /// Wrap `lines` in an anonymous block that prompts
    /// `? <name> [y, [n]]: ` and only runs them when the answer is not
    /// `n`. A `YES` variable in the target environment skips the prompt.
    fn gated_func(&self, name: &str, lines: &[String]) -> Vec<String>;

    /// The dialect's non-interactive, config-free invocation line.
    fn exec_str(&self, command: &str) -> String;

    /// Append one entry to the buffer.
    fn with(&mut self, lines: Lines) {
        self.buffer_mut().push(lines);
    }

    /// Serialize the buffer into the final script text.
    fn build(&self) -> String {
        self.buffer().render()
    }

    /// Format lines for the standard print channel.
    fn print(&self, lines: &[String]) -> Vec<String> {
        to_print(self, lines, OP_PRINT)
    }

    /// Format lines for the command print channel.
    fn print_cmd(&self, lines: &[String]) -> Vec<String> {
        to_print(self, lines, OP_PRINT_CMD)
    }

    /// Format lines for the error print channel.
    fn print_err(&self, lines: &[String]) -> Vec<String> {
        to_print(self, lines, OP_PRINT_ERR)
    }

    /// Format lines for the info print channel.
    fn print_info(&self, lines: &[String]) -> Vec<String> {
        to_print(self, lines, OP_PRINT_INFO)
    }

    /// Format lines for the success print channel.
    fn print_succ(&self, lines: &[String]) -> Vec<String> {
        to_print(self, lines, OP_PRINT_SUCC)
    }

    /// Format lines for the warning print channel.
    fn print_warn(&self, lines: &[String]) -> Vec<String> {
        to_print(self, lines, OP_PRINT_WARN)
    }

    /// Load a snippet for this dialect: `cli/<name>/<parts...>`, with the
    /// dialect extension appended unless already present. Missing files
    /// yield the empty string; this never errors.
    fn file_load(&self, loader: &dyn FileLoader, parts: &[&str]) -> String {
        let mut path = format!("cli/{}", self.name());
        for part in parts {
            path.push('/');
            path.push_str(part);
        }
        let suffix = format!(".{}", self.extension());
        if !path.ends_with(&suffix) {
            path.push_str(&suffix);
        }
        match loader.load(std::path::Path::new(&path)) {
            Some(content) => content,
            None => {
                log::debug!("snippet not found: {path}");
                String::new()
            },
        }
    }
}

/// Prefix every line with a print opcode, quoting it through `to_inner`.
pub fn to_print<C: Client + ?Sized>(client: &C, lines: &[String], op: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| format!("{op} {}", client.to_inner(line)))
        .collect()
}

/// Look up a dialect backend by identifier.
pub fn client_for(name: &str) -> Option<Box<dyn Client>> {
    match name {
        "nu" => Some(Box::new(crate::Nushell::new())),
        "pwsh" => Some(Box::new(crate::Powershell::new())),
        "zsh" => Some(Box::new(crate::Zshell::new())),
        _ => None,
    }
}
