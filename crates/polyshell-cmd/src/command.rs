//! Command surface and recursive dispatch.
//!
//! Dispatch walks a token list against the declared surface of one
//! command. Flags bind into the environment store, child names recurse,
//! leftover tokens fill positional arguments, and anything unresolvable
//! falls back to help rendering; malformed input is never an error.

use polyshell_client::Client;
use polyshell_types::context::Context;
use polyshell_types::error::Result;
use polyshell_types::fmt::{Fmt, stringify};
use serde::Serialize;

use crate::env::EnvStore;

/// One positional argument.
///
/// Required arguments must be declared before optional ones: binding
/// stops at end-of-input, and the post-dispatch check only walks forward
/// from the last bound slot, so a required argument declared after an
/// optional one can go undetected when input runs out early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl Arg {
    /// Declare a required argument.
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    /// Declare an optional argument.
    pub fn optional(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
        }
    }
}

/// One option (consumes a value token) or switch (boolean) declaration.
///
/// The first `--`-prefixed key names the environment field the flag binds
/// to; short keys are spellings of the same flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub keys: Vec<String>,
    pub description: String,
}

impl Flag {
    pub fn new(keys: &[&str], description: &str) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            description: description.to_string(),
        }
    }
}

/// The declared surface of one command.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// Name the command is invoked by.
    pub name: String,
    /// One-line description for help output.
    pub description: String,
    /// Alternative invocation names.
    pub aliases: Vec<String>,
    /// Positional arguments, required first.
    pub arguments: Vec<Arg>,
    /// Flags that consume one following token as their value.
    pub options: Vec<Flag>,
    /// Boolean flags.
    pub switches: Vec<Flag>,
    /// Names of the ancestor commands, root first.
    pub scopes: Vec<String>,
}

impl CommandSpec {
    /// A bare spec with no declared surface.
    pub fn new(scopes: Vec<String>, name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            scopes,
            ..Self::default()
        }
    }
}

/// Expand shorthand flag tokens: `-abc` becomes `-a -b -c`.
///
/// `--` and `--name` tokens pass through untouched; a lone `-` expands to
/// nothing.
pub fn to_expanded_parts(parts: &[String]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(parts.len());
    for part in parts {
        if part.starts_with('-') && !part.starts_with("--") {
            for c in part.chars().skip(1) {
                expanded.push(format!("-{c}"));
            }
            continue;
        }
        expanded.push(part.clone());
    }
    expanded
}

/// The field name a flag binds to: the first `--` key minus its prefix.
fn long_key(keys: &[String]) -> &str {
    keys.iter()
        .find(|k| k.starts_with("--"))
        .and_then(|k| k.split("--").nth(1))
        .unwrap_or("")
}

/// Serializable help record for one command.
#[derive(Debug, Serialize)]
struct HelpRecord {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    aliases: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arguments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    switches: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<String>,
}

fn flag_lines(flags: &[Flag]) -> Option<Vec<String>> {
    if flags.is_empty() {
        return None;
    }
    let mut sorted: Vec<&Flag> = flags.iter().collect();
    sorted.sort_by(|a, b| a.keys.first().cmp(&b.keys.first()));
    Some(
        sorted
            .iter()
            .map(|f| format!("{} | {}", f.keys.join(", "), f.description))
            .collect(),
    )
}

fn help_record(spec: &CommandSpec, commands: &[Box<dyn Command>]) -> HelpRecord {
    let mut id_parts = spec.scopes.clone();
    id_parts.push(spec.name.clone());

    HelpRecord {
        id: format!("{} | {}", id_parts.join(" "), spec.description),
        aliases: (!spec.aliases.is_empty()).then(|| spec.aliases.join(", ")),
        arguments: (!spec.arguments.is_empty()).then(|| {
            spec.arguments
                .iter()
                .map(|a| {
                    let (open, close) = if a.required { ("<", ">") } else { ("[", "]") };
                    format!("{open}{}{close} | {}", a.name, a.description)
                })
                .collect()
        }),
        options: flag_lines(&spec.options),
        switches: flag_lines(&spec.switches),
        commands: (!commands.is_empty()).then(|| {
            commands
                .iter()
                .map(|c| c.spec().name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        }),
    }
}

#[derive(Serialize)]
struct DebugDump<'a> {
    debug: DebugPayload<'a>,
}

#[derive(Serialize)]
struct DebugPayload<'a> {
    context: &'a Context,
    environment: &'a EnvStore,
}

/// Materialize the accumulated environment onto the client: one variable
/// assignment per store entry (sorted), then the debug dump when this
/// node's debug switch is set, then the trace statement when its trace
/// switch is set. Runs once, before either terminal action.
fn materialize<C: Command + ?Sized>(
    command: &C,
    client: &mut dyn Client,
    context: &Context,
    environment: &EnvStore,
) -> Result<()> {
    for (key, value) in environment.iter() {
        let value = client.to_inner(value);
        let line = client.var_set(&[key], &value);
        client.with(line.into());
    }

    if environment.get(&command.env_key("debug")).is_some() {
        let format = Fmt::from_name(
            environment
                .get(&command.env_key("format"))
                .unwrap_or_default(),
        );
        let dump = stringify(
            &DebugDump {
                debug: DebugPayload {
                    context,
                    environment,
                },
            },
            format,
        )?;
        let lines = client.print(&[dump]);
        client.with(lines.into());
    }

    if environment.get(&command.env_key("trace")).is_some() {
        let line = client.trace();
        client.with(line.into());
    }

    Ok(())
}

/// The command contract.
///
/// `spec` and `commands` describe the surface; `work` is the payload.
/// Dispatch, help rendering, and environment-key derivation are provided
/// on top of them and behave identically for every command.
pub trait Command {
    /// The declared surface.
    fn spec(&self) -> &CommandSpec;

    /// Child commands, if any.
    fn commands(&self) -> &[Box<dyn Command>] {
        &[]
    }

    /// The command's payload. Defaults to rendering help.
    fn work(
        &self,
        client: &mut dyn Client,
        context: &Context,
        environment: &mut EnvStore,
    ) -> Result<String> {
        let _ = context;
        self.help(client, environment)
    }

    /// Store-key parts for one of this command's fields: the scope chain
    /// plus the command name plus the field, minus the leading root name.
    /// The root's own fields therefore land on bare keys.
    fn env_key(&self, field: &str) -> Vec<String> {
        let spec = self.spec();
        let mut key = spec.scopes.clone();
        key.push(spec.name.clone());
        key.push(field.to_string());
        key.remove(0);
        key
    }

    /// Render this command's help record through the client's info
    /// channel and build the full buffered script.
    fn help(&self, client: &mut dyn Client, environment: &EnvStore) -> Result<String> {
        let format = Fmt::from_name(
            environment
                .get(&self.env_key("format"))
                .unwrap_or_default(),
        );
        let text = stringify(&help_record(self.spec(), self.commands()), format)?;
        let lines = client.print_info(&[text]);
        client.with(lines.into());
        let body = client.build();

        if environment.get(&self.env_key("log")).is_some() {
            log::info!("{body}");
        }

        Ok(body)
    }

    /// Consume `parts` against this command's surface.
    ///
    /// Per token, first match wins: switch, option (with its value
    /// token), child command (tail recursion), positional argument,
    /// help fallback. After the loop the first unbound required argument
    /// also falls back to help. The environment is materialized exactly
    /// once before the terminal action: help when this node's help
    /// switch is set or the invocation was malformed, `work` otherwise.
    fn process(
        &self,
        parts: &[String],
        client: &mut dyn Client,
        context: &Context,
        environment: &mut EnvStore,
    ) -> Result<String> {
        let parts = to_expanded_parts(parts);
        let spec = self.spec();

        let mut parts_index = 0;
        let mut argument_index = 0;

        while parts_index < parts.len() {
            let part = parts[parts_index].as_str();

            if part.starts_with('-') && part != "--" {
                if let Some(switch) = spec
                    .switches
                    .iter()
                    .find(|s| s.keys.iter().any(|k| k == part))
                {
                    environment.set(&self.env_key(long_key(&switch.keys)), "1");
                    parts_index += 1;
                    continue;
                }
                let option = spec
                    .options
                    .iter()
                    .find(|o| o.keys.iter().any(|k| k == part));
                if let Some(option) = option
                    && parts_index + 1 < parts.len()
                {
                    let value = parts[parts_index + 1].as_str();
                    if value.starts_with('-') {
                        materialize(self, client, context, environment)?;
                        return self.help(client, environment);
                    }
                    environment.set(&self.env_key(long_key(&option.keys)), value);
                    parts_index += 2;
                    continue;
                }
                // An option with no value token falls through: the flag
                // may still name a child or fill an argument slot.
            }

            if let Some(command) = self.commands().iter().find(|c| {
                c.spec().name == part || c.spec().aliases.iter().any(|a| a == part)
            }) {
                return command.process(&parts[parts_index + 1..], client, context, environment);
            }

            if !spec.arguments.is_empty() {
                let all_arguments_bound = argument_index == spec.arguments.len();
                if all_arguments_bound {
                    environment.set_append(
                        &self.env_key(&spec.arguments[argument_index - 1].name),
                        part,
                    );
                } else {
                    environment.set(&self.env_key(&spec.arguments[argument_index].name), part);
                    argument_index += 1;
                }
                parts_index += 1;
                continue;
            }

            materialize(self, client, context, environment)?;
            return self.help(client, environment);
        }

        while argument_index < spec.arguments.len() {
            if spec.arguments[argument_index].required {
                materialize(self, client, context, environment)?;
                return self.help(client, environment);
            }
            argument_index += 1;
        }

        materialize(self, client, context, environment)?;
        if environment.get(&self.env_key("help")).is_some() {
            return self.help(client, environment);
        }
        self.work(client, context, environment)
    }

    /// Dispatch with a fresh environment store.
    fn dispatch(
        &self,
        parts: &[String],
        client: &mut dyn Client,
        context: &Context,
    ) -> Result<String> {
        let mut environment = EnvStore::new();
        self.process(parts, client, context, &mut environment)
    }
}

/// A plain grouping node: declared surface plus children, with help as
/// its work.
pub struct GroupCommand {
    pub spec: CommandSpec,
    pub commands: Vec<Box<dyn Command>>,
}

impl Command for GroupCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyshell_client::Zshell;

    /// Test command whose work leaves a recognizable marker line.
    struct Probe {
        spec: CommandSpec,
        commands: Vec<Box<dyn Command>>,
    }

    impl Probe {
        fn new(spec: CommandSpec) -> Self {
            Self {
                spec,
                commands: Vec::new(),
            }
        }
    }

    impl Command for Probe {
        fn spec(&self) -> &CommandSpec {
            &self.spec
        }

        fn commands(&self) -> &[Box<dyn Command>] {
            &self.commands
        }

        fn work(
            &self,
            client: &mut dyn Client,
            _context: &Context,
            _environment: &mut EnvStore,
        ) -> Result<String> {
            client.with("work-ran".into());
            Ok(client.build())
        }
    }

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn run(
        command: &dyn Command,
        parts: &[&str],
        environment: &mut EnvStore,
    ) -> String {
        let mut client = Zshell::new();
        command
            .process(&tokens(parts), &mut client, &Context::default(), environment)
            .unwrap()
    }

    #[test]
    fn expands_shorthand_flags() {
        assert_eq!(
            to_expanded_parts(&tokens(&["-abc"])),
            tokens(&["-a", "-b", "-c"])
        );
    }

    #[test]
    fn expansion_leaves_long_flags_alone() {
        assert_eq!(
            to_expanded_parts(&tokens(&["--name", "--", "value"])),
            tokens(&["--name", "--", "value"])
        );
    }

    #[test]
    fn expansion_drops_a_lone_dash() {
        assert!(to_expanded_parts(&tokens(&["-"])).is_empty());
    }

    #[test]
    fn switch_sets_its_long_key() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.switches = vec![Flag::new(&["-d", "--debug"], "debug")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        run(&probe, &["-d"], &mut env);
        assert_eq!(env.get(&["debug"]), Some("1"));
    }

    #[test]
    fn switch_wins_over_option_with_overlapping_key() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.switches = vec![Flag::new(&["-x", "--mark"], "switch")];
        spec.options = vec![Flag::new(&["-x", "--max"], "option")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["-x"], &mut env);
        assert_eq!(env.get(&["mark"]), Some("1"));
        assert_eq!(env.get(&["max"]), None);
        assert!(out.contains("work-ran"));
    }

    #[test]
    fn option_consumes_the_next_token() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.options = vec![Flag::new(&["-f", "--format"], "format")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["--format", "json"], &mut env);
        assert_eq!(env.get(&["format"]), Some("json"));
        assert!(out.contains("work-ran"));
    }

    #[test]
    fn option_followed_by_a_flag_renders_help() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.options = vec![Flag::new(&["-f", "--format"], "format")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["--format", "-d"], &mut env);
        assert_eq!(env.get(&["format"]), None);
        assert!(!out.contains("work-ran"));
        assert!(out.contains("opPrintInfo"));
    }

    #[test]
    fn trailing_option_without_value_renders_help() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.options = vec![Flag::new(&["-f", "--format"], "format")];
        spec.switches = vec![Flag::new(&["-h", "--help"], "help")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["--format"], &mut env);
        assert!(!out.contains("work-ran"));
        assert!(out.contains("opPrintInfo"));
    }

    #[test]
    fn trailing_option_is_absorbed_by_a_positional_slot() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.options = vec![Flag::new(&["-f", "--format"], "format")];
        spec.arguments = vec![Arg::required("target", "target")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["--format"], &mut env);
        assert_eq!(env.get(&["target"]), Some("--format"));
        assert!(out.contains("work-ran"));
    }

    #[test]
    fn required_argument_binds_and_optional_stays_unset() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.arguments = vec![
            Arg::required("first", "first"),
            Arg::optional("second", "second"),
        ];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["x"], &mut env);
        assert_eq!(env.get(&["first"]), Some("x"));
        assert_eq!(env.get(&["second"]), None);
        assert!(out.contains("work-ran"));
    }

    #[test]
    fn missing_required_argument_renders_help() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.arguments = vec![Arg::required("first", "first")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &[], &mut env);
        assert!(!out.contains("work-ran"));
        assert!(out.contains("opPrintInfo"));
    }

    #[test]
    fn extra_tokens_append_to_the_last_argument() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.arguments = vec![Arg::required("words", "words")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        run(&probe, &["a", "b", "c"], &mut env);
        assert_eq!(env.get(&["words"]), Some("a b c"));
        assert_eq!(env.get_split(&["words"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn unknown_flag_is_absorbed_by_a_positional_slot() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.arguments = vec![Arg::required("target", "target")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["-q"], &mut env);
        assert_eq!(env.get(&["target"]), Some("-q"));
        assert!(out.contains("work-ran"));
    }

    #[test]
    fn unknown_flag_without_positionals_renders_help() {
        let probe = Probe::new(CommandSpec::new(Vec::new(), "root", "test"));
        let mut env = EnvStore::new();
        let out = run(&probe, &["-q"], &mut env);
        assert!(!out.contains("work-ran"));
        assert!(out.contains("opPrintInfo"));
    }

    #[test]
    fn shorthand_sets_both_switches() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.switches = vec![
            Flag::new(&["-a", "--alpha"], "a"),
            Flag::new(&["-b", "--beta"], "b"),
        ];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        run(&probe, &["-ab"], &mut env);
        assert_eq!(env.get(&["alpha"]), Some("1"));
        assert_eq!(env.get(&["beta"]), Some("1"));
    }

    #[test]
    fn help_switch_renders_help() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.switches = vec![Flag::new(&["-h", "--help"], "help")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["-h"], &mut env);
        assert!(!out.contains("work-ran"));
        assert!(out.contains("opPrintInfo"));
        // The help switch still materializes as a variable line.
        assert!(out.contains("HELP='1'"));
    }

    #[test]
    fn child_resolves_by_name_and_alias() {
        let mut child_spec = CommandSpec::new(vec!["root".to_string()], "status", "status");
        child_spec.aliases = vec!["st".to_string()];
        let root = GroupCommand {
            spec: CommandSpec::new(Vec::new(), "root", "test"),
            commands: vec![Box::new(Probe::new(child_spec))],
        };
        let mut env = EnvStore::new();
        assert!(run(&root, &["status"], &mut env).contains("work-ran"));
        let mut env = EnvStore::new();
        assert!(run(&root, &["st"], &mut env).contains("work-ran"));
    }

    #[test]
    fn nested_scopes_qualify_environment_keys() {
        let mut add_spec = CommandSpec::new(
            vec!["root".to_string(), "remote".to_string()],
            "add",
            "add a remote",
        );
        add_spec.arguments = vec![Arg::required("name", "remote name")];
        let root = GroupCommand {
            spec: CommandSpec::new(Vec::new(), "root", "test"),
            commands: vec![Box::new(GroupCommand {
                spec: CommandSpec::new(vec!["root".to_string()], "remote", "remotes"),
                commands: vec![Box::new(Probe::new(add_spec))],
            })],
        };
        let mut env = EnvStore::new();
        run(&root, &["remote", "add", "origin"], &mut env);
        assert_eq!(env.get(&["remote", "add", "name"]), Some("origin"));
    }

    #[test]
    fn dispatch_materializes_vars_then_debug_then_payload() {
        let child_spec = CommandSpec::standard(
            vec!["root".to_string()],
            "status",
            "status",
        );
        let root = GroupCommand {
            spec: CommandSpec::standard(Vec::new(), "root", "test"),
            commands: vec![Box::new(Probe {
                spec: child_spec,
                commands: Vec::new(),
            })],
        };
        let mut client = Zshell::new();
        let out = root
            .dispatch(
                &tokens(&["status", "-d"]),
                &mut client,
                &Context::default(),
            )
            .unwrap();

        let var = out.find("STATUS_DEBUG='1'").expect("variable line");
        let dump = out.find("opPrint '").expect("debug dump line");
        let payload = out.find("work-ran").expect("payload line");
        assert!(var < dump, "vars must precede the debug dump");
        assert!(dump < payload, "the debug dump must precede the payload");
        assert!(out.contains("environment"), "dump must include the store");
    }

    #[test]
    fn trace_switch_appends_trace_statement_before_payload() {
        let mut spec = CommandSpec::new(Vec::new(), "root", "test");
        spec.switches = vec![Flag::new(&["-t", "--trace"], "trace")];
        let probe = Probe::new(spec);
        let mut env = EnvStore::new();
        let out = run(&probe, &["-t"], &mut env);
        let trace = out.find("set -x").expect("trace statement");
        let payload = out.find("work-ran").expect("payload line");
        assert!(trace < payload);
    }

    #[test]
    fn help_record_lists_the_full_surface() {
        let mut spec = CommandSpec::new(vec!["root".to_string()], "status", "show status");
        spec.aliases = vec!["st".to_string()];
        spec.arguments = vec![
            Arg::required("target", "what to check"),
            Arg::optional("depth", "how deep"),
        ];
        spec.switches = vec![
            Flag::new(&["-v", "--verbose"], "more output"),
            Flag::new(&["-q", "--quiet"], "less output"),
        ];
        let record = help_record(&spec, &[]);
        let text = stringify(&record, Fmt::Yaml).unwrap();
        assert!(text.contains("id: root status | show status"));
        assert!(text.contains("aliases: st"));
        assert!(text.contains("<target> | what to check"));
        assert!(text.contains("[depth] | how deep"));
        // Switches are sorted by first key.
        let quiet = text.find("-q, --quiet").unwrap();
        let verbose = text.find("-v, --verbose").unwrap();
        assert!(quiet < verbose);
    }

    #[test]
    fn help_record_lists_child_names() {
        let root = GroupCommand {
            spec: CommandSpec::new(Vec::new(), "root", "test"),
            commands: vec![
                Box::new(Probe::new(CommandSpec::new(
                    vec!["root".to_string()],
                    "status",
                    "s",
                ))),
                Box::new(Probe::new(CommandSpec::new(
                    vec!["root".to_string()],
                    "setup",
                    "s",
                ))),
            ],
        };
        let record = help_record(root.spec(), root.commands());
        let text = stringify(&record, Fmt::Yaml).unwrap();
        assert!(text.contains("commands: status, setup"));
    }

    #[test]
    fn format_option_switches_help_to_json() {
        let probe = Probe::new(CommandSpec::standard(Vec::new(), "root", "test"));
        let mut env = EnvStore::new();
        let out = run(&probe, &["--format", "json", "--help"], &mut env);
        assert_eq!(env.get(&["format"]), Some("json"));
        // A JSON help record quotes its id field.
        assert!(out.contains("\\\"id\\\"") || out.contains("\"id\""));
    }

    #[test]
    fn long_key_takes_the_first_double_dash_key() {
        assert_eq!(
            long_key(&["-f".to_string(), "--format".to_string()]),
            "format"
        );
        assert_eq!(long_key(&["-f".to_string()]), "");
    }
}
