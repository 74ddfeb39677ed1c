//! Sample command tree for the demo binary.

use polyshell_client::{Client, DirLoader};
use polyshell_cmd::{Arg, Command, CommandSpec, EnvStore, GroupCommand};
use polyshell_types::context::{Context, with_context};
use polyshell_types::error::Result;

/// Build the demo tree: a root group with `status` and `snippet` leaves.
pub fn build_tree(snippet_dir: &str) -> GroupCommand {
    let scopes = vec!["polyshell".to_string()];
    GroupCommand {
        spec: CommandSpec::standard(Vec::new(), "polyshell", "declarative setup script builder"),
        commands: vec![
            Box::new(StatusCmd {
                spec: CommandSpec::standard(
                    scopes.clone(),
                    "status",
                    "print request and system information",
                ),
            }),
            Box::new(SnippetCmd {
                spec: {
                    let mut spec = CommandSpec::standard(
                        scopes.clone(),
                        "snippet",
                        "render a named snippet behind a confirmation gate",
                    );
                    spec.arguments = vec![Arg::required("name", "snippet to load")];
                    spec
                },
                loader: DirLoader::new(snippet_dir),
            }),
        ],
    }
}

/// `status`: report what the server knows about the caller.
struct StatusCmd {
    spec: CommandSpec,
}

impl Command for StatusCmd {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn work(
        &self,
        client: &mut dyn Client,
        context: &Context,
        _environment: &mut EnvStore,
    ) -> Result<String> {
        let lines = client.print_info(&[
            with_context("origin {REQ_ORIG}{REQ_PATH}", context),
            with_context("host {SYS_HOST} user {SYS_USER}", context),
        ]);
        client.with(lines.into());
        Ok(client.build())
    }
}

/// `snippet <name>`: load a dialect snippet and gate it behind a prompt.
struct SnippetCmd {
    spec: CommandSpec,
    loader: DirLoader,
}

impl Command for SnippetCmd {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn work(
        &self,
        client: &mut dyn Client,
        _context: &Context,
        environment: &mut EnvStore,
    ) -> Result<String> {
        let name = environment
            .get(&self.env_key("name"))
            .unwrap_or_default()
            .to_string();
        let content = client.file_load(&self.loader, &[&name]);
        let lines = if content.is_empty() {
            client.print_warn(&[format!("no snippet named {name}")])
        } else {
            let body: Vec<String> = content.lines().map(str::to_string).collect();
            client.gated_func(&name, &body)
        };
        client.with(lines.into());
        Ok(client.build())
    }
}
