//! polyshell demo entry point.
//!
//! Renders the sample command tree as source for one shell dialect and
//! writes it to stdout. The first argument selects the dialect ("nu",
//! "pwsh", "zsh"); everything after it is dispatched as command tokens:
//!
//!   polyshell zsh status -d
//!   polyshell nu snippet fonts -y

mod commands;

use anyhow::Result;

use polyshell_client::client_for;
use polyshell_cmd::Command;
use polyshell_types::context::Context;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut parts: Vec<String> = std::env::args().skip(1).collect();

    // Resolve dialect from the first argument or POLYSHELL_CLIENT.
    let dialect = if parts
        .first()
        .is_some_and(|p| matches!(p.as_str(), "nu" | "pwsh" | "zsh"))
    {
        parts.remove(0)
    } else {
        std::env::var("POLYSHELL_CLIENT").unwrap_or_else(|_| "zsh".to_string())
    };
    let mut client = client_for(&dialect)
        .ok_or_else(|| anyhow::anyhow!("unknown client dialect: {dialect}"))?;
    log::info!("rendering for {} (.{})", client.name(), client.extension());

    let snippet_dir =
        std::env::var("POLYSHELL_SNIPPETS").unwrap_or_else(|_| ".".to_string());

    let context = Context {
        req_orig: "http://localhost:8080".to_string(),
        req_path: "/".to_string(),
        sys_host: std::env::var("HOSTNAME").ok(),
        sys_user: std::env::var("USER").ok(),
        ..Context::default()
    };

    let root = commands::build_tree(&snippet_dir);
    let script = root.dispatch(&parts, client.as_mut(), &context)?;
    println!("{script}");

    Ok(())
}
