//! pairing-with command-line tool.
//!
//! Prints `Co-authored-by:` trailers for the GitHub users you pair with,
//! and manages named aliases for groups of users.
//!
//! ```text
//! pairing-with schustafa
//! pairing-with schustafa stephanieg0
//! pairing-with --alias buddies schustafa stephanieg0
//! pairing-with buddies
//! pairing-with --list-aliases
//! pairing-with --delete-alias buddies
//! git log -1 --format=%B | pairing-with --from-message -
//! ```

mod style;

use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use dialoguer::Confirm;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pairing_with_core::github::endpoint::api_host;
use pairing_with_core::github::{graphql_endpoint, resolve_token, DEFAULT_API_URL};
use pairing_with_core::mentions::parse_pairing_handles;
use pairing_with_core::{AliasBook, AliasStore, AttributionFormatter, GraphQlClient};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Print Co-authored-by trailers for the people you pair with.
#[derive(Parser, Debug)]
#[command(
    name = "pairing-with",
    version,
    about = "Print Co-authored-by trailers for GitHub users and aliases"
)]
struct Cli {
    /// GitHub logins or alias names.
    #[arg(value_name = "HANDLE")]
    handles: Vec<String>,

    /// Set NAME as an alias for the given handles.
    #[arg(
        long,
        value_name = "NAME",
        value_parser = clap::builder::NonEmptyStringValueParser::new(),
        conflicts_with_all = ["delete_alias", "list_aliases", "from_message"]
    )]
    alias: Option<String>,

    /// Delete the alias NAME (asks for confirmation).
    #[arg(long, value_name = "NAME", conflicts_with_all = ["list_aliases", "from_message"])]
    delete_alias: Option<String>,

    /// List all aliases.
    #[arg(long)]
    list_aliases: bool,

    /// Skip the delete confirmation prompt.
    #[arg(short, long, requires = "delete_alias")]
    yes: bool,

    /// Also pair with everyone named in "pairing with @..." phrases of a
    /// commit message file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    from_message: Option<PathBuf>,

    /// GitHub REST API base URL; the GraphQL endpoint is derived from it.
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Path to the alias store (default: $XDG_CONFIG_HOME/pairing-with/config.toml).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => AliasStore::at(path),
        None => AliasStore::default_location().context("failed to locate alias store")?,
    };
    let mut book = store.load().context("failed to load alias store")?;

    if let Some(alias) = &cli.alias {
        return cmd_set_alias(&store, &mut book, alias, &cli.handles);
    }
    if let Some(alias) = &cli.delete_alias {
        return cmd_delete_alias(&store, &mut book, alias, cli.yes);
    }
    if cli.list_aliases {
        cmd_list_aliases(&book);
        return Ok(());
    }

    match gather_handles(&cli.handles, cli.from_message.as_deref())? {
        Some(handles) => cmd_lookup(&book, &handles, &cli.api_url).await,
        None => {
            print_usage();
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_set_alias(
    store: &AliasStore,
    book: &mut AliasBook,
    alias: &str,
    handles: &[String],
) -> Result<()> {
    let change = book.add_alias(alias, handles.iter().cloned())?;
    if change.needs_persist() {
        store.save(book).context("error persisting config")?;
    }

    eprintln!(
        "{}",
        style::success(&format!(
            "{} -> {}",
            style::alias_name(alias),
            handles.join(" ")
        ))
    );
    Ok(())
}

fn cmd_delete_alias(store: &AliasStore, book: &mut AliasBook, alias: &str, yes: bool) -> Result<()> {
    if !book.alias_exists(alias) {
        debug!(alias, "alias already absent");
        return Ok(());
    }

    if !yes && !confirm_delete(alias)? {
        info!(alias, "delete declined");
        return Ok(());
    }

    let change = book.delete_alias(alias);
    if change.needs_persist() {
        store.save(book).context("error persisting config")?;
    }

    eprintln!("{}", style::success(&format!("deleted alias {}", alias)));
    Ok(())
}

fn cmd_list_aliases(book: &AliasBook) {
    for (alias, handles) in book.list_all() {
        println!("{}: {}", style::alias_name(alias), handles.join(" "));
    }
}

async fn cmd_lookup(book: &AliasBook, handles: &[String], api_url: &str) -> Result<()> {
    let expanded = book.expand(handles);
    if expanded.is_empty() {
        eprintln!("{}", style::warn("no handles to look up"));
        return Ok(());
    }
    debug!(handles = ?expanded, "looking up handles");

    let host = api_host(api_url);
    let token = resolve_token(&host)
        .await
        .context("could not find a GitHub token")?;
    let client = GraphQlClient::new(graphql_endpoint(api_url), token)
        .context("could not build request")?;

    let users = client.lookup_users(&expanded).await?;
    if users.len() < expanded.len() {
        let missing: Vec<&str> = expanded
            .iter()
            .map(String::as_str)
            .filter(|h| !users.iter().any(|u| u.login.eq_ignore_ascii_case(h)))
            .collect();
        info!(?missing, "no GitHub user for some handles");
    }

    print!("{}", AttributionFormatter::format_all(&users));
    Ok(())
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

/// Ask before deleting. Falls back to reading a `y`/`yes` line from stdin
/// when there is no terminal to prompt on.
fn confirm_delete(alias: &str) -> Result<bool> {
    let prompt = format!("delete alias {}?", alias);

    if console::user_attended_stderr() {
        return Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("could not read confirmation");
    }

    eprint!("{} [y/n] ", prompt);
    let mut response = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut response)
        .context("could not read")?;
    Ok(is_affirmative(&response))
}

fn is_affirmative(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Positional handles followed by those mentioned in the commit message.
/// `None` when there is neither, meaning usage should be shown instead.
fn gather_handles(
    positional: &[String],
    from_message: Option<&Path>,
) -> Result<Option<Vec<String>>> {
    let Some(source) = from_message else {
        return Ok((!positional.is_empty()).then(|| positional.to_vec()));
    };

    let message = read_message(source)?;
    let mentioned = parse_pairing_handles(&message);
    debug!(count = mentioned.len(), "handles mentioned in message");

    let mut handles = positional.to_vec();
    handles.extend(mentioned);
    Ok(Some(handles))
}

fn read_message(source: &Path) -> Result<String> {
    if source == Path::new("-") {
        let mut message = String::new();
        std::io::stdin()
            .read_to_string(&mut message)
            .context("could not read commit message from stdin")?;
        return Ok(message);
    }

    std::fs::read_to_string(source)
        .with_context(|| format!("could not read commit message from {}", source.display()))
}

fn print_usage() {
    let mut cmd = Cli::command();
    println!();
    println!("{}", cmd.render_usage());
    println!();
    println!("Run `pairing-with --help` for all options.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_alias() {
        let cli = Cli::try_parse_from(["pairing-with", "--alias", "buddies", "a", "b"]).unwrap();
        assert_eq!(cli.alias.as_deref(), Some("buddies"));
        assert_eq!(cli.handles, vec!["a", "b"]);
        assert_eq!(cli.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_yes_requires_delete_alias() {
        assert!(Cli::try_parse_from(["pairing-with", "--yes", "someone"]).is_err());
        let cli =
            Cli::try_parse_from(["pairing-with", "--delete-alias", "buddies", "-y"]).unwrap();
        assert!(cli.yes);
    }

    #[test]
    fn test_alias_conflicts_with_list() {
        assert!(Cli::try_parse_from(["pairing-with", "--alias", "x", "--list-aliases"]).is_err());
    }

    #[test]
    fn test_empty_alias_name_rejected() {
        assert!(Cli::try_parse_from(["pairing-with", "--alias", "", "a"]).is_err());
    }

    #[test]
    fn test_delete_alias_conflicts_with_from_message() {
        assert!(Cli::try_parse_from([
            "pairing-with",
            "--delete-alias",
            "buddies",
            "--from-message",
            "-"
        ])
        .is_err());
    }

    #[test]
    fn test_gather_handles_without_message() {
        assert_eq!(gather_handles(&[], None).unwrap(), None);
        assert_eq!(
            gather_handles(&["a".into()], None).unwrap(),
            Some(vec!["a".to_string()])
        );
    }

    #[test]
    fn test_gather_handles_merges_message_mentions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "Fix the honey pot.\n\nPairing with @pooh and @piglet.\n").unwrap();

        let handles = gather_handles(&["owl".into()], Some(&path)).unwrap();
        assert_eq!(
            handles,
            Some(vec!["owl".to_string(), "pooh".to_string(), "piglet".to_string()])
        );
    }

    #[test]
    fn test_gather_handles_empty_message_skips_usage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("COMMIT_EDITMSG");
        std::fs::write(&path, "").unwrap();

        assert_eq!(gather_handles(&[], Some(&path)).unwrap(), Some(vec![]));
        assert_eq!(
            gather_handles(&["owl".into()], Some(&path)).unwrap(),
            Some(vec!["owl".to_string()])
        );
    }

    #[test]
    fn test_gather_handles_missing_message_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = gather_handles(&[], Some(&dir.path().join("absent"))).unwrap_err();
        assert!(err.to_string().contains("could not read commit message"));
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative("  YES \n"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_set_and_delete_alias_commands() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::at(dir.path().join("config.toml"));
        let mut book = store.load().unwrap();

        cmd_set_alias(&store, &mut book, "pair", &["a".into(), "b".into()]).unwrap();
        assert!(store.load().unwrap().alias_exists("pair"));

        cmd_delete_alias(&store, &mut book, "pair", true).unwrap();
        assert!(!store.load().unwrap().alias_exists("pair"));

        cmd_delete_alias(&store, &mut book, "never-existed", false).unwrap();
    }

    #[test]
    fn test_self_referencing_alias_command_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::at(dir.path().join("config.toml"));
        let mut book = store.load().unwrap();

        let err = cmd_set_alias(&store, &mut book, "me", &["me".into()]).unwrap_err();
        assert!(err.to_string().contains("cannot reference itself"));
        assert!(store.load().unwrap().is_empty());
    }
}
