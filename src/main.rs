//! Clio - Entry Point
//!
//! Resolves free-text requests ("how do I copy a file?") into one shell
//! command. Runs a single query with `ask`, maintains the module store with
//! `ingest` and `sync`, or starts a prompt loop when no subcommand is given.
//! Resolved commands are printed, never executed.

use clap::{Parser, Subcommand};
use clio::catalog::Catalog;
use clio::core::error::{ResolveError, Result};
use clio::core::ResolverConfig;
use clio::intent::{DetectionResult, Resolver};
use clio::modules::{ingest_dir, ModuleStore, ModuleSync};
use clio::providers::man::is_installed;
use clio::providers::{ManPageSearch, RemoteSearch};
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clio", version, about = "Find the shell command for what you want to do")]
struct Cli {
    /// TOML resolver configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML catalog replacing the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Skip the remote search tier
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one request and print the command
    Ask {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Load module manifests (*.yaml) from a directory into the store
    Ingest { dir: PathBuf },
    /// Download module manifests from the remote listing
    Sync,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clio=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::from_env(),
    };
    config.validate()?;

    let catalog = match &cli.catalog {
        Some(path) => Arc::new(Catalog::load(path)?),
        None => Catalog::builtin().clone(),
    };

    let store = Arc::new(open_store(&config)?);
    let rt = Runtime::new()?;

    match cli.command {
        Some(Command::Ingest { dir }) => {
            let added = ingest_dir(&store, &dir)?;
            println!("Loaded {} module(s) from {}", added, dir.display());
        }
        Some(Command::Sync) => {
            let sync = ModuleSync::from_config(&config)?;
            let updated = rt.block_on(sync.sync(&store))?;
            println!("Sync complete. Updated {} module(s).", updated);
        }
        Some(Command::Ask { words }) => {
            let resolver = build_resolver(config, catalog, store, cli.offline)?;
            let input = words.join(" ");
            match rt.block_on(resolver.resolve_until(&input, interrupted())) {
                Ok(result) => display_result(&result),
                Err(e) => report_failure(&input, &e),
            }
        }
        None => {
            if let Some(dir) = config.data_dir() {
                let added = ingest_dir(&store, &dir.join("modules"))?;
                if added > 0 {
                    tracing::info!("Loaded {} builtin module(s)", added);
                }
            }
            let resolver = build_resolver(config, catalog, store, cli.offline)?;
            let stdin = BufReader::new(tokio::io::stdin());
            rt.block_on(run_prompt(&resolver, stdin, interrupted))?;
        }
    }

    // a pending stdin read must not hold up exit
    rt.shutdown_background();
    Ok(())
}

/// Persistent store under the data directory, or in-memory without one
fn open_store(config: &ResolverConfig) -> Result<ModuleStore> {
    let store = match config.data_dir() {
        Some(dir) => ModuleStore::open(dir.join("modules.json"))?,
        None => {
            tracing::warn!("No data directory - module store will not persist");
            ModuleStore::in_memory()
        }
    };
    Ok(store.with_limit(config.provider_result_limit))
}

fn build_resolver(
    config: ResolverConfig,
    catalog: Arc<Catalog>,
    store: Arc<ModuleStore>,
    offline: bool,
) -> Result<Resolver> {
    let man_pages = Arc::new(ManPageSearch::new(config.provider_result_limit));
    let remote = if offline {
        None
    } else {
        Some(Arc::new(RemoteSearch::from_config(&config)?))
    };

    let mut resolver = Resolver::new(config, catalog)
        .with_man_pages(man_pages)
        .with_modules(store);
    if let Some(remote) = remote {
        resolver = resolver.with_remote(remote);
    }
    Ok(resolver)
}

/// Completes on Ctrl-C
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler: never cancel
        std::future::pending::<()>().await;
    }
}

/// Prompt loop: Ctrl-C during a resolution cancels it, Ctrl-C at the
/// prompt leaves
async fn run_prompt<R, F, Fut>(resolver: &Resolver, input: R, interrupt: F) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    F: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    println!("Clio - describe what you want to do. Type 'exit' or press Ctrl-C to quit.");
    println!("-----------------------------------------------------");

    let mut lines = input.lines();
    loop {
        print!(">> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = interrupt() => {
                println!();
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        match resolver.resolve_until(input, interrupt()).await {
            Ok(result) => display_result(&result),
            Err(e) => report_failure(input, &e),
        }
    }

    Ok(())
}

fn display_result(result: &DetectionResult) {
    println!();
    println!("Use: {}", result.command);
    println!("------------------------");
    println!("Purpose    : {}", result.description);
    println!(
        "Source     : {} ({:.0}% confidence)",
        result.source,
        result.confidence * 100.0
    );

    if let Some(program) = result.command.split_whitespace().next() {
        if !program.starts_with('.') && !is_installed(program) {
            println!("Note       : '{}' is not installed on this system", program);
        }
    }
    println!();
}

fn report_failure(input: &str, error: &ResolveError) {
    match error {
        ResolveError::Cancelled => println!("Cancelled."),
        ResolveError::NoKeywords => println!("Nothing to search for in '{}'. Try rephrasing.", input),
        ResolveError::NoMatch => println!("No matching command found for '{}'. Try rephrasing.", input),
    }
}
