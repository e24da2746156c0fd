//! Route table CLI.
//!
//! Loads a route table file, then validates it, lists its routes, resolves
//! paths against it, or serves lookups from stdin while hot-reloading the file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use route_trie::config::{load_config, RouteTableWatcher};
use route_trie::observability::logging::init_logging;
use route_trie::{RouteMatch, RouteTrie, SharedRouteTrie};

#[derive(Parser)]
#[command(name = "route-trie")]
#[command(about = "Validate and query route table files", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the route table
    Check,
    /// Print every route pattern with its target
    List,
    /// Resolve paths and print the matches as JSON
    Match {
        /// Paths to resolve
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Resolve paths read from stdin, reloading the table when it changes
    Watch,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(&cli.config)?;
    init_logging(&config.logging)?;

    let trie = config.build_trie()?;
    tracing::info!(
        path = ?cli.config,
        routes = trie.len(),
        separator = %config.trie.path_separator,
        "Route table ready"
    );

    match cli.command {
        Commands::Check => {
            println!("OK: {} routes", trie.len());
        }
        Commands::List => {
            for (route, target) in trie.routes() {
                println!("{}\t{}", route, target);
            }
        }
        Commands::Match { paths } => {
            let all_matched = match_batch(&trie, &paths, &mut io::stdout(), &mut io::stderr())?;
            if !all_matched {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Watch => {
            let shared = Arc::new(SharedRouteTrie::from_trie(trie));
            let _watcher = RouteTableWatcher::new(&cli.config, Arc::clone(&shared)).run()?;

            for line in io::stdin().lock().lines() {
                let line = line?;
                let path = line.trim();
                if path.is_empty() {
                    continue;
                }
                match shared.match_path(path) {
                    Ok(matched) => write_match(&mut io::stdout(), path, matched)?,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve every path, one JSON document per match on `out` and one line
/// per failed lookup on `err`. Returns whether every path matched.
fn match_batch(
    trie: &RouteTrie<String>,
    paths: &[String],
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let mut all_matched = true;
    for path in paths {
        match trie.match_path(path) {
            Ok(matched) => {
                all_matched &= matched.is_some();
                write_match(out, path, matched.map(RouteMatch::cloned))?;
            }
            Err(e) => {
                all_matched = false;
                writeln!(err, "Error: {}", e)?;
            }
        }
    }
    Ok(all_matched)
}

fn write_match(
    out: &mut impl Write,
    path: &str,
    matched: Option<RouteMatch<String>>,
) -> io::Result<()> {
    let output = match matched {
        Some(m) => serde_json::to_value(&m)?,
        None => json!({ "path": path, "value": null }),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)
}
