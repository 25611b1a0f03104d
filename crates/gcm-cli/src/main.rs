mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gcm_core::config::{MemoryConfiguration, ProcessEnvironment, Settings};
use std::process::ExitCode;
use std::sync::Arc;

use commands::credential::Operation;

#[derive(Parser, Debug)]
#[command(name = "git-credential-gcm")]
#[command(about = "Git credential helper that picks the hosting provider for each remote")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Return a credential for the remote described on stdin
    Get,

    /// Store the credential described on stdin
    Store,

    /// Erase the credential described on stdin
    Erase,

    /// Print the ID of the host provider for a remote
    Resolve(commands::resolve::ResolveArgs),

    /// List the configuration scopes of a remote URL, most specific first
    Scopes(commands::scopes::ScopesArgs),

    /// Inspect settings the way the helper resolves them
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Log to stderr: warnings by default, debug output when `GCM_TRACE` is
/// enabled. `RUST_LOG` takes precedence over both.
fn init_logger() {
    // Tracing is read from the environment only, before any config is loaded
    let settings = Settings::new(
        Arc::new(ProcessEnvironment),
        Arc::new(MemoryConfiguration::new()),
        None,
    );

    let default_level = if settings.trace_target().is_some() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logger();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| anyhow::anyhow!("Failed to create async runtime: {}", e))?;

    match args.command {
        Commands::Get => rt.block_on(commands::credential::execute(Operation::Get)),
        Commands::Store => rt.block_on(commands::credential::execute(Operation::Store)),
        Commands::Erase => rt.block_on(commands::credential::execute(Operation::Erase)),
        Commands::Resolve(resolve_args) => rt.block_on(commands::resolve::execute(resolve_args)),
        Commands::Scopes(scopes_args) => commands::scopes::execute(scopes_args),
        Commands::Config { command } => commands::config::execute(command),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("fatal: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
