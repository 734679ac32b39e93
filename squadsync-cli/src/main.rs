//! squadsync — mirror a local squad roster file onto the squad members API.
//!
//! # Usage
//!
//! ```text
//! squadsync sync [--dry-run] [--json] [--config <path>] [--roster <path>]
//!                [--api-key <key>] [--squad-id <id>] [--base-url <url>]
//!                [--log-file <path>] [--log-level <filter>]
//! squadsync diff [--json] [same settings flags]
//! ```

mod commands;
mod exit_codes;
mod logging;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "squadsync",
    version,
    about = "Reconcile a squad's remote member list against a local roster file",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Delete remote members missing from the roster, then add roster members missing remotely.
    Sync(SyncArgs),

    /// Show the deletes and adds a sync would issue, without issuing them.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // Usage errors exit 1. Exit 2 is reserved for a blank roster.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(exit_codes::EXIT_CONFIG)
            } else {
                ExitCode::from(exit_codes::EXIT_SUCCESS)
            };
        }
    };
    let result = match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
    };

    match result {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_codes::classify(&err))
        }
    }
}
