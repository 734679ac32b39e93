//! `squadsync sync` — one reconciliation pass against the squad service.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use squadsync_client::SquadClient;
use squadsync_sync::{pipeline, MutationKind, MutationOutcome, MutationResult, ReconcileReport};

use super::SettingsArgs;
use crate::logging;

/// Arguments for `squadsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Compute and report the changes without calling create or delete.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let settings = self.settings.resolve()?;
        logging::init(&settings.log)?;
        tracing::debug!(?settings, "settings resolved");

        let client = SquadClient::from_settings(&settings).context("invalid squad endpoint")?;
        let report = pipeline::run(&client, &settings.roster_path, self.dry_run)
            .inspect_err(|err| {
                if settings.log.file.is_some() {
                    tracing::error!(error = %err, "aborting");
                }
            })
            .with_context(|| format!("sync failed for squad '{}'", settings.squad_id))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize report JSON")?
            );
        } else {
            print_report(&settings.squad_id, &report);
        }
        Ok(())
    }
}

fn print_report(squad_id: &str, report: &ReconcileReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    if report.is_noop() {
        println!(
            "{prefix}✓ squad '{squad_id}' already matches the roster ({} members)",
            report.local_count
        );
        return;
    }

    let failures = report.failures();
    let mark = if failures > 0 { "!".yellow().bold() } else { "✓".green().bold() };
    println!(
        "{prefix}{mark} squad '{squad_id}' reconciled ({} deleted, {} added, {} failed)",
        report.applied_count(MutationKind::Delete),
        report.applied_count(MutationKind::Add),
        failures,
    );

    for outcome in &report.outcomes {
        println!("  {}  {}  {}", kind_marker(outcome), outcome.member, result_label(outcome));
    }
}

fn kind_marker(outcome: &MutationOutcome) -> String {
    match outcome.kind {
        MutationKind::Delete => "-".red().bold().to_string(),
        MutationKind::Add => "+".green().bold().to_string(),
    }
}

fn result_label(outcome: &MutationOutcome) -> String {
    match &outcome.result {
        MutationResult::Applied { status } => status.to_string().bright_black().to_string(),
        MutationResult::Rejected { status } => format!("rejected ({status})").yellow().to_string(),
        MutationResult::Failed { message } => format!("failed: {message}").red().to_string(),
        MutationResult::Skipped => "skipped".bright_black().to_string(),
    }
}
