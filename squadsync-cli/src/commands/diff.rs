//! `squadsync diff` — show pending deletes and adds without issuing them.

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use squadsync_client::SquadClient;
use squadsync_core::MemberRecord;
use squadsync_sync::pipeline;

use super::SettingsArgs;
use crate::logging;

/// Arguments for `squadsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Emit the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "action")]
    action: &'static str,
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "rank")]
    rank: String,
}

impl PlanRow {
    fn new(action: &'static str, member: &MemberRecord) -> Self {
        Self {
            action,
            id: member.id.to_string(),
            name: member.display_name.clone(),
            rank: member.rank.clone(),
        }
    }
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let settings = self.settings.resolve()?;
        logging::init(&settings.log)?;

        let client = SquadClient::from_settings(&settings).context("invalid squad endpoint")?;
        let rosters = pipeline::collect(&client, &settings.roster_path)
            .inspect_err(|err| {
                if settings.log.file.is_some() {
                    tracing::error!(error = %err, "aborting");
                }
            })
            .with_context(|| format!("diff failed for squad '{}'", settings.squad_id))?;
        let plan = rosters.plan();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&plan).context("failed to serialize plan JSON")?
            );
            return Ok(());
        }

        if plan.is_empty() {
            println!("No differences for squad '{}'.", settings.squad_id);
            return Ok(());
        }

        let rows: Vec<PlanRow> = plan
            .to_delete
            .iter()
            .map(|m| PlanRow::new("delete", m))
            .chain(plan.to_add.iter().map(|m| PlanRow::new("add", m)))
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        println!(
            "{} to delete, {} to add. Run 'squadsync sync' to apply.",
            plan.to_delete.len(),
            plan.to_add.len()
        );
        Ok(())
    }
}
