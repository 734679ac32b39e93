pub mod diff;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use squadsync_core::{config, Overrides, Settings};

/// Settings flags shared by every subcommand. Each one overrides the value
/// from the config file.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Config file (default: ~/.squadsync/config.yaml, skipped if absent).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Local roster file.
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Squad API key.
    #[arg(long, env = "SQUADSYNC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Squad identifier.
    #[arg(long)]
    pub squad_id: Option<String>,

    /// API root, e.g. https://armasquads.com/api/v1.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter (`info`, `debug`, ...). `RUST_LOG` takes precedence.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl SettingsArgs {
    /// Load the config file and apply these flags on top.
    pub fn resolve(self) -> Result<Settings> {
        let default_path = config::default_config_path().ok();
        let file = config::load_or_default_at(self.config.as_deref(), default_path.as_deref())
            .context("failed to load configuration")?;

        let overrides = Overrides {
            roster: self.roster,
            api_key: self.api_key,
            squad_id: self.squad_id,
            base_url: self.base_url,
            log_file: self.log_file,
            log_level: self.log_level,
        };
        Settings::resolve(file, overrides).context("invalid settings")
    }
}
