//! `examsched init` — write project config and create the database.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::adapters::sqlite::{initialize_database, PoolConfig};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::config::Config;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
struct InitOutput {
    config_path: String,
    database_path: String,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        format!(
            "Initialized examsched.\n  config:   {}\n  database: {}",
            self.config_path, self.database_path
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let config_path = Path::new(".examsched/config.yaml");
    if config_path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", config_path.display());
    }

    let config = Config::default();

    std::fs::create_dir_all(".examsched").context("failed to create .examsched directory")?;
    let yaml = serde_yaml::to_string(&config).context("failed to serialize default config")?;
    std::fs::write(config_path, yaml).context("failed to write config file")?;

    let pool = initialize_database(
        &format!("sqlite:{}", config.database.path),
        PoolConfig::from(&config.database),
    )
    .await
    .context("failed to create database")?;
    pool.close().await;

    output(
        &InitOutput {
            config_path: config_path.display().to_string(),
            database_path: config.database.path.clone(),
        },
        json_mode,
    );
    Ok(())
}
