mod cli;
mod commands;
mod prompt;

use anyhow::Result;
use clap::Parser;
use formcraft::config::FormcraftConfig;

use crate::cli::{Cli, Cmd};

/// Flag, then config file, then environment, then default.
fn resolve_config(cli: &Cli) -> Result<FormcraftConfig> {
    let mut config = match &cli.config {
        Some(path) => FormcraftConfig::load(path)?,
        None => FormcraftConfig::from_env(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    log::debug!("using data directory {}", config.data_dir.display());

    match cli.cmd {
        Cmd::List => commands::list(&config),
        Cmd::Show { id } => commands::show(&config, id),
        Cmd::Import { file } => commands::import(&config, &file),
        Cmd::Delete { id } => commands::delete(&config, id),
        Cmd::Fill { id, wizard } => commands::fill(&config, id, wizard),
        Cmd::Submissions { form } => commands::submissions(&config, form),
        Cmd::Browse { resource, page } => commands::browse(&config, &resource, page).await,
    }
}
