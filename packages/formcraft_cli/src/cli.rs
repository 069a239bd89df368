// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "formcraft", version, about = "Author, fill and browse forms")]
pub struct Cli {
    /// Directory holding the form records
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// List saved forms
    List,
    /// Preview a saved form
    Show { id: Uuid },
    /// Author a form from a JSON file: {"name": ..., "fields": [...]}
    Import { file: PathBuf },
    /// Delete a form and its submissions
    Delete { id: Uuid },
    /// Fill a form interactively
    Fill {
        id: Uuid,
        /// One question at a time; answer "<" to go back
        #[arg(long)]
        wizard: bool,
    },
    /// Print recorded submissions
    Submissions {
        #[arg(long)]
        form: Option<Uuid>,
    },
    /// Fetch one page of a remote list
    Browse {
        resource: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}
