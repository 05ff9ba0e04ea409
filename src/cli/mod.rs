pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "ondemand")]
#[command(about = "Manage directory-backed projects from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Data root (overrides PROJECTS_DATAROOT)")]
    pub dataroot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create, inspect, update and destroy projects")]
    Project {
        #[command(subcommand)]
        cmd: commands::project::ProjectCommands,
    },

    #[command(about = "Show the mode and ACLs of a path")]
    Permissions {
        #[arg(help = "Path to inspect")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    if let Some(dataroot) = cli.dataroot {
        config.storage.dataroot = utils::absolute(dataroot)?;
    }

    match cli.command {
        Commands::Project { cmd } => commands::project::handle(cmd, &config, output_format),
        Commands::Permissions { path } => commands::permissions::handle(path, output_format),
    }
}
