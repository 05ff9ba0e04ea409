use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::project::{ProjectAttributes, ProjectStore};

#[derive(Subcommand)]
pub enum ProjectCommands {
    #[command(about = "List all projects")]
    List,

    #[command(about = "Show project information")]
    Show {
        #[arg(help = "Project ID")]
        id: String,
    },

    #[command(about = "Create new project")]
    Create {
        #[arg(long, help = "Project name")]
        name: String,
        #[arg(long, help = "Project description")]
        description: Option<String>,
        #[arg(long, help = "Icon reference, e.g. fas://arrow-right")]
        icon: Option<String>,
        #[arg(long, help = "Use this directory instead of <dataroot>/projects/<id>")]
        directory: Option<PathBuf>,
        #[arg(long, help = "Directory whose contents seed the new project")]
        template: Option<PathBuf>,
        #[arg(long, help = "Explicit project ID (generated when omitted)")]
        id: Option<String>,
    },

    #[command(about = "Update project name, icon and description")]
    Update {
        #[arg(help = "Project ID")]
        id: String,
        #[arg(long, help = "Project name")]
        name: String,
        #[arg(long, help = "Icon reference, e.g. fas://arrow-right")]
        icon: String,
        #[arg(long, help = "Project description (unchanged when omitted)")]
        description: Option<String>,
    },

    #[command(about = "Destroy project (its files are kept)")]
    Destroy {
        #[arg(help = "Project ID")]
        id: String,
    },

    #[command(about = "Print a fresh project ID")]
    NextId,
}

pub fn handle(cmd: ProjectCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = ProjectStore::new(config.storage.clone());

    match cmd {
        ProjectCommands::List => {
            let projects = store.all()?;
            if projects.is_empty() {
                return output_empty_collection(&output_format, "projects", "No projects found");
            }

            match output_format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&json!({ "projects": projects }))?);
                }
                OutputFormat::Text => {
                    println!("{:<38} {:<25} {:<22} {}", "ID", "NAME", "ICON", "DIRECTORY");
                    println!("{}", "-".repeat(110));
                    for project in &projects {
                        println!(
                            "{:<38} {:<25} {:<22} {}",
                            project.id(),
                            project.name(),
                            project.icon(),
                            project.directory().display()
                        );
                    }
                }
            }
            Ok(())
        }
        ProjectCommands::Show { id } => {
            let project = store.find(&id)?;
            output_project(&output_format, &project)
        }
        ProjectCommands::Create {
            name,
            description,
            icon,
            directory,
            template,
            id,
        } => {
            let attrs = ProjectAttributes {
                id,
                name: Some(name),
                description,
                icon,
                directory: directory.map(absolute).transpose()?,
                template: template.map(absolute).transpose()?,
            };
            let project = store.create(attrs)?;

            output_success(
                &output_format,
                &format!("Project '{}' created at {}", project.id(), project.directory().display()),
                Some(json!({ "project": project })),
            )
        }
        ProjectCommands::Update {
            id,
            name,
            icon,
            description,
        } => {
            let mut project = store.find(&id)?;
            let attrs = ProjectAttributes {
                name: Some(name),
                icon: Some(icon),
                description,
                ..ProjectAttributes::default()
            };
            store.update(&mut project, attrs)?;

            output_success(
                &output_format,
                &format!("Project '{}' updated", project.id()),
                Some(json!({ "project": project })),
            )
        }
        ProjectCommands::Destroy { id } => {
            let project = store.find(&id)?;
            store.destroy(&project)?;

            output_success(
                &output_format,
                &format!(
                    "Project '{}' destroyed, files kept at {}",
                    project.id(),
                    project.directory().display()
                ),
                None,
            )
        }
        ProjectCommands::NextId => {
            let id = ProjectStore::next_id();
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "id": id }))?),
                OutputFormat::Text => println!("{}", id),
            }
            Ok(())
        }
    }
}
