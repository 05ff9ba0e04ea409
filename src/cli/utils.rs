use serde_json::{json, Value};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::project::Project;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output a single project in the appropriate format
pub fn output_project(output_format: &OutputFormat, project: &Project) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "project": project }))?);
        }
        OutputFormat::Text => {
            println!("ID: {}", project.id());
            println!("Name: {}", project.name());
            println!("Icon: {}", project.icon());
            println!("Directory: {}", project.directory().display());
            if !project.description().is_empty() {
                println!("Description: {}", project.description());
            }
        }
    }
    Ok(())
}

/// Resolve a user-supplied path against the working directory
pub fn absolute(path: PathBuf) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
