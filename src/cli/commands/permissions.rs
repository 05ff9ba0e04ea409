use std::path::PathBuf;

use crate::cli::utils::absolute;
use crate::cli::OutputFormat;
use crate::permissions::{self, Getfacl};

pub fn handle(path: PathBuf, output_format: OutputFormat) -> anyhow::Result<()> {
    let path = absolute(path)?;
    let info = permissions::describe(&path, &Getfacl::detect())
        .map_err(|e| anyhow::anyhow!("cannot inspect {}: {}", path.display(), e))?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => {
            println!("Path: {}", path.display());
            println!("Mode: {:o}", info.mode);
            if let Some(acl) = &info.acl {
                println!("ACL:\n{}", acl.trim_end());
            }
            if let Some(default_acl) = &info.default_acl {
                println!("Default ACL:\n{}", default_acl.trim_end());
            }
        }
    }
    Ok(())
}
