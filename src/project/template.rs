use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::paths::CONFIG_DIR;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {0} does not exist")]
    Missing(PathBuf),

    #[error("template {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("template {path} is outside of {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("template {0} contains a reserved .ondemand entry")]
    ReservedEntry(PathBuf),

    #[error("template {0} contains the project directory")]
    ContainsDestination(PathBuf),

    #[error("{0} already exists in the project directory")]
    Collision(PathBuf),

    #[error("failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TemplateError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> TemplateError + '_ {
        move |source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Check that `source` can seed a project rooted at `dest`, without touching anything
pub fn check(source: &Path, template_root: Option<&Path>, dest: &Path) -> Result<(), TemplateError> {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TemplateError::Missing(source.to_path_buf()))
        }
        Err(e) => return Err(TemplateError::io(source)(e)),
    };
    if !metadata.is_dir() {
        return Err(TemplateError::NotADirectory(source.to_path_buf()));
    }

    let canonical = fs::canonicalize(source).map_err(TemplateError::io(source))?;
    if let Some(root) = template_root {
        let root_canonical = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        if !canonical.starts_with(&root_canonical) {
            return Err(TemplateError::OutsideRoot {
                path: source.to_path_buf(),
                root: root.to_path_buf(),
            });
        }
    }

    if source.join(CONFIG_DIR).symlink_metadata().is_ok() {
        return Err(TemplateError::ReservedEntry(source.to_path_buf()));
    }

    // copying a tree into itself never terminates
    if resolve_existing(dest).starts_with(&canonical) {
        return Err(TemplateError::ContainsDestination(source.to_path_buf()));
    }

    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and append the rest
fn resolve_existing(path: &Path) -> PathBuf {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        if let Ok(canonical) = fs::canonicalize(current) {
            return missing.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                current = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Copy every entry of `source` into `dest`.
///
/// Existing entries in `dest` are never overwritten. Returns the top-level
/// entries that were created, so a caller can undo the import. On error the
/// entries copied so far are removed again.
pub fn import(source: &Path, dest: &Path) -> Result<Vec<PathBuf>, TemplateError> {
    let mut created = Vec::new();
    if let Err(e) = import_entries(source, dest, &mut created) {
        remove_entries(&created);
        return Err(e);
    }
    tracing::debug!(
        "imported {} entries from {} into {}",
        created.len(),
        source.display(),
        dest.display()
    );
    Ok(created)
}

fn import_entries(source: &Path, dest: &Path, created: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    for entry in fs::read_dir(source).map_err(TemplateError::io(source))? {
        let entry = entry.map_err(TemplateError::io(source))?;
        let target = dest.join(entry.file_name());
        if target.symlink_metadata().is_ok() {
            return Err(TemplateError::Collision(target));
        }
        created.push(target.clone());
        copy_entry(&entry.path(), &target)?;
    }
    Ok(())
}

/// Undo a partial or complete import
pub fn remove_entries(entries: &[PathBuf]) {
    for entry in entries {
        let result = match entry.symlink_metadata() {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(entry),
            Ok(_) => fs::remove_file(entry),
            Err(_) => continue,
        };
        if let Err(e) = result {
            tracing::warn!("failed to remove imported entry {}: {}", entry.display(), e);
        }
    }
}

fn copy_entry(from: &Path, to: &Path) -> Result<(), TemplateError> {
    let file_type = from.symlink_metadata().map_err(TemplateError::io(from))?.file_type();

    if file_type.is_dir() {
        fs::create_dir(to).map_err(TemplateError::io(to))?;
        for entry in fs::read_dir(from).map_err(TemplateError::io(from))? {
            let entry = entry.map_err(TemplateError::io(from))?;
            copy_entry(&entry.path(), &to.join(entry.file_name()))?;
        }
        return Ok(());
    }

    if file_type.is_symlink() {
        return copy_symlink(from, to);
    }

    fs::copy(from, to).map(|_| ()).map_err(TemplateError::io(to))
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), TemplateError> {
    let link = fs::read_link(from).map_err(TemplateError::io(from))?;
    std::os::unix::fs::symlink(link, to).map_err(TemplateError::io(to))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), TemplateError> {
    fs::copy(from, to).map(|_| ()).map_err(TemplateError::io(to))
}
