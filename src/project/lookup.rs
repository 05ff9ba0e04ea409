use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::manifest::ManifestError;
use super::paths;

/// Registry of every created project's root, keyed by id.
///
/// Lets projects created with a directory override be found again by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLookup {
    path: PathBuf,
    entries: BTreeMap<String, PathBuf>,
}

impl ProjectLookup {
    /// Load the registry for `dataroot`; a missing file is an empty registry
    pub fn load(dataroot: &Path) -> Result<Self, ManifestError> {
        let path = paths::lookup_file(dataroot);
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str(&content).map_err(|source| ManifestError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(ManifestError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, id: &str) -> Option<&Path> {
        self.entries.get(id).map(PathBuf::as_path)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, root: impl Into<PathBuf>) {
        self.entries.insert(id.into(), root.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<PathBuf> {
        self.entries.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(id, root)| (id.as_str(), root.as_path()))
    }

    pub fn save(&self) -> Result<(), ManifestError> {
        let body = serde_yaml::to_string(&self.entries).map_err(ManifestError::Serialize)?;
        let io_err = |source| ManifestError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, format!("---\n{body}")).map_err(io_err)?;
        fs::rename(&staging, &self.path).map_err(io_err)
    }
}
