use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DOCUMENT_START: &str = "---\n";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to access manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// The persisted half of a project.
///
/// Field order here is the key order on disk; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

impl Manifest {
    /// Render the manifest as a YAML document with an explicit `---` header
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        let body = serde_yaml::to_string(self).map_err(ManifestError::Serialize)?;
        Ok(format!("{DOCUMENT_START}{body}"))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Read a manifest file; a missing file is `NotFound`, not a parse error
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ManifestError::NotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_yaml(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the manifest, replacing any previous file in one rename
    pub fn store(&self, path: &Path) -> Result<(), ManifestError> {
        let content = self.to_yaml()?;
        let staging = path.with_extension("yml.tmp");
        let io_err = |source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&staging, content).map_err(io_err)?;
        if let Err(source) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(io_err(source));
        }
        Ok(())
    }
}
