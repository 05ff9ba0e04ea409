use std::path::{Path, PathBuf};

/// Directory under the data root holding default project roots
pub const PROJECTS_DIR: &str = "projects";

/// Reserved configuration subdirectory inside every project root
pub const CONFIG_DIR: &str = ".ondemand";

/// Manifest file name inside the configuration subdirectory
pub const MANIFEST_FILE: &str = "manifest.yml";

/// id -> root registry file kept directly under the data root
pub const LOOKUP_FILE: &str = ".project_lookup";

/// On-disk layout of a single project.
///
/// Resolution is purely lexical; nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Resolve the layout for `id`, preferring an explicit `directory` override
    pub fn resolve(dataroot: &Path, id: &str, directory: Option<&Path>) -> Self {
        let root = match directory {
            Some(dir) => dir.to_path_buf(),
            None => default_root(dataroot, id),
        };
        Self { root }
    }

    /// Layout for an already known root directory
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn manifest(&self) -> PathBuf {
        self.config_dir().join(MANIFEST_FILE)
    }

    pub fn into_root(self) -> PathBuf {
        self.root
    }
}

/// `<dataroot>/projects`
pub fn projects_root(dataroot: &Path) -> PathBuf {
    dataroot.join(PROJECTS_DIR)
}

/// `<dataroot>/projects/<id>`
pub fn default_root(dataroot: &Path, id: &str) -> PathBuf {
    projects_root(dataroot).join(id)
}

/// `<dataroot>/.project_lookup`
pub fn lookup_file(dataroot: &Path) -> PathBuf {
    dataroot.join(LOOKUP_FILE)
}
