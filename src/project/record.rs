use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::manifest::Manifest;
use super::paths::ProjectPaths;

/// A project as it exists on disk: the four manifest fields plus its root.
///
/// `id` and `directory` are fixed at creation. There is no template field;
/// a template only exists in the [`ProjectAttributes`] that created a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: String,
    name: String,
    description: String,
    icon: String,
    directory: PathBuf,
}

impl Project {
    pub(crate) fn from_manifest(manifest: Manifest, directory: PathBuf) -> Self {
        Self {
            id: manifest.id,
            name: manifest.name,
            description: manifest.description,
            icon: manifest.icon,
            directory,
        }
    }

    pub(crate) fn manifest(&self) -> Manifest {
        Manifest {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
        }
    }

    pub(crate) fn apply(&mut self, manifest: Manifest) {
        self.name = manifest.name;
        self.description = manifest.description;
        self.icon = manifest.icon;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::from_root(&self.directory)
    }

    pub fn config_dir(&self) -> PathBuf {
        self.paths().config_dir()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.paths().manifest()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Project(id: {}, name: {}, directory: {})", self.id, self.name, self.directory.display())
    }
}

/// Caller-supplied attributes for create and update.
///
/// `id`, `directory` and `template` only mean something to create; update
/// ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectAttributes {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub directory: Option<PathBuf>,
    pub template: Option<PathBuf>,
}

impl ProjectAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Names of the create-only fields present in these attributes
    pub(crate) fn create_only_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.id.is_some() {
            fields.push("id");
        }
        if self.directory.is_some() {
            fields.push("directory");
        }
        if self.template.is_some() {
            fields.push("template");
        }
        fields
    }
}
