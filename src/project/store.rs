use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StorageConfig;

use super::lookup::ProjectLookup;
use super::manifest::{Manifest, ManifestError};
use super::paths::{self, ProjectPaths};
use super::record::{Project, ProjectAttributes};
use super::template;
use super::validation::{self, Field, FieldErrors, DEFAULT_ICON};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("project not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Manifest(ManifestError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ProjectError {
    /// Field errors when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ProjectError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ProjectError {
    fn from(errors: FieldErrors) -> Self {
        ProjectError::Validation(errors)
    }
}

impl From<ManifestError> for ProjectError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::NotFound(path) => ProjectError::NotFound(path.display().to_string()),
            other => ProjectError::Manifest(other),
        }
    }
}

/// Directory-backed project records under a single data root.
///
/// Operations are synchronous and unlocked; one writer per project is assumed.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    config: StorageConfig,
}

impl ProjectStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn dataroot(&self) -> &Path {
        &self.config.dataroot
    }

    /// `<dataroot>/projects`
    pub fn projects_root(&self) -> PathBuf {
        paths::projects_root(self.dataroot())
    }

    /// Fresh random id, usable both as directory basename and manifest id
    pub fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    // ========================================
    // Create
    // ========================================

    /// Validate `attrs` and materialize a new project on disk.
    ///
    /// Nothing is written unless validation passes. A failure after that point
    /// is undone and reported as a `directory` or `template` field error.
    pub fn create(&self, attrs: ProjectAttributes) -> Result<Project, ProjectError> {
        let id = match attrs.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Self::next_id(),
        };
        let icon = match attrs.icon.as_deref().map(str::trim) {
            Some(icon) if !icon.is_empty() => icon.to_string(),
            _ => DEFAULT_ICON.to_string(),
        };
        let name = attrs.name.clone().unwrap_or_default();
        let description = attrs.description.clone().unwrap_or_default();
        let template = attrs.template.as_deref().filter(|t| !t.as_os_str().is_empty());
        let directory = attrs.directory.as_deref().filter(|d| !d.as_os_str().is_empty());

        let lookup = ProjectLookup::load(self.dataroot())?;

        let mut errors = FieldErrors::new();
        if validation::is_blank(Some(&name)) {
            errors.add(Field::Name, "can't be blank");
        }
        if !validation::is_valid_icon(&icon) {
            errors.add(Field::Icon, format!("'{icon}' is not a valid icon, expected <scheme>://<name>"));
        }
        self.validate_id(&id, &lookup, &mut errors);
        if let Some(directory) = directory {
            self.validate_directory(directory, &mut errors);
        }
        let paths = ProjectPaths::resolve(self.dataroot(), &id, directory);
        if let Some(template) = template {
            if let Err(e) = template::check(template, self.config.template_root.as_deref(), paths.root()) {
                errors.add(Field::Template, e.to_string());
            }
        }
        errors.into_result()?;

        let manifest = Manifest {
            id,
            name,
            description,
            icon,
        };
        self.materialize(&paths, &manifest, template, lookup)?;

        info!("created project {} at {}", manifest.id, paths.root().display());
        Ok(Project::from_manifest(manifest, paths.into_root()))
    }

    fn validate_id(&self, id: &str, lookup: &ProjectLookup, errors: &mut FieldErrors) {
        if !validation::is_valid_id(id) {
            errors.add(Field::Id, format!("'{id}' is not a valid project id"));
            return;
        }
        let default_root = paths::default_root(self.dataroot(), id);
        if lookup.contains(id) || default_root.symlink_metadata().is_ok() {
            errors.add(Field::Id, format!("'{id}' has already been taken"));
        }
    }

    fn validate_directory(&self, directory: &Path, errors: &mut FieldErrors) {
        let display = directory.display();
        if !directory.is_absolute() {
            errors.add(Field::Directory, format!("{display} must be an absolute path"));
            return;
        }
        if directory == self.dataroot() || directory == self.projects_root() {
            errors.add(Field::Directory, format!("{display} is reserved for project storage"));
            return;
        }
        match fs::metadata(directory) {
            Ok(meta) if !meta.is_dir() => {
                errors.add(Field::Directory, format!("{display} exists and is not a directory"));
            }
            Ok(_) if ProjectPaths::from_root(directory).config_dir().symlink_metadata().is_ok() => {
                errors.add(Field::Directory, format!("{display} already contains a project"));
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => errors.add(Field::Directory, format!("{display} is not accessible: {e}")),
        }
    }

    fn materialize(
        &self,
        paths: &ProjectPaths,
        manifest: &Manifest,
        template: Option<&Path>,
        mut lookup: ProjectLookup,
    ) -> Result<(), ProjectError> {
        let root = paths.root();
        let mut rollback = Rollback::new(paths, topmost_missing(root));

        if let Err(e) = fs::create_dir_all(root) {
            rollback.undo();
            return Err(FieldErrors::single(Field::Directory, format!("could not create {}: {e}", root.display())).into());
        }

        if let Some(template) = template {
            match template::import(template, root) {
                Ok(created) => rollback.imported = created,
                Err(e) => {
                    rollback.undo();
                    return Err(FieldErrors::single(Field::Template, e.to_string()).into());
                }
            }
        }

        let result = fs::create_dir(paths.config_dir())
            .map_err(|e| format!("could not create {}: {e}", paths.config_dir().display()))
            .and_then(|_| {
                rollback.config_created = true;
                manifest.store(&paths.manifest()).map_err(|e| e.to_string())
            })
            .and_then(|_| {
                lookup.insert(manifest.id.clone(), root);
                lookup.save().map_err(|e| e.to_string())
            });

        if let Err(message) = result {
            rollback.undo();
            return Err(FieldErrors::single(Field::Directory, message).into());
        }
        Ok(())
    }

    // ========================================
    // Read
    // ========================================

    /// Load a project by id; a project whose manifest is gone is `NotFound`
    pub fn find(&self, id: &str) -> Result<Project, ProjectError> {
        if !validation::is_valid_id(id) {
            return Err(ProjectError::NotFound(id.to_string()));
        }
        let lookup = ProjectLookup::load(self.dataroot())?;
        let root = lookup
            .get(id)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| paths::default_root(self.dataroot(), id));
        self.load(id, root)
    }

    fn load(&self, id: &str, root: PathBuf) -> Result<Project, ProjectError> {
        let manifest_path = ProjectPaths::from_root(&root).manifest();
        match Manifest::load(&manifest_path) {
            Ok(manifest) => Ok(Project::from_manifest(manifest, root)),
            Err(ManifestError::NotFound(_)) => Err(ProjectError::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Every live project: registered ones plus manifest-bearing directories
    /// under `<dataroot>/projects`, sorted by id
    pub fn all(&self) -> Result<Vec<Project>, ProjectError> {
        let lookup = ProjectLookup::load(self.dataroot())?;
        let mut candidates: Vec<(String, PathBuf)> = lookup
            .iter()
            .map(|(id, root)| (id.to_string(), root.to_path_buf()))
            .collect();
        let registered_roots: HashSet<PathBuf> = candidates.iter().map(|(_, root)| comparable(root)).collect();

        match fs::read_dir(self.projects_root()) {
            Ok(entries) => {
                for entry in entries {
                    let entry = entry?;
                    let id = entry.file_name().to_string_lossy().into_owned();
                    let path = entry.path();
                    if lookup.contains(&id) || registered_roots.contains(&comparable(&path)) {
                        continue;
                    }
                    if path.join(paths::CONFIG_DIR).is_dir() {
                        candidates.push((id, path));
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut projects = Vec::with_capacity(candidates.len());
        let mut seen = HashSet::new();
        for (id, root) in candidates {
            match self.load(&id, root) {
                Ok(project) => {
                    if seen.insert(project.id().to_string()) {
                        projects.push(project);
                    } else {
                        debug!("project {} already listed, skipping {}", project.id(), project.directory().display());
                    }
                }
                Err(e) => warn!("skipping project {}: {}", id, e),
            }
        }
        projects.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(projects)
    }

    // ========================================
    // Update
    // ========================================

    /// Change `name`, `icon` and `description` and rewrite the manifest.
    ///
    /// `name` and `icon` are required; an absent `description` keeps the
    /// current one. `id`, `directory` and `template` are ignored. On failure
    /// neither `project` nor its manifest changes.
    pub fn update(&self, project: &mut Project, attrs: ProjectAttributes) -> Result<(), ProjectError> {
        let ignored = attrs.create_only_fields();
        if !ignored.is_empty() {
            debug!("ignoring create-only fields {:?} when updating project {}", ignored, project.id());
        }

        let mut errors = FieldErrors::new();
        if validation::is_blank(attrs.name.as_deref()) {
            errors.add(Field::Name, "can't be blank");
        }
        match attrs.icon.as_deref() {
            icon if validation::is_blank(icon) => errors.add(Field::Icon, "can't be blank"),
            Some(icon) if !validation::is_valid_icon(icon) => {
                errors.add(Field::Icon, format!("'{icon}' is not a valid icon, expected <scheme>://<name>"))
            }
            _ => {}
        }
        errors.into_result()?;

        let mut manifest = project.manifest();
        manifest.name = attrs.name.unwrap_or_default();
        manifest.icon = attrs.icon.unwrap_or_default();
        if let Some(description) = attrs.description {
            manifest.description = description;
        }

        if !project.config_dir().is_dir() {
            return Err(ProjectError::NotFound(project.id().to_string()));
        }
        manifest.store(&project.manifest_path())?;
        project.apply(manifest);

        info!("updated project {} at {}", project.id(), project.directory().display());
        Ok(())
    }

    // ========================================
    // Destroy
    // ========================================

    /// Remove the project's identity: its `.ondemand` directory and its
    /// registry entry. The root directory and user files stay. Idempotent.
    pub fn destroy(&self, project: &Project) -> Result<(), ProjectError> {
        match fs::remove_dir_all(project.config_dir()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut lookup = ProjectLookup::load(self.dataroot())?;
        if lookup.remove(project.id()).is_some() {
            lookup.save()?;
        }

        info!("destroyed project {} (data kept at {})", project.id(), project.directory().display());
        Ok(())
    }
}

/// `path` with symlinks resolved where it exists, for identity comparisons
fn comparable(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Outermost directory on the way to `path` that does not exist yet
fn topmost_missing(path: &Path) -> Option<PathBuf> {
    let mut missing = None;
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() || ancestor.symlink_metadata().is_ok() {
            break;
        }
        missing = Some(ancestor.to_path_buf());
    }
    missing
}

/// What a failed create has to clean up
struct Rollback<'a> {
    paths: &'a ProjectPaths,
    // set when create_dir_all has to make the root or any of its parents
    created_top: Option<PathBuf>,
    imported: Vec<PathBuf>,
    config_created: bool,
}

impl<'a> Rollback<'a> {
    fn new(paths: &'a ProjectPaths, created_top: Option<PathBuf>) -> Self {
        Self {
            paths,
            created_top,
            imported: Vec::new(),
            config_created: false,
        }
    }

    fn undo(&self) {
        let root = self.paths.root();
        warn!("rolling back partially created project at {}", root.display());

        if let Some(top) = &self.created_top {
            if let Err(e) = fs::remove_dir_all(top) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("failed to remove {}: {}", top.display(), e);
                }
            }
            return;
        }

        template::remove_entries(&self.imported);
        if self.config_created {
            if let Err(e) = fs::remove_dir_all(self.paths.config_dir()) {
                warn!("failed to remove {}: {}", self.paths.config_dir().display(), e);
            }
        }
    }
}
