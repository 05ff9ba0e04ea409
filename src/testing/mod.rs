use std::path::Path;
use tempfile::TempDir;

use crate::config::StorageConfig;
use crate::project::{Project, ProjectAttributes, ProjectStore};

/// Test utilities: a throwaway data root and a store pointed at it
pub struct TestContext {
    dir: TempDir,
    pub store: ProjectStore,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dataroot");
        let store = ProjectStore::new(StorageConfig::new(dir.path()));
        Self { dir, store }
    }

    /// The temporary data root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a valid project with the given name
    pub fn create_project(&self, name: &str) -> Project {
        self.store
            .create(
                ProjectAttributes::new()
                    .name(name)
                    .icon("fas://arrow-right")
                    .description("description"),
            )
            .expect("failed to create test project")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_are_isolated() {
        let a = TestContext::new();
        let b = TestContext::new();
        assert_ne!(a.path(), b.path());

        a.create_project("only-in-a");
        assert_eq!(a.store.all().unwrap().len(), 1);
        assert!(b.store.all().unwrap().is_empty());
    }
}
