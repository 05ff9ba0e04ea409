#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ondemand_projects::config::StorageConfig;
use ondemand_projects::project::{Project, ProjectAttributes, ProjectStore};
use tempfile::TempDir;

/// A store rooted in its own temporary data root
pub struct Fixture {
    pub tmp: TempDir,
    pub store: ProjectStore,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = ProjectStore::new(StorageConfig::new(tmp.path()));
        Self { tmp, store }
    }

    pub fn path(&self) -> &Path {
        self.tmp.path()
    }

    /// Create a project the way most tests need one
    pub fn create_project(&self, directory: Option<PathBuf>, template: Option<PathBuf>) -> Project {
        let mut attrs = ProjectAttributes::new()
            .id(ProjectStore::next_id())
            .name("test-project")
            .icon("fas://arrow-right")
            .description("description");
        attrs.directory = directory;
        attrs.template = template;

        match self.store.create(attrs) {
            Ok(project) => project,
            Err(e) => panic!("failed to create project: {e}"),
        }
    }
}

/// Names of the entries directly inside `dir`
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn expected_manifest(id: &str, name: &str, description: &str, icon: &str) -> String {
    format!("---\nid: {id}\nname: {name}\ndescription: {description}\nicon: {icon}\n")
}

/// The HTTP app served in-process on an ephemeral port, over a fresh data root
pub struct TestServer {
    pub fixture: Fixture,
    pub base_url: String,
}

impl TestServer {
    pub async fn spawn() -> anyhow::Result<Self> {
        use anyhow::Context;
        use ondemand_projects::config::ApiConfig;
        use ondemand_projects::handlers::{router, AppState};
        use ondemand_projects::permissions::NoAcl;

        let fixture = Fixture::new();
        let store = ProjectStore::new(StorageConfig::new(fixture.path()));
        let app = router(AppState::new(store, NoAcl), &ApiConfig::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { fixture, base_url })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
