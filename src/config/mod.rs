use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub storage: StorageConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Where project records live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data root; default project roots are `<dataroot>/projects/<id>`
    pub dataroot: PathBuf,
    /// When set, templates must live under this directory
    pub template_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_cors: bool,
    pub enable_request_logging: bool,
}

impl StorageConfig {
    pub fn new(dataroot: impl Into<PathBuf>) -> Self {
        Self {
            dataroot: dataroot.into(),
            template_root: None,
        }
    }

    pub fn with_template_root(mut self, template_root: impl Into<PathBuf>) -> Self {
        self.template_root = Some(template_root.into());
        self
    }

    /// Default data root when nothing is configured
    fn default_dataroot() -> PathBuf {
        let home = env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."));
        home.join("ondemand").join("data").join("sys").join("dashboard")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Storage overrides
        if let Some(v) = env::var_os("PROJECTS_DATAROOT").or_else(|| env::var_os("OOD_DATAROOT")) {
            if !v.is_empty() {
                self.storage.dataroot = PathBuf::from(v);
            }
        }
        if let Some(v) = env::var_os("PROJECTS_TEMPLATE_ROOT") {
            self.storage.template_root = (!v.is_empty()).then(|| PathBuf::from(v));
        }

        // API overrides
        if let Ok(v) = env::var("PROJECTS_API_PORT").or_else(|_| env::var("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            storage: StorageConfig::new(StorageConfig::default_dataroot()),
            api: ApiConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            storage: StorageConfig::new(StorageConfig::default_dataroot()),
            api: ApiConfig {
                port: 3000,
                enable_cors: false,
                enable_request_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            storage: StorageConfig::new(StorageConfig::default_dataroot()),
            api: ApiConfig {
                port: 3000,
                enable_cors: false,
                enable_request_logging: false,
            },
        }
    }
}
