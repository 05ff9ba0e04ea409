//! Directory-backed project records.
//!
//! A project is a directory; its identity is the `.ondemand/manifest.yml`
//! file inside it. Destroying a project removes that identity and keeps the
//! directory and its data.

pub mod lookup;
pub mod manifest;
pub mod paths;
pub mod record;
pub mod store;
pub mod template;
pub mod validation;

pub use manifest::{Manifest, ManifestError};
pub use paths::ProjectPaths;
pub use record::{Project, ProjectAttributes};
pub use store::{ProjectError, ProjectStore};
pub use template::TemplateError;
pub use validation::{Field, FieldErrors};
