use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Ownership/mode description of a path, optionally with its POSIX ACLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub mode: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_acl: Option<String>,
}

/// ACL capability of the host
pub trait SupportsAcl: Send + Sync {
    /// Whether ACLs can be queried at all
    fn supports_acl(&self) -> bool;

    /// Textual access ACL of `path`
    fn access_acl(&self, path: &Path) -> io::Result<String>;

    /// Textual default ACL of the directory `path`
    fn default_acl(&self, path: &Path) -> io::Result<String>;
}

/// Host without ACL support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAcl;

impl SupportsAcl for NoAcl {
    fn supports_acl(&self) -> bool {
        false
    }

    fn access_acl(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "ACLs are not supported"))
    }

    fn default_acl(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "ACLs are not supported"))
    }
}

/// ACLs read through the `getfacl` tool
#[derive(Debug, Clone)]
pub struct Getfacl {
    program: String,
    available: bool,
}

impl Getfacl {
    /// Probe for `getfacl` on `PATH` once
    pub fn detect() -> Self {
        Self::with_program("getfacl")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        let program = program.into();
        let available = Command::new(&program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);
        tracing::debug!("{} available: {}", program, available);
        Self { program, available }
    }

    fn run(&self, path: &Path, default: bool) -> io::Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--omit-header").arg("--absolute-names");
        if default {
            cmd.arg("--default");
        }
        let output = cmd.arg(path).stdin(Stdio::null()).output()?;
        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SupportsAcl for Getfacl {
    fn supports_acl(&self) -> bool {
        self.available
    }

    fn access_acl(&self, path: &Path) -> io::Result<String> {
        self.run(path, false)
    }

    fn default_acl(&self, path: &Path) -> io::Result<String> {
        self.run(path, true)
    }
}

/// Describe `path`: its mode, and its ACLs when `acl` supports them
pub fn describe(path: &Path, acl: &dyn SupportsAcl) -> io::Result<Permissions> {
    let metadata = fs::metadata(path)?;
    let mut permissions = Permissions {
        mode: mode(&metadata),
        acl: None,
        default_acl: None,
    };

    if acl.supports_acl() {
        permissions.acl = Some(acl.access_acl(path)?);
        if metadata.is_dir() {
            permissions.default_acl = Some(acl.default_acl(path)?);
        }
    }

    Ok(permissions)
}

#[cfg(unix)]
fn mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn mode(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
