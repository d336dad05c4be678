//! Copying text artifacts into a library directory.

use crate::config::InstallConfig;
use crate::error::{LinkError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// A text file to install, named by its path relative to the library directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

/// What an install run wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReport {
    pub library_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Writes artifacts to `<lib_dir>/linklib/`.
#[derive(Debug, Clone)]
pub struct Installer {
    lib_dir: PathBuf,
    artifacts: Vec<Artifact>,
}

/// Library directory from the `LIB` environment variable, falling back to
/// the platform data directory.
pub fn default_lib_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(InstallConfig::LIB_ENV_VAR) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir().ok_or_else(|| LinkError::Config {
        message: "Could not determine data directory".to_string(),
    })
}

impl Installer {
    pub fn new(lib_dir: impl AsRef<Path>) -> Self {
        Self {
            lib_dir: lib_dir.as_ref().to_path_buf(),
            artifacts: Vec::new(),
        }
    }

    /// Installer targeting [`default_lib_dir`].
    pub fn with_default_dir() -> Result<Self> {
        Ok(Self::new(default_lib_dir()?))
    }

    /// Add an artifact. Later artifacts with the same name overwrite earlier ones on disk.
    pub fn artifact(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.artifacts.push(Artifact {
            name: name.into(),
            contents: contents.into(),
        });
        self
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn library_dir(&self) -> PathBuf {
        self.lib_dir.join(InstallConfig::LIBRARY_DIR_NAME)
    }

    /// Create the library directory and write every artifact into it.
    pub fn install(&self) -> Result<InstallReport> {
        for artifact in &self.artifacts {
            validate_name(&artifact.name)?;
        }

        let library_dir = self.library_dir();
        info!("Installing {} files to {}", self.artifacts.len(), library_dir.display());

        std::fs::create_dir_all(&library_dir).map_err(|e| LinkError::Io {
            message: format!("Failed to create library directory: {}", e),
            path: Some(library_dir.clone()),
            source: Some(e),
        })?;

        let mut written = Vec::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            let path = library_dir.join(&artifact.name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| LinkError::io_with_path(e, parent))?;
            }
            debug!("Writing {}", path.display());
            std::fs::write(&path, &artifact.contents)
                .map_err(|e| LinkError::io_with_path(e, &path))?;
            written.push(path);
        }

        Ok(InstallReport {
            library_dir,
            written,
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    let relative = !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !relative {
        return Err(LinkError::Config {
            message: format!("Artifact name '{}' must be a relative path inside the library", name),
        });
    }
    Ok(())
}
