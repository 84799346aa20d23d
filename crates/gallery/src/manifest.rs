//! On-disk description of a gallery, loaded by the `shadergallery` binary and
//! turned into a [`Gallery`] in navigation order.
//!
//! Types:
//!
//! - `GalleryManifest` holds an optional title and the ordered `[[shader]]`
//!   tables.
//! - `ManifestEntry` names one shader, points at its GLSL file relative to the
//!   manifest directory, and may carry a dialect hint.
//! - `ManifestFile` pairs a parsed manifest with the directory it came from so
//!   source paths resolve consistently.
//!
//! Functions:
//!
//! - `GalleryManifest::validate` returns human-readable issues instead of
//!   failing on the first one.
//! - `load_gallery` reads, validates and registers a manifest in one call.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialect::Dialect;
use crate::gallery::Gallery;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found at {0}")]
    Missing(PathBuf),

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("manifest validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GalleryManifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "shader")]
    pub shaders: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub source: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

impl GalleryManifest {
    pub fn from_toml_str(raw: &str) -> Result<Self, ManifestError> {
        let manifest: GalleryManifest = toml::from_str(raw)?;
        let issues = manifest.validate();
        if !issues.is_empty() {
            return Err(ManifestError::Validation(issues));
        }
        Ok(manifest)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.shaders.is_empty() {
            issues.push("manifest must declare at least one [[shader]]".to_string());
        }
        for (index, shader) in self.shaders.iter().enumerate() {
            if shader.name.trim().is_empty() {
                issues.push(format!("shader #{index} has an empty name"));
            }
            if shader.source.as_os_str().is_empty() {
                issues.push(format!("shader #{index} has an empty source path"));
            }
        }
        issues
    }
}

#[derive(Debug, Clone)]
pub struct ManifestFile {
    root: PathBuf,
    manifest: GalleryManifest,
}

impl ManifestFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ManifestError::Missing(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = GalleryManifest::from_toml_str(&raw)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self { root, manifest })
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn manifest(&self) -> &GalleryManifest {
        &self.manifest
    }

    pub fn title(&self) -> Option<&str> {
        self.manifest.title.as_deref()
    }

    pub fn source_path(&self, entry: &ManifestEntry) -> PathBuf {
        self.root.join(&entry.source)
    }

    /// Reads every source and registers it in manifest order.
    ///
    /// Missing sources are collected and reported together before anything is
    /// registered.
    pub fn into_gallery(self) -> Result<Gallery, ManifestError> {
        let missing: Vec<String> = self
            .manifest
            .shaders
            .iter()
            .map(|entry| self.source_path(entry))
            .filter(|path| !path.is_file())
            .map(|path| format!("missing shader source: {}", path.display()))
            .collect();
        if !missing.is_empty() {
            return Err(ManifestError::Validation(missing));
        }

        let mut gallery = Gallery::new();
        for entry in &self.manifest.shaders {
            let path = self.source_path(entry);
            let source = fs::read_to_string(&path)
                .map_err(|source| ManifestError::Io { path, source })?;
            gallery.register(entry.name.clone(), source, entry.dialect);
        }
        Ok(gallery)
    }
}

pub fn load_gallery(path: impl AsRef<Path>) -> Result<Gallery, ManifestError> {
    ManifestFile::load(path)?.into_gallery()
}
