//! I/O boundary traits for testability
//!
//! These traits abstract where catalogs come from, allowing sessions
//! to be tested with in-memory implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Catalog;
use crate::infrastructure::sample;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Supplier of the flat group and type collections.
pub trait CatalogSource: Send + Sync {
    /// Load a fresh snapshot of the catalog.
    fn load(&self) -> io::Result<Catalog>;

    /// Human readable name used in error messages.
    fn describe(&self) -> String;
}

/// On-disk catalog encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
}

impl CatalogFormat {
    /// `.json` selects JSON, everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Toml,
        }
    }

    pub fn parse(self, content: &str) -> io::Result<Catalog> {
        match self {
            CatalogFormat::Toml => toml::from_str(content)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string())),
            CatalogFormat::Json => serde_json::from_str(content)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string())),
        }
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Catalog stored in a TOML or JSON file.
pub struct FileCatalogSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> io::Result<Catalog> {
        if !self.fs.is_file(&self.path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("catalog file not found: {}", self.path.display()),
            ));
        }
        let content = self.fs.read_to_string(&self.path)?;
        CatalogFormat::from_path(&self.path).parse(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Built-in demo catalog.
#[derive(Debug, Default)]
pub struct SampleCatalogSource;

impl CatalogSource for SampleCatalogSource {
    fn load(&self) -> io::Result<Catalog> {
        Ok(sample::catalog())
    }

    fn describe(&self) -> String {
        "built-in sample catalog".to_string()
    }
}

/// Catalog held in memory, e.g. supplied by an embedding host.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    catalog: Catalog,
}

impl InMemoryCatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn load(&self) -> io::Result<Catalog> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}
