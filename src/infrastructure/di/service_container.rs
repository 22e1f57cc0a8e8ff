//! Service container for dependency injection
//!
//! Wires up the catalog source and the tree session.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::TreeSession;
use crate::config::Settings;
use crate::infrastructure::traits::{
    CatalogSource, FileCatalogSource, FileSystem, RealFileSystem, SampleCatalogSource,
};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding settings and I/O dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Pick the catalog source: the built-in sample if requested, otherwise
    /// the configured catalog file.
    pub fn catalog_source(&self, sample: bool) -> InfraResult<Arc<dyn CatalogSource>> {
        if sample {
            debug!("catalog_source: using built-in sample");
            return Ok(Arc::new(SampleCatalogSource));
        }

        let path = self.settings.catalog.clone().ok_or(InfraError::NoCatalog)?;
        if !self.fs.exists(&path) {
            return Err(InfraError::CatalogNotFound(path));
        }
        debug!("catalog_source: file={}", path.display());
        Ok(Arc::new(FileCatalogSource::new(Arc::clone(&self.fs), path)))
    }

    /// Build a session against the selected catalog source.
    pub fn session(&self, sample: bool) -> InfraResult<TreeSession> {
        let source = self.catalog_source(sample)?;
        Ok(TreeSession::load(source)?)
    }
}
