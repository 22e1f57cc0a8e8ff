//! Error conversion helpers for catalog I/O
//!
//! Provides an extension trait for cleaner error handling with source context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add context naming the action and the catalog source involved.
    ///
    /// # Example
    /// ```ignore
    /// source.load()
    ///     .with_source_context("load catalog", &source.describe())?;
    /// ```
    fn with_source_context(self, action: &str, source: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_source_context(self, action: &str, source: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, source),
            source: Box::new(e),
        })
    }
}
