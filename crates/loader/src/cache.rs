use crate::error::LoadError;
use crate::reader::{LoaderOptions, load_with};
use core_types::FinancialTable;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Holds the loaded table for the life of the process.
///
/// The file is read once and the same snapshot is handed out until the requested path
/// changes, or until `invalidate`/`reload` is called. Callers receive an
/// `Arc<FinancialTable>` and never mutate it.
#[derive(Debug, Default)]
pub struct TableCache {
    options: LoaderOptions,
    path: Option<PathBuf>,
    table: Option<Arc<FinancialTable>>,
}

impl TableCache {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            path: None,
            table: None,
        }
    }

    /// Returns the cached table for `path`, loading it on first use or when the path changed.
    ///
    /// A failed load leaves the previous cache contents untouched.
    pub fn get_or_load(&mut self, path: impl AsRef<Path>) -> Result<Arc<FinancialTable>, LoadError> {
        let path = path.as_ref();
        if let (Some(cached_path), Some(table)) = (&self.path, &self.table) {
            if cached_path == path {
                return Ok(Arc::clone(table));
            }
            tracing::info!(
                old = %cached_path.display(),
                new = %path.display(),
                "Data file path changed, reloading."
            );
        }
        self.load_from(path.to_path_buf())
    }

    /// Re-reads the most recently requested file.
    pub fn reload(&mut self) -> Result<Arc<FinancialTable>, LoadError> {
        let path = self.path.clone().ok_or(LoadError::NotLoaded)?;
        self.load_from(path)
    }

    /// Drops the cached table. The next `get_or_load` reads the file again.
    pub fn invalidate(&mut self) {
        if self.table.take().is_some() {
            tracing::debug!("Financial table cache invalidated.");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn load_from(&mut self, path: PathBuf) -> Result<Arc<FinancialTable>, LoadError> {
        let table = Arc::new(load_with(&path, &self.options)?);
        self.path = Some(path);
        self.table = Some(Arc::clone(&table));
        Ok(table)
    }
}
