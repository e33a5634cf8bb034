use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read financial data from '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse financial data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Expected at least {expected} columns in the header row, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("The financial data file has no header row")]
    Empty,

    #[error("No financial data file has been loaded yet")]
    NotLoaded,
}
