use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("No bank named '{0}' in the financial table")]
    NotFound(String),
}
