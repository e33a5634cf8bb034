use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("No bank named '{0}' in the financial table")]
    NotFound(String),
}

impl From<analytics::AnalyticsError> for AnalyzerError {
    fn from(err: analytics::AnalyticsError) -> Self {
        match err {
            analytics::AnalyticsError::NotFound(name) => AnalyzerError::NotFound(name),
        }
    }
}
