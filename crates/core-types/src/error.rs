use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown line item: '{0}'")]
    UnknownField(String),

    #[error("Unknown metric: '{0}'")]
    UnknownMetric(String),
}
