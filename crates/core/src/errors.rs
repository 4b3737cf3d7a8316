use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(eyre::Report),
}

impl From<eyre::Report> for FinderError {
    fn from(report: eyre::Report) -> Self {
        FinderError::Storage(report)
    }
}

pub type FinderResult<T> = Result<T, FinderError>;
