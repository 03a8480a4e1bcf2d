use thiserror::Error;

pub type Result<T> = std::result::Result<T, PosError>;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("order sync error: {0}")]
    Sync(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
