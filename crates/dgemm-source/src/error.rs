use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("invalid value range [{low}, {high})")]
    InvalidRange { low: f64, high: f64 },
    #[error("sequence modulus must be positive")]
    ZeroModulus,
}

pub type Result<T> = std::result::Result<T, SourceError>;
