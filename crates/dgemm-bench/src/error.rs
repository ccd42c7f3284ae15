use dgemm_core::{KernelVariant, MatrixError};
use dgemm_source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
    #[error("value source error: {0}")]
    Source(#[from] SourceError),
    #[error("kernel '{0}' is not available on this host")]
    KernelUnavailable(KernelVariant),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
