use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    DimensionMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    EmptyShape { rows: usize, cols: usize },
    #[error("data length {len} does not match shape {rows}x{cols}")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },
    #[error("row {row} has {got} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("unknown kernel '{0}', expected one of auto, wide, narrow, scalar")]
    UnknownKernel(String),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
