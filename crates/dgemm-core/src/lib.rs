//! `dgemm-core` - Dense f64 matrix multiplication with runtime-selected SIMD kernels.
//!
//! This crate provides:
//! - A row-major `Matrix` type with a fixed `Shape`
//! - A `MultiplyKernel` trait with AVX2, SSE2, NEON and scalar implementations
//! - Runtime kernel selection from a one-time capability probe
//! - The `ValueSource` trait used to populate matrices
//!
//! ```
//! use dgemm_core::{multiply, Matrix};
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
//! let c = multiply(&a, &b).unwrap();
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```

pub mod cpu;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod select;
pub mod shape;
pub mod source;
pub mod validate;

// Re-export primary types at the crate root for convenience.
pub use cpu::ScalarKernel;
pub use error::{MatrixError, Result};
pub use kernel::{KernelVariant, MultiplyKernel};
pub use matrix::Matrix;
pub use select::{
    available_kernels, capabilities, default_kernel, kernel_for, select_kernel,
    select_kernel_with, Capabilities, KernelPreference,
};
pub use shape::Shape;
pub use source::ValueSource;

/// Multiply `a` (m x k) by `b` (k x n) with the process-wide default kernel.
///
/// # Errors
/// Returns `MatrixError::DimensionMismatch` if the inner dimensions differ.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    default_kernel().multiply(a, b)
}
