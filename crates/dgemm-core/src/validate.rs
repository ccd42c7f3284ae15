use crate::error::{MatrixError, Result};
use crate::shape::Shape;

/// Check that `a` (m x k) and `b` (k2 x n) can be multiplied.
///
/// Returns `(m, k, n)` on success.
///
/// # Errors
/// Returns `DimensionMismatch` carrying all four dimensions if `k != k2`.
pub fn check_multiply(a: Shape, b: Shape) -> Result<(usize, usize, usize)> {
    let (m, k) = (a.rows(), a.cols());
    let (k2, n) = (b.rows(), b.cols());
    if k != k2 {
        return Err(MatrixError::DimensionMismatch { m, k, k2, n });
    }
    Ok((m, k, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: usize, cols: usize) -> Shape {
        Shape::new(rows, cols).unwrap()
    }

    #[test]
    fn test_compatible() {
        assert_eq!(check_multiply(shape(2, 3), shape(3, 5)), Ok((2, 3, 5)));
    }

    #[test]
    fn test_mismatch_reports_all_dims() {
        let err = check_multiply(shape(2, 3), shape(4, 5)).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                m: 2,
                k: 3,
                k2: 4,
                n: 5
            }
        );
        assert_eq!(err.to_string(), "matmul dimension mismatch: [2x3] @ [4x5]");
    }

    #[test]
    fn test_outer_dims_do_not_matter() {
        assert!(check_multiply(shape(1, 7), shape(7, 1)).is_ok());
        assert!(check_multiply(shape(9, 1), shape(1, 9)).is_ok());
    }
}
