use crate::error::{MatrixError, Result};
use std::fmt;

/// The shape of a two-dimensional matrix: `rows` x `cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Create a new shape.
    ///
    /// # Errors
    /// Returns `EmptyShape` if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::EmptyShape { rows, cols });
        }
        Ok(Shape { rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The shape of the transpose, `cols` x `rows`.
    pub fn transposed(&self) -> Shape {
        Shape {
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Row-major offset of element (`i`, `j`).
    ///
    /// # Panics
    /// Panics if the index is outside the shape.
    pub fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for shape {}",
            i,
            j,
            self
        );
        i * self.cols + j
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl TryFrom<(usize, usize)> for Shape {
    type Error = MatrixError;

    fn try_from((rows, cols): (usize, usize)) -> Result<Self> {
        Shape::new(rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(2, 3).unwrap();
        assert_eq!(s.rows(), 2);
        assert_eq!(s.cols(), 3);
        assert_eq!(s.numel(), 6);
        assert!(!s.is_square());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Shape::new(0, 3),
            Err(MatrixError::EmptyShape { rows: 0, cols: 3 })
        );
        assert!(Shape::new(4, 0).is_err());
    }

    #[test]
    fn test_transposed() {
        let s = Shape::new(2, 5).unwrap();
        assert_eq!(s.transposed(), Shape::new(5, 2).unwrap());
    }

    #[test]
    fn test_offset_row_major() {
        let s = Shape::new(3, 4).unwrap();
        assert_eq!(s.offset(0, 0), 0);
        assert_eq!(s.offset(1, 0), 4);
        assert_eq!(s.offset(2, 3), 11);
    }

    #[test]
    #[should_panic]
    fn test_offset_out_of_bounds_panics() {
        let s = Shape::new(2, 2).unwrap();
        let _ = s.offset(2, 0);
    }

    #[test]
    fn test_display() {
        let s: Shape = (7, 9).try_into().unwrap();
        assert_eq!(s.to_string(), "7x9");
    }
}
