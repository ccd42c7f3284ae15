use std::fmt;

use crate::error::{MatrixError, Result};
use crate::kernel::MultiplyKernel;
use crate::shape::Shape;
use crate::source::ValueSource;

/// A dense matrix of f64 values.
///
/// Holds contiguous, row-major data with a fixed shape. The shape never
/// changes after construction; multiplication always produces a new matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    shape: Shape,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix with the given dimensions.
    ///
    /// # Panics
    /// Panics if `rows` or `cols` is zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let shape = match Shape::new(rows, cols) {
            Ok(shape) => shape,
            Err(e) => panic!("{}", e),
        };
        Matrix {
            shape,
            data: vec![0.0; shape.numel()],
        }
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `EmptyShape` for a zero dimension and `ShapeMismatch` if
    /// `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        if data.len() != shape.numel() {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Matrix { shape, data })
    }

    /// Create a matrix from a list of rows.
    ///
    /// ```
    /// use dgemm_core::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let shape = Shape::new(rows.len(), cols)?;
        let mut data = Vec::with_capacity(shape.numel());
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Matrix { shape, data })
    }

    /// Create the `n` x `n` identity matrix.
    ///
    /// # Panics
    /// Panics if `n` is zero.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Wrap a buffer already known to match `shape`.
    pub(crate) fn from_parts(shape: Shape, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), shape.numel());
        Matrix { shape, data }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Returns element (`i`, `j`).
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.shape.offset(i, j)]
    }

    /// Overwrite element (`i`, `j`).
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let offset = self.shape.offset(i, j);
        self.data[offset] = value;
    }

    /// Returns row `i` as a contiguous slice.
    pub fn row(&self, i: usize) -> &[f64] {
        let cols = self.cols();
        &self.data[i * cols..(i + 1) * cols]
    }

    /// Returns the underlying row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Overwrite every element, in row-major order, with values drawn from
    /// `source`.
    pub fn fill<S: ValueSource + ?Sized>(&mut self, source: &mut S) {
        for v in self.data.iter_mut() {
            *v = source.next_value();
        }
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Returns a new matrix holding the transpose.
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = (self.rows(), self.cols());
        let mut data = vec![0.0; self.data.len()];
        for i in 0..rows {
            for j in 0..cols {
                data[j * rows + i] = self.data[i * cols + j];
            }
        }
        Matrix::from_parts(self.shape.transposed(), data)
    }

    /// Matrix product `self @ other` computed by the given kernel.
    ///
    /// self is [m, k], other is [k, n], result is [m, n].
    pub fn multiply(&self, other: &Matrix, kernel: &dyn MultiplyKernel) -> Result<Matrix> {
        kernel.multiply(self, other)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            for (j, v) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
