use std::fmt::{self, Debug};

use tracing::trace;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::shape::Shape;
use crate::validate::check_multiply;

/// The family a multiply kernel belongs to, ordered from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelVariant {
    /// 256-bit vector unit: 4 f64 lanes per instruction (AVX2).
    Wide,
    /// 128-bit vector unit: two 2-lane vectors per step (SSE2, NEON).
    Narrow,
    /// Portable scalar loop, available everywhere.
    Scalar,
}

impl KernelVariant {
    /// All variants, widest first.
    pub const ALL: [KernelVariant; 3] = [
        KernelVariant::Wide,
        KernelVariant::Narrow,
        KernelVariant::Scalar,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            KernelVariant::Wide => "wide",
            KernelVariant::Narrow => "narrow",
            KernelVariant::Scalar => "scalar",
        }
    }

    /// Contraction indices consumed per vectorized step (W).
    pub const fn step(self) -> usize {
        match self {
            KernelVariant::Wide | KernelVariant::Narrow => 4,
            KernelVariant::Scalar => 1,
        }
    }
}

impl fmt::Display for KernelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trait for pluggable multiplication strategies (AVX2, SSE2, NEON, scalar).
///
/// Implementations provide `multiply_into` over raw row-major slices; the
/// provided `multiply` validates shapes and allocates the result.
pub trait MultiplyKernel: Send + Sync + Debug {
    /// Returns the name of this kernel (e.g., "avx2", "scalar").
    fn name(&self) -> &str;

    /// Returns the variant this kernel implements.
    fn variant(&self) -> KernelVariant;

    /// Raw matrix product: C = A @ B.
    ///
    /// - `a`: row-major data of shape [m, k]
    /// - `b`: row-major data of shape [k, n]
    /// - `c`: row-major output of shape [m, n], overwritten
    ///
    /// # Panics
    /// Panics if any slice length does not match its shape.
    fn multiply_into(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize);

    /// Matrix product of `a` (m x k) and `b` (k x n).
    ///
    /// # Errors
    /// Returns `DimensionMismatch` before anything is allocated if the inner
    /// dimensions differ.
    fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        let (m, k, n) = check_multiply(a.shape(), b.shape())?;
        trace!(kernel = self.name(), m, k, n, "multiply");

        let mut c = vec![0.0; m * n];
        self.multiply_into(a.as_slice(), b.as_slice(), &mut c, m, k, n);
        Ok(Matrix::from_parts(Shape::new(m, n)?, c))
    }
}

/// Panic unless the slice lengths agree with `m`, `k`, `n`.
pub(crate) fn assert_operands(a: &[f64], b: &[f64], c: &[f64], m: usize, k: usize, n: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_labels() {
        let labels: Vec<_> = KernelVariant::ALL.iter().map(|v| v.to_string()).collect();
        assert_eq!(labels, vec!["wide", "narrow", "scalar"]);
    }

    #[test]
    fn test_variant_step() {
        assert_eq!(KernelVariant::Wide.step(), 4);
        assert_eq!(KernelVariant::Narrow.step(), 4);
        assert_eq!(KernelVariant::Scalar.step(), 1);
    }

    #[test]
    #[should_panic(expected = "B: expected")]
    fn test_assert_operands_rejects_short_b() {
        assert_operands(&[0.0; 6], &[0.0; 5], &[0.0; 4], 2, 3, 2);
    }
}
