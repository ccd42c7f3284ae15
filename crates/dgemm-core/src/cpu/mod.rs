pub(crate) mod matmul;
#[cfg(target_arch = "aarch64")]
pub mod neon;
#[cfg(target_arch = "x86_64")]
pub mod x86;

use crate::kernel::{assert_operands, KernelVariant, MultiplyKernel};

/// Pure-Rust scalar kernel.
///
/// Sums each dot product sequentially in contraction order. Runs on every
/// host and serves as the reference the vector kernels are checked against.
#[derive(Debug, Clone, Copy)]
pub struct ScalarKernel;

impl ScalarKernel {
    pub fn new() -> Self {
        ScalarKernel
    }
}

impl Default for ScalarKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplyKernel for ScalarKernel {
    fn name(&self) -> &str {
        "scalar"
    }

    fn variant(&self) -> KernelVariant {
        KernelVariant::Scalar
    }

    fn multiply_into(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
        assert_operands(a, b, c, m, k, n);

        for i in 0..m {
            let row = &a[i * k..(i + 1) * k];
            for j in 0..n {
                c[i * n + j] = matmul::tail(row, b, n, j, 0, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel() -> ScalarKernel {
        ScalarKernel::new()
    }

    #[test]
    fn test_multiply_identity() {
        let a = vec![1.0, 0.0, 0.0, 1.0];
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let mut c = vec![0.0; 4];
        kernel().multiply_into(&a, &x, &mut c, 2, 2, 2);
        assert_eq!(c, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_multiply_basic() {
        // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let x = vec![5.0, 6.0, 7.0, 8.0];
        let mut c = vec![0.0; 4];
        kernel().multiply_into(&a, &x, &mut c, 2, 2, 2);
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_multiply_overwrites_output() {
        let mut c = vec![99.0; 1];
        kernel().multiply_into(&[1.0, 2.0], &[3.0, 4.0], &mut c, 1, 2, 1);
        assert_eq!(c, vec![11.0]);
    }

    #[test]
    fn test_multiply_rectangular() {
        // [2x3] @ [3x2]
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = vec![0.0; 4];
        kernel().multiply_into(&a, &b, &mut c, 2, 3, 2);
        assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_nan_propagates() {
        let mut c = vec![0.0; 1];
        kernel().multiply_into(&[f64::NAN, 1.0], &[1.0, 1.0], &mut c, 1, 2, 1);
        assert!(c[0].is_nan());
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let mut c = vec![0.0; 4];
        kernel().multiply_into(&[1.0], &[1.0, 2.0, 3.0, 4.0], &mut c, 2, 2, 2);
    }
}
