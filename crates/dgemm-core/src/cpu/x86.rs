//! x86_64 vector kernels: AVX2 (wide) and SSE2 (narrow).

use std::arch::x86_64::*;

use super::matmul::{gather_column, reduce_lanes, tail};
use crate::kernel::{assert_operands, KernelVariant, MultiplyKernel};

/// 256-bit kernel: one 4-lane accumulator per output cell.
///
/// Can only be obtained through [`Avx2Kernel::new`], which probes the CPU, so
/// holding one proves AVX2 is available.
#[derive(Debug)]
pub struct Avx2Kernel {
    _probed: (),
}

pub(crate) static AVX2: Avx2Kernel = Avx2Kernel { _probed: () };

impl Avx2Kernel {
    /// Returns `None` if the CPU lacks AVX2.
    pub fn new() -> Option<Self> {
        is_x86_feature_detected!("avx2").then_some(Avx2Kernel { _probed: () })
    }
}

impl MultiplyKernel for Avx2Kernel {
    fn name(&self) -> &str {
        "avx2"
    }

    fn variant(&self) -> KernelVariant {
        KernelVariant::Wide
    }

    fn multiply_into(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
        assert_operands(a, b, c, m, k, n);
        // SAFETY: AVX2 support was checked when this kernel was handed out.
        unsafe { multiply_avx2(a, b, c, m, k, n) }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn multiply_avx2(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let mut scratch = [0.0f64; 4];
    let mut lanes = [0.0f64; 4];

    for i in 0..m {
        let row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc = _mm256_setzero_pd();
            let mut t = 0;
            while t + 4 <= k {
                gather_column(b, n, j, t, &mut scratch);
                let av = _mm256_loadu_pd(row[t..t + 4].as_ptr());
                let bv = _mm256_loadu_pd(scratch.as_ptr());
                acc = _mm256_add_pd(acc, _mm256_mul_pd(av, bv));
                t += 4;
            }
            _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
            c[i * n + j] = tail(row, b, n, j, t, reduce_lanes(lanes));
        }
    }
}

/// 128-bit kernel: two 2-lane accumulators per output cell, emulating a
/// width of 4.
#[derive(Debug)]
pub struct Sse2Kernel {
    _probed: (),
}

pub(crate) static SSE2: Sse2Kernel = Sse2Kernel { _probed: () };

impl Sse2Kernel {
    /// Returns `None` if the CPU lacks SSE2.
    pub fn new() -> Option<Self> {
        is_x86_feature_detected!("sse2").then_some(Sse2Kernel { _probed: () })
    }
}

impl MultiplyKernel for Sse2Kernel {
    fn name(&self) -> &str {
        "sse2"
    }

    fn variant(&self) -> KernelVariant {
        KernelVariant::Narrow
    }

    fn multiply_into(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
        assert_operands(a, b, c, m, k, n);
        // SAFETY: SSE2 support was checked when this kernel was handed out.
        unsafe { multiply_sse2(a, b, c, m, k, n) }
    }
}

#[target_feature(enable = "sse2")]
unsafe fn multiply_sse2(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let mut scratch = [0.0f64; 4];
    let mut lanes = [0.0f64; 2];

    for i in 0..m {
        let row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc_lo = _mm_setzero_pd();
            let mut acc_hi = _mm_setzero_pd();
            let mut t = 0;
            while t + 4 <= k {
                gather_column(b, n, j, t, &mut scratch);
                let a_lo = _mm_loadu_pd(row[t..t + 2].as_ptr());
                let a_hi = _mm_loadu_pd(row[t + 2..t + 4].as_ptr());
                let b_lo = _mm_loadu_pd(scratch[..2].as_ptr());
                let b_hi = _mm_loadu_pd(scratch[2..].as_ptr());
                acc_lo = _mm_add_pd(acc_lo, _mm_mul_pd(a_lo, b_lo));
                acc_hi = _mm_add_pd(acc_hi, _mm_mul_pd(a_hi, b_hi));
                t += 4;
            }
            _mm_storeu_pd(lanes.as_mut_ptr(), _mm_add_pd(acc_lo, acc_hi));
            c[i * n + j] = tail(row, b, n, j, t, lanes[0] + lanes[1]);
        }
    }
}
