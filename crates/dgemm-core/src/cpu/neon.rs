//! aarch64 NEON kernel (narrow).

use std::arch::aarch64::*;

use super::matmul::{gather_column, tail};
use crate::kernel::{assert_operands, KernelVariant, MultiplyKernel};

/// 128-bit kernel: two 2-lane accumulators per output cell, emulating a
/// width of 4.
#[derive(Debug)]
pub struct NeonKernel {
    _probed: (),
}

pub(crate) static NEON: NeonKernel = NeonKernel { _probed: () };

impl NeonKernel {
    /// Returns `None` if the CPU lacks NEON.
    pub fn new() -> Option<Self> {
        std::arch::is_aarch64_feature_detected!("neon").then_some(NeonKernel { _probed: () })
    }
}

impl MultiplyKernel for NeonKernel {
    fn name(&self) -> &str {
        "neon"
    }

    fn variant(&self) -> KernelVariant {
        KernelVariant::Narrow
    }

    fn multiply_into(&self, a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
        assert_operands(a, b, c, m, k, n);
        // SAFETY: NEON support was checked when this kernel was handed out.
        unsafe { multiply_neon(a, b, c, m, k, n) }
    }
}

#[target_feature(enable = "neon")]
unsafe fn multiply_neon(a: &[f64], b: &[f64], c: &mut [f64], m: usize, k: usize, n: usize) {
    let mut scratch = [0.0f64; 4];
    let mut lanes = [0.0f64; 2];

    for i in 0..m {
        let row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc_lo = vdupq_n_f64(0.0);
            let mut acc_hi = vdupq_n_f64(0.0);
            let mut t = 0;
            while t + 4 <= k {
                gather_column(b, n, j, t, &mut scratch);
                let a_lo = vld1q_f64(row[t..t + 2].as_ptr());
                let a_hi = vld1q_f64(row[t + 2..t + 4].as_ptr());
                let b_lo = vld1q_f64(scratch[..2].as_ptr());
                let b_hi = vld1q_f64(scratch[2..].as_ptr());
                acc_lo = vaddq_f64(acc_lo, vmulq_f64(a_lo, b_lo));
                acc_hi = vaddq_f64(acc_hi, vmulq_f64(a_hi, b_hi));
                t += 4;
            }
            vst1q_f64(lanes.as_mut_ptr(), vaddq_f64(acc_lo, acc_hi));
            c[i * n + j] = tail(row, b, n, j, t, lanes[0] + lanes[1]);
        }
    }
}
