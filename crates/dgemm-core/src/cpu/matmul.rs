//! Helpers shared by the vectorized kernels.
//!
//! Every kernel walks C one cell at a time: row `i` of A is contiguous, but
//! column `j` of B has stride `n`, so each vector step first gathers the
//! column elements into a small contiguous scratch buffer.

/// Copy `B[t..t + W][j]` into `out`.
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    allow(dead_code)
)]
#[inline(always)]
pub(crate) fn gather_column<const W: usize>(
    b: &[f64],
    n: usize,
    j: usize,
    t: usize,
    out: &mut [f64; W],
) {
    for (lane, slot) in out.iter_mut().enumerate() {
        *slot = b[(t + lane) * n + j];
    }
}

/// Pairwise horizontal reduction of four lanes.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
#[inline(always)]
pub(crate) fn reduce_lanes(lanes: [f64; 4]) -> f64 {
    (lanes[0] + lanes[1]) + (lanes[2] + lanes[3])
}

/// Scalar multiply-accumulate over `t in from..k`, added onto `sum`.
#[inline(always)]
pub(crate) fn tail(row: &[f64], b: &[f64], n: usize, j: usize, from: usize, mut sum: f64) -> f64 {
    for (t, a) in row.iter().enumerate().skip(from) {
        sum += a * b[t * n + j];
    }
    sum
}
