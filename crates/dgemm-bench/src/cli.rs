use clap::{Parser, ValueEnum};
use dgemm_core::select::KERNEL_ENV;
use dgemm_core::KernelPreference;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dgemm-bench",
    version,
    about = "Times dense f64 matrix multiplication on this host"
)]
pub struct Args {
    #[arg(short, long, help = "size of the square matrices", default_value_t = 512)]
    pub size: usize,
    #[arg(long, help = "rows of A (defaults to --size)")]
    pub rows: Option<usize>,
    #[arg(long, help = "columns of A (defaults to --size)")]
    pub inner: Option<usize>,
    #[arg(long, help = "columns of B (defaults to --size)")]
    pub cols: Option<usize>,
    #[arg(long, help = "rows of B (defaults to --inner)")]
    pub b_rows: Option<usize>,
    #[arg(short, long, help = "number of timed iterations", default_value_t = 1)]
    pub iterations: usize,
    #[arg(short, long, env = KERNEL_ENV, help = "auto, wide, narrow or scalar", default_value = "auto")]
    pub kernel: KernelPreference,
    #[arg(long, value_enum, help = "how to populate the matrices", default_value_t = Fill::Uniform)]
    pub fill: Fill,
    #[arg(long, help = "seed for --fill uniform (random when omitted)")]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Uniform draws over [0, 10).
    Uniform,
    /// Cycling integers 0..100.
    Sequence,
    /// Every element 1.0.
    Ones,
}

/// Operand dimensions: A is `m x k`, B is `k2 x n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub m: usize,
    pub k: usize,
    pub k2: usize,
    pub n: usize,
}

impl Args {
    pub fn dims(&self) -> Dims {
        let m = self.rows.unwrap_or(self.size);
        let k = self.inner.unwrap_or(self.size);
        let n = self.cols.unwrap_or(self.size);
        let k2 = self.b_rows.unwrap_or(k);
        Dims { m, k, k2, n }
    }
}
