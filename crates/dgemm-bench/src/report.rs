use std::fmt;

use dgemm_core::{KernelVariant, Shape};

pub const BANNER: &str = "\
Matrix Multiplication Benchmark
===============================";

/// Result of one benchmark run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub kernel: String,
    pub variant: KernelVariant,
    pub a_shape: Shape,
    pub b_shape: Shape,
    pub c_shape: Shape,
    pub iterations: usize,
    /// Mean wall-clock time of one multiply.
    pub avg_ms: f64,
    pub gflops: f64,
    /// Sum of all elements of the result.
    pub checksum: f64,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kernel:      {} ({})", self.kernel, self.variant)?;
        writeln!(f, "Matrix size: {} @ {}", self.a_shape, self.b_shape)?;
        writeln!(
            f,
            "Time:        {:.3} ms (mean of {})",
            self.avg_ms, self.iterations
        )?;
        writeln!(f, "Throughput:  {:.2} GFLOP/s", self.gflops)?;
        writeln!(f, "Result:      {}", self.c_shape)?;
        writeln!(f, "Checksum:    {}", self.checksum)
    }
}
