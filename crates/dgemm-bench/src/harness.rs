use std::hint::black_box;
use std::time::{Duration, Instant};

use dgemm_core::{kernel_for, select_kernel_with, Matrix, MultiplyKernel, Shape, ValueSource};
use dgemm_source::{ConstantSource, SequenceSource, UniformSource};
use tracing::{debug, info};

use crate::cli::{Args, Fill};
use crate::error::{BenchError, Result};
use crate::report::Outcome;

/// Build the operands described by `args`, multiply them and time it.
///
/// One untimed warm-up multiply runs first; it also surfaces a dimension
/// mismatch before any timing starts.
pub fn run(args: &Args) -> Result<Outcome> {
    if args.iterations == 0 {
        return Err(BenchError::InvalidArgument(
            "iterations must be at least 1".to_string(),
        ));
    }
    let dims = args.dims();

    let variant = select_kernel_with(args.kernel);
    let kernel = kernel_for(variant).ok_or(BenchError::KernelUnavailable(variant))?;
    debug!(kernel = kernel.name(), preference = %args.kernel, "kernel chosen");

    let mut a = allocate(dims.m, dims.k)?;
    let mut b = allocate(dims.k2, dims.n)?;
    let mut source = value_source(args)?;
    a.fill(source.as_mut());
    b.fill(source.as_mut());
    debug!(source = source.name(), "operands populated");

    let mut c = kernel.multiply(&a, &b)?;

    let mut total = Duration::ZERO;
    for _ in 0..args.iterations {
        let start = Instant::now();
        c = black_box(kernel.multiply(black_box(&a), black_box(&b))?);
        total += start.elapsed();
    }

    let avg = total.as_secs_f64() / args.iterations as f64;
    let flops = 2.0 * (dims.m * dims.k * dims.n) as f64;
    let gflops = if avg > 0.0 { flops / avg / 1e9 } else { 0.0 };
    info!(avg_ms = avg * 1000.0, gflops, "benchmark finished");

    Ok(Outcome {
        kernel: kernel.name().to_string(),
        variant,
        a_shape: a.shape(),
        b_shape: b.shape(),
        c_shape: c.shape(),
        iterations: args.iterations,
        avg_ms: avg * 1000.0,
        gflops,
        checksum: c.sum(),
    })
}

fn allocate(rows: usize, cols: usize) -> Result<Matrix> {
    Shape::new(rows, cols)?;
    Ok(Matrix::zeros(rows, cols))
}

fn value_source(args: &Args) -> Result<Box<dyn ValueSource>> {
    Ok(match args.fill {
        Fill::Uniform => match args.seed {
            Some(seed) => Box::new(UniformSource::seeded(seed)),
            None => Box::new(UniformSource::from_entropy()),
        },
        Fill::Sequence => Box::new(SequenceSource::new(100, 1.0)?),
        Fill::Ones => Box::new(ConstantSource::new(1.0)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dgemm_core::{KernelVariant, MatrixError};

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["dgemm-bench"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_square() {
        let outcome = run(&args(&["--size", "16", "--fill", "ones"])).unwrap();
        assert_eq!(outcome.c_shape, Shape::new(16, 16).unwrap());
        // every cell of ones(16x16) @ ones(16x16) is 16
        assert_eq!(outcome.checksum, 16.0 * 256.0);
        assert!(outcome.avg_ms >= 0.0);
    }

    #[test]
    fn test_run_rectangular_seeded() {
        let a = run(&args(&["--rows", "3", "--inner", "5", "--cols", "7", "--seed", "11"])).unwrap();
        let b = run(&args(&["--rows", "3", "--inner", "5", "--cols", "7", "--seed", "11"])).unwrap();
        assert_eq!(a.c_shape, Shape::new(3, 7).unwrap());
        assert_eq!(a.a_shape, Shape::new(3, 5).unwrap());
        assert_eq!(a.b_shape, Shape::new(5, 7).unwrap());
        assert_eq!(a.checksum, b.checksum);
    }

    #[test]
    fn test_run_scalar_kernel() {
        let outcome = run(&args(&["--size", "5", "--kernel", "scalar", "--fill", "sequence"])).unwrap();
        assert_eq!(outcome.variant, KernelVariant::Scalar);
        assert_eq!(outcome.kernel, "scalar");
    }

    #[test]
    fn test_run_mismatch() {
        let err = run(&args(&["--rows", "2", "--inner", "3", "--b-rows", "4", "--cols", "5"])).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Matrix(MatrixError::DimensionMismatch {
                m: 2,
                k: 3,
                k2: 4,
                n: 5
            })
        ));
    }

    #[test]
    fn test_run_rejects_zero_size() {
        let err = run(&args(&["--size", "0"])).unwrap_err();
        assert!(matches!(err, BenchError::Matrix(MatrixError::EmptyShape { .. })));
    }

    #[test]
    fn test_run_rejects_zero_iterations() {
        let err = run(&args(&["--size", "4", "--iterations", "0"])).unwrap_err();
        assert!(matches!(err, BenchError::InvalidArgument(_)));
    }
}
