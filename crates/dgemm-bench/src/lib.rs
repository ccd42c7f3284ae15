//! `dgemm-bench` - command-line throughput benchmark for the dgemm kernels.
//!
//! The binary builds two matrices, fills them from a value source, times
//! the multiplication with the selected kernel and prints a short report.

pub mod cli;
pub mod error;
pub mod harness;
pub mod report;

pub use cli::{Args, Dims, Fill};
pub use error::{BenchError, Result};
pub use harness::run;
pub use report::{Outcome, BANNER};
