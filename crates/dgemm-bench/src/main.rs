use std::process::ExitCode;

use clap::Parser;
use dgemm_bench::{run, Args, BANNER};
use dgemm_core::capabilities;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("{}", BANNER);
    println!("Host:        {}", capabilities());

    match run(&args) {
        Ok(outcome) => {
            print!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
