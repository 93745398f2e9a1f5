use anyhow::Result;
use clap::Parser;

use tapline::bench::{BenchArgs, run};
use tapline::config::FilterKind;

#[derive(Parser, Debug)]
#[command(name = "fir_benchmark")]
#[command(about = "Time scalar and SIMD FIR evaluators across tap counts", long_about = None)]
struct Args {
    #[command(flatten)]
    bench: BenchArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.bench.log_level()))
        .init();

    run(FilterKind::Fir, &args.bench)?;
    Ok(())
}
