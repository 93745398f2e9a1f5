//! Command-line front end shared by the benchmark binaries.

use super::{BenchRow, run_benchmarks};
use crate::config::{BenchConfig, FilterKind, OutputFormat, TapSelection, VectorWidth};
use crate::error::Result;
use crate::output::create_formatter;
use std::path::PathBuf;

/// Benchmark options; each one given overrides the configuration file
#[derive(clap::Args, Debug, Default)]
pub struct BenchArgs {
    /// TOML benchmark configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tap counts: range (e.g. "2-255"), stepped range ("2-64:2") or list ("8,16,32")
    #[arg(short, long)]
    pub taps: Option<TapSelection>,

    /// Samples per measurement
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Measurements per variant
    #[arg(short, long)]
    pub repeats: Option<usize>,

    /// White-noise seed
    #[arg(long)]
    pub seed: Option<u32>,

    /// Vector register width
    #[arg(short, long, value_enum)]
    pub width: Option<VectorWidth>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl BenchArgs {
    /// Default `env_logger` filter for the verbosity count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Configuration file (or defaults) with the command-line overrides applied
    pub fn resolve(&self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load(path)?,
            None => BenchConfig::default(),
        };
        if let Some(taps) = &self.taps {
            config.taps = taps.clone();
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(repeats) = self.repeats {
            config.repeats = repeats;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run the benchmark for `kind`, printing the header and then each row as
/// it completes
pub fn run(kind: FilterKind, args: &BenchArgs) -> Result<Vec<BenchRow>> {
    let config = args.resolve()?;
    let formatter = create_formatter(config.format, kind, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    run_benchmarks(kind, &config, |row| {
        println!("{}", formatter.format(row));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::noise::DEFAULT_SEED;

    #[test]
    fn test_resolve_defaults() {
        let config = BenchArgs::default().resolve().unwrap();
        assert_eq!(config.iterations, 64 * 1024);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.taps, TapSelection::default());
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let args = BenchArgs {
            taps: Some("4,8".parse().unwrap()),
            iterations: Some(100),
            repeats: Some(3),
            seed: Some(5),
            width: Some(VectorWidth::Wide),
            format: Some(OutputFormat::Json),
            ..BenchArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.taps.counts(), &[4, 8]);
        assert_eq!(config.iterations, 100);
        assert_eq!(config.repeats, 3);
        assert_eq!(config.seed, 5);
        assert_eq!(config.width, VectorWidth::Wide);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_rejects_zero_iterations() {
        let args = BenchArgs {
            iterations: Some(0),
            ..BenchArgs::default()
        };
        assert!(matches!(args.resolve(), Err(FilterError::Config(_))));
    }

    #[test]
    fn test_resolve_missing_config_file() {
        let args = BenchArgs {
            config: Some(PathBuf::from("/nonexistent/bench.toml")),
            ..BenchArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = BenchArgs::default();
        assert_eq!(args.log_level(), "warn");
        args.verbose = 2;
        assert_eq!(args.log_level(), "debug");
        args.verbose = 9;
        assert_eq!(args.log_level(), "trace");
    }

    #[test]
    fn test_run_small_selection() {
        let args = BenchArgs {
            taps: Some("3".parse().unwrap()),
            iterations: Some(64),
            format: Some(OutputFormat::Csv),
            ..BenchArgs::default()
        };
        let rows = run(FilterKind::Fir, &args).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].timings.iter().all(|t| t.is_some()));
    }
}
