use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use tapline::config::{ElementType, FilterKind, FilterSpec, VectorWidth, parse_coefficients};
use tapline::filter::Evaluator;
use tapline::processing::StreamProcessor;

/// Comma-separated coefficient list
#[derive(Debug, Clone)]
struct Coefs(Vec<f64>);

fn parse_coefs(s: &str) -> std::result::Result<Coefs, String> {
    parse_coefficients(s).map(Coefs)
}

#[derive(Parser, Debug)]
#[command(name = "tapline")]
#[command(about = "Filter a stream of samples, one per line, with an FIR or IIR filter", long_about = None)]
struct Args {
    /// Input file (defaults to stdin)
    input: Option<PathBuf>,

    /// TOML filter definition (kind, b, a, element, evaluator)
    #[arg(short = 'c', long, conflicts_with_all = ["fir", "iir_b"])]
    config: Option<PathBuf>,

    /// FIR coefficients, e.g. "0.5,0.3,0.2"
    #[arg(long, value_parser = parse_coefs, conflicts_with = "iir_b")]
    fir: Option<Coefs>,

    /// IIR feedforward coefficients b[0..N]
    #[arg(long = "iir-b", value_parser = parse_coefs, requires = "iir_a")]
    iir_b: Option<Coefs>,

    /// IIR feedback coefficients a[0..N]
    #[arg(long = "iir-a", value_parser = parse_coefs)]
    iir_a: Option<Coefs>,

    /// Sample element type
    #[arg(short = 'e', long, value_enum)]
    element: Option<ElementType>,

    /// Evaluation strategy
    #[arg(long, value_enum)]
    evaluator: Option<Evaluator>,

    /// Vector register width
    #[arg(short = 'w', long, value_enum, default_value = "narrow")]
    width: VectorWidth,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn filter_spec(args: &Args) -> Result<FilterSpec> {
    let mut spec = if let Some(path) = &args.config {
        FilterSpec::load(path).with_context(|| format!("loading {}", path.display()))?
    } else if let Some(Coefs(b)) = &args.fir {
        FilterSpec {
            kind: FilterKind::Fir,
            element: None,
            evaluator: Evaluator::default(),
            b: b.clone(),
            a: None,
        }
    } else if let (Some(Coefs(b)), Some(Coefs(a))) = (&args.iir_b, &args.iir_a) {
        FilterSpec {
            kind: FilterKind::Iir,
            element: None,
            evaluator: Evaluator::default(),
            b: b.clone(),
            a: Some(a.clone()),
        }
    } else {
        bail!("no filter given: use --config, --fir or --iir-b/--iir-a");
    };

    if let Some(element) = args.element {
        spec.element = Some(element);
    }
    if let Some(evaluator) = args.evaluator {
        spec.evaluator = evaluator;
    }
    Ok(spec)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let spec = filter_spec(&args)?;
    let element = spec.element.unwrap_or(match spec.kind {
        FilterKind::Fir => ElementType::F32,
        FilterKind::Iir => ElementType::F64,
    });
    let mut processor = StreamProcessor::new(&spec, element, args.width)?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let x: f64 = text
            .parse()
            .with_context(|| format!("line {}: invalid sample {:?}", line_no + 1, text))?;
        writeln!(out, "{}", processor.process(x))?;
    }
    out.flush()?;

    log::info!("Filtered {} samples", processor.sample_count());
    Ok(())
}
