//! Benchmark harness comparing scalar and SIMD evaluators.
//!
//! Every tap count is measured across eight variants: {float, double} x
//! {fixed, runtime length} x {simd, scalar}. Each measurement feeds
//! `iterations` white-noise samples through a freshly built filter.

mod driver;
mod table;

pub use driver::{BenchArgs, run};
pub use table::FIXED_TAPS;

use crate::config::{BenchConfig, ElementType, FilterKind, VectorWidth};
use crate::error::Result;
use crate::filter::{Evaluator, FirFilter, FirG, IirFilter, IirG, TapCount};
use crate::noise::WhiteNoise;
use crate::simd::{SimdReal, SimdVector, f32x4, f32x8, f64x2, f64x4};
use num_traits::Zero;
use rolling_stats::Stats;
use serde::Serialize;
use std::hint::black_box;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthKind {
    Fixed,
    Runtime,
}

/// One measured column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub element: ElementType,
    pub length: LengthKind,
    pub evaluator: Evaluator,
}

const fn variant(element: ElementType, length: LengthKind, evaluator: Evaluator) -> Variant {
    Variant {
        element,
        length,
        evaluator,
    }
}

/// Report column order
pub const VARIANTS: [Variant; 8] = [
    variant(ElementType::F32, LengthKind::Fixed, Evaluator::Simd),
    variant(ElementType::F32, LengthKind::Fixed, Evaluator::Scalar),
    variant(ElementType::F32, LengthKind::Runtime, Evaluator::Simd),
    variant(ElementType::F32, LengthKind::Runtime, Evaluator::Scalar),
    variant(ElementType::F64, LengthKind::Fixed, Evaluator::Simd),
    variant(ElementType::F64, LengthKind::Fixed, Evaluator::Scalar),
    variant(ElementType::F64, LengthKind::Runtime, Evaluator::Simd),
    variant(ElementType::F64, LengthKind::Runtime, Evaluator::Scalar),
];

impl Variant {
    /// Human-readable name, e.g. `FIRg<16> simd double`
    pub fn label(&self, kind: FilterKind, taps: usize) -> String {
        let suffix = match self.length {
            LengthKind::Fixed => "",
            LengthKind::Runtime => "g",
        };
        format!(
            "{}{}<{}> {} {}",
            kind.name(),
            suffix,
            taps,
            self.evaluator.name(),
            self.element.name()
        )
    }

    /// Short column key, e.g. `g_scalar_d`
    pub fn column(&self) -> String {
        let prefix = match self.length {
            LengthKind::Fixed => "",
            LengthKind::Runtime => "g_",
        };
        let element = match self.element {
            ElementType::F32 => "f",
            ElementType::F64 => "d",
        };
        format!("{}{}_{}", prefix, self.evaluator.name(), element)
    }
}

/// Wall-clock statistics over repeated measurements, in seconds
#[derive(Debug, Clone, Serialize)]
pub struct TimingSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl TimingSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

/// All variants measured at one tap count, in `VARIANTS` order
#[derive(Debug, Clone, Serialize)]
pub struct BenchRow {
    pub taps: usize,
    pub timings: Vec<Option<TimingSummary>>,
}

/// Deterministic feedforward taps with `sum(|b|) <= 1`
pub fn bench_feedforward(taps: usize, seed: u32) -> Vec<f64> {
    WhiteNoise::new(seed)
        .take(taps)
        .map(|x| x as f64 / taps as f64)
        .collect()
}

/// Deterministic feedback taps, `a0 = 1` and `sum(|a[1..]|) <= 0.5` so the
/// recursion stays stable
pub fn bench_feedback(taps: usize, seed: u32) -> Vec<f64> {
    let mut a: Vec<f64> = WhiteNoise::new(seed.wrapping_add(1))
        .take(taps)
        .map(|x| 0.5 * x as f64 / taps as f64)
        .collect();
    a[0] = 1.0;
    a
}

fn convert<T: SimdReal>(values: &[f64]) -> Vec<T> {
    values.iter().map(|&v| T::from_f64(v)).collect()
}

/// Feed `iterations` noise samples through `filter` with `push` and the
/// chosen evaluator; returns the last output
pub fn drive_fir<V: SimdVector, L: TapCount>(
    filter: &mut FirFilter<V, L>,
    evaluator: Evaluator,
    iterations: usize,
    seed: u32,
) -> f64 {
    let mut source = WhiteNoise::new(seed);
    let mut out = V::Elem::zero();
    match evaluator {
        Evaluator::Scalar => {
            for _ in 0..iterations {
                filter.push(V::Elem::from_f32(source.tick()));
                out = filter.eval_scalar();
            }
        }
        Evaluator::Simd => {
            for _ in 0..iterations {
                filter.push(V::Elem::from_f32(source.tick()));
                out = filter.eval_simd();
            }
        }
    }
    out.as_f64()
}

/// IIR counterpart of [`drive_fir`]
pub fn drive_iir<V: SimdVector, L: TapCount>(
    filter: &mut IirFilter<V, L>,
    evaluator: Evaluator,
    iterations: usize,
    seed: u32,
) -> f64 {
    let mut source = WhiteNoise::new(seed);
    let mut out = V::Elem::zero();
    match evaluator {
        Evaluator::Scalar => {
            for _ in 0..iterations {
                out = filter.tick_scalar(V::Elem::from_f32(source.tick()));
            }
        }
        Evaluator::Simd => {
            for _ in 0..iterations {
                out = filter.tick_simd(V::Elem::from_f32(source.tick()));
            }
        }
    }
    out.as_f64()
}

fn time_once<F: FnOnce() -> f64>(f: F) -> Duration {
    let start = Instant::now();
    black_box(f());
    start.elapsed()
}

fn measure_fir<V: SimdVector, L: TapCount>(
    filter: &mut FirFilter<V, L>,
    evaluator: Evaluator,
    config: &BenchConfig,
) -> Duration {
    let coefs: Vec<V::Elem> = convert(&bench_feedforward(filter.taps(), config.seed));
    filter.coefs(&coefs);
    time_once(|| drive_fir(filter, evaluator, config.iterations, config.seed))
}

fn measure_iir<V: SimdVector, L: TapCount>(
    filter: &mut IirFilter<V, L>,
    evaluator: Evaluator,
    config: &BenchConfig,
) -> Duration {
    let b: Vec<V::Elem> = convert(&bench_feedforward(filter.taps(), config.seed));
    let a: Vec<V::Elem> = convert(&bench_feedback(filter.taps(), config.seed));
    filter.coefs(&b, &a);
    time_once(|| drive_iir(filter, evaluator, config.iterations, config.seed))
}

fn measure_with<V: SimdVector>(
    kind: FilterKind,
    variant: Variant,
    taps: usize,
    config: &BenchConfig,
) -> Result<Option<Duration>> {
    let evaluator = variant.evaluator;
    let elapsed = match (kind, variant.length) {
        (FilterKind::Fir, LengthKind::Fixed) => table::fixed_fir::<V>(taps, evaluator, config),
        (FilterKind::Iir, LengthKind::Fixed) => table::fixed_iir::<V>(taps, evaluator, config),
        (FilterKind::Fir, LengthKind::Runtime) => {
            let mut filter = FirG::<V>::with_len(taps)?;
            Some(measure_fir(&mut filter, evaluator, config))
        }
        (FilterKind::Iir, LengthKind::Runtime) => {
            let mut filter = IirG::<V>::with_len(taps)?;
            Some(measure_iir(&mut filter, evaluator, config))
        }
    };
    Ok(elapsed)
}

/// Time one variant once
///
/// Returns `None` for fixed-length variants whose tap count has no
/// compile-time instantiation (see [`FIXED_TAPS`]).
///
/// # Errors
/// Returns `FilterError::InvalidLength` if `taps < 2`
pub fn measure(
    kind: FilterKind,
    variant: Variant,
    taps: usize,
    config: &BenchConfig,
) -> Result<Option<Duration>> {
    match (variant.element, config.width) {
        (ElementType::F32, VectorWidth::Narrow) => measure_with::<f32x4>(kind, variant, taps, config),
        (ElementType::F32, VectorWidth::Wide) => measure_with::<f32x8>(kind, variant, taps, config),
        (ElementType::F64, VectorWidth::Narrow) => measure_with::<f64x2>(kind, variant, taps, config),
        (ElementType::F64, VectorWidth::Wide) => measure_with::<f64x4>(kind, variant, taps, config),
    }
}

/// Measure every configured tap count, handing each row to `on_row` as
/// soon as it is complete
pub fn run_benchmarks<F: FnMut(&BenchRow)>(
    kind: FilterKind,
    config: &BenchConfig,
    mut on_row: F,
) -> Result<Vec<BenchRow>> {
    config.validate()?;
    log::info!(
        "{} benchmark: {} tap counts, {} iterations, {} repeats, {:?} vectors",
        kind.name(),
        config.taps.counts().len(),
        config.iterations,
        config.repeats,
        config.width
    );

    let mut rows = Vec::with_capacity(config.taps.counts().len());
    for &taps in config.taps.counts() {
        let mut timings = Vec::with_capacity(VARIANTS.len());
        for variant in VARIANTS {
            let mut stats: Stats<f64> = Stats::new();
            for _ in 0..config.repeats {
                match measure(kind, variant, taps, config)? {
                    Some(elapsed) => stats.update(elapsed.as_secs_f64()),
                    None => break,
                }
            }
            if stats.count > 0 {
                log::debug!("{}: {:.6} s", variant.label(kind, taps), stats.mean);
            }
            timings.push(TimingSummary::from_stats(&stats));
        }

        let row = BenchRow { taps, timings };
        on_row(&row);
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TapSelection;
    use crate::filter::{Fir, Iir};

    fn small_config() -> BenchConfig {
        BenchConfig {
            iterations: 256,
            taps: "2,3,300".parse::<TapSelection>().unwrap(),
            ..BenchConfig::default()
        }
    }

    #[test]
    fn test_variant_labels() {
        assert_eq!(VARIANTS[0].label(FilterKind::Fir, 8), "FIR<8> simd float");
        assert_eq!(VARIANTS[7].label(FilterKind::Iir, 3), "IIRg<3> scalar double");
        let columns: Vec<String> = VARIANTS.iter().map(|v| v.column()).collect();
        assert_eq!(
            columns,
            [
                "simd_f", "scalar_f", "g_simd_f", "g_scalar_f", "simd_d", "scalar_d", "g_simd_d",
                "g_scalar_d"
            ]
        );
    }

    #[test]
    fn test_bench_feedback_is_stable() {
        let a = bench_feedback(16, 777);
        assert_eq!(a[0], 1.0);
        assert!(a[1..].iter().map(|x| x.abs()).sum::<f64>() <= 0.5);
        let b = bench_feedforward(16, 777);
        assert!(b.iter().map(|x| x.abs()).sum::<f64>() <= 1.0);
    }

    #[test]
    fn test_drivers_agree_across_evaluators() {
        let b = bench_feedforward(7, 1);
        let a = bench_feedback(7, 1);

        let mut fir_a = Fir::<7, f64x2>::new();
        let mut fir_b = Fir::<7, f64x2>::new();
        fir_a.coefs(&b);
        fir_b.coefs(&b);
        let simd = drive_fir(&mut fir_a, Evaluator::Simd, 500, 9);
        let scalar = drive_fir(&mut fir_b, Evaluator::Scalar, 500, 9);
        assert!((simd - scalar).abs() < 1e-12);

        let mut iir_a = Iir::<7, f64x4>::new();
        let mut iir_b = Iir::<7, f64x4>::new();
        iir_a.coefs(&b, &a);
        iir_b.coefs(&b, &a);
        let simd = drive_iir(&mut iir_a, Evaluator::Simd, 500, 9);
        let scalar = drive_iir(&mut iir_b, Evaluator::Scalar, 500, 9);
        assert!((simd - scalar).abs() < 1e-12);
    }

    #[test]
    fn test_run_benchmarks_rows() {
        let config = small_config();
        let mut streamed = Vec::new();
        let rows = run_benchmarks(FilterKind::Iir, &config, |row| streamed.push(row.taps)).unwrap();

        assert_eq!(streamed, vec![2, 3, 300]);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].timings.iter().all(|t| t.is_some()));

        // 300 taps has no compile-time instantiation
        let fixed: Vec<bool> = rows[2].timings.iter().map(|t| t.is_some()).collect();
        assert_eq!(fixed, [false, false, true, true, false, false, true, true]);
    }

    #[test]
    fn test_run_benchmarks_wide_vectors() {
        let config = BenchConfig {
            width: VectorWidth::Wide,
            ..small_config()
        };
        let rows = run_benchmarks(FilterKind::Fir, &config, |_| {}).unwrap();
        assert_eq!(rows[1].timings[0].as_ref().map(|t| t.count), Some(1));
    }

    #[test]
    fn test_measure_rejects_short_runtime_length() {
        let config = small_config();
        assert!(measure(FilterKind::Fir, VARIANTS[2], 1, &config).is_err());
        assert!(matches!(measure(FilterKind::Fir, VARIANTS[0], 1, &config), Ok(None)));
    }
}
