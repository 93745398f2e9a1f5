//! Configuration for the filter tools.
//!
//! Benchmark settings and filter definitions can be given on the command
//! line or loaded from TOML:
//!
//! ```toml
//! iterations = 65536
//! repeats = 3
//! taps = "2-64"
//! width = "wide"
//! ```

use crate::error::{FilterError, MIN_TAPS, Result};
use crate::filter::Evaluator;
use crate::noise::DEFAULT_SEED;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Sample element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    F32,
    F64,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::F32 => "float",
            ElementType::F64 => "double",
        }
    }
}

/// SIMD register width used for the vector evaluator
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VectorWidth {
    /// 128-bit lanes (4 x f32, 2 x f64)
    #[default]
    Narrow,
    /// 256-bit lanes (8 x f32, 4 x f64)
    Wide,
}

/// Filter structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Fir,
    Iir,
}

impl FilterKind {
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Fir => "FIR",
            FilterKind::Iir => "IIR",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Set of tap counts to visit
///
/// # Parsing formats
/// - `2-255` - inclusive range
/// - `2-64:4` - inclusive range with a step
/// - `8,16,31` - explicit list
///
/// # Example
/// ```
/// use tapline::config::TapSelection;
///
/// let taps: TapSelection = "4-16:4".parse().unwrap();
/// assert_eq!(taps.counts(), &[4, 8, 12, 16]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TapSelection(Vec<usize>);

impl TapSelection {
    /// Every tap count in `min..=max`
    ///
    /// # Errors
    /// Returns `FilterError::Config` if the range is empty or starts below
    /// `MIN_TAPS`
    pub fn range(min: usize, max: usize) -> Result<Self> {
        if min < MIN_TAPS {
            return Err(FilterError::Config(format!(
                "tap count {} is below the minimum of {}",
                min, MIN_TAPS
            )));
        }
        if min > max {
            return Err(FilterError::Config(format!("empty range: {}-{}", min, max)));
        }
        Ok(Self((min..=max).collect()))
    }

    pub fn counts(&self) -> &[usize] {
        &self.0
    }
}

impl Default for TapSelection {
    fn default() -> Self {
        Self((MIN_TAPS..=255).collect())
    }
}

impl fmt::Display for TapSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", list.join(","))
    }
}

impl FromStr for TapSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |v: &str| -> std::result::Result<usize, String> {
            v.trim()
                .parse()
                .map_err(|_| format!("invalid tap count: {}", v.trim()))
        };

        let counts: Vec<usize> = if let Some((lo, rest)) = s.split_once('-') {
            let (hi, step) = match rest.split_once(':') {
                Some((hi, step)) => (hi, parse(step)?),
                None => (rest, 1),
            };
            let (lo, hi) = (parse(lo)?, parse(hi)?);
            if step == 0 {
                return Err("step must be positive".to_string());
            }
            if lo > hi {
                return Err(format!("empty range: {}", s));
            }
            (lo..=hi).step_by(step).collect()
        } else {
            s.split(',').map(parse).collect::<std::result::Result<_, _>>()?
        };

        if counts.is_empty() {
            return Err("no tap counts given".to_string());
        }
        if let Some(&bad) = counts.iter().find(|&&n| n < MIN_TAPS) {
            return Err(format!("tap count {} is below the minimum of {}", bad, MIN_TAPS));
        }
        Ok(Self(counts))
    }
}

impl TryFrom<String> for TapSelection {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TapSelection> for String {
    fn from(taps: TapSelection) -> Self {
        taps.to_string()
    }
}

/// Benchmark harness configuration
///
/// Use `BenchConfig::default()` for the reference settings: 64 Ki white-noise
/// samples per measurement over tap counts 2..=255.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Samples fed through each filter per measurement
    pub iterations: usize,
    /// Measurements per (filter, tap count) pair
    pub repeats: usize,
    /// White-noise seed
    pub seed: u32,
    /// Tap counts to measure
    pub taps: TapSelection,
    /// Vector register width
    pub width: VectorWidth,
    /// Report format
    pub format: OutputFormat,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 64 * 1024,
            repeats: 1,
            seed: DEFAULT_SEED,
            taps: TapSelection::default(),
            width: VectorWidth::Narrow,
            format: OutputFormat::Text,
        }
    }
}

impl BenchConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| FilterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(FilterError::Config("iterations must be positive".to_string()));
        }
        if self.repeats == 0 {
            return Err(FilterError::Config("repeats must be positive".to_string()));
        }
        Ok(())
    }
}

/// Coefficients for a single filter
///
/// For FIR filters only `b` is used. IIR filters need `a` with the same
/// length as `b`; a missing `a` means `[1, 0, 0, ...]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    #[serde(default)]
    pub element: Option<ElementType>,
    #[serde(default)]
    pub evaluator: Evaluator,
    pub b: Vec<f64>,
    #[serde(default)]
    pub a: Option<Vec<f64>>,
}

impl FilterSpec {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let spec: Self = toml::from_str(s).map_err(|e| FilterError::Config(e.to_string()))?;
        FilterError::check_length(spec.b.len())?;
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Feedback taps, defaulting to a unit `a0` with every other tap zero
    pub fn feedback(&self) -> Vec<f64> {
        match &self.a {
            Some(a) => a.clone(),
            None => {
                let mut a = vec![0.0; self.b.len()];
                if let Some(a0) = a.first_mut() {
                    *a0 = 1.0;
                }
                a
            }
        }
    }
}

/// Parse a comma-separated coefficient list such as `0.5,0.3,0.2`
pub fn parse_coefficients(s: &str) -> std::result::Result<Vec<f64>, String> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid coefficient: {}", v.trim()))
        })
        .collect()
}
