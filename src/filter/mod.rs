//! Streaming FIR and IIR filters.
//!
//! Every filter is one generic implementation over a vector type and a
//! [`TapCount`]; the public names are aliases fixing the length either at
//! compile time ([`Fir`], [`Iir`]) or at construction ([`FirG`], [`IirG`]).
//!
//! Instances are single-stream state. All mutating calls take `&mut self`,
//! so sharing one filter between threads requires external synchronisation.

pub mod fir;
pub mod iir;
pub mod length;
pub mod ring;

pub use fir::{Fir, FirFilter, FirG};
pub use iir::{Iir, IirFilter, IirG};
pub use length::{Dynamic, Fixed, TapCount, padded_len};

use serde::{Deserialize, Serialize};

/// Evaluation strategy for a filter output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Evaluator {
    /// Element-by-element accumulation in tap order
    Scalar,
    /// Lane-wide fused multiply-add with a final horizontal sum
    #[default]
    Simd,
}

impl Evaluator {
    pub fn name(&self) -> &'static str {
        match self {
            Evaluator::Scalar => "scalar",
            Evaluator::Simd => "simd",
        }
    }
}

/// Common trait for sample-by-sample filters
pub trait SampleFilter {
    type Sample: Copy;

    /// Admit one sample and return the matching output using the default evaluator
    fn tick(&mut self, x: Self::Sample) -> Self::Sample;

    /// Same as `tick` with an explicit evaluator
    fn tick_with(&mut self, evaluator: Evaluator, x: Self::Sample) -> Self::Sample;

    /// Zero the sample history, keeping coefficients
    fn reset(&mut self);

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [Self::Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.tick(*sample);
        }
    }
}
