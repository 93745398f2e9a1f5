pub mod bench;
pub mod config;
pub mod error;
pub mod filter;
pub mod noise;
pub mod output;
pub mod processing;
pub mod simd;

pub use error::{FilterError, MIN_TAPS, Result};
pub use filter::{Evaluator, Fir, FirG, Iir, IirG, SampleFilter};
pub use noise::WhiteNoise;
