use crate::config::{ElementType, FilterKind, FilterSpec, VectorWidth};
use crate::error::{FilterError, Result};
use crate::filter::{Evaluator, FirG, IirG, SampleFilter};
use crate::simd::{SimdReal, SimdVector, f32x4, f32x8, f64x2, f64x4};

/// Object-safe, `f64`-in/`f64`-out view of a filter
trait StreamFilter: Send {
    fn process(&mut self, x: f64) -> f64;
    fn reset(&mut self);
}

struct Adapter<F> {
    filter: F,
    evaluator: Evaluator,
}

impl<F> StreamFilter for Adapter<F>
where
    F: SampleFilter + Send,
    F::Sample: SimdReal,
{
    fn process(&mut self, x: f64) -> f64 {
        self.filter
            .tick_with(self.evaluator, F::Sample::from_f64(x))
            .as_f64()
    }

    fn reset(&mut self) {
        self.filter.reset();
    }
}

fn build<V: SimdVector>(spec: &FilterSpec) -> Result<Box<dyn StreamFilter>> {
    FilterError::check_length(spec.b.len())?;
    let evaluator = spec.evaluator;
    let to_elem = |values: &[f64]| -> Vec<V::Elem> {
        values.iter().map(|&v| V::Elem::from_f64(v)).collect()
    };
    let b = to_elem(&spec.b);

    Ok(match spec.kind {
        FilterKind::Fir => Box::new(Adapter {
            filter: FirG::<V>::from_coefficients(&b)?,
            evaluator,
        }),
        FilterKind::Iir => Box::new(Adapter {
            filter: IirG::<V>::from_coefficients(&b, &to_elem(&spec.feedback()))?,
            evaluator,
        }),
    })
}

/// Runs a stream of samples through a filter described by a [`FilterSpec`]
pub struct StreamProcessor {
    filter: Box<dyn StreamFilter>,
    samples: u64,
}

impl StreamProcessor {
    /// Build the filter for the given element type and vector width
    ///
    /// # Errors
    /// Returns `FilterError::InvalidLength` or `FilterError::CoefficientCount`
    /// if the coefficient arrays are unusable
    pub fn new(spec: &FilterSpec, element: ElementType, width: VectorWidth) -> Result<Self> {
        let filter = match (element, width) {
            (ElementType::F32, VectorWidth::Narrow) => build::<f32x4>(spec)?,
            (ElementType::F32, VectorWidth::Wide) => build::<f32x8>(spec)?,
            (ElementType::F64, VectorWidth::Narrow) => build::<f64x2>(spec)?,
            (ElementType::F64, VectorWidth::Wide) => build::<f64x4>(spec)?,
        };
        log::debug!(
            "{} stream filter: {} taps, {:?}, {:?} vectors, {} evaluator",
            spec.kind.name(),
            spec.b.len(),
            element,
            width,
            spec.evaluator.name()
        );
        Ok(Self { filter, samples: 0 })
    }

    /// Filter one sample
    pub fn process(&mut self, x: f64) -> f64 {
        self.samples += 1;
        self.filter.process(x)
    }

    /// Filter a buffer in place
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.samples = 0;
    }

    /// Samples processed since construction or the last reset
    pub fn sample_count(&self) -> u64 {
        self.samples
    }
}
