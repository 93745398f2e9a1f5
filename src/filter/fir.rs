use super::length::{Dynamic, Fixed, TapCount, padded_len};
use super::ring::{Cursor, MirroredHistory};
use super::{Evaluator, SampleFilter};
use crate::error::Result;
use crate::simd::{DefaultF32, SimdVector};
use num_traits::{AsPrimitive, Zero};

/// FIR filter with a compile-time tap count
pub type Fir<const N: usize, V = DefaultF32> = FirFilter<V, Fixed<N>>;

/// FIR filter with a tap count chosen at construction
pub type FirG<V = DefaultF32> = FirFilter<V, Dynamic>;

/// Finite impulse response filter over a mirrored history buffer
///
/// Output is `sum(history[i + j] * coef[j])` for `j` in `0..N`, tap 0
/// weighting the newest sample. Coefficients live in whole vectors
/// zero-padded to `nn` (the tap count rounded up to the lane width), so the
/// SIMD evaluator can stride over `nn` without a remainder loop.
///
/// Filters own their history and move, but do not clone:
///
/// ```compile_fail
/// use tapline::filter::FirG;
/// use tapline::simd::f32x4;
///
/// let filter = FirG::<f32x4>::with_len(3).unwrap();
/// let copy = filter.clone();
/// ```
#[derive(Debug)]
pub struct FirFilter<V: SimdVector, L: TapCount> {
    len: L,
    cursor: Cursor,
    history: MirroredHistory<V::Elem>,
    coefs: Vec<V>,
}

impl<V: SimdVector, const N: usize> FirFilter<V, Fixed<N>> {
    /// Create a filter with all coefficients zero
    pub fn new() -> Self {
        Self::with_length(Fixed::new())
    }
}

impl<V: SimdVector, const N: usize> Default for FirFilter<V, Fixed<N>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SimdVector> FirFilter<V, Dynamic> {
    /// Create a filter of `taps` coefficients, all zero
    ///
    /// # Errors
    /// Returns `FilterError::InvalidLength` if `taps < 2`
    pub fn with_len(taps: usize) -> Result<Self> {
        Ok(Self::with_length(Dynamic::new(taps)?))
    }

    /// Create a filter sized to and loaded with `coefs`
    pub fn from_coefficients<R: AsPrimitive<V::Elem>>(coefs: &[R]) -> Result<Self> {
        let mut filter = Self::with_len(coefs.len())?;
        filter.coefs(coefs);
        Ok(filter)
    }
}

impl<V: SimdVector, L: TapCount> FirFilter<V, L> {
    fn with_length(len: L) -> Self {
        let nn = padded_len(len.taps(), V::LANES);
        log::debug!(
            "FIR filter: {} taps, {} lanes, padded to {}",
            len.taps(),
            V::LANES,
            nn
        );
        Self {
            len,
            cursor: Cursor::default(),
            history: MirroredHistory::new(nn),
            coefs: vec![V::zero(); nn / V::LANES],
        }
    }

    /// Number of taps
    #[inline(always)]
    pub fn taps(&self) -> usize {
        self.len.taps()
    }

    /// Tap count rounded up to a multiple of the lane width
    #[inline(always)]
    pub fn padded_len(&self) -> usize {
        padded_len(self.len.taps(), V::LANES)
    }

    /// Set the feedforward taps from the first `N` values of `coefs`
    ///
    /// # Panics
    /// If `coefs` holds fewer than `N` values
    pub fn coefs<R: AsPrimitive<V::Elem>>(&mut self, coefs: &[R]) {
        let n = self.taps();
        let dst = V::lanes_mut(&mut self.coefs);
        for (dst, src) in dst[..n].iter_mut().zip(&coefs[..n]) {
            *dst = src.as_();
        }
    }

    /// The `N` active coefficients (padding excluded)
    pub fn coefficients(&self) -> &[V::Elem] {
        &V::lanes(&self.coefs)[..self.taps()]
    }

    /// Zero the sample history
    pub fn reset(&mut self) {
        self.history.clear();
        self.cursor = Cursor::default();
    }

    /// Admit one sample without computing an output
    #[inline]
    pub fn push(&mut self, x: V::Elem) {
        let nn = self.padded_len();
        let i = self.cursor.advance(nn);
        self.history.write(i, nn, x);
    }

    /// Current output for the samples admitted so far
    #[inline]
    pub fn out(&self) -> V::Elem {
        self.eval_simd()
    }

    /// `push` followed by `out`
    #[inline]
    pub fn tick(&mut self, x: V::Elem) -> V::Elem {
        self.push(x);
        self.out()
    }

    /// Reference evaluator: one multiply and add per tap, in tap order
    pub fn eval_scalar(&self) -> V::Elem {
        let n = self.taps();
        let x = self.history.window(self.cursor.get(), self.padded_len());
        let c = V::lanes(&self.coefs);

        let mut sum = V::Elem::zero();
        for (&x, &c) in x[..n].iter().zip(&c[..n]) {
            sum = sum + x * c;
        }
        sum
    }

    /// Vector evaluator over the padded length
    pub fn eval_simd(&self) -> V::Elem {
        let nn = self.padded_len();
        let x = self.history.window(self.cursor.get(), nn);

        let mut acc = V::zero();
        for (x, &c) in x.chunks_exact(V::LANES).zip(&self.coefs[..nn / V::LANES]) {
            acc = V::load_unaligned(x).mul_add(c, acc);
        }
        acc.reduce_add()
    }

    /// Evaluate with the chosen strategy
    #[inline]
    pub fn eval(&self, evaluator: Evaluator) -> V::Elem {
        match evaluator {
            Evaluator::Scalar => self.eval_scalar(),
            Evaluator::Simd => self.eval_simd(),
        }
    }
}

impl<V: SimdVector, L: TapCount> SampleFilter for FirFilter<V, L> {
    type Sample = V::Elem;

    fn tick(&mut self, x: V::Elem) -> V::Elem {
        FirFilter::tick(self, x)
    }

    fn tick_with(&mut self, evaluator: Evaluator, x: V::Elem) -> V::Elem {
        self.push(x);
        self.eval(evaluator)
    }

    fn reset(&mut self) {
        FirFilter::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::simd::{f32x8, f64x2};
    use approx::assert_relative_eq;

    #[test]
    fn test_fir_impulse_response() {
        let mut fir = Fir::<3>::new();
        fir.coefs(&[0.5f32, 0.3, 0.2]);

        let expected: [f32; 6] = [0.5, 0.3, 0.2, 0.0, 0.0, 0.0];
        for (n, &want) in expected.iter().enumerate() {
            let input = if n == 0 { 1.0 } else { 0.0 };
            assert_relative_eq!(fir.tick(input), want);
        }
    }

    #[test]
    fn test_fir_push_out_matches_tick() {
        let coefs = [0.1, -0.4, 0.25, 0.7, 0.05];
        let mut split = FirG::<f64x2>::from_coefficients(&coefs).unwrap();
        let mut combined = FirG::<f64x2>::from_coefficients(&coefs).unwrap();

        for n in 0..20 {
            let x = (n as f64 * 0.37).sin();
            split.push(x);
            assert_eq!(split.out(), combined.tick(x));
        }
    }

    #[test]
    fn test_fir_out_does_not_advance() {
        let mut fir = Fir::<4, f64x2>::new();
        fir.coefs(&[1.0, 1.0, 1.0, 1.0]);
        fir.push(2.0);
        assert_eq!(fir.out(), 2.0);
        assert_eq!(fir.out(), 2.0);
    }

    #[test]
    fn test_fir_padding_coefficients_stay_zero() {
        let mut fir = Fir::<5, f32x8>::new();
        assert_eq!(fir.padded_len(), 8);
        fir.coefs(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(fir.coefficients(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(f32x8::lanes(&fir.coefs)[5..].iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_fir_reset_clears_history() {
        let mut fir = Fir::<3, f64x2>::new();
        fir.coefs(&[1.0, 1.0, 1.0]);
        fir.tick(5.0);
        fir.tick(7.0);
        fir.reset();
        assert_eq!(fir.coefficients(), &[1.0, 1.0, 1.0]);
        assert_eq!(fir.out(), 0.0);
        assert_eq!(fir.tick(1.0), 1.0);
    }

    #[test]
    fn test_firg_rejects_short_lengths() {
        assert_eq!(
            FirG::<f32x8>::with_len(1).err(),
            Some(FilterError::InvalidLength {
                requested: 1,
                minimum: 2
            })
        );
        assert!(FirG::<f32x8>::with_len(0).is_err());
        assert!(FirG::<f32x8>::with_len(2).is_ok());
    }

    #[test]
    fn test_fir_sample_filter_buffer() {
        let mut fir = FirG::<f64x2>::from_coefficients(&[0.5, 0.5]).unwrap();
        let mut buffer = [2.0, 4.0, 6.0, 8.0];
        fir.process_buffer(&mut buffer);
        assert_eq!(buffer, [1.0, 3.0, 5.0, 7.0]);
    }
}
