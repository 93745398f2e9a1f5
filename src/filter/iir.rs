use super::length::{Dynamic, Fixed, TapCount, padded_len};
use super::ring::{Cursor, MirroredHistory};
use super::{Evaluator, SampleFilter};
use crate::error::{FilterError, Result};
use crate::simd::{DefaultF64, SimdVector};
use num_traits::{AsPrimitive, One, Zero};

/// IIR filter with a compile-time tap count
pub type Iir<const N: usize, V = DefaultF64> = IirFilter<V, Fixed<N>>;

/// IIR filter with a tap count chosen at construction
pub type IirG<V = DefaultF64> = IirFilter<V, Dynamic>;

/// Direct-form I recursive filter
///
/// Realises `a0*y[n] = b0*x[n] + sum(b[j]*x[n-j]) - sum(a[j]*y[n-j])` for
/// `j` in `1..N`. Tap 0 of each array is kept as a scalar; taps `1..N` live
/// in vector storage padded to `nn`, the count `N - 1` rounded up to the
/// lane width. Input and output histories share one cursor.
///
/// Filters own their history and move, but do not clone:
///
/// ```compile_fail
/// use tapline::filter::IirG;
/// use tapline::simd::f64x2;
///
/// let filter = IirG::<f64x2>::with_len(3).unwrap();
/// let copy = filter.clone();
/// ```
#[derive(Debug)]
pub struct IirFilter<V: SimdVector, L: TapCount> {
    len: L,
    cursor: Cursor,
    x: MirroredHistory<V::Elem>,
    y: MirroredHistory<V::Elem>,
    b0: V::Elem,
    a0: V::Elem,
    b: Vec<V>,
    a: Vec<V>,
}

impl<V: SimdVector, const N: usize> IirFilter<V, Fixed<N>> {
    /// Create a pass-through filter (`b0 = a0 = 1`, other taps zero)
    pub fn new() -> Self {
        Self::with_length(Fixed::new())
    }
}

impl<V: SimdVector, const N: usize> Default for IirFilter<V, Fixed<N>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SimdVector> IirFilter<V, Dynamic> {
    /// Create a pass-through filter of `taps` coefficients per array
    ///
    /// # Errors
    /// Returns `FilterError::InvalidLength` if `taps < 2`
    pub fn with_len(taps: usize) -> Result<Self> {
        Ok(Self::with_length(Dynamic::new(taps)?))
    }

    /// Create a filter sized to and loaded with `b` and `a`
    ///
    /// # Errors
    /// Returns `FilterError::CoefficientCount` if the arrays differ in length,
    /// `FilterError::InvalidLength` if they are shorter than 2
    pub fn from_coefficients<R: AsPrimitive<V::Elem>>(b: &[R], a: &[R]) -> Result<Self> {
        if b.len() != a.len() {
            return Err(FilterError::CoefficientCount {
                feedforward: b.len(),
                feedback: a.len(),
            });
        }
        let mut filter = Self::with_len(b.len())?;
        filter.coefs(b, a);
        Ok(filter)
    }
}

impl<V: SimdVector, L: TapCount> IirFilter<V, L> {
    fn with_length(len: L) -> Self {
        let nn = padded_len(len.taps() - 1, V::LANES);
        log::debug!(
            "IIR filter: {} taps, {} lanes, padded to {}",
            len.taps(),
            V::LANES,
            nn
        );
        Self {
            len,
            cursor: Cursor::default(),
            x: MirroredHistory::new(nn),
            y: MirroredHistory::new(nn),
            b0: V::Elem::one(),
            a0: V::Elem::one(),
            b: vec![V::zero(); nn / V::LANES],
            a: vec![V::zero(); nn / V::LANES],
        }
    }

    /// Number of taps per coefficient array
    #[inline(always)]
    pub fn taps(&self) -> usize {
        self.len.taps()
    }

    /// `N - 1` rounded up to a multiple of the lane width
    #[inline(always)]
    pub fn padded_len(&self) -> usize {
        padded_len(self.len.taps() - 1, V::LANES)
    }

    /// Set feedforward `b` and feedback `a` taps from the first `N` values of each
    ///
    /// # Panics
    /// If either slice holds fewer than `N` values
    pub fn coefs<R: AsPrimitive<V::Elem>>(&mut self, b: &[R], a: &[R]) {
        let n = self.taps();
        self.b0 = b[0].as_();
        self.a0 = a[0].as_();

        for (dst, src) in V::lanes_mut(&mut self.b)[..n - 1].iter_mut().zip(&b[1..n]) {
            *dst = src.as_();
        }
        for (dst, src) in V::lanes_mut(&mut self.a)[..n - 1].iter_mut().zip(&a[1..n]) {
            *dst = src.as_();
        }
    }

    /// Feedforward taps `b[0..N]`
    pub fn feedforward(&self) -> Vec<V::Elem> {
        let n = self.taps();
        std::iter::once(self.b0)
            .chain(V::lanes(&self.b)[..n - 1].iter().copied())
            .collect()
    }

    /// Feedback taps `a[0..N]`
    pub fn feedback(&self) -> Vec<V::Elem> {
        let n = self.taps();
        std::iter::once(self.a0)
            .chain(V::lanes(&self.a)[..n - 1].iter().copied())
            .collect()
    }

    /// Zero both histories, keeping every coefficient
    pub fn reset(&mut self) {
        self.x.clear();
        self.y.clear();
        self.cursor = Cursor::default();
    }

    /// Filter one sample using the vector evaluator
    #[inline]
    pub fn tick(&mut self, input: V::Elem) -> V::Elem {
        self.tick_simd(input)
    }

    /// Filter one sample, accumulating tap by tap
    pub fn tick_scalar(&mut self, input: V::Elem) -> V::Elem {
        let n = self.taps() - 1;
        let nn = self.padded_len();
        let i = self.cursor.get();
        let x = self.x.window(i, nn);
        let y = self.y.window(i, nn);
        let b = V::lanes(&self.b);
        let a = V::lanes(&self.a);

        let mut ff = V::Elem::zero();
        let mut fb = V::Elem::zero();
        for j in 0..n {
            ff = ff + x[j] * b[j];
            fb = fb - y[j] * a[j];
        }

        let r = (input * self.b0 + (ff + fb)) / self.a0;
        self.commit(input, r);
        r
    }

    /// Filter one sample with two vector accumulators over the padded length
    pub fn tick_simd(&mut self, input: V::Elem) -> V::Elem {
        let nn = self.padded_len();
        let i = self.cursor.get();
        let x = self.x.window(i, nn);
        let y = self.y.window(i, nn);
        let blocks = nn / V::LANES;

        let mut ff = V::zero();
        let mut fb = V::zero();
        for (((x, y), &b), &a) in x
            .chunks_exact(V::LANES)
            .zip(y.chunks_exact(V::LANES))
            .zip(&self.b[..blocks])
            .zip(&self.a[..blocks])
        {
            ff = V::load_unaligned(x).mul_add(b, ff);
            fb = V::load_unaligned(y).mul_neg_add(a, fb);
        }

        let r = (input * self.b0 + (ff + fb).reduce_add()) / self.a0;
        self.commit(input, r);
        r
    }

    /// Filter one sample with the chosen strategy
    #[inline]
    pub fn tick_eval(&mut self, evaluator: Evaluator, input: V::Elem) -> V::Elem {
        match evaluator {
            Evaluator::Scalar => self.tick_scalar(input),
            Evaluator::Simd => self.tick_simd(input),
        }
    }

    #[inline(always)]
    fn commit(&mut self, input: V::Elem, output: V::Elem) {
        let nn = self.padded_len();
        let i = self.cursor.advance(nn);
        self.x.write(i, nn, input);
        self.y.write(i, nn, output);
    }
}

impl<V: SimdVector, L: TapCount> SampleFilter for IirFilter<V, L> {
    type Sample = V::Elem;

    fn tick(&mut self, x: V::Elem) -> V::Elem {
        self.tick_simd(x)
    }

    fn tick_with(&mut self, evaluator: Evaluator, x: V::Elem) -> V::Elem {
        self.tick_eval(evaluator, x)
    }

    fn reset(&mut self) {
        IirFilter::reset(self)
    }
}
