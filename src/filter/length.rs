//! Tap-count providers.
//!
//! A filter is written once against [`TapCount`]. [`Fixed`] carries the
//! length in the type so loop bounds fold to constants, [`Dynamic`] stores
//! it in the instance and validates it at construction.

use crate::error::{FilterError, MIN_TAPS, Result};
use std::fmt::Debug;

pub trait TapCount: Copy + Debug + Send + Sync + 'static {
    /// Total number of taps, including tap 0.
    fn taps(&self) -> usize;
}

/// Compile-time tap count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed<const N: usize>;

impl<const N: usize> Fixed<N> {
    /// Fails the build when `N < 2`.
    pub fn new() -> Self {
        const { assert!(N >= MIN_TAPS, "invalid number of filter coefficients") };
        Fixed
    }
}

impl<const N: usize> Default for Fixed<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TapCount for Fixed<N> {
    #[inline(always)]
    fn taps(&self) -> usize {
        N
    }
}

/// Runtime tap count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dynamic(usize);

impl Dynamic {
    /// # Errors
    /// Returns `FilterError::InvalidLength` if `taps < 2`
    pub fn new(taps: usize) -> Result<Self> {
        FilterError::check_length(taps).map(Dynamic)
    }
}

impl TapCount for Dynamic {
    #[inline(always)]
    fn taps(&self) -> usize {
        self.0
    }
}

/// Smallest multiple of `lanes` that is `>= count`.
#[inline(always)]
pub fn padded_len(count: usize, lanes: usize) -> usize {
    count.div_ceil(lanes) * lanes
}
