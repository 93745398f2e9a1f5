//! Vector capability surface used by the filter core.
//!
//! The filters are generic over [`SimdVector`], a thin adapter over the
//! fixed-width types from the `wide` crate. Only the handful of operations
//! the hot loops need are exposed: unaligned load, fused multiply-add,
//! fused negative multiply-add and a horizontal sum.

use bytemuck::{Pod, Zeroable};
use num_traits::{AsPrimitive, Float};
use std::fmt::Debug;
use std::ops::Add;

pub use wide::{f32x4, f32x8, f64x2, f64x4};

/// Float lanes of width 4.
pub type DefaultF32 = f32x4;

/// Double lanes of width 2.
pub type DefaultF64 = f64x2;

/// Scalar element type stored in coefficient and history buffers.
pub trait SimdReal:
    Float + AsPrimitive<Self> + Pod + Default + Debug + Send + Sync + 'static
{
    fn from_f32(x: f32) -> Self;
    fn from_f64(x: f64) -> Self;
    fn as_f64(self) -> f64;
}

impl SimdReal for f32 {
    #[inline(always)]
    fn from_f32(x: f32) -> Self {
        x
    }

    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x as f32
    }

    #[inline(always)]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl SimdReal for f64 {
    #[inline(always)]
    fn from_f32(x: f32) -> Self {
        x as f64
    }

    #[inline(always)]
    fn from_f64(x: f64) -> Self {
        x
    }

    #[inline(always)]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Fixed-width SIMD value over a [`SimdReal`] element type.
///
/// A `Vec<Self>` is naturally aligned to the vector's requirement, which is
/// how coefficient storage gets its aligned loads. History buffers are plain
/// element slices and go through [`SimdVector::load_unaligned`].
pub trait SimdVector: Pod + Add<Output = Self> + Debug + Send + Sync + 'static {
    type Elem: SimdReal;

    /// Number of elements processed per step.
    const LANES: usize;

    /// `self * m + acc`
    fn mul_add(self, m: Self, acc: Self) -> Self;

    /// `acc - self * m`
    fn mul_neg_add(self, m: Self, acc: Self) -> Self;

    /// Horizontal sum of all lanes.
    fn reduce_add(self) -> Self::Elem;

    #[inline(always)]
    fn zero() -> Self {
        <Self as Zeroable>::zeroed()
    }

    /// Load `LANES` contiguous elements starting at `src[0]`.
    ///
    /// # Panics
    /// If `src` holds fewer than `LANES` elements.
    #[inline(always)]
    fn load_unaligned(src: &[Self::Elem]) -> Self {
        bytemuck::pod_read_unaligned(bytemuck::cast_slice(&src[..Self::LANES]))
    }

    /// Element view of a vector slice.
    #[inline(always)]
    fn lanes(vectors: &[Self]) -> &[Self::Elem] {
        bytemuck::cast_slice(vectors)
    }

    #[inline(always)]
    fn lanes_mut(vectors: &mut [Self]) -> &mut [Self::Elem] {
        bytemuck::cast_slice_mut(vectors)
    }
}

macro_rules! impl_simd_vector {
    ($vector:ident, $elem:ty, $lanes:literal) => {
        impl SimdVector for $vector {
            type Elem = $elem;
            const LANES: usize = $lanes;

            #[inline(always)]
            fn mul_add(self, m: Self, acc: Self) -> Self {
                $vector::mul_add(self, m, acc)
            }

            #[inline(always)]
            fn mul_neg_add(self, m: Self, acc: Self) -> Self {
                $vector::mul_neg_add(self, m, acc)
            }

            #[inline(always)]
            fn reduce_add(self) -> $elem {
                $vector::reduce_add(self)
            }
        }
    };
}

impl_simd_vector!(f32x4, f32, 4);
impl_simd_vector!(f32x8, f32, 8);
impl_simd_vector!(f64x2, f64, 2);
impl_simd_vector!(f64x4, f64, 4);
