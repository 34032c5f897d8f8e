//! Register layout resolution.
//!
//! [`SimdRegister<A>`] maps a scalar `T` and a tag `A` to the fixed-length
//! array holding `A::WIDTH / size_of::<T>()` lanes, to the array of stored
//! lanes ([`Element::Repr`]), and to the array of same-width unsigned
//! integers holding its mask lanes. The mapping is
//! declared once per `(T, A)` pair below; a pair that is not declared does not
//! compile.
//!
//! [`Register`] and [`BoolRegister`] wrap those arrays with the tag's
//! alignment.

use std::fmt;
use std::fmt::Debug;

use crate::arch::{
    Arch, Avx, Avx2, Avx512, DefaultArch, Generic16, Generic32, Generic64, HalfVec, Neon, Sse2,
};
use crate::element::Element;

/// Fixed-length lane storage.
///
/// Implemented for `[T; N]`; the length is part of the type.
pub trait LaneArray<T>: Copy + Debug + Send + Sync + 'static + AsRef<[T]> + AsMut<[T]> {
    /// Number of lanes.
    const LEN: usize;

    /// Array with every lane set to `value`.
    fn splat(value: T) -> Self;

    /// Array whose lane `i` is `f(i)`.
    fn from_fn(f: impl FnMut(usize) -> T) -> Self;
}

impl<T, const N: usize> LaneArray<T> for [T; N]
where
    T: Copy + Debug + Send + Sync + 'static,
{
    const LEN: usize = N;

    #[inline]
    fn splat(value: T) -> Self {
        [value; N]
    }

    #[inline]
    fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        std::array::from_fn(f)
    }
}

/// Register layout of scalar `Self` under architecture `A`.
pub trait SimdRegister<A: Arch>: Element {
    /// Lane count: `A::WIDTH / size_of::<Self>()`.
    const SIZE: usize;

    /// Lane values, as passed to and returned from a batch.
    type Lanes: LaneArray<Self>;

    /// Stored data lanes, same count as [`SimdRegister::Lanes`].
    type ReprLanes: LaneArray<Self::Repr>;

    /// Mask lanes, same count as [`SimdRegister::Lanes`].
    type BoolLanes: LaneArray<Self::Bits>;
}

macro_rules! declare_simd_register {
    ($scalar:ty, $arch:ty) => {
        impl SimdRegister<$arch> for $scalar {
            const SIZE: usize = <$arch as Arch>::WIDTH / std::mem::size_of::<$scalar>();

            type Lanes = [$scalar; <$arch as Arch>::WIDTH / std::mem::size_of::<$scalar>()];

            type ReprLanes = [<$scalar as Element>::Repr;
                <$arch as Arch>::WIDTH / std::mem::size_of::<$scalar>()];

            type BoolLanes = [<$scalar as Element>::Bits;
                <$arch as Arch>::WIDTH / std::mem::size_of::<$scalar>()];
        }
    };
}

macro_rules! declare_simd_registers {
    ($($scalar:ty),* $(,)?) => {$(
        declare_simd_register!($scalar, Generic16);
        declare_simd_register!($scalar, Generic32);
        declare_simd_register!($scalar, Generic64);
        declare_simd_register!($scalar, Sse2);
        declare_simd_register!($scalar, Avx);
        declare_simd_register!($scalar, Avx2);
        declare_simd_register!($scalar, Avx512);
        declare_simd_register!($scalar, Neon);
        declare_simd_register!($scalar, HalfVec);
    )*};
}

declare_simd_registers!(
    i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64, bool,
);

/// Aligned data lanes of `T` under `A`, in their stored form.
#[repr(C)]
pub struct Register<T, A = DefaultArch>
where
    T: SimdRegister<A>,
    A: Arch,
{
    _align: [A::Align; 0],
    lanes: T::ReprLanes,
}

/// Aligned mask lanes for `T` under `A`.
#[repr(C)]
pub struct BoolRegister<T, A = DefaultArch>
where
    T: SimdRegister<A>,
    A: Arch,
{
    _align: [A::Align; 0],
    lanes: T::BoolLanes,
}

macro_rules! register_common {
    ($name:ident, $lanes:ident, $lane:ty) => {
        impl<T, A> $name<T, A>
        where
            T: SimdRegister<A>,
            A: Arch,
        {
            /// Wrap a lane array.
            #[must_use]
            #[inline]
            pub const fn new(lanes: T::$lanes) -> Self {
                Self { _align: [], lanes }
            }

            /// Register with every lane set to `value`.
            #[must_use]
            #[inline]
            pub fn splat(value: $lane) -> Self {
                Self::new(LaneArray::splat(value))
            }

            /// Borrow the lane array.
            #[must_use]
            #[inline]
            pub const fn lanes(&self) -> &T::$lanes {
                &self.lanes
            }

            /// Mutably borrow the lane array.
            #[inline]
            pub fn lanes_mut(&mut self) -> &mut T::$lanes {
                &mut self.lanes
            }

            /// Unwrap the lane array.
            #[must_use]
            #[inline]
            pub fn into_lanes(self) -> T::$lanes {
                self.lanes
            }

            /// Lanes as a slice.
            #[must_use]
            #[inline]
            pub fn as_slice(&self) -> &[$lane] {
                self.lanes.as_ref()
            }

            /// Lanes as a mutable slice.
            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [$lane] {
                self.lanes.as_mut()
            }
        }

        impl<T, A> Clone for $name<T, A>
        where
            T: SimdRegister<A>,
            A: Arch,
        {
            #[inline]
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T, A> Copy for $name<T, A>
        where
            T: SimdRegister<A>,
            A: Arch,
        {
        }

        impl<T, A> Debug for $name<T, A>
        where
            T: SimdRegister<A>,
            A: Arch,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("arch", &A::NAME)
                    .field("lanes", &self.as_slice())
                    .finish()
            }
        }
    };
}

register_common!(Register, ReprLanes, T::Repr);
register_common!(BoolRegister, BoolLanes, T::Bits);
