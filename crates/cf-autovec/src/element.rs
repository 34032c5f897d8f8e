//! Lane scalar contracts.
//!
//! [`Element`] is implemented for every scalar a batch lane may hold and ties
//! it to the unsigned integer of the same byte width ([`MaskBits`]) used for
//! its mask lanes. The remaining traits supply the per-lane operators the
//! batch types are built from.

use std::fmt::Debug;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// Unsigned integer holding one mask lane.
///
/// A mask lane is only ever [`MaskBits::ALL_ONES`] or [`MaskBits::ZERO`].
pub trait MaskBits:
    Copy
    + Default
    + Eq
    + Debug
    + Send
    + Sync
    + 'static
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// Every bit set (true).
    const ALL_ONES: Self;
    /// Every bit clear (false).
    const ZERO: Self;

    /// Whether the most significant bit is set.
    fn msb(self) -> bool;

    /// The sentinel for `value`.
    #[inline]
    fn from_bool(value: bool) -> Self {
        if value { Self::ALL_ONES } else { Self::ZERO }
    }

    /// Truth test: any nonzero lane counts as set.
    #[inline]
    fn is_set(self) -> bool {
        self != Self::ZERO
    }
}

macro_rules! impl_mask_bits {
    ($($t:ty),*) => {$(
        impl MaskBits for $t {
            const ALL_ONES: Self = <$t>::MAX;
            const ZERO: Self = 0;

            #[inline]
            fn msb(self) -> bool {
                self >> (<$t>::BITS - 1) != 0
            }
        }
    )*};
}

impl_mask_bits!(u8, u16, u32, u64, usize);

/// Scalar type a batch lane can hold.
///
/// Lanes are stored as [`Element::Repr`], which is `Self` for every numeric
/// type and `u8` for `bool`. A stored `bool` lane is any byte; nonzero reads
/// back as `true`, so a reinterpreted all-ones mask lane survives intact.
pub trait Element: Copy + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static {
    /// Storage type of one lane.
    type Repr: Copy + Default + PartialEq + Debug + Send + Sync + 'static;

    /// Unsigned integer with the same byte width.
    type Bits: MaskBits;

    /// Stored form of the value.
    fn to_repr(self) -> Self::Repr;

    /// Value of a stored lane.
    fn from_repr(repr: Self::Repr) -> Self;

    /// Raw bit pattern of a stored lane.
    fn repr_to_bits(repr: Self::Repr) -> Self::Bits;

    /// Stored lane with the given raw bit pattern.
    fn repr_from_bits(bits: Self::Bits) -> Self::Repr;

    /// Raw bit pattern of the value.
    #[inline]
    fn to_bits(self) -> Self::Bits {
        Self::repr_to_bits(self.to_repr())
    }

    /// Value with the given raw bit pattern.
    #[inline]
    fn from_bits(bits: Self::Bits) -> Self {
        Self::from_repr(Self::repr_from_bits(bits))
    }
}

macro_rules! impl_element {
    ($($t:ty => $bits:ty),* $(,)?) => {$(
        impl Element for $t {
            type Repr = $t;
            type Bits = $bits;

            #[inline]
            fn to_repr(self) -> $t {
                self
            }

            #[inline]
            fn from_repr(repr: $t) -> Self {
                repr
            }

            #[inline]
            fn repr_to_bits(repr: $t) -> $bits {
                bytemuck::cast(repr)
            }

            #[inline]
            fn repr_from_bits(bits: $bits) -> $t {
                bytemuck::cast(bits)
            }
        }
    )*};
}

impl_element! {
    i8 => u8,
    u8 => u8,
    i16 => u16,
    u16 => u16,
    i32 => u32,
    u32 => u32,
    i64 => u64,
    u64 => u64,
    isize => usize,
    usize => usize,
    f32 => u32,
    f64 => u64,
}

// `true` is stored as 0x01; a lane copied from a mask holds 0xFF.
impl Element for bool {
    type Repr = u8;
    type Bits = u8;

    #[inline]
    fn to_repr(self) -> u8 {
        u8::from(self)
    }

    #[inline]
    fn from_repr(repr: u8) -> Self {
        repr != 0
    }

    #[inline]
    fn repr_to_bits(repr: u8) -> u8 {
        repr
    }

    #[inline]
    fn repr_from_bits(bits: u8) -> u8 {
        bits
    }
}

/// Lane arithmetic.
///
/// Integer lanes wrap on overflow, as vector hardware does.
pub trait LaneArith: Element {
    /// `self + rhs`.
    fn lane_add(self, rhs: Self) -> Self;
    /// `self - rhs`.
    fn lane_sub(self, rhs: Self) -> Self;
    /// `self * rhs`.
    fn lane_mul(self, rhs: Self) -> Self;
}

macro_rules! impl_lane_arith_int {
    ($($t:ty),*) => {$(
        impl LaneArith for $t {
            #[inline]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
        }
    )*};
}

macro_rules! impl_lane_arith_float {
    ($($t:ty),*) => {$(
        impl LaneArith for $t {
            #[inline]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }
        }
    )*};
}

impl_lane_arith_int!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);
impl_lane_arith_float!(f32, f64);

/// Per-lane variable shifts.
///
/// The amount is taken modulo the lane's bit width. Right shifts of signed
/// lanes are arithmetic.
pub trait LaneShift: Element {
    /// `self << rhs`.
    fn lane_shl(self, rhs: Self) -> Self;
    /// `self >> rhs`.
    fn lane_shr(self, rhs: Self) -> Self;
}

macro_rules! impl_lane_shift {
    ($($t:ty),*) => {$(
        impl LaneShift for $t {
            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn lane_shl(self, rhs: Self) -> Self {
                self.wrapping_shl(rhs as u32)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn lane_shr(self, rhs: Self) -> Self {
                self.wrapping_shr(rhs as u32)
            }
        }
    )*};
}

impl_lane_shift!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

/// Widening or narrowing conversion applied lane by lane during loads and
/// stores.
///
/// Numeric pairs follow `as` semantics (truncating, saturating float to
/// integer). Converting to `bool` tests for nonzero.
pub trait LaneCast<U>: Copy {
    /// Convert one lane.
    fn cast_lane(self) -> U;
}

macro_rules! impl_lane_cast {
    (@to $from:ty: $($to:ty),*) => {$(
        impl LaneCast<$to> for $from {
            #[inline]
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss,
                clippy::cast_lossless,
                clippy::unnecessary_cast
            )]
            fn cast_lane(self) -> $to {
                self as $to
            }
        }
    )*};
    ($($from:ty),*) => {$(
        impl_lane_cast!(@to $from: i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);
    )*};
}

impl_lane_cast!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

macro_rules! impl_bool_cast_int {
    ($($t:ty),*) => {$(
        impl LaneCast<$t> for bool {
            #[inline]
            fn cast_lane(self) -> $t {
                <$t>::from(self)
            }
        }

        impl LaneCast<bool> for $t {
            #[inline]
            fn cast_lane(self) -> bool {
                self != 0
            }
        }
    )*};
}

impl_bool_cast_int!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

macro_rules! impl_bool_cast_float {
    ($($t:ty),*) => {$(
        impl LaneCast<$t> for bool {
            #[inline]
            fn cast_lane(self) -> $t {
                <$t>::from(u8::from(self))
            }
        }

        impl LaneCast<bool> for $t {
            #[inline]
            fn cast_lane(self) -> bool {
                self != 0.0
            }
        }
    )*};
}

impl_bool_cast_float!(f32, f64);

impl LaneCast<bool> for bool {
    #[inline]
    fn cast_lane(self) -> bool {
        self
    }
}
