//! Mask batches.
//!
//! A [`BatchBool<T, A>`] holds one mask lane per lane of a
//! [`Batch<T, A>`](crate::Batch). Each mask lane is an unsigned integer as
//! wide as `T` and is always all-ones (true) or all-zero (false), the same
//! shape vector compare instructions produce. That lets a mask be combined
//! with, or reinterpreted as, a data batch lane for lane.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::arch::{Arch, DefaultArch};
use crate::batch::Batch;
use crate::combine::{binary_combine, map_lanes};
use crate::element::MaskBits;
use crate::error::{LaneError, check_buffer};
use crate::register::{BoolRegister, LaneArray, SimdRegister};

/// Lane mask for batches of `T` under `A`.
///
/// # Example
///
/// ```
/// use cf_autovec::{Batch, BatchBool, Generic16};
///
/// let a = Batch::<i32, Generic16>::new([1, 2, 3, 4]);
/// let b = Batch::<i32, Generic16>::new([4, 3, 2, 1]);
///
/// let lt = a.simd_lt(b);
/// assert_eq!(lt.to_bitmask(), 0b0011);
/// assert_eq!(!lt, a.simd_ge(b));
/// assert!(BatchBool::<i32, Generic16>::splat(true).all());
/// ```
#[repr(transparent)]
pub struct BatchBool<T, A = DefaultArch>
where
    T: SimdRegister<A>,
    A: Arch,
{
    register: BoolRegister<T, A>,
}

impl<T, A> BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    /// Number of lanes.
    pub const SIZE: usize = T::SIZE;

    /// Number of lanes.
    #[must_use]
    #[inline]
    pub const fn size() -> usize {
        T::SIZE
    }

    /// Mask with every lane set to `value`.
    #[must_use]
    #[inline]
    pub fn splat(value: bool) -> Self {
        Self::from_register(BoolRegister::splat(<T::Bits as MaskBits>::from_bool(value)))
    }

    /// Wrap raw mask lanes.
    ///
    /// Every lane must already be all-ones or all-zero.
    #[must_use]
    #[inline]
    pub const fn from_register(register: BoolRegister<T, A>) -> Self {
        Self { register }
    }

    /// The underlying register.
    #[must_use]
    #[inline]
    pub const fn register(&self) -> &BoolRegister<T, A> {
        &self.register
    }

    /// Raw mask lanes.
    #[must_use]
    #[inline]
    pub fn bits(&self) -> &[T::Bits] {
        self.register.as_slice()
    }

    /// Truth value of lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Self::SIZE`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < T::SIZE);
        self.bits()[index].is_set()
    }

    /// Whether every lane is set.
    #[must_use]
    #[inline]
    pub fn all(&self) -> bool {
        self.bits().iter().all(|b| b.is_set())
    }

    /// Whether any lane is set.
    #[must_use]
    #[inline]
    pub fn any(&self) -> bool {
        self.bits().iter().any(|b| b.is_set())
    }

    /// Whether no lane is set.
    #[must_use]
    #[inline]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Number of set lanes.
    #[must_use]
    #[inline]
    pub fn count(&self) -> usize {
        self.bits().iter().filter(|b| b.is_set()).count()
    }

    /// Pack the mask into an integer: bit `i` is lane `i`.
    ///
    /// A register holds at most 64 lanes, so every mask fits.
    #[must_use]
    #[inline]
    pub fn to_bitmask(&self) -> u64 {
        self.bits()
            .iter()
            .enumerate()
            .fold(0, |acc, (i, b)| acc | (u64::from(b.is_set()) << i))
    }

    /// Write each lane's truth value to `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `Self::SIZE` consecutive `bool`s.
    #[inline]
    pub unsafe fn store_aligned(&self, dst: *mut bool) {
        // SAFETY: forwarded from the caller.
        unsafe { self.store_unaligned(dst) }
    }

    /// Write each lane's truth value to `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `Self::SIZE` consecutive `bool`s.
    #[inline]
    pub unsafe fn store_unaligned(&self, dst: *mut bool) {
        for (i, lane) in self.bits().iter().enumerate() {
            // SAFETY: the caller guarantees `SIZE` writable elements.
            unsafe { dst.add(i).write_unaligned(lane.is_set()) };
        }
    }

    /// Build a mask from `SIZE` booleans at `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `Self::SIZE` consecutive `bool`s.
    #[must_use]
    #[inline]
    pub unsafe fn load_aligned(src: *const bool) -> Self {
        // SAFETY: forwarded from the caller.
        unsafe { Self::load_unaligned(src) }
    }

    /// Build a mask from `SIZE` booleans at `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `Self::SIZE` consecutive `bool`s.
    #[must_use]
    #[inline]
    pub unsafe fn load_unaligned(src: *const bool) -> Self {
        let lanes = <T::BoolLanes as LaneArray<T::Bits>>::from_fn(|i| {
            // SAFETY: the caller guarantees `SIZE` readable elements.
            <T::Bits as MaskBits>::from_bool(unsafe { src.add(i).read_unaligned() })
        });
        Self::from_register(BoolRegister::new(lanes))
    }

    /// Build a mask from the first `SIZE` booleans of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::BufferTooShort`] if `src` has fewer than `SIZE`
    /// elements.
    pub fn load_slice(src: &[bool]) -> Result<Self, LaneError> {
        check_buffer(src.len(), T::SIZE, "mask load")?;
        let lanes = <T::BoolLanes as LaneArray<T::Bits>>::from_fn(|i| {
            <T::Bits as MaskBits>::from_bool(src[i])
        });
        Ok(Self::from_register(BoolRegister::new(lanes)))
    }

    /// Write each lane's truth value to the first `SIZE` elements of `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::BufferTooShort`] if `dst` has fewer than `SIZE`
    /// elements.
    pub fn store_slice(&self, dst: &mut [bool]) -> Result<(), LaneError> {
        check_buffer(dst.len(), T::SIZE, "mask store")?;
        for (out, lane) in dst.iter_mut().zip(self.bits()) {
            *out = lane.is_set();
        }
        Ok(())
    }
}

impl<T, A> Default for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    /// Lane contents are unspecified; currently all lanes are false.
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<T, A> Clone for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
}

impl<T, A> fmt::Debug for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bits().iter().map(|b| b.is_set()))
            .finish()
    }
}

/// Bitwise identity of the whole mask.
impl<T, A> PartialEq for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl<T, A> Eq for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
}

impl<T, A> From<bool> for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn from(value: bool) -> Self {
        Self::splat(value)
    }
}

impl<T, A> From<BoolRegister<T, A>> for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn from(register: BoolRegister<T, A>) -> Self {
        Self::from_register(register)
    }
}

/// Keep only the most significant bit of each lane's raw pattern.
///
/// Works on stored bits, not values, so float lanes test their sign bit and a
/// `bool` lane is set only if its stored byte has the top bit set.
impl<T, A> From<Batch<T, A>> for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn from(batch: Batch<T, A>) -> Self {
        let lanes: T::BoolLanes = map_lanes(batch.register().lanes(), |repr: T::Repr| {
            <T::Bits as MaskBits>::from_bool(T::repr_to_bits(repr).msb())
        });
        Self::from_register(BoolRegister::new(lanes))
    }
}

impl<T, A> Not for BatchBool<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        let lanes: T::BoolLanes = map_lanes(self.register.lanes(), |b: T::Bits| !b);
        Self::from_register(BoolRegister::new(lanes))
    }
}

macro_rules! impl_mask_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $sym:tt) => {
        impl<T, A> $Op for BatchBool<T, A>
        where
            T: SimdRegister<A>,
            A: Arch,
        {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                let lanes = binary_combine(
                    self.register.lanes(),
                    rhs.register.lanes(),
                    |l: T::Bits, r: T::Bits| l $sym r,
                );
                Self::from_register(BoolRegister::new(lanes))
            }
        }

        impl<T, A> $OpAssign for BatchBool<T, A>
        where
            T: SimdRegister<A>,
            A: Arch,
        {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_mask_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_mask_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_mask_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);
