//! Numeric batches.
//!
//! [`Batch<T, A>`] holds `A::WIDTH / size_of::<T>()` lanes of `T` in an
//! aligned register and applies every operator lane by lane with scalar
//! loops. Loads and stores convert between the batch's element type and the
//! buffer's, widening or narrowing each lane without changing the lane count.
//!
//! Lanes are stored as [`Element::Repr`]. Every operator works on lane
//! values; only reinterpretation to and from a [`BatchBool`] and sign-mask
//! extraction see the stored bits.
//!
//! # Memory Layout
//!
//! ```text
//! Batch<i32, Generic16>:  [l0, l1, l2, l3]                  (16 bytes, 16-aligned)
//! Batch<i16, Generic16>:  [l0, l1, l2, l3, l4, l5, l6, l7]  (16 bytes, 16-aligned)
//! Batch<f64, Avx2>:       [l0, l1, l2, l3]                  (32 bytes, 32-aligned)
//! ```

use std::fmt;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Mul,
    MulAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use crate::arch::{Arch, DefaultArch};
use crate::batch_bool::BatchBool;
use crate::combine::{binary_combine, binary_combine_to_mask, map_lanes, select_lanes};
use crate::element::{Element, LaneArith, LaneCast, LaneShift};
use crate::error::{LaneError, check_buffer};
use crate::register::{BoolRegister, LaneArray, Register, SimdRegister};

/// A fixed-width batch of `T` lanes under architecture `A`.
///
/// # Example
///
/// ```
/// use cf_autovec::{Batch, Generic16};
///
/// let a = Batch::<i32, Generic16>::new([1, 2, 3, 4]);
/// let b = Batch::<i32, Generic16>::new([4, 3, 2, 1]);
///
/// assert_eq!(a + b, Batch::splat(5));
/// assert!(a.simd_eq(b).none());
/// assert_eq!(a.get(2), 3);
/// ```
///
/// The lane count is part of the type:
///
/// ```compile_fail
/// use cf_autovec::{Batch, Generic16};
///
/// let _ = Batch::<i32, Generic16>::new([1, 2, 3]);
/// ```
///
/// So is the set of supported element types:
///
/// ```compile_fail
/// use cf_autovec::{Batch, Generic16};
///
/// let _ = Batch::<char, Generic16>::splat('a');
/// ```
#[repr(transparent)]
pub struct Batch<T, A = DefaultArch>
where
    T: SimdRegister<A>,
    A: Arch,
{
    register: Register<T, A>,
}

impl<T, A> Batch<T, A>
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

    /// Batch from one value per lane.
    #[must_use]
    #[inline]
    pub fn new(lanes: T::Lanes) -> Self {
        Self::from_repr_lanes(map_lanes(&lanes, T::to_repr))
    }

    #[inline]
    fn from_repr_lanes(lanes: T::ReprLanes) -> Self {
        Self::from_register(Register::new(lanes))
    }

    /// Batch with every lane set to `value`.
    #[must_use]
    #[inline]
    pub fn splat(value: T) -> Self {
        Self::from_register(Register::splat(value.to_repr()))
    }

    /// Batch with every lane set to `value`.
    #[must_use]
    #[inline]
    pub fn broadcast(value: T) -> Self {
        Self::splat(value)
    }

    /// Wrap a register.
    #[must_use]
    #[inline]
    pub const fn from_register(register: Register<T, A>) -> Self {
        Self { register }
    }

    /// The underlying register.
    #[must_use]
    #[inline]
    pub const fn register(&self) -> &Register<T, A> {
        &self.register
    }

    /// Lane values as an array.
    #[must_use]
    #[inline]
    pub fn into_lanes(self) -> T::Lanes {
        map_lanes(self.register.lanes(), T::from_repr)
    }

    /// Stored lanes as a slice.
    ///
    /// Identical to the lane values for numeric `T`; `bool` lanes are bytes.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[T::Repr] {
        self.register.as_slice()
    }

    /// Stored lanes as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T::Repr] {
        self.register.as_mut_slice()
    }

    /// Value of lane `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= Self::SIZE`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> T {
        debug_assert!(index < T::SIZE);
        T::from_repr(self.as_slice()[index])
    }

    /// Value of lane `index`, without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `Self::SIZE`.
    #[must_use]
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> T {
        // SAFETY: the caller guarantees `index < SIZE`.
        T::from_repr(unsafe { *self.as_slice().get_unchecked(index) })
    }

    /// Value of lane `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfRange`] if `index >= Self::SIZE`.
    pub fn try_get(&self, index: usize) -> Result<T, LaneError> {
        self.as_slice()
            .get(index)
            .map(|&repr| T::from_repr(repr))
            .ok_or(LaneError::index_out_of_range(index, T::SIZE))
    }

    #[inline]
    fn compare(self, other: Self, mut predicate: impl FnMut(T, T) -> bool) -> BatchBool<T, A> {
        let lanes = binary_combine_to_mask::<T::Repr, T::Bits, T::ReprLanes, T::BoolLanes>(
            self.register.lanes(),
            other.register.lanes(),
            |a, b| predicate(T::from_repr(a), T::from_repr(b)),
        );
        BatchBool::from_register(BoolRegister::new(lanes))
    }

    /// Lane-wise `==`.
    #[must_use]
    #[inline]
    pub fn simd_eq(self, other: Self) -> BatchBool<T, A> {
        self.compare(other, |a, b| a == b)
    }

    /// Lane-wise `!=`.
    #[must_use]
    #[inline]
    pub fn simd_ne(self, other: Self) -> BatchBool<T, A> {
        self.compare(other, |a, b| a != b)
    }

    /// Lane-wise `>=`.
    #[must_use]
    #[inline]
    pub fn simd_ge(self, other: Self) -> BatchBool<T, A> {
        self.compare(other, |a, b| a >= b)
    }

    /// Lane-wise `<=`.
    #[must_use]
    #[inline]
    pub fn simd_le(self, other: Self) -> BatchBool<T, A> {
        self.compare(other, |a, b| a <= b)
    }

    /// Lane-wise `>`.
    #[must_use]
    #[inline]
    pub fn simd_gt(self, other: Self) -> BatchBool<T, A> {
        self.compare(other, |a, b| a > b)
    }

    /// Lane-wise `<`.
    #[must_use]
    #[inline]
    pub fn simd_lt(self, other: Self) -> BatchBool<T, A> {
        self.compare(other, |a, b| a < b)
    }

    /// Lane `i` from `if_true` where `mask` lane `i` is set, else from
    /// `if_false`.
    #[must_use]
    #[inline]
    pub fn select(mask: BatchBool<T, A>, if_true: Self, if_false: Self) -> Self {
        Self::from_repr_lanes(select_lanes::<T::Repr, T::Bits, T::ReprLanes, T::BoolLanes>(
            mask.register().lanes(),
            if_true.register.lanes(),
            if_false.register.lanes(),
        ))
    }

    /// Write every lane, converted to `U`, to `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `Self::SIZE` consecutive `U`s.
    #[inline]
    pub unsafe fn store_aligned<U>(&self, dst: *mut U)
    where
        T: LaneCast<U>,
    {
        // SAFETY: forwarded from the caller.
        unsafe { self.store_unaligned(dst) }
    }

    /// Write every lane, converted to `U`, to `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `Self::SIZE` consecutive `U`s.
    #[inline]
    pub unsafe fn store_unaligned<U>(&self, dst: *mut U)
    where
        T: LaneCast<U>,
    {
        for (i, &repr) in self.as_slice().iter().enumerate() {
            // SAFETY: the caller guarantees `SIZE` writable elements.
            unsafe { dst.add(i).write_unaligned(T::from_repr(repr).cast_lane()) };
        }
    }

    /// Read `SIZE` values of `U` from `src`, converting each to `T`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `Self::SIZE` consecutive `U`s.
    #[must_use]
    #[inline]
    pub unsafe fn load_aligned<U>(src: *const U) -> Self
    where
        U: LaneCast<T>,
    {
        // SAFETY: forwarded from the caller.
        unsafe { Self::load_unaligned(src) }
    }

    /// Read `SIZE` values of `U` from `src`, converting each to `T`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `Self::SIZE` consecutive `U`s.
    #[must_use]
    #[inline]
    pub unsafe fn load_unaligned<U>(src: *const U) -> Self
    where
        U: LaneCast<T>,
    {
        Self::from_repr_lanes(<T::ReprLanes as LaneArray<T::Repr>>::from_fn(|i| {
            // SAFETY: the caller guarantees `SIZE` readable elements.
            let lane: T = unsafe { src.add(i).read_unaligned() }.cast_lane();
            lane.to_repr()
        }))
    }

    /// Read the first `SIZE` values of `src`, converting each to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::BufferTooShort`] if `src` has fewer than `SIZE`
    /// elements.
    pub fn load_slice<U>(src: &[U]) -> Result<Self, LaneError>
    where
        U: LaneCast<T>,
    {
        check_buffer(src.len(), T::SIZE, "batch load")?;
        Ok(Self::from_repr_lanes(
            <T::ReprLanes as LaneArray<T::Repr>>::from_fn(|i| {
                let lane: T = src[i].cast_lane();
                lane.to_repr()
            }),
        ))
    }

    /// Write every lane, converted to `U`, to the first `SIZE` elements of
    /// `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::BufferTooShort`] if `dst` has fewer than `SIZE`
    /// elements.
    pub fn store_slice<U>(&self, dst: &mut [U]) -> Result<(), LaneError>
    where
        T: LaneCast<U>,
    {
        check_buffer(dst.len(), T::SIZE, "batch store")?;
        for (out, &repr) in dst.iter_mut().zip(self.as_slice()) {
            *out = T::from_repr(repr).cast_lane();
        }
        Ok(())
    }
}

impl<T, A> Default for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    /// Lane contents are unspecified; currently every lane is `T::default()`.
    fn default() -> Self {
        Self::splat(T::default())
    }
}

impl<T, A> Clone for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
}

impl<T, A> fmt::Debug for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.as_slice().iter().map(|&repr| T::from_repr(repr)))
            .finish()
    }
}

/// Whole-batch equality: every lane value compares equal.
impl<T, A> PartialEq for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(&a, &b)| T::from_repr(a) == T::from_repr(b))
    }
}

impl<T, A> From<Register<T, A>> for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn from(register: Register<T, A>) -> Self {
        Self::from_register(register)
    }
}

/// Reinterpret each mask lane's bit pattern as a `T`.
///
/// No numeric conversion happens: a true lane becomes the `T` whose bits are
/// all ones (`-1` for signed integers, `MAX` for unsigned, NaN for floats,
/// a stored `0xFF` for `bool`).
impl<T, A> From<BatchBool<T, A>> for Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    #[inline]
    fn from(mask: BatchBool<T, A>) -> Self {
        let lanes: T::ReprLanes = map_lanes(mask.register().lanes(), |bits: T::Bits| {
            <T as Element>::repr_from_bits(bits)
        });
        Self::from_repr_lanes(lanes)
    }
}

macro_rules! impl_batch_op {
    (
        $Op:ident :: $op:ident,
        $OpAssign:ident :: $op_assign:ident,
        |$a:ident, $b:ident| $body:expr,
        where $($bound:tt)+
    ) => {
        impl<T, A> $Op for Batch<T, A>
        where
            T: SimdRegister<A> + $($bound)+,
            A: Arch,
        {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                Self::from_repr_lanes(binary_combine(
                    self.register.lanes(),
                    rhs.register.lanes(),
                    |l: T::Repr, r: T::Repr| {
                        let ($a, $b) = (T::from_repr(l), T::from_repr(r));
                        T::to_repr($body)
                    },
                ))
            }
        }

        impl<T, A> $OpAssign for Batch<T, A>
        where
            T: SimdRegister<A> + $($bound)+,
            A: Arch,
        {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_batch_op!(Add::add, AddAssign::add_assign, |a, b| a.lane_add(b), where LaneArith);
impl_batch_op!(Sub::sub, SubAssign::sub_assign, |a, b| a.lane_sub(b), where LaneArith);
impl_batch_op!(Mul::mul, MulAssign::mul_assign, |a, b| a.lane_mul(b), where LaneArith);
impl_batch_op!(Shl::shl, ShlAssign::shl_assign, |a, b| a.lane_shl(b), where LaneShift);
impl_batch_op!(Shr::shr, ShrAssign::shr_assign, |a, b| a.lane_shr(b), where LaneShift);
impl_batch_op!(
    BitAnd::bitand,
    BitAndAssign::bitand_assign,
    |a, b| a & b,
    where BitAnd<Output = T>
);
impl_batch_op!(
    BitOr::bitor,
    BitOrAssign::bitor_assign,
    |a, b| a | b,
    where BitOr<Output = T>
);
impl_batch_op!(
    BitXor::bitxor,
    BitXorAssign::bitxor_assign,
    |a, b| a ^ b,
    where BitXor<Output = T>
);
