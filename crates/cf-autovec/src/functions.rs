//! Free constructors and type-level lookups.

use crate::arch::{Arch, DefaultArch, HalfVec};
use crate::batch::Batch;
use crate::batch_bool::BatchBool;
use crate::element::LaneCast;
use crate::register::SimdRegister;

/// 64-bit batch of `T`, independent of [`DefaultArch`].
pub type Batch64<T> = Batch<T, HalfVec>;

const _: () = assert!(std::mem::size_of::<Batch64<i32>>() == 8);

/// Batch with every lane set to `value`.
///
/// ```
/// use cf_autovec::{Generic32, broadcast};
///
/// let b = broadcast::<u16, Generic32>(7);
/// assert_eq!(b.as_slice(), &[7; 16]);
/// ```
#[must_use]
#[inline]
pub fn broadcast<T, A>(value: T) -> Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    Batch::broadcast(value)
}

/// Load a batch of `T` under `A` from `ptr`.
///
/// The buffer holds `T` itself. To widen or narrow from another element type
/// use [`Batch::load_aligned`], which converts each lane.
///
/// # Safety
///
/// `ptr` must be valid for reads of `Batch::<T, A>::SIZE` consecutive `T`s.
#[must_use]
#[inline]
pub unsafe fn load_aligned<A, T>(ptr: *const T) -> Batch<T, A>
where
    T: SimdRegister<A> + LaneCast<T>,
    A: Arch,
{
    // SAFETY: forwarded from the caller.
    unsafe { Batch::load_aligned(ptr) }
}

/// Load a batch of `T` under `A` from `ptr`.
///
/// The buffer holds `T` itself. To widen or narrow from another element type
/// use [`Batch::load_unaligned`], which converts each lane.
///
/// # Safety
///
/// `ptr` must be valid for reads of `Batch::<T, A>::SIZE` consecutive `T`s.
#[must_use]
#[inline]
pub unsafe fn load_unaligned<A, T>(ptr: *const T) -> Batch<T, A>
where
    T: SimdRegister<A> + LaneCast<T>,
    A: Arch,
{
    // SAFETY: forwarded from the caller.
    unsafe { Batch::load_unaligned(ptr) }
}

/// Lane-wise blend: `if_true` where `mask` is set, else `if_false`.
#[must_use]
#[inline]
pub fn select<T, A>(
    mask: BatchBool<T, A>,
    if_true: Batch<T, A>,
    if_false: Batch<T, A>,
) -> Batch<T, A>
where
    T: SimdRegister<A>,
    A: Arch,
{
    Batch::select(mask, if_true, if_false)
}

/// Resolves an element type and a requested lane count to a batch type.
///
/// This layer has one register width per architecture, so the request is
/// ignored and the natural lane count of [`DefaultArch`] is used.
pub trait SizedBatch<const N: usize> {
    /// The resolved batch type.
    type Batch;
}

impl<T, const N: usize> SizedBatch<N> for T
where
    T: SimdRegister<DefaultArch>,
{
    type Batch = Batch<T, DefaultArch>;
}

/// Best available batch of `T` for `N` lanes; always
/// `Batch<T, DefaultArch>`.
pub type MakeSizedBatch<T, const N: usize> = <T as SizedBatch<N>>::Batch;
