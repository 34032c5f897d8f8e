//! Elementwise lane appliers shared by [`Batch`](crate::Batch) and
//! [`BatchBool`](crate::BatchBool).
//!
//! Each helper is a plain loop over same-index lanes, written so the compiler
//! can auto-vectorize it.

use crate::element::MaskBits;
use crate::register::LaneArray;

/// Apply `f` to each pair of same-index lanes.
#[must_use]
#[inline]
pub fn binary_combine<T, L>(lhs: &L, rhs: &L, mut f: impl FnMut(T, T) -> T) -> L
where
    T: Copy,
    L: LaneArray<T>,
{
    let mut result = *lhs;
    for (out, &r) in result.as_mut().iter_mut().zip(rhs.as_ref()) {
        *out = f(*out, r);
    }
    result
}

/// Apply `predicate` to each pair of same-index lanes, producing all-ones
/// where it holds and all-zero elsewhere.
#[must_use]
#[inline]
pub fn binary_combine_to_mask<T, B, L, M>(
    lhs: &L,
    rhs: &L,
    mut predicate: impl FnMut(T, T) -> bool,
) -> M
where
    T: Copy,
    B: MaskBits,
    L: LaneArray<T>,
    M: LaneArray<B>,
{
    let mut result = M::splat(B::ZERO);
    for ((out, &l), &r) in result
        .as_mut()
        .iter_mut()
        .zip(lhs.as_ref())
        .zip(rhs.as_ref())
    {
        *out = B::from_bool(predicate(l, r));
    }
    result
}

/// Map each lane through `f`, possibly into a different lane type of the
/// same count.
#[must_use]
#[inline]
pub fn map_lanes<X, Y, LX, LY>(src: &LX, mut f: impl FnMut(X) -> Y) -> LY
where
    X: Copy,
    Y: Copy + Default,
    LX: LaneArray<X>,
    LY: LaneArray<Y>,
{
    let mut result = LY::splat(Y::default());
    for (out, &x) in result.as_mut().iter_mut().zip(src.as_ref()) {
        *out = f(x);
    }
    result
}

/// Pick lane `i` from `if_true` where `mask` lane `i` is set, otherwise from
/// `if_false`.
#[must_use]
#[inline]
pub fn select_lanes<T, B, L, M>(mask: &M, if_true: &L, if_false: &L) -> L
where
    T: Copy,
    B: MaskBits,
    L: LaneArray<T>,
    M: LaneArray<B>,
{
    let mut result = *if_false;
    for ((out, &m), &t) in result
        .as_mut()
        .iter_mut()
        .zip(mask.as_ref())
        .zip(if_true.as_ref())
    {
        if m.is_set() {
            *out = t;
        }
    }
    result
}
