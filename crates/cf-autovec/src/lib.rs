//! Portable fixed-width SIMD batches emulated with scalar lane loops.
//!
//! This crate mirrors the surface of a hardware SIMD batch library so that
//! vectorized kernels compile and behave the same when no native vector
//! instruction set is targeted. Every operation is a plain per-lane loop the
//! compiler is free to auto-vectorize.
//!
//! # Architecture
//!
//! The crate is organized around two value types, both parameterized by a
//! scalar `T` and an architecture tag `A`:
//! - [`Batch<T, A>`] - `A::WIDTH / size_of::<T>()` lanes of `T`
//! - [`BatchBool<T, A>`] - one all-ones/all-zero mask lane per batch lane,
//!   each as wide as `T`
//!
//! Architecture tags ([`Generic16`], [`Avx2`], [`Neon`], [`HalfVec`], ...)
//! carry only a width, an alignment and a name. [`SimdRegister`] resolves a
//! `(T, A)` pair to its register layout at compile time; pairs without a
//! layout do not compile.
//!
//! # Example
//!
//! ```
//! use cf_autovec::{Batch, BatchBool, Generic16};
//!
//! let a = Batch::<i32, Generic16>::new([1, 2, 3, 4]);
//! let b = Batch::<i32, Generic16>::new([4, 3, 2, 1]);
//!
//! let lt = a.simd_lt(b);
//! let mut out = [false; 4];
//! lt.store_slice(&mut out).unwrap();
//! assert_eq!(out, [true, true, false, false]);
//!
//! // A mask keeps only each lane's sign bit.
//! let negative = BatchBool::from(Batch::<i32, Generic16>::splat(-1));
//! assert!(negative.all());
//! ```
//!
//! # Safety Contract
//!
//! The pointer loads and stores and [`Batch::get_unchecked`] do no bounds
//! checks, matching the zero-overhead contract of hardware intrinsics; the
//! caller validates sizes and indices. Slice-based `load_slice` /
//! `store_slice` and [`Batch::try_get`] are the checked alternatives and
//! report [`LaneError`].
//!
//! # Cargo Features
//!
//! - `width-128`, `width-256`, `width-512`: force [`DefaultArch`] to a
//!   generic width class
//! - `serde`: serialize [`ArchInfo`]

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

mod arch;
mod batch;
mod batch_bool;
mod combine;
mod element;
mod error;
mod functions;
mod register;

pub use arch::*;
pub use batch::Batch;
pub use batch_bool::BatchBool;
pub use combine::{binary_combine, binary_combine_to_mask, map_lanes, select_lanes};
pub use element::{Element, LaneArith, LaneCast, LaneShift, MaskBits};
pub use error::LaneError;
pub use functions::*;
pub use register::{BoolRegister, LaneArray, Register, SimdRegister};
