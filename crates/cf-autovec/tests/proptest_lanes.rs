//! Property-based tests for batch and mask semantics.
//!
//! Run with: cargo test -p cf-autovec --test proptest_lanes

use cf_autovec::{Avx2, Batch, BatchBool, Generic16, Generic32, HalfVec, Neon, broadcast};
use proptest::prelude::*;

type I32x8 = Batch<i32, Avx2>;
type M32x8 = BatchBool<i32, Avx2>;
type F32x4 = Batch<f32, Neon>;
type U8x16 = Batch<u8, Generic16>;
type B8x16 = Batch<bool, Generic16>;

// =============================================================================
// Strategies
// =============================================================================

fn arb_i32x8() -> impl Strategy<Value = I32x8> {
    prop::array::uniform8(any::<i32>()).prop_map(I32x8::new)
}

fn arb_mask() -> impl Strategy<Value = M32x8> {
    prop::array::uniform8(any::<bool>()).prop_map(|flags| {
        M32x8::load_slice(&flags).unwrap_or_default()
    })
}

/// Floats biased toward the values comparisons get wrong: NaN and signed zeros.
fn arb_f32x4() -> impl Strategy<Value = F32x4> {
    let lane = prop_oneof![
        4 => any::<f32>(),
        1 => Just(f32::NAN),
        1 => Just(0.0f32),
        1 => Just(-0.0f32),
    ];
    prop::array::uniform4(lane).prop_map(F32x4::new)
}

fn arb_u8x16() -> impl Strategy<Value = U8x16> {
    prop::array::uniform16(any::<u8>()).prop_map(U8x16::new)
}

fn sentinel(holds: bool) -> u32 {
    if holds { u32::MAX } else { 0 }
}

fn sentinel8(holds: bool) -> u8 {
    if holds { u8::MAX } else { 0 }
}

// =============================================================================
// Property Tests: Construction
// =============================================================================

proptest! {
    /// Broadcast fills every lane.
    #[test]
    fn broadcast_fills_every_lane(v in any::<i16>(), f in -1e6f64..1e6) {
        let b = broadcast::<i16, Generic32>(v);
        for i in 0..Batch::<i16, Generic32>::SIZE {
            prop_assert_eq!(b.get(i), v);
        }

        let g = Batch::<f64, Generic16>::splat(f);
        prop_assert!(g.as_slice().iter().all(|&lane| lane == f));
    }

    /// Same-type store then load reproduces the batch exactly.
    #[test]
    fn store_load_roundtrip(a in arb_i32x8()) {
        let mut buf = [0i32; 8];
        a.store_slice(&mut buf).unwrap();
        let b = I32x8::load_slice(&buf).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Float lanes round-trip bit for bit.
    #[test]
    fn float_roundtrip(lanes in prop::array::uniform4(any::<f32>())) {
        let a = Batch::<f32, Generic16>::new(lanes);
        let mut buf = [0.0f32; 4];
        unsafe { a.store_unaligned(buf.as_mut_ptr()) };
        let b = unsafe { Batch::<f32, Generic16>::load_unaligned(buf.as_ptr()) };
        for i in 0..4 {
            prop_assert_eq!(a.get(i).to_bits(), b.get(i).to_bits());
        }
    }

    /// Widening to a larger integer and narrowing back is lossless.
    #[test]
    fn widen_narrow_roundtrip(lanes in prop::array::uniform8(any::<i8>())) {
        let a = Batch::<i8, HalfVec>::new(lanes);
        let mut wide = [0i64; 8];
        a.store_slice(&mut wide).unwrap();
        let b = Batch::<i8, HalfVec>::load_slice(&wide).unwrap();
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// Property Tests: Comparisons
// =============================================================================

proptest! {
    /// Every comparison lane is the scalar comparison mapped to a sentinel.
    #[test]
    fn comparisons_match_scalar(a in arb_i32x8(), b in arb_i32x8()) {
        let eq = a.simd_eq(b);
        let ne = a.simd_ne(b);
        let lt = a.simd_lt(b);
        let le = a.simd_le(b);
        let gt = a.simd_gt(b);
        let ge = a.simd_ge(b);

        for i in 0..8 {
            let (x, y) = (a.get(i), b.get(i));
            prop_assert_eq!(eq.bits()[i], sentinel(x == y));
            prop_assert_eq!(ne.bits()[i], sentinel(x != y));
            prop_assert_eq!(lt.bits()[i], sentinel(x < y));
            prop_assert_eq!(le.bits()[i], sentinel(x <= y));
            prop_assert_eq!(gt.bits()[i], sentinel(x > y));
            prop_assert_eq!(ge.bits()[i], sentinel(x >= y));
        }
    }

    /// `<` and `>=` are complements.
    #[test]
    fn lt_complements_ge(a in arb_i32x8(), b in arb_i32x8()) {
        prop_assert_eq!(!a.simd_lt(b), a.simd_ge(b));
    }

    /// Lane arithmetic matches wrapping scalar arithmetic.
    #[test]
    fn arithmetic_matches_scalar(a in arb_i32x8(), b in arb_i32x8()) {
        let (sum, diff, prod) = (a + b, a - b, a * b);
        for i in 0..8 {
            prop_assert_eq!(sum.get(i), a.get(i).wrapping_add(b.get(i)));
            prop_assert_eq!(diff.get(i), a.get(i).wrapping_sub(b.get(i)));
            prop_assert_eq!(prod.get(i), a.get(i).wrapping_mul(b.get(i)));
        }
    }

    /// Mask sign extraction agrees with the scalar sign.
    #[test]
    fn mask_tracks_sign(a in arb_i32x8()) {
        let mask = M32x8::from(a);
        for i in 0..8 {
            prop_assert_eq!(mask.get(i), a.get(i) < 0);
        }
    }
}

proptest! {
    /// Float comparisons follow IEEE rules lane by lane.
    #[test]
    fn float_comparisons_match_scalar(a in arb_f32x4(), b in arb_f32x4()) {
        let (eq, ne, lt, le, gt, ge) = (
            a.simd_eq(b),
            a.simd_ne(b),
            a.simd_lt(b),
            a.simd_le(b),
            a.simd_gt(b),
            a.simd_ge(b),
        );

        for i in 0..4 {
            let (x, y) = (a.get(i), b.get(i));
            prop_assert_eq!(eq.bits()[i], sentinel(x == y));
            prop_assert_eq!(ne.bits()[i], sentinel(x != y));
            prop_assert_eq!(lt.bits()[i], sentinel(x < y));
            prop_assert_eq!(le.bits()[i], sentinel(x <= y));
            prop_assert_eq!(gt.bits()[i], sentinel(x > y));
            prop_assert_eq!(ge.bits()[i], sentinel(x >= y));
        }
    }

    /// Float masks test the sign bit, so `-0.0` and negative NaNs are set.
    #[test]
    fn float_mask_tracks_sign_bit(a in arb_f32x4()) {
        let mask = BatchBool::from(a);
        for i in 0..4 {
            prop_assert_eq!(mask.get(i), a.get(i).is_sign_negative());
        }
    }

    /// Unsigned byte comparisons are unsigned.
    #[test]
    fn byte_comparisons_match_scalar(a in arb_u8x16(), b in arb_u8x16()) {
        let (lt, ge, eq) = (a.simd_lt(b), a.simd_ge(b), a.simd_eq(b));
        for i in 0..16 {
            let (x, y) = (a.get(i), b.get(i));
            prop_assert_eq!(lt.bits()[i], sentinel8(x < y));
            prop_assert_eq!(ge.bits()[i], sentinel8(x >= y));
            prop_assert_eq!(eq.bits()[i], sentinel8(x == y));
        }
    }

    /// Byte masks test the top bit.
    #[test]
    fn byte_mask_tracks_top_bit(a in arb_u8x16()) {
        let mask = BatchBool::from(a);
        for i in 0..16 {
            prop_assert_eq!(mask.get(i), a.get(i) >= 0x80);
        }
    }
}

// =============================================================================
// Property Tests: Mask Reinterpretation
// =============================================================================

proptest! {
    /// Mask to batch to mask is the identity for every element type.
    #[test]
    fn mask_batch_mask_roundtrip(flags in prop::array::uniform16(any::<bool>())) {
        let m8 = BatchBool::<u8, Generic16>::load_slice(&flags).unwrap();
        prop_assert_eq!(BatchBool::from(U8x16::from(m8)), m8);

        let mb = BatchBool::<bool, Generic16>::load_slice(&flags).unwrap();
        let as_batch = B8x16::from(mb);
        prop_assert_eq!(BatchBool::from(as_batch), mb);
        for (i, &flag) in flags.iter().enumerate() {
            prop_assert_eq!(as_batch.get(i), flag);
        }

        let mf = BatchBool::<f32, Neon>::load_slice(&flags[..4]).unwrap();
        prop_assert_eq!(BatchBool::from(F32x4::from(mf)), mf);

        let mi = M32x8::load_slice(&flags[..8]).unwrap();
        prop_assert_eq!(M32x8::from(I32x8::from(mi)), mi);
    }
}

// =============================================================================
// Property Tests: Mask Algebra
// =============================================================================

proptest! {
    /// De Morgan: !(a & b) == !a | !b.
    #[test]
    fn de_morgan(a in arb_mask(), b in arb_mask()) {
        prop_assert_eq!(!(a & b), !a | !b);
        prop_assert_eq!(!(a | b), !a & !b);
    }

    /// AND is idempotent, NOT is an involution.
    #[test]
    fn idempotence_and_involution(a in arb_mask()) {
        prop_assert_eq!(a & a, a);
        prop_assert_eq!(!!a, a);
        prop_assert!((a ^ a).none());
    }

    /// Every lane stays a sentinel through any combination.
    #[test]
    fn lanes_stay_sentinels(a in arb_mask(), b in arb_mask()) {
        for m in [a & b, a | b, a ^ b, !a] {
            prop_assert!(m.bits().iter().all(|&bits| bits == 0 || bits == u32::MAX));
        }
    }

    /// Storing a mask as booleans and loading it back is lossless.
    #[test]
    fn mask_store_load_roundtrip(flags in prop::array::uniform8(any::<bool>())) {
        let m = M32x8::load_slice(&flags).unwrap();
        let mut out = [false; 8];
        m.store_slice(&mut out).unwrap();
        prop_assert_eq!(out, flags);
        prop_assert_eq!(M32x8::load_slice(&out).unwrap(), m);
    }
}
