//! Benchmarks for batch lane loops against plain scalar loops.
//!
//! Run with: cargo bench -p cf-autovec

#![allow(missing_docs, clippy::wildcard_imports)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;

use cf_autovec::*;

type F32x8 = Batch<f32, Avx2>;
type I32x8 = Batch<i32, Avx2>;

fn random_f32s(n: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect()
}

fn random_i32s(n: usize) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_range(-1000..1000)).collect()
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [64, 256, 1024, 4096] {
        let a = random_f32s(size);
        let b = random_f32s(size);
        let mut out = vec![0.0f32; size];

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| {
                for ((o, x), y) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
                    *o = x + y;
                }
                black_box(&out);
            });
        });

        group.bench_with_input(BenchmarkId::new("batch", size), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| {
                for ((o, x), y) in out
                    .chunks_exact_mut(F32x8::SIZE)
                    .zip(a.chunks_exact(F32x8::SIZE))
                    .zip(b.chunks_exact(F32x8::SIZE))
                {
                    let (Ok(x), Ok(y)) = (F32x8::load_slice(x), F32x8::load_slice(y)) else {
                        continue;
                    };
                    // SAFETY: `chunks_exact_mut` yields exactly `SIZE` elements.
                    unsafe { (x + y).store_unaligned(o.as_mut_ptr()) };
                }
                black_box(&out);
            });
        });
    }

    group.finish();
}

fn bench_compare_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_count");

    for size in [64, 1024, 4096] {
        let values = random_i32s(size);
        let threshold = 0;

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &values, |bench, values| {
            bench.iter(|| black_box(values.iter().filter(|&&v| v < threshold).count()));
        });

        group.bench_with_input(BenchmarkId::new("batch", size), &values, |bench, values| {
            let limit = I32x8::splat(threshold);
            bench.iter(|| {
                let mut count = 0;
                for chunk in values.chunks_exact(I32x8::SIZE) {
                    if let Ok(v) = I32x8::load_slice(chunk) {
                        count += v.simd_lt(limit).count();
                    }
                }
                black_box(count)
            });
        });
    }

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    let bytes: Vec<u8> = random_i32s(1024).iter().map(|&v| v.to_le_bytes()[0]).collect();
    let mut wide = vec![0i32; bytes.len()];

    group.throughput(Throughput::Elements(bytes.len() as u64));
    group.bench_function("u8_to_i32_batch", |bench| {
        bench.iter(|| {
            for (o, chunk) in wide
                .chunks_exact_mut(I32x8::SIZE)
                .zip(bytes.chunks_exact(I32x8::SIZE))
            {
                if let Ok(v) = I32x8::load_slice(chunk) {
                    // SAFETY: `chunks_exact_mut` yields exactly `SIZE` elements.
                    unsafe { v.store_unaligned(o.as_mut_ptr()) };
                }
            }
            black_box(&wide);
        });
    });

    group.finish();
}

fn bench_mask_logic(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_logic");

    let a = I32x8::new([1, -2, 3, -4, 5, -6, 7, -8]);
    let b = I32x8::splat(0);

    group.bench_function("compare_and_combine", |bench| {
        bench.iter(|| {
            let lt = black_box(a).simd_lt(black_box(b));
            let gt = black_box(a).simd_gt(black_box(b));
            black_box((!(lt & gt) | (lt ^ gt)).to_bitmask())
        });
    });

    group.bench_function("sign_mask", |bench| {
        bench.iter(|| black_box(BatchBool::from(black_box(a))).to_bitmask());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_compare_count,
    bench_convert,
    bench_mask_logic,
);
criterion_main!(benches);
