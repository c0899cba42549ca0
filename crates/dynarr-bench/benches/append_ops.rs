//! Criterion micro-benchmarks for appending, reserving and cloning.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dynarr::DynamicArray;
use dynarr_bench::filled;

/// Benchmark: 10K `push_back` calls from an empty array (doubling growth).
fn bench_push_back_10k(c: &mut Criterion) {
    c.bench_function("push_back_10k", |b| {
        b.iter(|| {
            let mut arr = DynamicArray::new();
            for i in 0..10_000u64 {
                arr.push_back(i);
            }
            black_box(arr.len());
        });
    });
}

/// Benchmark: the same appends after a single up-front reserve.
fn bench_push_back_reserved_10k(c: &mut Criterion) {
    c.bench_function("push_back_reserved_10k", |b| {
        b.iter(|| {
            let mut arr = DynamicArray::with_capacity(10_000);
            for i in 0..10_000u64 {
                arr.push_back(i);
            }
            black_box(arr.len());
        });
    });
}

/// Benchmark: copy-construct a 10K-element array.
fn bench_clone_10k(c: &mut Criterion) {
    let src = filled(10_000);
    c.bench_function("clone_10k", |b| {
        b.iter(|| {
            let copy = src.clone();
            black_box(copy[9_999]);
        });
    });
}

/// Benchmark: copy-assign into an array that already has the capacity.
fn bench_clone_from_in_place_10k(c: &mut Criterion) {
    let src = filled(10_000);
    let mut dst = filled(10_000);
    c.bench_function("clone_from_in_place_10k", |b| {
        b.iter(|| {
            dst.clone_from(&src);
            black_box(dst[0]);
        });
    });
}

/// Benchmark: `resize` up and back down.
fn bench_resize_cycle(c: &mut Criterion) {
    let mut arr = DynamicArray::<u64>::new();
    c.bench_function("resize_cycle_10k", |b| {
        b.iter(|| {
            arr.resize(10_000);
            arr.resize(0);
            black_box(arr.capacity());
        });
    });
}

criterion_group!(
    benches,
    bench_push_back_10k,
    bench_push_back_reserved_10k,
    bench_clone_10k,
    bench_clone_from_in_place_10k,
    bench_resize_cycle
);
criterion_main!(benches);
