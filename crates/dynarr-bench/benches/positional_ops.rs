//! Criterion micro-benchmarks for positional insert and erase.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dynarr_bench::{apply, edit_script, filled};

/// Benchmark: 1K random inserts/erases against a 10K-element array.
fn bench_random_edits(c: &mut Criterion) {
    let script = edit_script(42, 10_000, 1_000);
    c.bench_function("random_edits_10k", |b| {
        b.iter(|| {
            let mut arr = filled(10_000);
            apply(&mut arr, &script, 7);
            black_box(arr.len());
        });
    });
}

/// Benchmark: repeated front insertion, the worst case for shifting.
fn bench_front_insert(c: &mut Criterion) {
    c.bench_function("front_insert_1k", |b| {
        b.iter(|| {
            let mut arr = filled(0);
            for i in 0..1_000u64 {
                arr.insert(0, i);
            }
            black_box(arr[0]);
        });
    });
}

/// Benchmark: drain from the front with `erase(0)`.
fn bench_front_erase(c: &mut Criterion) {
    c.bench_function("front_erase_1k", |b| {
        b.iter(|| {
            let mut arr = filled(1_000);
            while !arr.is_empty() {
                arr.erase(0);
            }
            black_box(arr.capacity());
        });
    });
}

criterion_group!(
    benches,
    bench_random_edits,
    bench_front_insert,
    bench_front_erase
);
criterion_main!(benches);
