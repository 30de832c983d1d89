//! Sort and string helper benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nos_smoke_core::{bubble_sort, string};

fn bench_bubble_sort(c: &mut Criterion) {
    let sizes: &[usize] = &[10, 64, 256];
    let mut group = c.benchmark_group("bubble_sort");

    for &size in sizes {
        let reversed: Vec<i32> = (0..size as i32).rev().collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("reversed", size), &size, |b, _| {
            b.iter(|| {
                let mut data = reversed.clone();
                black_box(bubble_sort(&mut data));
            });
        });
    }
    group.finish();
}

fn bench_strlen(c: &mut Criterion) {
    let sizes: &[usize] = &[16, 256, 4096];
    let mut group = c.benchmark_group("strlen");

    for &size in sizes {
        let mut s = vec![b'A'; size];
        s.push(0);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("slice", size), &size, |b, _| {
            b.iter(|| black_box(string::strlen(black_box(&s))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bubble_sort, bench_strlen);
criterion_main!(benches);
