//! Exclusive scan throughput for different worker counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sculpter::surface_nets::{ExclusiveScanner, PrefixSumBindings};
use sculpter::StorageBuffer;

fn bench_scan_workers(c: &mut Criterion) {
  let mut group = c.benchmark_group("prefix_sum");
  let len = 32 * 32 * 32 * 3;
  let flags: Vec<u32> = (0..len).map(|i| u32::from(i % 7 < 2)).collect();

  let input = StorageBuffer::from_u32("flags", &flags);
  let output = StorageBuffer::zeroed("indices", len);
  let count = StorageBuffer::zeroed("count", 1);
  let bindings = PrefixSumBindings {
    input: &input,
    output: &output,
    count: &count,
    len,
  };

  for workers in [1, 2, 4, 8] {
    let scanner = ExclusiveScanner::new(1 << 17, workers).expect("power of two width");
    group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
      b.iter(|| black_box(scanner.scan(black_box(&bindings)).unwrap()))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_scan_workers);
criterion_main!(benches);
