// Tree benchmarks
// Insertion, search and deletion across tree sizes and orders.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mwaytree::BTree;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

fn shuffled_keys(size: usize) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..size as u64).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(42));
    keys
}

fn build_tree(order: usize, keys: &[u64]) -> BTree<u64> {
    let mut tree = BTree::with_order(order).unwrap();
    tree.add_all(keys.iter().copied()).unwrap();
    tree
}

/// Benchmark insertion of shuffled keys
fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_insertion");

    for size in [100, 1000, 10000].iter() {
        let keys = shuffled_keys(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(build_tree(5, &keys)));
        });
    }

    group.finish();
}

/// Benchmark search for every stored key
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_search");

    for size in [100, 1000, 10000].iter() {
        let keys = shuffled_keys(*size);
        let tree = build_tree(5, &keys);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                for key in &keys {
                    black_box(tree.search(key));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark deleting half the keys from a freshly built tree
fn bench_deletion(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_deletion");

    for size in [100, 1000, 10000].iter() {
        let keys = shuffled_keys(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || build_tree(5, &keys),
                |mut tree| {
                    for key in keys.iter().take(size / 2) {
                        black_box(tree.remove(key));
                    }
                    tree
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Compare node widths on the same workload
fn bench_order_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_comparison");
    let keys = shuffled_keys(10000);

    for order in [3, 4, 8, 32, 128].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(order), order, |b, &order| {
            b.iter(|| black_box(build_tree(order, &keys)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_search,
    bench_deletion,
    bench_order_comparison
);
criterion_main!(benches);
