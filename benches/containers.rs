//! Benchmarks for the containers, sorts and inventory service.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run one group
//! cargo bench -- hash_map
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use amis::collections::{ChainedHashMap, DoublyLinkedList, MinHeap, Queue, Stack};
use amis::sort::{insertion_sort, merge_sort};
use amis::{Drug, Inventory};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Deterministic random values for a given seed
fn random_values(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen()).collect()
}

/// Inventory with `count` drugs, stock spread around the default threshold
fn stocked_inventory(count: usize) -> Inventory {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut inventory = Inventory::new();
    for i in 0..count {
        let drug = Drug::new(
            format!("D{i:05}"),
            format!("Drug {i}"),
            Decimal::new(rng.gen_range(50..10_000), 2),
        )
        .with_stock(rng.gen_range(0..40));
        inventory
            .add_drug(drug)
            .expect("generated codes are unique");
    }
    inventory
}

// ============================================================================
// BENCHMARK: Hash Map
// ============================================================================

fn bench_hash_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_map");
    group.measurement_time(Duration::from_secs(5));

    for &size in &[1_000usize, 10_000, 100_000] {
        let keys = random_values(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        // Includes every resize on the way up from 16 buckets
        group.bench_with_input(BenchmarkId::new("put", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = ChainedHashMap::new();
                for &key in keys {
                    map.put(key, key);
                }
                black_box(map)
            });
        });

        let map: ChainedHashMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
        group.bench_with_input(BenchmarkId::new("get_hit", size), &keys, |b, keys| {
            b.iter(|| {
                for key in keys {
                    black_box(map.get(key));
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: List, Stack and Queue
// ============================================================================

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear");
    let size = 10_000u64;
    group.throughput(Throughput::Elements(size));

    group.bench_function("stack_push_pop", |b| {
        b.iter(|| {
            let mut stack = Stack::new();
            for i in 0..size {
                stack.push(i);
            }
            while let Ok(value) = stack.pop() {
                black_box(value);
            }
        });
    });

    group.bench_function("queue_enqueue_dequeue", |b| {
        b.iter(|| {
            let mut queue = Queue::new();
            for i in 0..size {
                queue.enqueue(i);
            }
            while let Ok(value) = queue.dequeue() {
                black_box(value);
            }
        });
    });

    group.bench_function("list_cursor_remove_even", |b| {
        b.iter_batched(
            || (0..size).collect::<DoublyLinkedList<u64>>(),
            |mut list| {
                let mut cursor = list.cursor_mut();
                while let Some(value) = cursor.move_next() {
                    if *value % 2 == 0 {
                        cursor.remove_current();
                    }
                }
                black_box(list)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Heap
// ============================================================================

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_heap");

    for &size in &[1_000usize, 10_000] {
        let values = random_values(size, 9);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("insert_drain", size), &values, |b, values| {
            b.iter(|| {
                let heap: MinHeap<u64> = values.iter().copied().collect();
                black_box(heap.into_sorted_vec())
            });
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Sorting
// ============================================================================

fn bench_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for &size in &[100usize, 1_000, 5_000] {
        let values = random_values(size, 3);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("merge", size), &values, |b, values| {
            b.iter_batched(
                || values.clone(),
                |mut v| {
                    merge_sort(&mut v);
                    black_box(v)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("insertion", size), &values, |b, values| {
            b.iter_batched(
                || values.clone(),
                |mut v| {
                    insertion_sort(&mut v);
                    black_box(v)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Inventory
// ============================================================================

fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");

    for &size in &[100usize, 1_000] {
        let inventory = stocked_inventory(size);

        // Every stock change rescans all drugs
        group.bench_with_input(BenchmarkId::new("rebuild_low_stock", size), &size, |b, _| {
            b.iter_batched(
                || inventory.clone(),
                |mut inventory| {
                    inventory.rebuild_low_stock();
                    black_box(inventory)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("inventory_report", size), &size, |b, _| {
            b.iter(|| black_box(inventory.inventory_report()));
        });

        group.bench_with_input(BenchmarkId::new("state_digest", size), &size, |b, _| {
            b.iter(|| black_box(inventory.state_digest()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_hash_map,
    bench_linear,
    bench_heap,
    bench_sorts,
    bench_inventory
);
criterion_main!(benches);
