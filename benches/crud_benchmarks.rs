use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use lean_tree::LlrbMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Mutation benchmarks ────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (name, keys) in [("map_insert_ordered", ordered_keys(N)), ("map_insert_random", random_keys(N))] {
        let mut group = c.benchmark_group(name);

        group.bench_function(BenchmarkId::new("LlrbMap", N), |b| {
            b.iter(|| {
                let mut map = LlrbMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_remove(c: &mut Criterion) {
    for (name, keys) in [("map_remove_ordered", ordered_keys(N)), ("map_remove_random", random_keys(N))] {
        let mut group = c.benchmark_group(name);

        group.bench_function(BenchmarkId::new("LlrbMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<LlrbMap<i64, i64>>(),
                |mut map| {
                    for &k in &keys {
                        let _ = map.remove(&k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_pop_first(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_pop_first");

    group.bench_function(BenchmarkId::new("LlrbMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<LlrbMap<i64, i64>>(),
            |mut map| {
                while map.pop_first().is_ok() {}
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                while map.pop_first().is_some() {}
                map
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Query benchmarks ───────────────────────────────────────────────────────

fn bench_get(c: &mut Criterion) {
    let keys = random_keys(N);
    let ll_map: LlrbMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("LlrbMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = ll_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_order_statistics(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: LlrbMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_order_statistics");

    group.bench_function(BenchmarkId::new("rank", N), |b| {
        b.iter(|| keys.iter().map(|k| map.rank(k)).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("select", N), |b| {
        b.iter(|| (0..map.len()).filter_map(|i| map.select(i).ok()).count());
    });

    group.bench_function(BenchmarkId::new("floor", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| map.floor(&(k - 1)).ok().flatten()).count());
    });

    group.bench_function(BenchmarkId::new("range_len", N), |b| {
        b.iter(|| keys.windows(2).map(|w| map.range_len(&w[0], &w[1])).sum::<usize>());
    });

    group.bench_function(BenchmarkId::new("keys_in_range", N), |b| {
        let (lo, hi) = (keys[0].min(keys[1]), keys[0].max(keys[1]));
        b.iter(|| black_box(map.keys_in_range(&lo, &hi)).len());
    });

    group.finish();
}

criterion_group!(mutation_benches, bench_insert, bench_remove, bench_pop_first,);

criterion_group!(query_benches, bench_get, bench_order_statistics,);

criterion_main!(mutation_benches, query_benches);
