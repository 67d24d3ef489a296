use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use reservoir::{HashSet, HashTable};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_push_fresh_100k(c: &mut Criterion) {
    c.bench_function("table::push_fresh_100k", |b| {
        b.iter_batched(
            || HashTable::<String, u64>::with_capacity(16).unwrap(),
            |mut t| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    let _ = t.push(key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });

    // Baseline: hashbrown with the same keys.
    c.bench_function("hashbrown::insert_fresh_100k", |b| {
        b.iter_batched(
            hashbrown::HashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_push_presized_100k(c: &mut Criterion) {
    c.bench_function("table::push_presized_100k", |b| {
        b.iter_batched(
            || HashTable::<String, u64>::with_capacity(200_000).unwrap(),
            |mut t| {
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    let _ = t.push(key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("table::get_hit_10k_on_100k", |b| {
        let mut t = HashTable::with_capacity(16).unwrap();
        let keys: Vec<_> = lcg(7).take(100_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            let _ = t.push(k.clone(), i as u64).unwrap();
        }
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(t.get(k.as_str()));
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("table::get_miss_10k_on_100k", |b| {
        let mut t = HashTable::with_capacity(16).unwrap();
        for (i, x) in lcg(11).take(100_000).enumerate() {
            let _ = t.push(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap_or(0));
                black_box(t.get(k.as_str()));
            }
        })
    });
}

fn bench_pop_all_10k(c: &mut Criterion) {
    c.bench_function("table::pop_all_10k", |b| {
        b.iter_batched(
            || {
                let mut t = HashTable::with_capacity(16).unwrap();
                let keys: Vec<String> = lcg(5).take(10_000).map(key).collect();
                for (i, k) in keys.iter().enumerate() {
                    let _ = t.push(k.clone(), i as u64).unwrap();
                }
                (t, keys)
            },
            |(mut t, keys)| {
                for k in &keys {
                    black_box(t.pop(k.as_str()));
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_set_push_contains(c: &mut Criterion) {
    c.bench_function("set::push_then_contains_50k", |b| {
        b.iter_batched(
            || HashSet::<u64>::with_capacity(16).unwrap(),
            |mut s| {
                for x in lcg(13).take(50_000) {
                    let _ = s.push(x).unwrap();
                }
                let mut hits = 0usize;
                for x in lcg(13).take(50_000) {
                    hits += usize::from(s.contains(&x));
                }
                black_box(hits)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_push;
    config = bench_config();
    targets = bench_push_fresh_100k, bench_push_presized_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit_10k,
              bench_get_miss_10k,
              bench_pop_all_10k,
              bench_set_push_contains
}
criterion_main!(benches_push, benches_ops);
