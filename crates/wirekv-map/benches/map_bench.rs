//! Benchmarks for map operations over the pooled in-memory store.
//!
//! Measures the per-operation cost of the acquire -> select -> execute ->
//! release protocol, not the store itself.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use wirekv_map::KvMap;
use wirekv_store::{MemoryStore, StoreConfig, StorePool};

fn bench_map_ops(c: &mut Criterion) {
    let store = MemoryStore::new(StoreConfig::default());
    let map = KvMap::new(StorePool::new(store), 0);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("insert", |b| {
        b.iter(|| {
            let key = format!("key{:06}", rng.gen_range(0..100_000u32));
            map.insert(&key, "value").unwrap();
        })
    });

    for i in 0..10_000 {
        map.insert(&format!("key{:06}", i), "value").unwrap();
    }

    c.bench_function("get", |b| {
        b.iter(|| {
            let key = format!("key{:06}", rng.gen_range(0..10_000u32));
            map.get(&key).unwrap();
        })
    });

    c.bench_function("len", |b| b.iter(|| map.len().unwrap()));

    c.bench_function("keys_10k", |b| b.iter(|| map.keys().unwrap()));
}

criterion_group!(benches, bench_map_ops);
criterion_main!(benches);
