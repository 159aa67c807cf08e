use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrucache::LruCache;

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit_1k", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for i in 0..1000u64 {
            cache.put(i, vec![b'x'; 64]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 1000)));
            counter += 1;
        });
    });

    group.bench_function("get_miss", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for i in 0..1000u64 {
            cache.put(i, i);
        }

        let mut counter = 1000u64;
        b.iter(|| {
            black_box(cache.get(&counter));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_put_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_evicting", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let mut counter = 0u64;
        b.iter(|| {
            cache.put(black_box(counter), counter);
            counter += 1;
        });
    });

    group.bench_function("put_update", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for i in 0..1000u64 {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            cache.put(black_box(counter % 1000), counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for i in 0..1000u64 {
            cache.put(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter.is_multiple_of(2) {
                black_box(cache.get(&(counter % 2000)));
            } else {
                cache.put(counter % 2000, counter);
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_put_evict, bench_mixed_50_50);
criterion_main!(benches);
