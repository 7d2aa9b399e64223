use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use inplace_foundation::{
    collections::{FixedBuffer, FixedMap, FixedVec, History},
    handle::make_shared,
};

fn benchmark_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_vec");

    group.bench_function("push_pop_64", |b| {
        b.iter(|| {
            let mut vec = FixedVec::<u64, 64>::new();
            for i in 0..64 {
                let _ = vec.push_back(black_box(i));
            }
            while vec.pop_back().is_ok() {}
            black_box(vec.len())
        });
    });

    group.bench_function("insert_front_32", |b| {
        b.iter(|| {
            let mut vec = FixedVec::<u32, 32>::new();
            for i in 0..32 {
                let _ = vec.insert(0, black_box(i));
            }
            black_box(vec.front().copied())
        });
    });

    group.finish();
}

fn benchmark_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_buffer");

    group.bench_function("write_read_16", |b| {
        b.iter(|| {
            let mut buffer = FixedBuffer::<u32, 16>::new();
            for i in 0..16 {
                let _ = buffer.write(black_box(i));
            }
            let mut sum = 0u32;
            while let Ok(v) = buffer.read() {
                sum = sum.wrapping_add(v);
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn benchmark_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_map");

    let mut map = FixedMap::<u16, u32, 32>::new();
    for key in 0..32 {
        let _ = map.insert(key, u32::from(key) * 3);
    }
    group.bench_function("find_last_of_32", |b| {
        b.iter(|| black_box(map.get(black_box(&31))));
    });
    group.bench_function("find_missing", |b| {
        b.iter(|| black_box(map.contains_key(black_box(&99))));
    });

    group.finish();
}

fn benchmark_history(c: &mut Criterion) {
    c.bench_function("history_push_16", |b| {
        let mut history = History::<i32, 16>::new();
        let mut sample = 0;
        b.iter(|| {
            sample += 1;
            black_box(history.push(black_box(sample)))
        });
    });
}

fn benchmark_handles(c: &mut Criterion) {
    let mut group = c.benchmark_group("handles");

    let owner = make_shared(0u64);
    group.bench_function("clone_drop", |b| {
        b.iter(|| black_box(owner.clone()));
    });
    let observer = owner.downgrade();
    group.bench_function("lock", |b| {
        b.iter(|| black_box(observer.lock()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_vector,
    benchmark_buffer,
    benchmark_map,
    benchmark_history,
    benchmark_handles
);
criterion_main!(benches);
