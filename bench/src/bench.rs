use std::collections::hash_map::RandomState;
use std::thread;
use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, Bencher, Benchmark, Criterion, Throughput,
};
use fnv::FnvBuildHasher;
use fungi::{Stream, UniqueBy};

const ITEMS: u64 = 100_000;

fn all(c: &mut Criterion) {
    chunk(c);
    unique(c);
    chan(c);
}

fn chunk(c: &mut Criterion) {
    for &size in &[1usize, 16, 1024] {
        let name = format!("size-{}", size);
        define_items(c, "chunk", &name, move |b| {
            b.iter(|| {
                let n = fungi::iter(0..ITEMS)
                    .chunk(size)
                    .unwrap()
                    .count()
                    .unwrap();
                assert_eq!(n, (ITEMS as usize + size - 1) / size);
            });
        });
    }

    define_items(c, "chunk", "flatten-roundtrip", move |b| {
        b.iter(|| {
            let n = fungi::iter(0..ITEMS)
                .chunk(64)
                .unwrap()
                .flatten()
                .count()
                .unwrap();
            assert_eq!(n, ITEMS as usize);
        });
    });
}

fn unique(c: &mut Criterion) {
    // Every key shows up four times.
    let keys: Vec<u64> = (0..ITEMS).map(|i| i % (ITEMS / 4)).collect();

    let keys1 = keys.clone();
    define_items(c, "unique", "std", move |b| {
        b.iter(|| {
            let stream = UniqueBy::with_hasher(
                fungi::iter(keys1.iter().copied()),
                |&k: &u64| k,
                RandomState::new(),
            );
            assert_eq!(stream.count().unwrap(), (ITEMS / 4) as usize);
        });
    });

    let keys2 = keys;
    define_items(c, "unique", "fnv", move |b| {
        b.iter(|| {
            let stream = UniqueBy::with_hasher(
                fungi::iter(keys2.iter().copied()),
                |&k: &u64| k,
                FnvBuildHasher::default(),
            );
            assert_eq!(stream.count().unwrap(), (ITEMS / 4) as usize);
        });
    });
}

fn chan(c: &mut Criterion) {
    for &cap in &[0usize, 1024] {
        let name = format!("bounded-{}", cap);
        define_items(c, "chan", &name, move |b| {
            b.iter(|| {
                let (send, recv) = crossbeam_channel::bounded(cap);
                let producer = thread::spawn(move || {
                    for i in 0..ITEMS {
                        send.send(i).unwrap();
                    }
                });
                let n = fungi::done_chan_stream(
                    recv,
                    crossbeam_channel::never::<()>(),
                )
                .count()
                .unwrap();
                producer.join().unwrap();
                assert_eq!(n, ITEMS as usize);
            });
        });
    }
}

fn define_items(
    c: &mut Criterion,
    group_name: &str,
    bench_name: &str,
    bench: impl FnMut(&mut Bencher) + 'static,
) {
    let tput = Throughput::Elements(ITEMS);
    let benchmark = Benchmark::new(bench_name, bench)
        .throughput(tput)
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(3));
    c.bench(group_name, benchmark);
}

criterion_group!(g, all);
criterion_main!(g);
