use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::thread;
use textpipe_core::BoundedQueue;

/// Measures the backpressure property (§8 property 2): with a small
/// capacity and a consumer that processes slower than the producer,
/// `put` throughput is bounded by the consumer's drain rate rather than
/// the producer's enqueue rate.
fn bench_backpressure(c: &mut Criterion) {
    let mut group = c.benchmark_group("backpressure");

    for capacity in [1usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            b.iter(|| {
                let queue = Arc::new(BoundedQueue::new(capacity));
                const ITEMS: usize = 2_000;

                let consumer_queue = Arc::clone(&queue);
                let consumer = thread::spawn(move || {
                    let mut received = 0;
                    while received < ITEMS {
                        if consumer_queue.get().is_some() {
                            received += 1;
                        }
                    }
                });

                for i in 0..ITEMS {
                    queue.put(black_box(i)).unwrap();
                }
                consumer.join().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_backpressure);
criterion_main!(benches);
