use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use glflake::{
    Encoding, Glflake, GlflakeGenerator, Id, MonotonicClock, Settings, SleepProvider, SystemClock,
    ThreadSleep, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    nanos: i64,
}

impl TimeSource for FixedMockTime {
    fn unix_nanos(&self) -> i64 {
        self.nanos
    }
}

/// Skips the exhaustion wait so the mock clock never has to move.
struct NoSleep;

impl SleepProvider for NoSleep {
    fn sleep(&self, _dur: Duration) {}
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn settings() -> Settings {
    Settings::new()
        .with_start_time(Duration::ZERO)
        .with_machine_id(1)
}

fn bench_generator<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: GlflakeGenerator,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.try_next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

fn bench_generator_threaded<G>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: GlflakeGenerator + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8] {
        let total_ids = TOTAL_IDS * thread_count;
        group.throughput(Throughput::Elements(total_ids as u64));

        group.bench_function(
            format!("elems/{total_ids}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let generator = Arc::new(generator_factory());
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    let mut elapsed = Duration::ZERO;

                    for _ in 0..iters {
                        // The scope joins every worker before returning
                        let start = scope(|s| {
                            for _ in 0..thread_count {
                                let generator = Arc::clone(&generator);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..TOTAL_IDS {
                                        black_box(generator.try_next_id().unwrap());
                                    }
                                });
                            }

                            barrier.wait();
                            Instant::now()
                        });
                        elapsed += start.elapsed();
                    }

                    elapsed
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mock_sequential(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/lock", || {
        Glflake::with_sources(settings(), FixedMockTime { nanos: 1 << 40 }, NoSleep).unwrap()
    });
}

fn benchmark_mock_contended(c: &mut Criterion) {
    bench_generator_threaded(c, "mock/contended/lock", || {
        Glflake::with_sources(settings(), FixedMockTime { nanos: 1 << 40 }, NoSleep).unwrap()
    });
}

fn benchmark_system_clock_sequential(c: &mut Criterion) {
    bench_generator(c, "system/sequential/lock", || {
        Glflake::with_sources(settings(), SystemClock, ThreadSleep).unwrap()
    });
}

fn benchmark_monotonic_clock_sequential(c: &mut Criterion) {
    bench_generator(c, "monotonic/sequential/lock", || {
        Glflake::with_sources(settings(), MonotonicClock::default(), ThreadSleep).unwrap()
    });
}

fn benchmark_codecs(c: &mut Criterion) {
    let id = Id::from_parts(115_119_602, 8329, 17);
    let mut group = c.benchmark_group("codec");

    for encoding in Encoding::ALL {
        let encoded = encoding.encode(id);
        group.bench_function(format!("encode/{encoding}"), |b| {
            b.iter(|| black_box(encoding.encode(black_box(id))));
        });
        group.bench_function(format!("decode/{encoding}"), |b| {
            b.iter(|| black_box(encoding.decode(black_box(&encoded)).unwrap()));
        });
    }

    group.bench_function("json/roundtrip", |b| {
        b.iter(|| black_box(Id::from_json(&black_box(id).to_json()).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential,
    benchmark_mock_contended,
    // Real clocks, sleeping on sequence exhaustion
    benchmark_system_clock_sequential,
    benchmark_monotonic_clock_sequential,
    // Codecs
    benchmark_codecs,
);
criterion_main!(benches);
