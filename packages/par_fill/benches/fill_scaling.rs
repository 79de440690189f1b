//! Compares filling the same buffer with a single worker versus one worker
//! per available processor.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::num::NonZero;
use std::thread;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use new_zealand::nz;
use par_fill::{RunOptions, execute_run};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

/// Small enough to keep iterations fast, large enough that the fill
/// dominates thread startup.
const BUFFER_LEN_TARGET: NonZero<usize> = nz!(16_777_216);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_fill");

    let worker_count = thread::available_parallelism().unwrap_or(nz!(1));

    // Both arms must fill the same total length and it must divide evenly
    // for both, so round the target down to a multiple of the worker count.
    let buffer_len = round_down_to_multiple(BUFFER_LEN_TARGET, worker_count);

    group.bench_function("single_worker", |b| {
        b.iter_custom(|iters| black_box(measure_fill(nz!(1), buffer_len, iters)));
    });

    group.bench_function("all_workers", |b| {
        b.iter_custom(|iters| black_box(measure_fill(worker_count, buffer_len, iters)));
    });

    group.finish();
}

/// Executes `iters` runs and returns the summed measured fill time.
fn measure_fill(
    worker_count: NonZero<usize>,
    buffer_len: NonZero<usize>,
    iters: u64,
) -> Duration {
    let options = RunOptions::new(worker_count, buffer_len, nz!(1))
        .expect("the buffer length was rounded to a multiple of the worker count");

    let mut total = Duration::ZERO;

    for _ in 0..iters {
        let report = execute_run(&options).expect("benchmark workers do not panic");

        assert!(report.succeeded(), "benchmark run failed verification");

        total = total
            .checked_add(report.elapsed())
            .expect("summed durations of a benchmark run cannot overflow");
    }

    total
}

fn round_down_to_multiple(target: NonZero<usize>, divisor: NonZero<usize>) -> NonZero<usize> {
    #[expect(
        clippy::integer_division,
        reason = "rounding down to a multiple is the point"
    )]
    let quotient = target.get() / divisor.get();

    let rounded = quotient
        .checked_mul(divisor.get())
        .expect("the product never exceeds the original target");

    NonZero::new(rounded).expect("the target is far larger than any plausible worker count")
}
