use std::num::NonZero;
use std::ops::Range;
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::{FillBuffer, Partitioner, RunOptions, VerifyOutcome, verify, worker};

/// Executes one full benchmark run.
///
/// 1. Allocates the buffer with every byte at
///    [`UNFILLED_BYTE`][crate::UNFILLED_BYTE].
/// 2. Records the start timestamp.
/// 3. Spawns one worker per partition, collecting every join handle.
/// 4. Rendezvouses with the workers at a counting barrier, so the fill
///    phase begins only once the whole crew is ready.
/// 5. Joins every worker, collecting the range each one filled.
/// 6. Records the end timestamp.
/// 7. Scans the buffer and reports the outcome.
///
/// Thread startup, partition claims and the rendezvous all land inside the
/// measured window; the window closes when the last worker has been joined.
///
/// # Errors
///
/// Returns [`RunError::WorkerPanicked`] if any worker thread panicked. The
/// only non-bug cause is a poisoned allocation cursor lock, which makes
/// further partitioning unsafe.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use par_fill::{RunOptions, execute_run};
///
/// let options = RunOptions::new(nz!(2), nz!(1024), nz!(1))?;
/// let report = execute_run(&options)?;
///
/// assert!(report.succeeded());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn execute_run(options: &RunOptions) -> Result<RunReport, RunError> {
    let mut buffer = FillBuffer::new(options.buffer_len());

    let start = Instant::now();

    let partitions = fill_phase(
        &mut buffer,
        options.worker_count(),
        options.fill_multiplicity(),
    )?;

    let elapsed = start.elapsed();

    // Every worker has been joined by now, so the scan observes each
    // worker's writes in full.
    let verification = verify(buffer.as_bytes());

    Ok(RunReport {
        elapsed,
        worker_count: options.worker_count(),
        buffer_len: options.buffer_len(),
        fill_multiplicity: options.fill_multiplicity(),
        partitions,
        verification,
    })
}

/// The fill phase: spawn one worker per partition, release them together,
/// join them all. Returns the claimed ranges in spawn order.
fn fill_phase(
    buffer: &mut FillBuffer,
    worker_count: NonZero<usize>,
    fill_multiplicity: NonZero<u32>,
) -> Result<Box<[Range<usize>]>, RunError> {
    let partitioner = Partitioner::new(buffer, worker_count);

    // One slot per worker plus one for the coordinator.
    let start_signal = Barrier::new(
        worker_count
            .get()
            .checked_add(1)
            .expect("worker counts are nowhere near usize::MAX"),
    );

    thread::scope(|s| {
        let handles: Vec<_> = (0..worker_count.get())
            .map(|_| {
                s.spawn(|| {
                    worker::fill_one_partition(&partitioner, &start_signal, fill_multiplicity)
                })
            })
            .collect();

        // All handles exist at this point; the barrier releases the workers
        // into their fill loops.
        start_signal.wait();

        let joined: Vec<_> = handles
            .into_iter()
            .map(thread::ScopedJoinHandle::join)
            .collect();

        joined
            .into_iter()
            .map(|outcome| outcome.map_err(|_panic_payload| RunError::WorkerPanicked))
            .collect()
    })
}

/// Everything a completed run produced: the measured duration, an echo of
/// the configuration, the claimed partitions and the verification outcome.
///
/// A `RunReport` existing does not mean the buffer verified clean - check
/// [`succeeded()`][Self::succeeded].
#[derive(Debug)]
pub struct RunReport {
    elapsed: Duration,
    worker_count: NonZero<usize>,
    buffer_len: NonZero<usize>,
    fill_multiplicity: NonZero<u32>,
    partitions: Box<[Range<usize>]>,
    verification: VerifyOutcome,
}

impl RunReport {
    /// Wall-clock time from just before the first worker was spawned until
    /// the last one was joined.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of workers that filled the buffer.
    #[must_use]
    pub fn worker_count(&self) -> NonZero<usize> {
        self.worker_count
    }

    /// Total number of bytes that were allocated and filled.
    #[must_use]
    pub fn buffer_len(&self) -> NonZero<usize> {
        self.buffer_len
    }

    /// How many times each worker rewrote its partition.
    #[must_use]
    pub fn fill_multiplicity(&self) -> NonZero<u32> {
        self.fill_multiplicity
    }

    /// The ranges the workers claimed and filled, in spawn order.
    ///
    /// Which worker ends up with which range is scheduling-dependent;
    /// together the ranges always tile the whole buffer.
    #[must_use]
    pub fn partitions(&self) -> &[Range<usize>] {
        &self.partitions
    }

    /// Outcome of the verification scan that ran after all workers were
    /// joined.
    #[must_use]
    pub fn verification(&self) -> &VerifyOutcome {
        &self.verification
    }

    /// Whether every byte of the buffer carried the filled marker.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.verification.is_fully_filled()
    }
}

/// Errors that end a run without producing a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// A worker thread panicked before completing its partition.
    #[error("a worker thread panicked before completing its partition")]
    WorkerPanicked,
}
