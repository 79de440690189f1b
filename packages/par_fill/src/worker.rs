use std::hint;
use std::num::NonZero;
use std::ops::Range;
use std::sync::Barrier;

use crate::{FILLED_BYTE, Partitioner};

/// One worker's entire contribution to a run: claim a partition, wait for
/// the shared start signal, then fill the partition the requested number of
/// times.
///
/// Returns the claimed range through the worker's join handle so the
/// coordinator can account for every byte.
///
/// Passes beyond the first rewrite the same value over the same range; they
/// exist only to scale execution time. The final buffer contents are
/// identical for every multiplicity.
pub(crate) fn fill_one_partition(
    partitioner: &Partitioner<'_>,
    start_signal: &Barrier,
    fill_multiplicity: NonZero<u32>,
) -> Range<usize> {
    let mut partition = partitioner
        .claim()
        .expect("the coordinator spawns exactly one worker per partition");

    // Every worker and the coordinator rendezvous here, so no fill work
    // starts until the whole crew has been spawned and holds a partition.
    start_signal.wait();

    for _ in 0..fill_multiplicity.get() {
        partition.fill(FILLED_BYTE);

        // Keeps the optimizer from collapsing the repeated passes into one.
        hint::black_box(&partition);
    }

    partition.range()
}
