//! End-to-end scenarios exercised through the public API only.

use std::iter;

use new_zealand::nz;
use par_fill::{
    FILLED_BYTE, FillBuffer, OptionsError, Partitioner, RunOptions, execute_run, verify,
};

#[test]
fn four_workers_tile_and_fill_sixteen_bytes() {
    let options = RunOptions::new(nz!(4), nz!(16), nz!(1)).unwrap();

    let report = execute_run(&options).unwrap();

    assert!(report.succeeded());
    assert_eq!(report.verification().defect_count(), 0);

    let mut partitions = report.partitions().to_vec();
    partitions.sort_by_key(|range| range.start);
    assert_eq!(partitions, vec![0..4, 4..8, 8..12, 12..16]);
}

#[test]
fn single_worker_run_fills_everything() {
    let options = RunOptions::new(nz!(1), nz!(128), nz!(2)).unwrap();

    let report = execute_run(&options).unwrap();

    assert!(report.succeeded());
    assert_eq!(report.partitions(), &[0..128]);
}

#[test]
fn skipped_partition_is_reported_with_its_last_offset() {
    // Drives the partition and verification layers directly: three of the
    // four partitions are filled, the one covering [4, 8) is left untouched.
    let mut buffer = FillBuffer::new(nz!(16));

    {
        let partitioner = Partitioner::new(&mut buffer, nz!(4));

        let partitions: Vec<_> = iter::from_fn(|| partitioner.claim()).collect();
        assert_eq!(partitions.len(), 4);

        for mut partition in partitions {
            if partition.start() != 4 {
                partition.fill(FILLED_BYTE);
            }
        }
    }

    let outcome = verify(buffer.as_bytes());

    assert!(!outcome.is_fully_filled());
    assert_eq!(outcome.defect_count(), 4);
    assert_eq!(outcome.last_defect_offset(), Some(7));
}

#[test]
fn indivisible_configuration_is_rejected_before_any_work() {
    let error = RunOptions::new(nz!(3), nz!(16), nz!(1)).unwrap_err();

    assert!(matches!(error, OptionsError::NotPartitionable { .. }));
}

#[test]
fn run_report_carries_the_full_measurement_context() {
    let options = RunOptions::new(nz!(2), nz!(4096), nz!(3)).unwrap();

    let report = execute_run(&options).unwrap();

    assert!(report.succeeded());
    assert_eq!(report.worker_count(), nz!(2));
    assert_eq!(report.buffer_len(), nz!(4096));
    assert_eq!(report.fill_multiplicity(), nz!(3));
    assert_eq!(report.partitions().len(), 2);
}
