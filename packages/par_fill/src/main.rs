#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the `par_fill` benchmark.
//!
//! Parses the process arguments, executes one run and reports the outcome.
//! All user-facing reporting happens here; the library only returns values.
//!
//! This module is excluded from mutation testing because testing process
//! entry/exit behavior is impractical - it requires spawning subprocesses
//! and checking exit codes.

use std::num::NonZero;
use std::process::ExitCode;
use std::thread;

use argh::FromArgs;
use new_zealand::nz;
use par_fill::{RunOptions, execute_run};

/// Default buffer size: one gibibyte.
const DEFAULT_BUFFER_LEN: NonZero<usize> = nz!(1_073_741_824);

/// Default number of fill passes over each partition.
const DEFAULT_FILL_MULTIPLICITY: NonZero<u32> = nz!(1);

/// Measures how quickly a large in-memory buffer can be filled by one
/// thread versus several threads writing disjoint partitions.
#[derive(FromArgs)]
struct Args {
    /// number of worker threads (default: available parallelism)
    #[argh(option)]
    threads: Option<NonZero<usize>>,

    /// total bytes to allocate and fill; must divide evenly among the
    /// worker threads (default: 1 GiB)
    #[argh(option)]
    buffer_bytes: Option<NonZero<usize>>,

    /// how many times each worker rewrites its partition; scales execution
    /// time without changing the result (default: 1)
    #[argh(option)]
    fill_multiplicity: Option<NonZero<u32>>,
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let worker_count = args.threads.unwrap_or_else(default_worker_count);
    let buffer_len = args.buffer_bytes.unwrap_or(DEFAULT_BUFFER_LEN);
    let fill_multiplicity = args.fill_multiplicity.unwrap_or(DEFAULT_FILL_MULTIPLICITY);

    let options = match RunOptions::new(worker_count, buffer_len, fill_multiplicity) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match execute_run(&options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if report.succeeded() {
        println!("SUCCESS: the buffer was filled completely.");
        println!(
            "    {} worker(s) filled {} bytes in {:?} (fill multiplicity {}).",
            report.worker_count(),
            report.buffer_len(),
            report.elapsed(),
            report.fill_multiplicity()
        );

        ExitCode::SUCCESS
    } else {
        let verification = report.verification();

        let last_defect_offset = verification
            .last_defect_offset()
            .expect("a failed verification always records at least one defect offset");

        println!(
            "ERROR (fill multiplicity {}): the buffer was not filled completely.",
            report.fill_multiplicity()
        );
        println!("    last unfilled position: {last_defect_offset}");
        println!("    {} unfilled byte(s) total", verification.defect_count());

        ExitCode::FAILURE
    }
}

/// One worker per processor when the platform can tell us how many there
/// are, otherwise a single worker.
fn default_worker_count() -> NonZero<usize> {
    thread::available_parallelism().unwrap_or(nz!(1))
}
