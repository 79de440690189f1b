#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Measures how quickly a large in-memory buffer can be filled by one
//! thread versus several threads writing disjoint partitions.
//!
//! This package is not meant for use in production, serving only as a
//! development tool for comparing memory fill throughput across worker
//! counts.
//!
//! The moving parts:
//!
//! - [`FillBuffer`] - a contiguous byte region that many threads may write,
//!   each on its own disjoint range
//! - [`Partitioner`] - hands out those disjoint ranges as exclusive-write
//!   [`Partition`] capabilities, advancing a mutex-guarded cursor
//! - [`execute_run`] - spawns the workers, releases them together, joins
//!   them all and verifies the result
//! - [`verify`] - the sequential completeness scan producing a
//!   [`VerifyOutcome`]
//!
//! The partition claim is the only synchronized operation; the fills
//! themselves run entirely unsynchronized because no two partitions share a
//! byte. Workers rendezvous with the coordinator at a counting barrier
//! before any fill work starts, and their results travel back through join
//! handles, so there is never a moment where completion must be inferred
//! from shared memory.
//!
//! # Examples
//!
//! ```
//! use new_zealand::nz;
//! use par_fill::{RunOptions, execute_run};
//!
//! let options = RunOptions::new(nz!(4), nz!(4096), nz!(1))?;
//! let report = execute_run(&options)?;
//!
//! assert!(report.succeeded());
//! println!(
//!     "{} workers filled {} bytes in {:?}",
//!     report.worker_count(),
//!     report.buffer_len(),
//!     report.elapsed()
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod buffer;
mod options;
mod partitioner;
mod run;
mod verify;
mod worker;

pub use buffer::*;
pub use options::*;
pub use partitioner::*;
pub use run::*;
pub use verify::*;
