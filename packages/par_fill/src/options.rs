use std::num::NonZero;

use thiserror::Error;

/// Configuration for one benchmark run.
///
/// Constructed with [`RunOptions::new()`], which validates that the buffer
/// divides evenly among the workers. The field types make "at least one
/// worker" and "at least one fill pass" hold by construction.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use par_fill::RunOptions;
///
/// let options = RunOptions::new(nz!(4), nz!(4096), nz!(1))?;
///
/// assert_eq!(options.worker_count().get(), 4);
/// assert_eq!(options.buffer_len().get(), 4096);
/// # Ok::<(), par_fill::OptionsError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunOptions {
    worker_count: NonZero<usize>,
    buffer_len: NonZero<usize>,
    fill_multiplicity: NonZero<u32>,
}

impl RunOptions {
    /// Validates and packages a run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::NotPartitionable`] if `buffer_len` is not
    /// evenly divisible by `worker_count` - an uneven division would leave
    /// the last partition truncated instead of tiling the buffer exactly.
    pub fn new(
        worker_count: NonZero<usize>,
        buffer_len: NonZero<usize>,
        fill_multiplicity: NonZero<u32>,
    ) -> Result<Self, OptionsError> {
        let remainder = buffer_len
            .get()
            .checked_rem(worker_count.get())
            .expect("worker count is non-zero, so the remainder is always defined");

        if remainder != 0 {
            return Err(OptionsError::NotPartitionable {
                buffer_len,
                worker_count,
            });
        }

        Ok(Self {
            worker_count,
            buffer_len,
            fill_multiplicity,
        })
    }

    /// Number of worker threads that will fill the buffer.
    #[must_use]
    pub fn worker_count(&self) -> NonZero<usize> {
        self.worker_count
    }

    /// Total number of bytes to allocate and fill.
    #[must_use]
    pub fn buffer_len(&self) -> NonZero<usize> {
        self.buffer_len
    }

    /// How many times each worker rewrites its partition.
    ///
    /// Scales execution time for measurement purposes; the final buffer
    /// contents are identical for every multiplicity.
    #[must_use]
    pub fn fill_multiplicity(&self) -> NonZero<u32> {
        self.fill_multiplicity
    }
}

/// Errors that can occur when assembling a run configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionsError {
    /// The buffer cannot be divided evenly among the workers.
    #[error("a buffer of {buffer_len} bytes cannot be divided evenly among {worker_count} workers")]
    NotPartitionable {
        /// The configured buffer length, in bytes.
        buffer_len: NonZero<usize>,

        /// The configured number of workers.
        worker_count: NonZero<usize>,
    },
}
