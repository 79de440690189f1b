use std::cell::UnsafeCell;
use std::num::NonZero;
use std::ops::Range;
use std::slice;
use std::sync::Mutex;

use crate::FillBuffer;

/// Hands out non-overlapping write ranges of a [`FillBuffer`] to workers.
///
/// The partitioner owns the allocation cursor: a single offset, guarded by a
/// mutex, marking the start of the next unassigned partition. Each
/// [`claim()`][Self::claim] holds the lock only for the read-modify-write of
/// the cursor, advancing it by the fixed partition length, so the ranges
/// handed out tile the buffer - one per claim, no gaps, no overlap. The fill
/// work itself happens entirely outside the lock.
///
/// Constructing a partitioner requires a `&mut FillBuffer`, so for as long as
/// the partitioner or any of its partitions is alive, nothing else can read
/// or repartition the buffer.
///
/// # Examples
///
/// ```
/// use new_zealand::nz;
/// use par_fill::{FILLED_BYTE, FillBuffer, Partitioner};
///
/// let mut buffer = FillBuffer::new(nz!(16));
///
/// {
///     let partitioner = Partitioner::new(&mut buffer, nz!(4));
///
///     while let Some(mut partition) = partitioner.claim() {
///         partition.fill(FILLED_BYTE);
///     }
/// }
///
/// assert!(buffer.as_bytes().iter().all(|&byte| byte == FILLED_BYTE));
/// ```
#[derive(Debug)]
pub struct Partitioner<'b> {
    buffer: &'b FillBuffer,
    partition_len: NonZero<usize>,
    cursor: Mutex<AllocationCursor>,
}

/// Start offset of the next unassigned partition.
///
/// Advances by one partition length per claim, only ever while the lock
/// around it is held.
#[derive(Debug)]
struct AllocationCursor {
    next_start: usize,
}

impl<'b> Partitioner<'b> {
    /// Creates a partitioner that divides `buffer` into `worker_count` equal
    /// partitions.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length is not evenly divisible by `worker_count`
    /// - an uneven division would leave the last partition truncated.
    /// Callers validate this up front via
    /// [`RunOptions::new()`][crate::RunOptions::new].
    #[must_use]
    pub fn new(buffer: &'b mut FillBuffer, worker_count: NonZero<usize>) -> Self {
        let buffer_len = buffer.len();

        let remainder = buffer_len
            .get()
            .checked_rem(worker_count.get())
            .expect("worker count is non-zero, so the remainder is always defined");

        assert_eq!(
            remainder, 0,
            "a buffer of {buffer_len} bytes cannot be divided evenly among {worker_count} workers"
        );

        #[expect(
            clippy::integer_division,
            reason = "divisibility was asserted above, so the division is exact"
        )]
        let partition_len = NonZero::new(buffer_len.get() / worker_count.get())
            .expect("an exact division of a non-zero length yields a non-zero partition length");

        Self {
            buffer,
            partition_len,
            cursor: Mutex::new(AllocationCursor { next_start: 0 }),
        }
    }

    /// Length of every partition this partitioner hands out.
    #[must_use]
    pub fn partition_len(&self) -> NonZero<usize> {
        self.partition_len
    }

    /// Claims the next partition.
    ///
    /// Safe to call from any number of threads; every call returns a range
    /// disjoint from every other range this partitioner has returned.
    /// Returns `None` once the whole buffer has been assigned.
    ///
    /// # Panics
    ///
    /// Panics if the cursor lock is poisoned. Reading the cursor without the
    /// lock would corrupt the partitioning, so a poisoned lock is
    /// unrecoverable.
    #[must_use]
    pub fn claim(&self) -> Option<Partition<'b>> {
        let mut cursor = self
            .cursor
            .lock()
            .expect("allocation cursor lock is poisoned - cannot hand out partitions");

        let start = cursor.next_start;

        if start == self.buffer.len().get() {
            return None;
        }

        let end = start
            .checked_add(self.partition_len.get())
            .expect("the cursor never exceeds the buffer length, which fits in usize");

        debug_assert!(end <= self.buffer.len().get());

        cursor.next_start = end;
        drop(cursor);

        Some(Partition {
            buffer: self.buffer,
            range: start..end,
        })
    }
}

/// An exclusive write capability for one range of a [`FillBuffer`].
///
/// Only a [`Partitioner`] can mint partitions, it never mints two with
/// overlapping ranges, and the type cannot be cloned - so whoever holds a
/// partition holds the only way to write its bytes and may do so without any
/// further synchronization.
#[derive(Debug)]
pub struct Partition<'b> {
    buffer: &'b FillBuffer,
    range: Range<usize>,
}

impl Partition<'_> {
    /// First index of the range (inclusive).
    #[must_use]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// One past the last index of the range.
    #[must_use]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// The half-open index range this partition covers.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Writes `value` to every byte of the partition.
    pub fn fill(&mut self, value: u8) {
        let cells = self.buffer.cell_slice(&self.range);

        let base = UnsafeCell::raw_get(cells.as_ptr());

        // SAFETY: `base` carries provenance for the whole cell subslice and
        // `UnsafeCell<u8>` is layout-identical to `u8`, so the pointer and
        // length describe valid memory. This partition is the only
        // capability for these indices and we hold it exclusively via
        // `&mut self`, so nothing else reads or writes these bytes while
        // the slice is alive.
        let bytes = unsafe { slice::from_raw_parts_mut(base, cells.len()) };

        bytes.fill(value);
    }
}
