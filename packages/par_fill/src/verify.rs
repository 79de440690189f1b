use crate::FILLED_BYTE;

/// Result of scanning a buffer for bytes the workers failed to fill.
///
/// Produced by [`verify()`]; carried inside a
/// [`RunReport`][crate::RunReport] for completed runs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifyOutcome {
    defect_count: usize,
    last_defect_offset: Option<usize>,
}

impl VerifyOutcome {
    /// `true` if every scanned byte carried the filled marker.
    #[must_use]
    pub fn is_fully_filled(&self) -> bool {
        self.defect_count == 0
    }

    /// Number of bytes that did not carry the filled marker.
    #[must_use]
    pub fn defect_count(&self) -> usize {
        self.defect_count
    }

    /// Offset of the defective byte encountered last during the forward
    /// scan, i.e. the highest defective index. `None` when the buffer
    /// verified clean.
    ///
    /// Reporting the last rather than the first defect is a deliberate
    /// policy; callers must not assume this is the lowest defective index.
    #[must_use]
    pub fn last_defect_offset(&self) -> Option<usize> {
        self.last_defect_offset
    }
}

/// Scans `bytes` once, sequentially, counting every byte that does not equal
/// [`FILLED_BYTE`].
///
/// Read-only. The scan never breaks early, so the remembered offset is that
/// of the last defective position in the buffer.
///
/// # Examples
///
/// ```
/// use par_fill::verify;
///
/// let outcome = verify(&[1, 1, 0, 1, 0, 1]);
///
/// assert!(!outcome.is_fully_filled());
/// assert_eq!(outcome.defect_count(), 2);
/// assert_eq!(outcome.last_defect_offset(), Some(4));
/// ```
#[must_use]
pub fn verify(bytes: &[u8]) -> VerifyOutcome {
    let mut defect_count = 0_usize;
    let mut last_defect_offset = None;

    for (offset, byte) in bytes.iter().enumerate() {
        if *byte != FILLED_BYTE {
            defect_count = defect_count
                .checked_add(1)
                .expect("defect count cannot exceed the buffer length, which fits in usize");

            last_defect_offset = Some(offset);
        }
    }

    VerifyOutcome {
        defect_count,
        last_defect_offset,
    }
}
