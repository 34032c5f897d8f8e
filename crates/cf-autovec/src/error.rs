//! Errors reported by the checked lane operations.
//!
//! The unchecked fast path never produces these; see the `unsafe` loads and
//! stores on [`Batch`](crate::Batch) and [`BatchBool`](crate::BatchBool).

/// Errors that can occur in checked lane access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LaneError {
    /// A lane index past the end of the batch.
    #[error("lane index {index} out of range for a batch of {lanes} lanes")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Lane count of the batch.
        lanes: usize,
    },

    /// A buffer shorter than the batch.
    #[error("buffer of {len} elements is too short for a batch of {lanes} lanes")]
    BufferTooShort {
        /// Length of the supplied buffer.
        len: usize,
        /// Lane count of the batch.
        lanes: usize,
    },
}

impl LaneError {
    /// Create an index-out-of-range error.
    #[must_use]
    pub const fn index_out_of_range(index: usize, lanes: usize) -> Self {
        Self::IndexOutOfRange { index, lanes }
    }

    /// Create a buffer-too-short error.
    #[must_use]
    pub const fn buffer_too_short(len: usize, lanes: usize) -> Self {
        Self::BufferTooShort { len, lanes }
    }

    /// Lane count of the batch involved.
    #[must_use]
    pub const fn lanes(&self) -> usize {
        match self {
            Self::IndexOutOfRange { lanes, .. } | Self::BufferTooShort { lanes, .. } => *lanes,
        }
    }

    /// Check if this is a buffer length error.
    #[must_use]
    pub const fn is_buffer_error(&self) -> bool {
        matches!(self, Self::BufferTooShort { .. })
    }
}

/// Fail with [`LaneError::BufferTooShort`] if `len < lanes`.
pub(crate) fn check_buffer(
    len: usize,
    lanes: usize,
    operation: &'static str,
) -> Result<(), LaneError> {
    if len < lanes {
        let err = LaneError::buffer_too_short(len, lanes);
        tracing::warn!(operation, len, lanes, "rejected short lane buffer");
        return Err(err);
    }
    Ok(())
}
