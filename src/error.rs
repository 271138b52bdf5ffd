//! Error taxonomy for the capture's read-only list surface.
//!
//! Every failure here is an immediate programming-contract violation; the
//! capture performs no I/O and nothing is retried.

use thiserror::Error;

/// Errors raised by the list view and cursors of a capture.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListViewError {
    /// A structural mutation was attempted on the read-only view.
    #[error("unsupported operation `{operation}`: capture views are read-only")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// An index was outside the valid range for the current sequence.
    #[error("index {index} out of range for capture of length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The sequence length at the time of the call.
        len: usize,
    },
    /// A cursor was advanced past its bound.
    #[error("no more elements at cursor position {index}")]
    Exhausted {
        /// The cursor position when iteration ran out.
        index: usize,
    },
}
