//! Bidirectional cursor over a capture snapshot.

use crate::error::ListViewError;
use crate::record::LogRecord;

/// A positionable, bidirectional cursor over captured records.
///
/// The cursor walks an independent snapshot, so records appended to the
/// capture after the cursor was taken are not visible to it. Positions run
/// from `0` (before the first record) to `len` (after the last); advancing
/// past either bound is reported as [`ListViewError::Exhausted`] rather
/// than a sentinel value.
#[derive(Debug, Clone)]
pub struct Cursor {
    records: Vec<LogRecord>,
    index: usize,
}

impl Cursor {
    /// Create a cursor positioned at `index`.
    ///
    /// An index beyond the end of the snapshot is rejected here, at
    /// construction, not deferred to the first traversal.
    pub(crate) fn new(records: Vec<LogRecord>, index: usize) -> Result<Self, ListViewError> {
        let len = records.len();
        if index > len {
            return Err(ListViewError::OutOfRange { index, len });
        }
        Ok(Self { records, index })
    }

    pub(crate) fn at_start(records: Vec<LogRecord>) -> Self {
        Self { records, index: 0 }
    }

    /// Whether a forward step would yield a record.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index < self.records.len()
    }

    /// Step forward and return the record crossed.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::Exhausted`] at the end of the snapshot.
    #[expect(
        clippy::should_implement_trait,
        reason = "exhaustion is a distinct error condition, not an iterator sentinel"
    )]
    pub fn next(&mut self) -> Result<LogRecord, ListViewError> {
        let record = self
            .records
            .get(self.index)
            .cloned()
            .ok_or(ListViewError::Exhausted { index: self.index })?;
        self.index += 1;
        Ok(record)
    }

    /// Whether a backward step would yield a record.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Step backward and return the record crossed.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::Exhausted`] at the start of the snapshot.
    pub fn previous(&mut self) -> Result<LogRecord, ListViewError> {
        let target = self
            .index
            .checked_sub(1)
            .ok_or(ListViewError::Exhausted { index: self.index })?;
        let record = self
            .records
            .get(target)
            .cloned()
            .ok_or(ListViewError::Exhausted { index: self.index })?;
        self.index = target;
        Ok(record)
    }

    /// The index a forward step would return.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// The index a backward step would return, if any.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Rejected: cursors over a capture are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn insert(&mut self, _record: LogRecord) -> Result<(), ListViewError> {
        Err(ListViewError::Unsupported {
            operation: "cursor insert",
        })
    }

    /// Rejected: cursors over a capture are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn set(&mut self, _record: LogRecord) -> Result<(), ListViewError> {
        Err(ListViewError::Unsupported {
            operation: "cursor set",
        })
    }

    /// Rejected: cursors over a capture are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn remove(&mut self) -> Result<(), ListViewError> {
        Err(ListViewError::Unsupported {
            operation: "cursor remove",
        })
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "simplify test setup")]

    use log::Level;

    use super::Cursor;
    use crate::error::ListViewError;
    use crate::message::Message;
    use crate::record::LogRecord;

    fn records(messages: &[&str]) -> Vec<LogRecord> {
        messages
            .iter()
            .map(|text| LogRecord::new(0, "cursor", Level::Info, Some(Message::from(*text)), None))
            .collect()
    }

    #[test]
    fn walks_forward_in_order() {
        let mut cursor = Cursor::at_start(records(&["a", "b"]));
        assert!(cursor.has_next());
        assert_eq!(cursor.next().expect("first").message_string(), "a");
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.next().expect("second").message_string(), "b");
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(ListViewError::Exhausted { index: 2 }));
    }

    #[test]
    fn walks_backward_from_the_end() {
        let snapshot = records(&["a", "b"]);
        let mut cursor = Cursor::new(snapshot, 2).expect("index within bounds");
        assert!(cursor.has_previous());
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(ListViewError::Exhausted { index: 2 }));
        assert_eq!(cursor.previous().expect("second").message_string(), "b");
        assert_eq!(cursor.previous().expect("first").message_string(), "a");
        assert_eq!(cursor.previous_index(), None);
        assert_eq!(cursor.previous(), Err(ListViewError::Exhausted { index: 0 }));
    }

    #[test]
    fn construction_beyond_the_end_is_rejected() {
        let result = Cursor::new(records(&["a"]), 2);
        assert_eq!(result.err(), Some(ListViewError::OutOfRange { index: 2, len: 1 }));
    }

    #[test]
    fn empty_snapshot_is_exhausted_both_ways() {
        let mut cursor = Cursor::at_start(Vec::new());
        assert!(!cursor.has_next());
        assert!(!cursor.has_previous());
        assert_eq!(cursor.next(), Err(ListViewError::Exhausted { index: 0 }));
        assert_eq!(cursor.previous(), Err(ListViewError::Exhausted { index: 0 }));
    }

    #[test]
    fn mutation_through_the_cursor_is_rejected() {
        let mut cursor = Cursor::at_start(records(&["a"]));
        let extra = LogRecord::new(0, "cursor", Level::Warn, None, None);
        assert_eq!(
            cursor.insert(extra.clone()),
            Err(ListViewError::Unsupported {
                operation: "cursor insert"
            })
        );
        assert_eq!(
            cursor.set(extra),
            Err(ListViewError::Unsupported {
                operation: "cursor set"
            })
        );
        assert_eq!(
            cursor.remove(),
            Err(ListViewError::Unsupported {
                operation: "cursor remove"
            })
        );
    }
}
