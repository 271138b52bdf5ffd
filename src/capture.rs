//! Scoped, filterable collection of captured log events.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::Level;
use parking_lot::Mutex;

use crate::cursor::Cursor;
use crate::error::ListViewError;
use crate::listener::{self, LogListener};
use crate::matcher::{ExactMatcher, Matcher};
use crate::message::Message;
use crate::record::{CapturedError, LogRecord};

/// State shared between the capture handle and the listener registry.
struct Shared {
    filter: Option<Box<dyn Matcher>>,
    records: Mutex<Vec<LogRecord>>,
    closed: AtomicBool,
}

impl LogListener for Shared {
    fn receive(
        &self,
        time: i64,
        origin: &str,
        level: Level,
        message: Option<Message>,
        error: Option<CapturedError>,
    ) {
        // Post-close deliveries are ignored so the capture's effect stays
        // bounded to its scope even if a source misses the detach.
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        if self.filter.as_ref().is_none_or(|m| m.matches(origin)) {
            let record = LogRecord::new(time, origin, level, message, error);
            self.records.lock().push(record);
        }
    }
}

/// An ordered, read-only collection of log events captured while active.
///
/// Creating a capture attaches it to the process-wide event source; every
/// event whose origin passes the capture's filter is stored in arrival
/// order until [`close`](Self::close) detaches it. Dropping an open capture
/// closes it, so a capture's effect is bounded to the enclosing scope.
///
/// # Examples
///
/// ```
/// use log_capture::{Level, LogCapture, Message};
///
/// let capture = LogCapture::for_origin("billing");
/// capture.receive(0, "billing", Level::Info, Some(Message::from("invoice raised")), None);
/// capture.receive(0, "mailer", Level::Info, Some(Message::from("sent")), None);
/// assert_eq!(capture.size(), 1);
/// assert!(capture.has_info("invoice raised"));
/// assert!(!capture.has_info("sent"));
/// capture.close();
/// ```
pub struct LogCapture {
    shared: Arc<Shared>,
    id: u64,
}

impl LogCapture {
    /// Create a capture that accepts events from every origin.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a capture for events whose origin equals `name`.
    #[must_use]
    pub fn for_origin(name: impl Into<String>) -> Self {
        Self::build(Some(Box::new(ExactMatcher::new(name))))
    }

    /// Create a capture for events whose origin is the canonical name of
    /// `T`, as produced by [`std::any::type_name`].
    #[must_use]
    pub fn for_type<T: ?Sized>() -> Self {
        Self::for_origin(std::any::type_name::<T>())
    }

    /// Create a capture filtered by an arbitrary [`Matcher`].
    #[must_use]
    pub fn with_matcher(matcher: impl Matcher + 'static) -> Self {
        Self::build(Some(Box::new(matcher)))
    }

    fn build(filter: Option<Box<dyn Matcher>>) -> Self {
        let shared = Arc::new(Shared {
            filter,
            records: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        });
        let id = listener::attach(Arc::clone(&shared) as Arc<dyn LogListener>);
        Self { shared, id }
    }

    /// Deliver one event to this capture directly.
    ///
    /// The event source calls this through the listener registry for every
    /// emitted event; tests may also call it to drive a capture without a
    /// live logger. The event is stored only if the capture is still active
    /// and its origin passes the filter; otherwise it is discarded silently.
    /// Appends are serialized, so concurrent deliveries are stored in lock
    /// acquisition order with no record lost.
    pub fn receive(
        &self,
        time: i64,
        origin: &str,
        level: Level,
        message: Option<Message>,
        error: Option<CapturedError>,
    ) {
        self.shared.receive(time, origin, level, message, error);
    }

    /// Detach the capture from the event source.
    ///
    /// Idempotent; queries remain valid afterwards and reflect the final
    /// captured state.
    pub fn close(&self) {
        if !self.shared.closed.swap(true, Ordering::AcqRel) {
            listener::detach(self.id);
        }
    }

    /// Whether the capture is still attached to the event source.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.shared.closed.load(Ordering::Acquire)
    }

    /// The number of records currently held.
    #[must_use]
    pub fn size(&self) -> usize {
        self.shared.records.lock().len()
    }

    /// Whether no records have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.records.lock().is_empty()
    }

    /// An independent copy of the current sequence.
    ///
    /// Later appends to the capture do not affect a snapshot already taken.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.shared.records.lock().clone()
    }

    /// Whether some captured record has exactly `level` and a message equal
    /// to `message`.
    pub fn has_record(&self, level: Level, message: impl Into<Message>) -> bool {
        let message = message.into();
        self.shared
            .records
            .lock()
            .iter()
            .any(|record| record.level() == level && record.message() == Some(&message))
    }

    /// Whether some captured record has exactly `level` and a message string
    /// containing `content` as a plain substring.
    pub fn has_record_containing(&self, level: Level, content: &str) -> bool {
        self.shared
            .records
            .lock()
            .iter()
            .any(|record| record.level() == level && record.message_string().contains(content))
    }

    /// Whether a TRACE record with this exact message was captured.
    pub fn has_trace(&self, message: impl Into<Message>) -> bool {
        self.has_record(Level::Trace, message)
    }

    /// Whether a DEBUG record with this exact message was captured.
    pub fn has_debug(&self, message: impl Into<Message>) -> bool {
        self.has_record(Level::Debug, message)
    }

    /// Whether an INFO record with this exact message was captured.
    pub fn has_info(&self, message: impl Into<Message>) -> bool {
        self.has_record(Level::Info, message)
    }

    /// Whether a WARN record with this exact message was captured.
    pub fn has_warn(&self, message: impl Into<Message>) -> bool {
        self.has_record(Level::Warn, message)
    }

    /// Whether an ERROR record with this exact message was captured.
    pub fn has_error(&self, message: impl Into<Message>) -> bool {
        self.has_record(Level::Error, message)
    }

    /// Whether a TRACE record whose message contains `content` was captured.
    pub fn has_trace_containing(&self, content: &str) -> bool {
        self.has_record_containing(Level::Trace, content)
    }

    /// Whether a DEBUG record whose message contains `content` was captured.
    pub fn has_debug_containing(&self, content: &str) -> bool {
        self.has_record_containing(Level::Debug, content)
    }

    /// Whether an INFO record whose message contains `content` was captured.
    pub fn has_info_containing(&self, content: &str) -> bool {
        self.has_record_containing(Level::Info, content)
    }

    /// Whether a WARN record whose message contains `content` was captured.
    pub fn has_warn_containing(&self, content: &str) -> bool {
        self.has_record_containing(Level::Warn, content)
    }

    /// Whether an ERROR record whose message contains `content` was captured.
    pub fn has_error_containing(&self, content: &str) -> bool {
        self.has_record_containing(Level::Error, content)
    }

    /// The record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::OutOfRange`] if `index` is past the end.
    pub fn get(&self, index: usize) -> Result<LogRecord, ListViewError> {
        let records = self.shared.records.lock();
        records.get(index).cloned().ok_or(ListViewError::OutOfRange {
            index,
            len: records.len(),
        })
    }

    /// Whether an equal record has been captured.
    #[must_use]
    pub fn contains(&self, record: &LogRecord) -> bool {
        self.shared.records.lock().contains(record)
    }

    /// Index of the first record equal to `record`, if any.
    #[must_use]
    pub fn index_of(&self, record: &LogRecord) -> Option<usize> {
        self.shared
            .records
            .lock()
            .iter()
            .position(|candidate| candidate == record)
    }

    /// Index of the last record equal to `record`, if any.
    #[must_use]
    pub fn last_index_of(&self, record: &LogRecord) -> Option<usize> {
        self.shared
            .records
            .lock()
            .iter()
            .rposition(|candidate| candidate == record)
    }

    /// A read-only copy of the records in `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::OutOfRange`] if the range is inverted or
    /// extends past the end.
    pub fn sub_list(&self, from: usize, to: usize) -> Result<Vec<LogRecord>, ListViewError> {
        let records = self.shared.records.lock();
        let len = records.len();
        records
            .get(from..to)
            .map(<[LogRecord]>::to_vec)
            .ok_or(ListViewError::OutOfRange {
                index: to.max(from),
                len,
            })
    }

    /// A cursor positioned before the first record of a snapshot.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::at_start(self.snapshot())
    }

    /// A cursor positioned at `index` within a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::OutOfRange`] if `index` is beyond the
    /// current size; the check happens here, not on first traversal.
    pub fn cursor_at(&self, index: usize) -> Result<Cursor, ListViewError> {
        Cursor::new(self.snapshot(), index)
    }

    /// Forward iteration over a snapshot of the records.
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<LogRecord> {
        self.snapshot().into_iter()
    }

    /// Rejected: the capture only grows through [`receive`](Self::receive).
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn append(&self, _record: LogRecord) -> Result<(), ListViewError> {
        Err(unsupported("append"))
    }

    /// Rejected: the capture only grows through [`receive`](Self::receive).
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn insert(&self, _index: usize, _record: LogRecord) -> Result<(), ListViewError> {
        Err(unsupported("insert"))
    }

    /// Rejected: captured records are immutable.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn set(&self, _index: usize, _record: LogRecord) -> Result<LogRecord, ListViewError> {
        Err(unsupported("set"))
    }

    /// Rejected: captured records cannot be removed.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn remove(&self, _index: usize) -> Result<LogRecord, ListViewError> {
        Err(unsupported("remove"))
    }

    /// Rejected: a capture is never cleared, only closed.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn clear(&self) -> Result<(), ListViewError> {
        Err(unsupported("clear"))
    }

    /// Rejected: bulk additions are not part of the capture contract.
    ///
    /// # Errors
    ///
    /// Always returns [`ListViewError::Unsupported`].
    pub fn extend<I>(&self, _records: I) -> Result<(), ListViewError>
    where
        I: IntoIterator<Item = LogRecord>,
    {
        Err(unsupported("extend"))
    }
}

const fn unsupported(operation: &'static str) -> ListViewError {
    ListViewError::Unsupported { operation }
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogCapture {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for LogCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogCapture")
            .field("size", &self.size())
            .field("active", &self.is_active())
            .field("filtered", &self.shared.filter.is_some())
            .finish()
    }
}

impl IntoIterator for &LogCapture {
    type Item = LogRecord;
    type IntoIter = std::vec::IntoIter<LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
