//! Immutable snapshots of captured log events.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use chrono::{Local, TimeZone};
use log::Level;

use crate::message::Message;

/// The error attached to a log event, reduced to its type name and text.
///
/// Captures cannot hold the emitting site's error value itself, so the
/// record keeps the two pieces the rendering and equality rules need.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapturedError {
    kind: String,
    message: String,
}

impl CapturedError {
    /// Create a `CapturedError` from an explicit type name and message.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a `CapturedError` from any concrete error value.
    ///
    /// The type name is taken from the concrete type, so call this with the
    /// original error rather than a `dyn Error` reference.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self {
            kind: std::any::type_name::<E>().to_owned(),
            message: error.to_string(),
        }
    }

    /// The error's type name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The error's message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An immutable snapshot of one log event.
///
/// Equality and hashing are structural over the five primary fields
/// (time, origin, level, message, error); absent message or error values
/// compare equal to each other and never to present ones. The memoized
/// string form of the message is a derived projection and takes no part
/// in identity.
#[derive(Debug, Clone)]
pub struct LogRecord {
    time: i64,
    origin: String,
    level: Level,
    message: Option<Message>,
    error: Option<CapturedError>,
    message_string: OnceLock<String>,
}

impl LogRecord {
    /// Create a record. The values are stored as given, without validation.
    pub fn new(
        time: i64,
        origin: impl Into<String>,
        level: Level,
        message: Option<Message>,
        error: Option<CapturedError>,
    ) -> Self {
        Self {
            time,
            origin: origin.into(),
            level,
            message,
            error,
            message_string: OnceLock::new(),
        }
    }

    /// The time of the event in milliseconds since the Unix epoch.
    #[must_use]
    pub fn time(&self) -> i64 {
        self.time
    }

    /// The name of the origin that emitted the event.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The severity level of the event.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message as captured, if any.
    #[must_use]
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// The associated error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&CapturedError> {
        self.error.as_ref()
    }

    /// The string form of the message, or the empty string when absent.
    ///
    /// Computed on first call and memoized, so repeated calls are cheap
    /// and idempotent.
    pub fn message_string(&self) -> &str {
        self.message_string
            .get_or_init(|| self.message.as_ref().map_or_else(String::new, ToString::to_string))
    }

    /// Render the record with a space separator in the local time zone.
    #[must_use]
    pub fn format(&self) -> String {
        self.format_with(' ', &Local)
    }

    /// Render the record with a custom separator in the local time zone.
    #[must_use]
    pub fn format_separated(&self, separator: char) -> String {
        self.format_with(separator, &Local)
    }

    /// Render the record with a space separator in the given time zone.
    pub fn format_in<Tz>(&self, zone: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.format_with(' ', zone)
    }

    /// Render the record as a single line.
    ///
    /// All other rendering forms funnel into this one rule: time-of-day at
    /// millisecond precision in `zone`, then origin, level name, and message
    /// string, joined by `separator`. When an error is present its type name
    /// and message are appended, also separated.
    pub fn format_with<Tz>(&self, separator: char, zone: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = self.time_of_day(zone);
        out.push(separator);
        out.push_str(&self.origin);
        out.push(separator);
        out.push_str(self.level.as_str());
        out.push(separator);
        out.push_str(self.message_string());
        if let Some(error) = &self.error {
            out.push(separator);
            out.push_str(error.kind());
            out.push(separator);
            out.push_str(error.message());
        }
        out
    }

    fn time_of_day<Tz>(&self, zone: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        zone.timestamp_millis_opt(self.time)
            .earliest()
            .map_or_else(
                || String::from("??:??:??.???"),
                |moment| moment.format("%H:%M:%S%.3f").to_string(),
            )
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl PartialEq for LogRecord {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
            && self.origin == other.origin
            && self.level == other.level
            && self.message == other.message
            && self.error == other.error
    }
}

impl Eq for LogRecord {}

impl Hash for LogRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.hash(state);
        self.origin.hash(state);
        self.level.hash(state);
        self.message.hash(state);
        self.error.hash(state);
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "simplify test setup")]

    use std::collections::hash_map::DefaultHasher;
    use std::fmt;
    use std::hash::{Hash, Hasher};

    use chrono::{FixedOffset, TimeZone, Utc};
    use log::Level;
    use rstest::rstest;

    use super::{CapturedError, LogRecord};
    use crate::message::Message;

    /// Epoch millis for 12:34:56.789 UTC on an arbitrary day.
    fn reference_time() -> i64 {
        Utc.with_ymd_and_hms(2024, 6, 12, 12, 34, 56)
            .single()
            .expect("valid reference datetime")
            .timestamp_millis()
            + 789
    }

    fn reference_record(error: Option<CapturedError>) -> LogRecord {
        LogRecord::new(
            reference_time(),
            "DummyName",
            Level::Info,
            Some(Message::from("Dummy text")),
            error,
        )
    }

    fn hash_of(record: &LogRecord) -> u64 {
        let mut state = DefaultHasher::new();
        record.hash(&mut state);
        state.finish()
    }

    #[derive(Debug)]
    struct DummyFailure;

    impl fmt::Display for DummyFailure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("dummy failure")
        }
    }

    impl std::error::Error for DummyFailure {}

    #[test]
    fn exposes_fields_as_given() {
        let error = CapturedError::new("Throwable", "Error text");
        let record = reference_record(Some(error.clone()));
        assert_eq!(record.time(), reference_time());
        assert_eq!(record.origin(), "DummyName");
        assert_eq!(record.level(), Level::Info);
        assert_eq!(record.message(), Some(&Message::from("Dummy text")));
        assert_eq!(record.error(), Some(&error));
    }

    #[test]
    fn message_string_is_empty_when_absent() {
        let record = LogRecord::new(0, "DummyName", Level::Info, None, None);
        assert_eq!(record.message_string(), "");
    }

    #[test]
    fn message_string_is_memoised() {
        let record = reference_record(None);
        let first = record.message_string();
        let second = record.message_string();
        assert_eq!(first, "Dummy text");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn formats_with_separator_and_zone() {
        let record = reference_record(None);
        assert_eq!(
            record.format_with('|', &Utc),
            "12:34:56.789|DummyName|INFO|Dummy text"
        );
        assert_eq!(
            record.format_in(&Utc),
            "12:34:56.789 DummyName INFO Dummy text"
        );
    }

    #[test]
    fn formats_error_suffix() {
        let record = reference_record(Some(CapturedError::new("Throwable", "Error text")));
        assert_eq!(
            record.format_with('|', &Utc),
            "12:34:56.789|DummyName|INFO|Dummy text|Throwable|Error text"
        );
        assert_eq!(
            record.format_in(&Utc),
            "12:34:56.789 DummyName INFO Dummy text Throwable Error text"
        );
    }

    #[test]
    fn rendering_honours_the_zone_offset() {
        let midnight = Utc
            .with_ymd_and_hms(2022, 6, 12, 0, 0, 0)
            .single()
            .expect("valid reference datetime")
            .timestamp_millis();
        let record = LogRecord::new(
            midnight,
            "wombat",
            Level::Info,
            Some(Message::from("Hello!")),
            None,
        );
        let plus_twelve = FixedOffset::east_opt(12 * 3600).expect("valid offset");
        assert_eq!(
            record.format_in(&plus_twelve),
            "12:00:00.000 wombat INFO Hello!"
        );
    }

    #[test]
    fn identical_fields_are_equal_with_equal_hashes() {
        let left = reference_record(None);
        let right = reference_record(None);
        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));

        let error = CapturedError::new("Throwable", "Error text");
        let left = reference_record(Some(error.clone()));
        let right = reference_record(Some(error));
        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[rstest]
    #[case::time(LogRecord::new(
        reference_time() + 1, "DummyName", Level::Info, Some(Message::from("Dummy text")), None,
    ))]
    #[case::origin(LogRecord::new(
        reference_time(), "OtherName", Level::Info, Some(Message::from("Dummy text")), None,
    ))]
    #[case::level(LogRecord::new(
        reference_time(), "DummyName", Level::Warn, Some(Message::from("Dummy text")), None,
    ))]
    #[case::message(LogRecord::new(
        reference_time(), "DummyName", Level::Info, Some(Message::from("Other text")), None,
    ))]
    #[case::absent_message(LogRecord::new(
        reference_time(), "DummyName", Level::Info, None, None,
    ))]
    #[case::error(LogRecord::new(
        reference_time(), "DummyName", Level::Info, Some(Message::from("Dummy text")),
        Some(CapturedError::new("Throwable", "Error text")),
    ))]
    fn changing_any_field_breaks_equality(#[case] other: LogRecord) {
        assert_ne!(reference_record(None), other);
    }

    #[test]
    fn captured_error_takes_the_concrete_type_name() {
        let captured = CapturedError::from_error(&DummyFailure);
        assert!(captured.kind().ends_with("DummyFailure"));
        assert_eq!(captured.message(), "dummy failure");
    }
}
