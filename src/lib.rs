//! In-memory log capture for test assertions.
//!
//! This library lets a test assert "a message of severity X was logged"
//! without coupling to the production logging sink. A [`LogCapture`]
//! attaches to the process-wide event source when created, stores every
//! event whose origin passes its filter as an immutable [`LogRecord`], and
//! exposes query helpers over level, exact message, and substring match.
//! Closing the capture (explicitly or by drop) detaches it, so captured
//! state is strictly bounded to the enclosing scope.
//!
//! Events reach captures in two ways: through [`init`], which installs a
//! bridge from the standard `log` macros, or through [`dispatch`] for
//! custom sources that carry timestamps and error values of their own.
//!
//! # Examples
//!
//! ```
//! use log_capture::{Level, LogCapture, Message};
//!
//! let capture = LogCapture::for_origin("accounts");
//! capture.receive(
//!     1_718_195_696_789,
//!     "accounts",
//!     Level::Info,
//!     Some(Message::from("Account created")),
//!     None,
//! );
//! assert!(capture.has_info("Account created"));
//! assert!(capture.has_info_containing("created"));
//! assert!(!capture.has_error("Account created"));
//! capture.close();
//! ```

pub mod capture;
pub mod cursor;
pub mod error;
pub mod listener;
pub mod matcher;
pub mod message;
pub mod record;

pub use capture::LogCapture;
pub use cursor::Cursor;
pub use error::ListViewError;
pub use listener::{LogListener, dispatch, init};
pub use matcher::{ExactMatcher, Matcher, WildcardMatcher};
pub use message::Message;
pub use record::{CapturedError, LogRecord};

/// Severity levels, re-exported from the `log` facade.
pub use log::Level;
