//! The event-source seam.
//!
//! Captures do not pull events; the source pushes every emitted event to
//! every attached [`LogListener`], unfiltered. This module carries the
//! process-wide attach/detach registry and a bridge that forwards events
//! emitted through the standard `log` macros.

use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::message::Message;
use crate::record::CapturedError;

/// Receives every event emitted system-wide while attached.
///
/// The source must not pre-filter by origin; deciding what to keep is each
/// listener's own responsibility.
pub trait LogListener: Send + Sync {
    /// Called once per emitted event, synchronously, at emission time.
    fn receive(
        &self,
        time: i64,
        origin: &str,
        level: Level,
        message: Option<Message>,
        error: Option<CapturedError>,
    );
}

type Registry = RwLock<Vec<(u64, Arc<dyn LogListener>)>>;

static LISTENERS: Lazy<Registry> = Lazy::new(|| RwLock::new(Vec::new()));
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Attach a listener and return its detach handle.
pub(crate) fn attach(listener: Arc<dyn LogListener>) -> u64 {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    LISTENERS.write().push((id, listener));
    id
}

/// Detach the listener registered under `id`. Detaching an unknown id is a
/// no-op.
pub(crate) fn detach(id: u64) {
    LISTENERS.write().retain(|(entry, _)| *entry != id);
}

/// Deliver one event to every attached listener.
///
/// Custom event sources can call this directly; the `log` facade bridge
/// installed by [`init`] funnels into it as well. The registry lock is
/// released before any listener runs, so listeners may attach or detach
/// from within `receive` without deadlocking.
pub fn dispatch(
    time: i64,
    origin: &str,
    level: Level,
    message: Option<Message>,
    error: Option<CapturedError>,
) {
    let listeners: Vec<Arc<dyn LogListener>> = LISTENERS
        .read()
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect();
    for listener in listeners {
        listener.receive(time, origin, level, message.clone(), error.clone());
    }
}

struct FacadeBridge;

static BRIDGE: FacadeBridge = FacadeBridge;
static INSTALL: Once = Once::new();

impl Log for FacadeBridge {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        dispatch(
            Utc::now().timestamp_millis(),
            record.target(),
            record.level(),
            Some(Message::Text(record.args().to_string())),
            None,
        );
    }

    fn flush(&self) {}
}

/// Route events from the standard `log` macros to attached captures.
///
/// Safe to call from every test; only the first call installs the bridge.
/// If another global logger is already installed, events emitted through
/// the macros bypass the captures, but direct [`dispatch`] calls still
/// reach them.
pub fn init() {
    INSTALL.call_once(|| {
        if log::set_logger(&BRIDGE).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}
