//! Scripted host capabilities for tests.
//!
//! Available in unit tests and to other crates through the `mock` feature.

use std::future::{self, Future};
use std::sync::{Mutex, PoisonError, RwLock};
use std::task::{Poll, Waker};
use std::time::Duration;

use crate::host::{
    Clipboard, ClipboardError, KeyValueStore, Region, RenderListener, StoreError, Timer,
};

/// Clipboard that accepts or rejects every write.
#[derive(Debug)]
pub struct ScriptedClipboard {
    accept: bool,
    writes: RwLock<Vec<String>>,
}

impl ScriptedClipboard {
    /// Clipboard where every write succeeds.
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            accept: true,
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Clipboard where every write is denied.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            accept: false,
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Text successfully written, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clipboard for ScriptedClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> {
        let result = if self.accept {
            self.writes
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .push(text.to_owned());
            Ok(())
        } else {
            Err(ClipboardError::PermissionDenied)
        };
        future::ready(result)
    }
}

/// Timer whose sleeps complete immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstantTimer;

impl Timer for InstantTimer {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> {
        future::ready(())
    }
}

#[derive(Debug, Default)]
struct ManualTimerState {
    fired: bool,
    requested: Vec<Duration>,
    wakers: Vec<Waker>,
}

/// Timer whose sleeps stay pending until [`fire_all`](Self::fire_all).
#[derive(Debug, Default)]
pub struct ManualTimer {
    state: Mutex<ManualTimerState>,
}

impl ManualTimer {
    /// Create a timer with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations passed to `sleep`, in call order.
    #[must_use]
    pub fn requested(&self) -> Vec<Duration> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requested
            .clone()
    }

    /// Complete every sleep, pending or future.
    pub fn fire_all(&self) {
        let wakers = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.fired = true;
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }
}

impl Timer for ManualTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requested
            .push(duration);
        future::poll_fn(move |cx| {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.fired {
                Poll::Ready(())
            } else {
                state.wakers.push(cx.waker().clone());
                Poll::Pending
            }
        })
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_owned()))
    }
}

/// Listener recording every render-complete notification.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: RwLock<Vec<Region>>,
}

impl RecordingListener {
    /// Create an empty listener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions notified so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<Region> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderListener for RecordingListener {
    fn render_complete(&self, region: Region) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(region);
    }
}
