//! Progress reporting and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A sink for pipeline progress events.
///
/// Implementations must be fire-and-forget: the pipeline never waits on a
/// sink and never recovers from one, so sinks should not block or panic.
pub trait ProgressSink {
    /// Reports a progress step.
    ///
    /// `percent` increases monotonically from 0 to 100 over one pipeline
    /// run; `message` is a short human-readable stage description.
    fn report(&self, percent: u8, message: &str);
}

/// Adapter implementing [`ProgressSink`] for any closure.
///
/// # Example
///
/// ```
/// use spine_types::{FnProgressSink, ProgressSink};
///
/// let sink = FnProgressSink::new(|percent, message: &str| {
///     eprintln!("[{percent:3}%] {message}");
/// });
/// sink.report(50, "halfway");
/// ```
pub struct FnProgressSink<F: Fn(u8, &str)> {
    callback: F,
}

impl<F: Fn(u8, &str)> FnProgressSink<F> {
    /// Wraps a closure as a progress sink.
    pub const fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: Fn(u8, &str)> ProgressSink for FnProgressSink<F> {
    fn report(&self, percent: u8, message: &str) {
        (self.callback)(percent, message);
    }
}

/// Cooperative cancellation flag.
///
/// Cloned tokens share one flag. The pipeline checks the token between
/// major stages only; in-flight stage computation is allowed to finish
/// rather than being aborted mid-algorithm.
///
/// # Example
///
/// ```
/// use spine_types::CancelToken;
///
/// let token = CancelToken::new();
/// let shared = token.clone();
/// assert!(!token.is_cancelled());
///
/// shared.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn fn_sink_forwards_events() {
        let events = RefCell::new(Vec::new());
        let sink = FnProgressSink::new(|p, m: &str| {
            events.borrow_mut().push((p, m.to_string()));
        });

        sink.report(0, "start");
        sink.report(100, "done");

        let events = events.into_inner();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], (100, "done".to_string()));
    }

    #[test]
    fn cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(token.is_cancelled());
        // Cancelling again is harmless.
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn fresh_token_not_cancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }
}
