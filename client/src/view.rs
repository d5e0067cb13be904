//! Per-view bookkeeping for in-flight requests.
//!
//! A view may be closed while its requests are still outstanding, and rapid
//! interactions (pagination, filters) can have several requests in flight.
//! [`ViewScope`] hands a result back only when the view is still open and
//! the request is the most recently issued one; everything else is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::notify::{Notification, NotificationSink};

#[derive(Debug, Default)]
struct ScopeState {
    closed: AtomicBool,
    latest: AtomicU64,
    in_flight: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    state: Arc<ScopeState>,
}

/// Decrements the in-flight count on every exit path, including a dropped
/// future.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the view as gone. Later results are discarded.
    pub fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_alive(&self) -> bool {
        !self.state.closed.load(Ordering::SeqCst)
    }

    /// True while any request started through this scope is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Awaits `request` and returns its result if the view is still alive
    /// and no newer request was issued meanwhile.
    pub async fn run<T, F>(&self, request: F) -> Option<Result<T>>
    where
        F: Future<Output = Result<T>>,
    {
        let ticket = self.state.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = {
            let _guard = InFlight::enter(&self.state.in_flight);
            request.await
        };

        if !self.is_alive() {
            log::debug!("Discarding result for closed view (request #{})", ticket);
            return None;
        }

        if self.state.latest.load(Ordering::SeqCst) != ticket {
            log::debug!("Discarding superseded result (request #{})", ticket);
            return None;
        }

        Some(result)
    }

    /// Like [`ViewScope::run`], reporting failures to `sink` instead of
    /// returning them.
    pub async fn run_reporting<T, F>(&self, request: F, sink: &dyn NotificationSink) -> Option<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.run(request).await? {
            Ok(value) => Some(value),
            Err(err) => {
                sink.notify(Notification::from_error(&err));
                None
            }
        }
    }
}
