//! Frame request scheduling
//!
//! The engine never sleeps. After evaluating a frame it posts a delayed frame
//! request to a `FrameScheduler`; when the request comes due the host asks
//! the engine for the next frame. This keeps the whole animation on the host's
//! UI thread without spawning a thread per animation.
//!
//! `ManualScheduler` is the in-process implementation: it keeps pending
//! requests in a slot map and hands them back from `take_due()` once the time
//! source has reached their due time. Engines receive a weak
//! `ManualSchedulerHandle`, so a dropped scheduler turns every post into a
//! no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::clock::SharedTimeSource;

new_key_type! {
    /// Handle to a pending frame request
    pub struct FrameRequestId;
}

/// Receives "evaluate another frame after `delay`" requests
pub trait FrameScheduler: Send + Sync {
    /// Post a frame request; `None` when the scheduler is gone
    fn post_delayed(&self, delay: Duration) -> Option<FrameRequestId>;

    /// Drop a pending request if it has not fired yet
    fn cancel(&self, id: FrameRequestId);
}

/// Shared scheduler handle
pub type SharedScheduler = Arc<dyn FrameScheduler>;

/// Internal state of the manual scheduler
#[derive(Default)]
struct SchedulerInner {
    pending: SlotMap<FrameRequestId, Duration>,
    posted: u64,
}

impl SchedulerInner {
    fn post(&mut self, due: Duration) -> FrameRequestId {
        self.posted += 1;
        self.pending.insert(due)
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scheduler driven explicitly by the host loop
///
/// ```ignore
/// let clock = ManualClock::shared();
/// let scheduler = ManualScheduler::new(clock.clone());
/// let engine = RippleEngine::new(config, clock.clone(), scheduler.shared_handle());
///
/// loop {
///     clock.advance(Duration::from_millis(1));
///     for _ in scheduler.take_due() {
///         engine.tick()?;
///     }
/// }
/// ```
pub struct ManualScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    clock: SharedTimeSource,
}

impl ManualScheduler {
    pub fn new(clock: SharedTimeSource) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner::default())),
            clock,
        }
    }

    /// Get a weak handle for passing to engines
    pub fn handle(&self) -> ManualSchedulerHandle {
        ManualSchedulerHandle {
            inner: Arc::downgrade(&self.inner),
            clock: Arc::clone(&self.clock),
        }
    }

    /// Weak handle boxed as a `SharedScheduler`
    pub fn shared_handle(&self) -> SharedScheduler {
        Arc::new(self.handle())
    }

    /// Remove and return every request whose due time has passed, oldest first
    pub fn take_due(&self) -> Vec<FrameRequestId> {
        let now = self.clock.now();
        let mut inner = lock(&self.inner);
        let mut due: Vec<(FrameRequestId, Duration)> = inner
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, at)| (id, *at))
            .collect();
        due.sort_by_key(|(_, at)| *at);
        for (id, _) in &due {
            inner.pending.remove(*id);
        }
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Due time of the earliest pending request
    pub fn next_due(&self) -> Option<Duration> {
        lock(&self.inner).pending.values().copied().min()
    }

    /// Number of requests that have not fired yet
    pub fn pending_count(&self) -> usize {
        lock(&self.inner).pending.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Total requests ever posted
    pub fn posted_count(&self) -> u64 {
        lock(&self.inner).posted
    }

    /// Drop every pending request
    pub fn clear(&self) {
        lock(&self.inner).pending.clear();
    }
}

impl FrameScheduler for ManualScheduler {
    fn post_delayed(&self, delay: Duration) -> Option<FrameRequestId> {
        let due = self.clock.now() + delay;
        Some(lock(&self.inner).post(due))
    }

    fn cancel(&self, id: FrameRequestId) {
        lock(&self.inner).pending.remove(id);
    }
}

/// A weak handle to a `ManualScheduler`
///
/// It won't keep the scheduler alive.
#[derive(Clone)]
pub struct ManualSchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
    clock: SharedTimeSource,
}

impl ManualSchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl FrameScheduler for ManualSchedulerHandle {
    fn post_delayed(&self, delay: Duration) -> Option<FrameRequestId> {
        let due = self.clock.now() + delay;
        self.inner.upgrade().map(|inner| lock(&inner).post(due))
    }

    fn cancel(&self, id: FrameRequestId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).pending.remove(id);
        }
    }
}
