//! Trailing-edge debounce for the search query.
//!
//! A [`Debouncer`] holds the last *stabilized* value. Each [`Debouncer::set`]
//! restarts a single timer; only when the timer elapses without another
//! `set` does the pending value become the stabilized one. Intermediate
//! values are dropped.
//!
//! State machine: `Idle → Pending → Idle`, with `Disposed` terminal. Every
//! timer carries the generation it was started with and publishes only if
//! that generation is still current, checked under the same lock that
//! `set`, `cancel`, `flush` and `dispose` take. A superseded or disposed
//! timer is therefore inert even if it wakes before its task is aborted.
//!
//! Timers run on the ambient tokio runtime, which must have the time driver
//! enabled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default quiet period for search input.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(180);

/// Lifecycle of a debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer pending; the stabilized value is current.
    Idle,
    /// A timer is pending for the most recent value.
    Pending,
    /// Torn down. Further input is ignored and nothing is published.
    Disposed,
}

#[derive(Debug)]
struct Slot {
    state: DebounceState,
    generation: u64,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Debounces a rapidly changing value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    output: Arc<watch::Sender<T>>,
    slot: Arc<Mutex<Slot>>,
    timer: Option<JoinHandle<()>>,
    pending: Option<T>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle debouncer whose stabilized value starts as `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (output, _) = watch::channel(initial);
        Self {
            delay,
            output: Arc::new(output),
            slot: Arc::new(Mutex::new(Slot {
                state: DebounceState::Idle,
                generation: 0,
            })),
            timer: None,
            pending: None,
        }
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState {
        lock(&self.slot).state
    }

    /// The current stabilized value.
    pub fn value(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified each time the stabilized value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    /// Records a new input value and restarts the timer.
    ///
    /// Must be called from within a tokio runtime. Ignored once disposed.
    pub fn set(&mut self, value: T) {
        let generation = {
            let mut slot = lock(&self.slot);
            if slot.state == DebounceState::Disposed {
                return;
            }
            slot.generation += 1;
            slot.state = DebounceState::Pending;
            slot.generation
        };
        self.abort_timer();
        self.pending = Some(value.clone());

        let delay = self.delay;
        let slot = Arc::clone(&self.slot);
        let output = Arc::clone(&self.output);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&slot);
            if slot.state == DebounceState::Pending && slot.generation == generation {
                slot.state = DebounceState::Idle;
                output.send_replace(value);
            }
        }));
    }

    /// Drops the pending value without publishing it.
    ///
    /// Returns `true` if a value was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = {
            let mut slot = lock(&self.slot);
            let was_pending = slot.state == DebounceState::Pending;
            if was_pending {
                slot.generation += 1;
                slot.state = DebounceState::Idle;
            }
            was_pending
        };
        self.abort_timer();
        self.pending = None;
        was_pending
    }

    /// Publishes the pending value now instead of waiting for the timer.
    ///
    /// Returns `true` if a value was pending.
    pub fn flush(&mut self) -> bool {
        let flushed = {
            let mut slot = lock(&self.slot);
            if slot.state == DebounceState::Pending {
                slot.generation += 1;
                slot.state = DebounceState::Idle;
                if let Some(value) = self.pending.take() {
                    self.output.send_replace(value);
                }
                true
            } else {
                false
            }
        };
        self.abort_timer();
        self.pending = None;
        flushed
    }

    /// Tears the debouncer down. Also run on drop.
    pub fn dispose(&mut self) {
        self.teardown();
        self.pending = None;
    }
}

impl<T> Debouncer<T> {
    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn teardown(&mut self) {
        {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.state = DebounceState::Disposed;
        }
        self.abort_timer();
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
