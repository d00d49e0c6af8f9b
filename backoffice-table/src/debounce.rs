//! Trailing-edge debouncing on the tokio timer.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delays a callback until calls stop arriving for a fixed interval.
///
/// Each [`call`](Debouncer::call) aborts the previously scheduled callback
/// and arms a new one, so at most one callback is pending at a time.
/// Dropping the debouncer cancels the pending callback.
///
/// Callbacks are scheduled on the current tokio runtime. Outside a runtime
/// there is no timer to wait on and the callback runs immediately.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// use backoffice_table::debounce::Debouncer;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let fired = Arc::new(AtomicUsize::new(0));
/// let debouncer = Debouncer::new(Duration::from_millis(300));
///
/// for _ in 0..3 {
///     let fired = fired.clone();
///     debouncer.call(move || {
///         fired.fetch_add(1, Ordering::SeqCst);
///     });
/// }
///
/// tokio::time::sleep(Duration::from_millis(400)).await;
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Returns the quiet interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `f` to run after the quiet interval, replacing any
    /// callback that has not fired yet.
    pub fn call<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        match Handle::try_current() {
            Ok(runtime) => {
                // Deadline is fixed now, not when the task is first polled.
                let deadline = Instant::now() + self.delay;
                *pending = Some(runtime.spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    f();
                }));
            }
            Err(_) => {
                drop(pending);
                log::warn!("No tokio runtime; running debounced callback immediately");
                f();
            }
        }
    }

    /// Cancels the pending callback. Returns `true` if one was pending.
    pub fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    /// Returns `true` while a scheduled callback has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
