//! Debounce and throttle helpers for presentation-level input.
//!
//! Used by the city search box, not by the fetch core: the orchestrator
//! itself never delays or drops actions.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Job = Box<dyn FnOnce() + Send>;

/// Trailing-edge debouncer: runs only the latest job, `delay` after the
/// last call. Must live on a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Option<Job>>>,
    timer: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: Arc::new(Mutex::new(None)), timer: None }
    }

    /// Schedule a job, replacing any job still waiting.
    pub fn call(&mut self, job: impl FnOnce() + Send + 'static) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        *self.pending.lock() = Some(Box::new(job));

        let pending = Arc::clone(&self.pending);
        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let job = pending.lock().take();
            if let Some(job) = job {
                job();
            }
        }));
    }

    /// Drop the waiting job, if any.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.pending.lock().take();
    }

    /// Run the waiting job now instead of after the delay.
    pub fn flush(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let job = self.pending.lock().take();
        if let Some(job) = job {
            job();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Leading-edge rate gate: admits at most one call per interval.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_admitted: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_admitted: None }
    }

    /// True if a call is admitted now; the caller runs its work only on
    /// `true`.
    pub fn admit(&mut self) -> bool {
        let now = Instant::now();
        match self.last_admitted {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_admitted = Some(now);
                true
            }
        }
    }
}
