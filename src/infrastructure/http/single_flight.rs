use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

/// Runs at most one instance of an operation at a time and lets callers that
/// raced it share its outcome.
///
/// Callers read [`SingleFlight::epoch`] before doing the work that may need
/// the operation (e.g. before sending a request that may come back 401).
/// When they later call [`SingleFlight::run`] with that epoch:
/// - if no run finished since, they run the operation themselves (anyone
///   arriving meanwhile queues on the lock);
/// - otherwise a run already happened after their request went out, and they
///   get that run's outcome without issuing another.
pub struct SingleFlight<T: Clone> {
    epoch: AtomicU64,
    state: Mutex<Flight<T>>,
}

struct Flight<T> {
    epoch: u64,
    last: Option<T>,
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        SingleFlight {
            epoch: AtomicU64::new(0),
            state: Mutex::new(Flight { epoch: 0, last: None }),
        }
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub async fn run<F, Fut>(&self, seen_epoch: u64, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut flight = self.state.lock().await;

        if flight.epoch != seen_epoch {
            if let Some(outcome) = flight.last.clone() {
                return outcome;
            }
        }

        let outcome = operation().await;

        flight.epoch += 1;
        flight.last = Some(outcome.clone());
        self.epoch.store(flight.epoch, Ordering::Release);

        outcome
    }
}
