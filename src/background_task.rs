use std::future::Future;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, sleep, Duration, MissedTickBehavior},
};

/// Handle to a fixed-interval polling task.
///
/// Dropping the handle cancels the task, so a poller lives exactly as long as
/// the view that owns it. A tick that is still awaiting its fetch when the
/// task is cancelled is dropped and its result never observed.
pub struct PollTask {
    cancel: watch::Sender<bool>,
    join: Option<JoinHandle<()>>,
}

impl PollTask {
    /// Spawns `tick` immediately and then once every `period`.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel, mut cancelled) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(task = name, ?period, "Poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.changed() => break,
                    _ = async {
                        ticker.tick().await;
                        tick().await;
                    } => {}
                }
            }

            tracing::debug!(task = name, "Poller stopped");
        });

        PollTask {
            cancel,
            join: Some(join),
        }
    }

    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Cancels and waits for the task to wind down.
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                tracing::error!("Poller task failed: {}", e);
            }
        }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Outcome of [`poll_bounded`].
#[derive(Debug, Clone, PartialEq)]
pub enum BoundedPoll<T> {
    /// A fetch returned a terminal value.
    Completed { value: T, attempts: u32 },
    /// Every attempt came back non-terminal (or failed).
    Exhausted { attempts: u32, last: Option<T> },
}

impl<T> BoundedPoll<T> {
    pub fn attempts(&self) -> u32 {
        match self {
            BoundedPoll::Completed { attempts, .. } | BoundedPoll::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Waits one `period`, fetches, and repeats until `is_terminal` accepts a
/// value or `max_attempts` fetches have been made. Fetch errors count as an
/// attempt and polling carries on.
pub async fn poll_bounded<T, E, F, Fut, P>(
    period: Duration,
    max_attempts: u32,
    mut fetch: F,
    is_terminal: P,
) -> BoundedPoll<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&T) -> bool,
{
    let mut last = None;

    for attempt in 1..=max_attempts {
        sleep(period).await;

        match fetch().await {
            Ok(value) if is_terminal(&value) => {
                return BoundedPoll::Completed { value, attempts: attempt };
            }
            Ok(value) => last = Some(value),
            Err(e) => tracing::warn!(attempt, "Status poll failed: {}", e),
        }
    }

    tracing::warn!(max_attempts, "Gave up polling without a terminal status");
    BoundedPoll::Exhausted {
        attempts: max_attempts,
        last,
    }
}
