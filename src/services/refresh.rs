//! Periodic background work with an explicit start/stop lifecycle.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// A recurring task. The first tick fires immediately; a slow tick delays the
/// next one instead of queueing catch-up ticks.
///
/// `stop` lets an in-flight tick finish and guarantees no tick starts after it
/// returns. Dropping the handle also signals the task to stop.
pub struct RefreshTask {
    name: &'static str,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = stop_rx.changed() => break,
                    _ = interval.tick() => tick().await,
                }
            }

            tracing::debug!(task = name, "refresh task stopped");
        });

        tracing::info!(task = name, period_ms = period.as_millis() as u64, "refresh task started");

        Self {
            name,
            stop_tx,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(task = self.name, error = %e, "refresh task ended abnormally");
            }
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(period: Duration) -> (RefreshTask, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let task = RefreshTask::spawn("test", period, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (task, ticks)
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stopped() {
        let (task, ticks) = counting_task(Duration::from_secs(3));

        time::sleep(Duration::from_millis(9_500)).await;
        // t = 0, 3, 6, 9
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
        assert!(task.is_running());

        task.stop().await;
        let after_stop = ticks.load(Ordering::SeqCst);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_ticking() {
        let (task, ticks) = counting_task(Duration::from_secs(1));
        time::sleep(Duration::from_millis(1_500)).await;
        drop(task);

        tokio::task::yield_now().await;
        let after_drop = ticks.load(Ordering::SeqCst);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
    }
}
