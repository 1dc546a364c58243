use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Repeating refresh timer owned by a game view.
///
/// Runs the task once right away and then every `period`. Dropping the
/// poller cancels it, so a torn-down view never leaves a timer behind.
pub struct Poller {
    cancel: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn<F, Fut>(period: Duration, mut task: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        tracing::debug!("Poll tick");
                        task().await;
                    }
                    _ = cancel_rx.changed() => {
                        return;
                    }
                }
            }
        });

        Self {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(true);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Cancel and wait for the task to wind down.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_poller(period: Duration) -> (Poller, Arc<AtomicUsize>) {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let poller = Poller::spawn(period, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (poller, ticks)
    }

    #[tokio::test]
    async fn ticks_immediately_then_repeats() {
        let (poller, ticks) = counting_poller(Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(ticks.load(Ordering::SeqCst) >= 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(ticks.load(Ordering::SeqCst) >= 3);

        poller.stop().await;
    }

    #[tokio::test]
    async fn stop_ends_ticking() {
        let (poller, ticks) = counting_poller(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(30)).await;

        poller.stop().await;
        let seen = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn drop_cancels() {
        let (poller, ticks) = counting_poller(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(30)).await;

        drop(poller);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let seen = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn cancel_marks_finished() {
        let (mut poller, _ticks) = counting_poller(Duration::from_secs(60));
        poller.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(poller.is_finished());
    }
}
