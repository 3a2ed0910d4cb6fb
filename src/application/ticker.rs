//! Elapsed-seconds ticker

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Period of the recording clock
pub const TICK_PERIOD: StdDuration = StdDuration::from_secs(1);

/// A repeating background tick that counts elapsed periods.
///
/// The task is aborted on [`TickTimer::release`] or when the timer is
/// dropped, so a session can never leak a running tick.
#[derive(Debug)]
pub struct TickTimer {
    count: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    /// Spawn the tick task. Must be called from within a tokio runtime.
    pub fn start(period: StdDuration) -> Self {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        Self {
            count,
            handle: Some(handle),
        }
    }

    /// Periods elapsed since start
    pub fn elapsed(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the tick and return the final count. Safe to call twice.
    pub fn release(&mut self) -> u64 {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.elapsed()
    }

    #[cfg(test)]
    pub(crate) fn counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.count)
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn counts_whole_periods() {
        let timer = TickTimer::start(TICK_PERIOD);
        assert_eq!(timer.elapsed(), 0);

        sleep(StdDuration::from_millis(3500)).await;
        assert_eq!(timer.elapsed(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn release_freezes_the_count() {
        let mut timer = TickTimer::start(TICK_PERIOD);
        let counter = timer.counter();

        sleep(StdDuration::from_millis(2500)).await;
        assert_eq!(timer.release(), 2);
        assert!(!timer.is_running());

        sleep(StdDuration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(timer.release(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_the_task() {
        let timer = TickTimer::start(TICK_PERIOD);
        let counter = timer.counter();
        drop(timer);

        sleep(StdDuration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
