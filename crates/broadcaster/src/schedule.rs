//! Scan and post timers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::NewsBot;

// `interval_at` panics on a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Stop handle of one ticker task.
///
/// Dropping it stops the ticker before its next tick. A tick already
/// running is never interrupted.
pub(crate) struct Ticker {
    _stop: watch::Sender<()>,
}

/// The live tickers. At most one of each.
#[derive(Default)]
pub(crate) struct Timers {
    scan: Option<Ticker>,
    post: Option<Ticker>,
}

impl Timers {
    fn cancel_all(&mut self) {
        self.scan = None;
        self.post = None;
    }
}

impl NewsBot {
    /// Restart the post timer with the current interval.
    ///
    /// Does nothing while the timers are disarmed. Returns whether a timer
    /// was restarted.
    pub async fn reset_post_timer(&self) -> bool {
        let mut timers = self.inner.timers.lock().await;
        if timers.post.take().is_none() {
            return false;
        }

        let period = self.inner.state.read().await.post_interval;
        timers.post = Some(self.spawn_post_timer(period));
        debug!(period = ?period, "Post timer reset");
        true
    }

    /// Whether the scan and post timers are running.
    pub async fn timers_armed(&self) -> bool {
        let timers = self.inner.timers.lock().await;
        timers.scan.is_some() && timers.post.is_some()
    }

    /// Replace both timers with fresh ones.
    pub(crate) async fn arm_timers(&self) {
        let mut timers = self.inner.timers.lock().await;
        timers.cancel_all();

        let post_period = self.inner.state.read().await.post_interval;
        let scan_period = self.inner.config.scan_interval;
        timers.scan = Some(self.spawn_ticker(scan_period, |bot| async move {
            bot.scan().await;
        }));
        timers.post = Some(self.spawn_post_timer(post_period));
        debug!(scan = ?scan_period, post = ?post_period, "Timers armed");
    }

    pub(crate) async fn cancel_timers(&self) {
        self.inner.timers.lock().await.cancel_all();
        debug!("Timers cancelled");
    }

    fn spawn_post_timer(&self, period: Duration) -> Ticker {
        self.spawn_ticker(period, |bot| async move {
            bot.post_next().await;
        })
    }

    /// Run `tick` every `period`, starting one period from now.
    ///
    /// The task holds a weak reference so it ends once the bot is dropped.
    /// Stopping only takes effect between ticks.
    fn spawn_ticker<F, Fut>(&self, period: Duration, tick: F) -> Ticker
    where
        F: Fn(NewsBot) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let weak = Arc::downgrade(&self.inner);
        let (stop_tx, mut stop_rx) = watch::channel(());

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {}
                }
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                tick(NewsBot { inner }).await;
            }
        });

        Ticker { _stop: stop_tx }
    }
}
