//! Count-up session clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Increments once per second from the moment it starts. Stops on `stop` or drop.
#[derive(Debug)]
pub struct SessionClock {
    elapsed: Arc<AtomicU64>,
    ticker: JoinHandle<()>,
}

impl SessionClock {
    /// Must be called from within a tokio runtime.
    pub fn start() -> Self {
        let elapsed = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&elapsed);

        let ticker = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + TICK, TICK);
            loop {
                ticks.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        Self { elapsed, ticker }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        !self.ticker.is_finished()
    }

    pub fn stop(&self) {
        self.ticker.abort();
    }

    pub fn display(&self) -> String {
        format_clock(self.elapsed_secs())
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// `MM:SS`; minutes keep growing past 99.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
