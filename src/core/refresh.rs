use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

/// Shortest period the refresher accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Longest period the refresher accepts: one day.
pub const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// One refresh signal. `seq` starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub seq: u64,
}

/// Handle to a background timer that emits a [`Tick`] every period.
///
/// The timer only signals; the receiver owns all dashboard state. Dropping
/// the handle stops the timer.
#[derive(Debug)]
pub struct Refresher {
    handle: JoinHandle<()>,
    period: Duration,
}

impl Refresher {
    /// Start ticking. The first tick fires one full period from now.
    ///
    /// The period is clamped to `MIN_PERIOD..=MAX_PERIOD`. Must be called from
    /// within a tokio runtime.
    pub fn spawn(period: Duration) -> (Self, mpsc::Receiver<Tick>) {
        let period = period.clamp(MIN_PERIOD, MAX_PERIOD);
        let (tx, rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            let now = Instant::now();
            let start = now.checked_add(period).unwrap_or(now);
            let mut ticker = time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut seq = 0u64;

            loop {
                ticker.tick().await;
                seq += 1;
                match tx.try_send(Tick { seq }) {
                    Ok(()) => {}
                    // A tick is still pending; it already covers this one.
                    Err(TrySendError::Full(_)) => {
                        tracing::debug!(seq, "refresh tick coalesced");
                    }
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        });

        (Self { handle, period }, rx)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Stop the timer. Pending receivers see the channel close.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Refresher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
