//! Live per-deadline countdown.
//!
//! [`Countdown`] is the pure days/hours/minutes/seconds breakdown.
//! [`CountdownTimer`] recomputes it once a second on its own tokio task and
//! publishes it on a watch channel. Each timer owns its task and aborts it
//! when stopped or dropped.

use std::fmt;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

const TICK: StdDuration = StdDuration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Expired,
}

impl Countdown {
    /// Breakdown of `deadline - now` in whole seconds; [`Countdown::Expired`]
    /// once the deadline is reached. A sub-second remainder reads as all zeros.
    pub fn until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if deadline <= now {
            return Countdown::Expired;
        }
        let total = (deadline - now).num_seconds();

        Countdown::Remaining {
            days: total / 86_400,
            hours: (total / 3_600) % 24,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }
}

impl fmt::Display for Countdown {
    /// `03d 04h 05m 06s`; the day block is omitted when zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Expired => f.write_str("expired"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
            } => {
                if *days > 0 {
                    write!(f, "{days:02}d ")?;
                }
                write!(f, "{hours:02}h {minutes:02}m {seconds:02}s")
            }
        }
    }
}

/// A running once-per-second countdown for one deadline.
pub struct CountdownTimer {
    deadline: DateTime<Utc>,
    rx: watch::Receiver<Countdown>,
    handle: JoinHandle<()>,
}

impl CountdownTimer {
    /// Start ticking. The first value is computed immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(deadline: DateTime<Utc>) -> Self {
        let (tx, rx) = watch::channel(Countdown::until(deadline, Utc::now()));

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let countdown = Countdown::until(deadline, Utc::now());
                if tx.send(countdown).is_err() {
                    break;
                }
                if countdown.is_expired() {
                    break;
                }
            }
        });

        debug!(%deadline, "Countdown started");
        CountdownTimer { deadline, rx, handle }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Latest published breakdown.
    pub fn current(&self) -> Countdown {
        *self.rx.borrow()
    }

    /// A receiver for consumers that want to await each tick.
    pub fn subscribe(&self) -> watch::Receiver<Countdown> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        // Drop does the work.
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        debug!(deadline = %self.deadline, "Countdown stopped");
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn breaks_down_remaining_time() {
        let deadline = now() + Duration::days(3) + Duration::hours(4) + Duration::minutes(5) + Duration::seconds(6);
        assert_eq!(
            Countdown::until(deadline, now()),
            Countdown::Remaining {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
    }

    #[test]
    fn zero_or_negative_is_expired() {
        assert!(Countdown::until(now(), now()).is_expired());
        assert!(Countdown::until(now() - Duration::seconds(1), now()).is_expired());
    }

    #[test]
    fn sub_second_remainder_is_not_expired() {
        let countdown = Countdown::until(now() + Duration::milliseconds(500), now());
        assert_eq!(
            countdown,
            Countdown::Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            }
        );
        assert_eq!(countdown.to_string(), "00h 00m 00s");
        assert!(Countdown::until(now() - Duration::milliseconds(1), now()).is_expired());
    }

    #[test]
    fn display_omits_zero_days() {
        let short = Countdown::until(now() + Duration::minutes(90), now());
        assert_eq!(short.to_string(), "01h 30m 00s");

        let long = Countdown::until(now() + Duration::days(12) + Duration::seconds(7), now());
        assert_eq!(long.to_string(), "12d 00h 00m 07s");
        assert_eq!(Countdown::Expired.to_string(), "expired");
    }

    #[tokio::test]
    async fn timer_for_past_deadline_reports_expired_and_finishes() {
        let timer = CountdownTimer::start(Utc::now() - Duration::seconds(5));
        assert!(timer.current().is_expired());

        let mut rx = timer.subscribe();
        // First tick fires immediately, publishes Expired, and the task exits.
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_ticks_every_second() {
        let timer = CountdownTimer::start(Utc::now() + Duration::hours(1));
        let mut rx = timer.subscribe();

        rx.changed().await.unwrap();
        time::advance(TICK).await;
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_expired());
        assert!(timer.is_running());
    }

    #[tokio::test]
    async fn dropping_timer_aborts_task() {
        let timer = CountdownTimer::start(Utc::now() + Duration::hours(1));
        let mut rx = timer.subscribe();
        drop(timer);

        // Sender is dropped with the aborted task; the channel closes.
        while rx.changed().await.is_ok() {}
    }
}
