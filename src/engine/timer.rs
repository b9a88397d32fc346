use std::time::Duration;

use crate::utils::app_time::{AppInstant, remaining};

/// Repeating countdown driven by explicit timestamps.
///
/// The app polls it once per frame; tests feed synthetic instants.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Option<AppInstant>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start counting from `now` unless already running.
    pub fn start(&mut self, now: AppInstant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    /// Start a fresh full period from `now`, discarding any partial countdown.
    pub fn restart(&mut self, now: AppInstant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// True once per elapsed period. Missed periods collapse into a single firing.
    pub fn poll(&mut self, now: AppInstant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    pub fn time_left(&self, now: AppInstant) -> Option<Duration> {
        self.next_due.map(|due| remaining(due, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::app_time::now;

    #[test]
    fn fires_once_per_period() {
        let t0 = now();
        let mut timer = RepeatingTimer::new(Duration::from_secs(10));
        assert!(!timer.poll(t0 + Duration::from_secs(60)));

        timer.start(t0);
        assert!(!timer.poll(t0 + Duration::from_secs(9)));
        assert!(timer.poll(t0 + Duration::from_secs(10)));
        assert!(!timer.poll(t0 + Duration::from_secs(11)));
        assert!(timer.poll(t0 + Duration::from_secs(45)));
        assert!(!timer.poll(t0 + Duration::from_secs(54)));
    }

    #[test]
    fn start_does_not_reset_but_restart_does() {
        let t0 = now();
        let mut timer = RepeatingTimer::new(Duration::from_secs(10));
        timer.start(t0);
        timer.start(t0 + Duration::from_secs(8));
        assert!(timer.poll(t0 + Duration::from_secs(10)));

        timer.restart(t0 + Duration::from_secs(15));
        assert!(!timer.poll(t0 + Duration::from_secs(20)));
        assert_eq!(
            timer.time_left(t0 + Duration::from_secs(20)),
            Some(Duration::from_secs(5))
        );
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.time_left(t0), None);
    }
}
