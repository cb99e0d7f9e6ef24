use std::time::Duration;

/// Fixed-period tick source driven by an external clock.
///
/// The first tick is due one full period after `start`. Missed periods are
/// reported together on the next poll.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Duration,
    armed: bool,
}

impl Interval {
    pub fn new(period: Duration, start: Duration) -> Self {
        Interval {
            period,
            next_due: start + period,
            armed: true,
        }
    }

    /// Due times of every tick that fell at or before `now`, oldest first
    pub fn poll(&mut self, now: Duration) -> Vec<Duration> {
        let mut ticks = Vec::new();
        if !self.armed || self.period.is_zero() {
            return ticks;
        }
        while self.next_due <= now {
            ticks.push(self.next_due);
            self.next_due += self.period;
        }
        ticks
    }

    /// Stops the interval; later polls report nothing
    pub fn cancel(&mut self) {
        self.armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_after_one_period() {
        let mut interval = Interval::new(Duration::from_secs(5), Duration::ZERO);
        assert!(interval.poll(Duration::from_millis(4999)).is_empty());
        assert_eq!(interval.poll(Duration::from_millis(5000)), vec![Duration::from_secs(5)]);
        assert!(interval.poll(Duration::from_millis(5001)).is_empty());
    }

    #[test]
    fn missed_periods_are_reported_together() {
        let mut interval = Interval::new(Duration::from_millis(200), Duration::from_millis(100));
        let ticks = interval.poll(Duration::from_millis(750));
        assert_eq!(
            ticks,
            vec![
                Duration::from_millis(300),
                Duration::from_millis(500),
                Duration::from_millis(700)
            ]
        );
    }

    #[test]
    fn cancelled_interval_never_ticks() {
        let mut interval = Interval::new(Duration::from_secs(1), Duration::ZERO);
        interval.cancel();
        assert!(interval.poll(Duration::from_secs(60)).is_empty());
    }
}
