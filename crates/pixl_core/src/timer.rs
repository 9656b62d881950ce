use crate::Ticks;

/// A one-shot interval timer.
///
/// The timer reports finished once it was started and at least `interval`
/// milliseconds passed since then. It keeps reporting finished until it is
/// stopped, restarted or given a new interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    interval: u64,
    started: Option<Ticks>,
}

impl Timer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            started: None,
        }
    }

    /// Changes the interval. The timer is stopped.
    pub fn set(&mut self, interval: u64) {
        self.interval = interval;
        self.started = None;
    }

    pub fn start(&mut self, now: Ticks) {
        self.started = Some(now);
    }

    pub fn stop(&mut self) {
        self.started = None;
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn is_finished(&self, now: Ticks) -> bool {
        self.started
            .map_or(false, |start| start.after(self.interval) <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_finished_until_started() {
        let timer = Timer::new(100);
        assert!(!timer.is_finished(Ticks(1_000_000)));
    }

    #[test]
    fn finishes_after_interval() {
        let mut timer = Timer::new(100);
        timer.start(Ticks(50));

        assert!(!timer.is_finished(Ticks(149)));
        assert!(timer.is_finished(Ticks(150)));
        assert!(timer.is_finished(Ticks(500)));
    }

    #[test]
    fn set_and_stop_reset_the_timer() {
        let mut timer = Timer::new(100);
        timer.start(Ticks(0));
        timer.set(10);
        assert!(!timer.is_running());
        assert!(!timer.is_finished(Ticks(50)));

        timer.start(Ticks(0));
        assert!(timer.is_finished(Ticks(10)));
        timer.stop();
        assert!(!timer.is_finished(Ticks(10)));
    }
}
