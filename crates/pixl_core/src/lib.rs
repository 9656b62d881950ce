use std::cell::Cell;

use derive_more::{Constructor, Deref, Display};

pub mod config;
pub mod fixed_step;
pub mod frame_stats;
pub mod timer;

pub use config::PixlConfig;

/// Milliseconds on a monotonic clock.
#[derive(
    Constructor, Default, Clone, Copy, Deref, Display, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[display(fmt = "{}ms", _0)]
pub struct Ticks(pub u64);

impl Ticks {
    /// Time passed since `earlier`, zero if `earlier` is in the future.
    pub fn since(self, earlier: Ticks) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn after(self, ms: u64) -> Ticks {
        Ticks(self.0.saturating_add(ms))
    }
}

/// A source of monotonic time. Anything that advances over time takes
/// `Ticks` as an argument instead of reading a clock on its own.
pub trait Clock {
    fn ticks(&self) -> Ticks;
}

/// A clock that only moves when told to.
#[derive(Default, Debug)]
pub struct ManualClock(Cell<u64>);

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self(Cell::new(start))
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn ticks(&self) -> Ticks {
        Ticks(self.0.get())
    }
}

/// Time that passed since the previous frame in seconds.
#[derive(Default, Clone, Copy, Deref, Debug, PartialEq)]
pub struct Delta(pub f32);

/// Set when the application should leave its main loop.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit(bool);

impl Exit {
    pub fn request(&mut self) {
        self.0 = true;
    }

    pub fn is_requested(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_since_saturates() {
        assert_eq!(Ticks(250).since(Ticks(100)), 150);
        assert_eq!(Ticks(100).since(Ticks(250)), 0);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1000);
        clock.advance(250);
        assert_eq!(clock.ticks(), Ticks(1250));

        clock.set(10);
        assert_eq!(clock.ticks(), Ticks(10));

        clock.set(u64::MAX - 5);
        clock.advance(100);
        assert_eq!(clock.ticks(), Ticks(u64::MAX));
    }

    #[test]
    fn exit_is_sticky() {
        let mut exit = Exit::default();
        assert!(!exit.is_requested());

        exit.request();
        exit.request();
        assert!(exit.is_requested());
    }
}
