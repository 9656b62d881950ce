pub use sdl2;

mod events;
mod window;

pub use events::SdlEvents;
pub use window::{SdlWindow, SdlWindowBackend};

use pixl_core::{Clock, Ticks};

/// Milliseconds since SDL was initialized.
pub struct SdlClock(sdl2::TimerSubsystem);

impl SdlClock {
    pub fn new(timer: sdl2::TimerSubsystem) -> Self {
        Self(timer)
    }
}

impl Clock for SdlClock {
    fn ticks(&self) -> Ticks {
        Ticks(self.0.ticks() as u64)
    }
}
