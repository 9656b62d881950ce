use pixl_core::Exit;
use sdl2::{event::Event, keyboard::Keycode};

pub struct SdlEvents(sdl2::EventPump);

impl SdlEvents {
    pub fn new(pump: sdl2::EventPump) -> Self {
        Self(pump)
    }

    /// Drains pending events. Closing the window or pressing Escape requests
    /// exit, everything else is dropped.
    pub fn poll(&mut self, exit: &mut Exit) {
        for event in self.0.poll_iter() {
            if requests_exit(&event) {
                exit.request();
            }
        }
    }
}

fn requests_exit(event: &Event) -> bool {
    matches!(
        event,
        Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            }
    )
}
