use pixl_core::Ticks;
use pixl_geometry::Rect;

use crate::{Error, Frame, SpriteSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    PlayingLooping,
}

/// Result of advancing an animation to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameUpdate {
    pub frame: Frame,
    /// True only for the update on which a one-shot animation stopped.
    pub finished: bool,
}

/// Picks the frame of a sprite sheet to show from elapsed time.
///
/// Each row of the sheet is an animation and each column is a frame shown
/// for `frame_duration` milliseconds. A looping animation cycles through its
/// row forever, a one-shot animation stops and holds its last frame.
#[derive(Debug, Clone)]
pub struct Animation {
    sheet: SpriteSheet,
    frame: Frame,
    playing: bool,
    looping: bool,
    frame_duration: u64,
    start: Ticks,
}

impl Animation {
    pub fn new(sheet: SpriteSheet, frame_duration: u64) -> Result<Self, Error> {
        if frame_duration == 0 {
            return Err(Error::ZeroFrameDuration);
        }

        Ok(Self {
            sheet,
            frame: Frame::default(),
            playing: false,
            looping: false,
            frame_duration,
            start: Ticks::default(),
        })
    }

    /// Starts `row` from its first frame at `now`.
    pub fn play(&mut self, row: u32, looping: bool, now: Ticks) -> Result<(), Error> {
        let rows = self.sheet.rows();
        if row >= rows {
            return Err(Error::RowOutOfRange { row, rows });
        }

        self.frame = Frame::new(row, 0);
        self.playing = true;
        self.looping = looping;
        self.start = now;
        Ok(())
    }

    pub fn set_speed(&mut self, frame_duration: u64) -> Result<(), Error> {
        if frame_duration == 0 {
            return Err(Error::ZeroFrameDuration);
        }

        self.frame_duration = frame_duration;
        Ok(())
    }

    /// Recomputes the current frame. Does nothing unless playing.
    pub fn update(&mut self, now: Ticks) -> FrameUpdate {
        let mut finished = false;

        if self.playing {
            let frames = self.sheet.columns() as u64;
            let raw = now.since(self.start) / self.frame_duration;

            if self.looping {
                self.frame.column = (raw % frames) as u32;
            } else {
                self.frame.column = raw.min(frames - 1) as u32;
                if raw >= frames {
                    self.playing = false;
                    finished = true;
                }
            }
        }

        FrameUpdate {
            frame: self.frame,
            finished,
        }
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn frame_duration(&self) -> u64 {
        self.frame_duration
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn state(&self) -> PlaybackState {
        match (self.playing, self.looping) {
            (false, _) => PlaybackState::Stopped,
            (true, false) => PlaybackState::Playing,
            (true, true) => PlaybackState::PlayingLooping,
        }
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Texture coordinates of the current frame.
    pub fn uv_rect(&self) -> Rect<f32> {
        self.sheet.uv_rect(self.frame)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::ErrorKind;

    const T0: Ticks = Ticks(10_000);

    fn cats() -> Animation {
        let sheet = SpriteSheet::new((92, 23 * 4), (23, 23)).unwrap();
        Animation::new(sheet, 100).unwrap()
    }

    #[test]
    fn starts_stopped() {
        let mut animation = cats();

        assert_eq!(animation.state(), PlaybackState::Stopped);
        assert_eq!(animation.frame(), Frame::new(0, 0));

        let update = animation.update(Ticks(5_000));
        assert_eq!(update.frame, Frame::new(0, 0));
        assert!(!update.finished);
    }

    #[test]
    fn one_shot_scenario() {
        let sheet = SpriteSheet::new((92, 23), (23, 23)).unwrap();
        let mut animation = Animation::new(sheet, 100).unwrap();
        animation.play(0, false, T0).unwrap();

        let update = animation.update(T0.after(250));
        assert_eq!(update.frame.column, 2);
        assert!(animation.is_playing());
        assert!(!update.finished);

        let update = animation.update(T0.after(500));
        assert_eq!(update.frame.column, 3);
        assert!(!animation.is_playing());
        assert!(update.finished);
        assert_eq!(animation.state(), PlaybackState::Stopped);
    }

    #[test]
    fn finished_is_reported_once() {
        let mut animation = cats();
        animation.play(1, false, T0).unwrap();

        assert!(animation.update(T0.after(400)).finished);

        let update = animation.update(T0.after(900));
        assert!(!update.finished);
        assert_eq!(update.frame, Frame::new(1, 3));
    }

    #[test]
    fn one_shot_pins_last_column() {
        let mut animation = cats();
        animation.play(2, false, T0).unwrap();

        for elapsed in (0..2_000).step_by(37) {
            let frame = animation.update(T0.after(elapsed)).frame;
            let raw = elapsed / 100;
            assert_eq!(frame.column as u64, raw.min(3));
            assert_eq!(animation.is_playing(), raw < 4);
            if raw >= 4 {
                break;
            }
        }
    }

    #[test]
    fn looping_wraps_around() {
        let mut animation = cats();
        animation.play(3, true, T0).unwrap();
        assert_eq!(animation.state(), PlaybackState::PlayingLooping);

        for elapsed in (0..5_000).step_by(23) {
            let frame = animation.update(T0.after(elapsed)).frame;
            assert_eq!(frame.row, 3);
            assert_eq!(frame.column as u64, (elapsed / 100) % 4);
            assert!(animation.is_playing());
        }
    }

    #[test]
    fn play_restarts_from_first_column() {
        let mut animation = cats();
        animation.play(0, true, T0).unwrap();
        animation.update(T0.after(250));

        animation.play(1, false, T0.after(300)).unwrap();
        assert_eq!(animation.frame(), Frame::new(1, 0));
        assert_eq!(animation.update(T0.after(399)).frame.column, 0);
        assert_eq!(animation.update(T0.after(400)).frame.column, 1);
    }

    #[test]
    fn clock_going_backwards_shows_first_frame() {
        let mut animation = cats();
        animation.play(0, true, T0).unwrap();

        assert_eq!(animation.update(Ticks(0)).frame.column, 0);
    }

    #[test]
    fn play_rejects_missing_row() {
        let mut animation = cats();
        animation.play(0, true, T0).unwrap();

        let error = animation.play(4, false, T0).unwrap_err();
        assert_eq!(error, Error::RowOutOfRange { row: 4, rows: 4 });
        assert_eq!(error.kind(), ErrorKind::OutOfRange);
        assert_eq!(animation.state(), PlaybackState::PlayingLooping);
        assert_eq!(animation.frame().row, 0);
    }

    #[test]
    fn zero_speed_is_rejected() {
        let mut animation = cats();

        let error = animation.set_speed(0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(animation.frame_duration(), 100);

        animation.set_speed(50).unwrap();
        assert_eq!(animation.frame_duration(), 50);

        let sheet = SpriteSheet::new((92, 23), (23, 23)).unwrap();
        assert_eq!(Animation::new(sheet, 0).unwrap_err(), Error::ZeroFrameDuration);
    }

    #[test]
    fn speed_change_applies_to_running_animation() {
        let mut animation = cats();
        animation.play(0, true, T0).unwrap();
        animation.set_speed(50).unwrap();

        assert_eq!(animation.update(T0.after(150)).frame.column, 3);
    }

    #[test]
    fn uv_rect_follows_frame() {
        let mut animation = cats();
        animation.play(2, true, T0).unwrap();
        animation.update(T0.after(100));

        let uv = animation.uv_rect();
        assert_approx_eq!(f32, uv.x, 0.25);
        assert_approx_eq!(f32, uv.y, 0.5);
        assert_approx_eq!(f32, uv.w, 0.25);
        assert_approx_eq!(f32, uv.h, 0.25);
    }
}
