use log::debug;

use crate::Delta;

#[derive(Default, Debug, Clone)]
pub struct FrameStats {
    pub frames: u64,
    pub average_fps: f32,
    fps_cache: u64,
    fps_time: f64,
}

impl FrameStats {
    /// Records a finished frame. The average is refreshed about once a second.
    pub fn record(&mut self, delta: Delta) {
        self.fps_cache += 1;
        self.fps_time += *delta as f64;
        if self.fps_time >= 1f64 {
            self.average_fps = (self.fps_cache as f64 / self.fps_time) as f32;

            debug!(
                "FPS: {}, frames: {}, time: {}, lastDelta: {}",
                self.average_fps, self.fps_cache, self.fps_time, *delta
            );

            self.fps_cache = 0;
            self.fps_time = 0f64;
        }

        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn averages_over_a_second() {
        let mut stats = FrameStats::default();
        for _ in 0..39 {
            stats.record(Delta(0.025));
        }
        assert_eq!(stats.average_fps, 0.);

        stats.record(Delta(0.025));
        assert_eq!(stats.frames, 40);
        assert_approx_eq!(f32, stats.average_fps, 40., epsilon = 0.01);
    }
}
