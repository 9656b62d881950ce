use log::warn;

use crate::PixlConfig;

/// Accumulates frame time and hands it out in fixed update steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    max_steps: u32,
    accumulator: f64,
}

impl FixedStep {
    pub fn new(step_ms: f64, max_steps: u32) -> Self {
        assert!(step_ms > 0., "update step must be positive");

        Self {
            step: step_ms,
            max_steps: max_steps.max(1),
            accumulator: 0.,
        }
    }

    pub fn from_config(config: &PixlConfig) -> Self {
        Self::new(config.update_step_ms(), config.max_updates_per_frame)
    }

    /// Length of one update step in milliseconds.
    pub fn step_ms(&self) -> f64 {
        self.step
    }

    /// Adds the duration of the last frame and returns the number of
    /// updates to run. Time beyond `max_steps` updates is dropped.
    pub fn advance(&mut self, frame_ms: u64) -> u32 {
        self.accumulator += frame_ms as f64;

        let steps = (self.accumulator / self.step).floor();
        if steps > self.max_steps as f64 {
            warn!(
                "Falling behind, dropping {} update steps",
                steps as u64 - self.max_steps as u64
            );
            self.accumulator = 0.;
            return self.max_steps;
        }

        self.accumulator -= steps * self.step;
        steps as u32
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn splits_frame_time_into_steps() {
        let mut step = FixedStep::new(10., 10);

        assert_eq!(step.advance(25), 2);
        assert_approx_eq!(f64, step.alpha(), 0.5);
        assert_eq!(step.advance(5), 1);
        assert_approx_eq!(f64, step.alpha(), 0.);
        assert_eq!(step.advance(3), 0);
    }

    #[test]
    fn drops_time_beyond_limit() {
        let mut step = FixedStep::new(10., 4);

        assert_eq!(step.advance(1000), 4);
        assert_eq!(step.advance(0), 0);
    }

    #[test]
    fn uses_config_rate() {
        let step = FixedStep::from_config(&PixlConfig {
            update_rate: 50,
            ..Default::default()
        });

        assert_approx_eq!(f64, step.step_ms(), 20.);
    }
}
