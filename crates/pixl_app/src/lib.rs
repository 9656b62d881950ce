use anyhow::Result;
use log::info;
use pixl_core::{
    fixed_step::FixedStep, frame_stats::FrameStats, Clock, Delta, Exit, PixlConfig, Ticks,
};
use pixl_graphics_gl::Gl;
use pixl_graphics_hal::Graphics;
use pixl_sdl::{SdlWindow, SdlWindowBackend};

/// Graphics of a window opened by [run].
pub type SdlGl = Gl<SdlWindowBackend>;

/// Everything a game needs from the application while it runs.
pub struct Context<G: Graphics> {
    pub config: PixlConfig,
    pub graphics: G,
    pub clock: Box<dyn Clock>,
    pub exit: Exit,
    pub stats: FrameStats,
    /// Duration of the previous frame.
    pub delta: Delta,
}

impl<G: Graphics> Context<G> {
    pub fn new(config: PixlConfig, graphics: G, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            graphics,
            clock,
            exit: Exit::default(),
            stats: FrameStats::default(),
            delta: Delta::default(),
        }
    }

    pub fn now(&self) -> Ticks {
        self.clock.ticks()
    }

    /// The frame buffer of the window.
    pub fn screen(&self) -> G::FrameBuffer {
        self.graphics.default_frame_buffer()
    }
}

pub trait Game<G: Graphics> {
    /// Runs at the fixed rate from the config. `dt` is the step in seconds.
    fn update(&mut self, _ctx: &mut Context<G>, _dt: f32) {}

    /// Runs once per frame, before the buffers are swapped.
    fn render(&mut self, ctx: &mut Context<G>);
}

/// Measures frame durations on a [Clock].
#[derive(Debug, Clone, Copy)]
struct FrameTimer {
    last: Ticks,
}

impl FrameTimer {
    fn new(now: Ticks) -> Self {
        Self { last: now }
    }

    /// Milliseconds since the previous call.
    fn tick(&mut self, now: Ticks) -> u64 {
        let elapsed = now.since(self.last);
        self.last = now;
        elapsed
    }
}

/// Runs one frame: fixed updates for the time that passed, then a render.
fn frame<G: Graphics>(
    ctx: &mut Context<G>,
    game: &mut impl Game<G>,
    timer: &mut FrameTimer,
    step: &mut FixedStep,
) {
    let frame_ms = timer.tick(ctx.now());
    ctx.delta = Delta(frame_ms as f32 / 1000.);

    let dt = (step.step_ms() / 1000.) as f32;
    for _ in 0..step.advance(frame_ms) {
        game.update(ctx, dt);
        if ctx.exit.is_requested() {
            return;
        }
    }

    game.render(ctx);
}

/// Opens the window, builds the game with `init` and runs it until the
/// window is closed, Escape is pressed or the game requests exit.
pub fn run<T, F>(config: PixlConfig, init: F) -> Result<()>
where
    T: Game<SdlGl>,
    F: FnOnce(&mut Context<SdlGl>) -> Result<T>,
{
    // Declared first so the GL context outlives every graphics object.
    let window = SdlWindow::new(&config)?;
    let mut events = window.events()?;
    let clock = window.clock()?;

    let graphics = Gl::new(window.backend());
    let mut ctx = Context::new(config, graphics, Box::new(clock));
    let mut game = init(&mut ctx)?;

    let mut step = FixedStep::from_config(&ctx.config);
    let mut timer = FrameTimer::new(ctx.now());
    info!("running at {} updates per second", ctx.config.update_rate);

    while !ctx.exit.is_requested() {
        events.poll(&mut ctx.exit);
        frame(&mut ctx, &mut game, &mut timer, &mut step);

        ctx.graphics.swap_buffers();
        ctx.stats.record(ctx.delta);
    }

    info!(
        "exiting after {} frames, {:.1} FPS on average",
        ctx.stats.frames, ctx.stats.average_fps
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use pixl_core::ManualClock;

    use super::*;

    #[test]
    fn frame_timer_measures_between_ticks() {
        let clock = ManualClock::new(500);
        let mut timer = FrameTimer::new(clock.ticks());

        clock.advance(16);
        assert_eq!(timer.tick(clock.ticks()), 16);
        clock.advance(17);
        assert_eq!(timer.tick(clock.ticks()), 17);
        assert_eq!(timer.tick(clock.ticks()), 0);
    }
}
