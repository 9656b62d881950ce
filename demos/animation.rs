use std::{path::PathBuf, rc::Rc};

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use pixl::{
    app::{Context, Game, SdlGl},
    assets::load_png,
    core::{timer::Timer, PixlConfig},
    graphics_hal::{frame_buffer::FrameBuffer, Rgba},
    renderer_2d::{texture_from_image, AnimatedSprite, QuadIndexBuffer, SpriteRenderer},
    world_2d::{Animation, SpriteSheet},
};

/// Plays rows of a sprite sheet, one looping and one restarted whenever it finishes.
#[derive(Parser, Debug)]
struct Args {
    /// Sprite sheet image, one animation per row.
    #[arg(long, default_value = "demos/assets/cats.png")]
    sheet: PathBuf,
    /// Width and height of a sheet cell in pixels.
    #[arg(long, default_value_t = 23)]
    cell: u32,
    /// Milliseconds each frame is shown.
    #[arg(long, default_value_t = 100)]
    frame_duration: u64,
    /// YAML file with window settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct AnimationDemo {
    renderer: SpriteRenderer<SdlGl>,
    looping: AnimatedSprite<SdlGl>,
    one_shot: AnimatedSprite<SdlGl>,
    /// Pause between the end of the one-shot animation and its restart.
    pause: Timer,
}

impl AnimationDemo {
    fn new(ctx: &mut Context<SdlGl>, args: &Args) -> Result<Self> {
        let image = load_png(&args.sheet)?;
        let texture = Rc::new(texture_from_image(&ctx.graphics, &image));
        let sheet = SpriteSheet::new(image.size, (args.cell, args.cell))?;
        info!("{} animations of {} frames", sheet.rows(), sheet.columns());

        let now = ctx.now();
        let mut looping = Animation::new(sheet.clone(), args.frame_duration)?;
        looping.play(sheet.rows() - 1, true, now)?;

        let mut one_shot = Animation::new(sheet, args.frame_duration)?;
        one_shot.play(0, false, now)?;

        let indices = QuadIndexBuffer::new(&ctx.graphics, 64);

        Ok(Self {
            renderer: SpriteRenderer::new(&ctx.graphics, indices)?,
            looping: AnimatedSprite::new(looping, texture.clone()),
            one_shot: AnimatedSprite::new(one_shot, texture),
            pause: Timer::new(500),
        })
    }
}

impl Game<SdlGl> for AnimationDemo {
    fn render(&mut self, ctx: &mut Context<SdlGl>) {
        let now = ctx.now();
        let screen = ctx.screen();
        screen.clear(Rgba::new(0.1, 0.1, 0.15, 1.));

        self.looping.draw(&mut self.renderer, &screen, (100., 100.), now);

        let update = self
            .one_shot
            .draw(&mut self.renderer, &screen, (200., 100.), now);
        if update.finished {
            self.pause.start(now);
        }

        if self.pause.is_finished(now) {
            self.pause.stop();
            let row = (update.frame.row + 1) % self.one_shot.animation.sheet().rows();
            if let Err(e) = self.one_shot.animation.play(row, false, now) {
                error!("{e}");
                ctx.exit.request();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PixlConfig::load(path)?,
        None => PixlConfig::default(),
    };

    pixl::app::run(config, |ctx| AnimationDemo::new(ctx, &args))
}
