use std::{f32::consts::TAU, path::PathBuf, rc::Rc};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use pixl::{
    app::{Context, Game, SdlGl},
    assets::{load_png, load_text_file},
    canvas::{Font, Layer, Text},
    core::PixlConfig,
    graphics_hal::{
        frame_buffer::FrameBuffer,
        texture::{PixelFormat, Texture},
        Graphics, Rect, Rgba,
    },
    renderer_2d::{
        texture_from_image, QuadIndexBuffer, RenderTarget, Source, Sprite, SpriteRenderer,
        TextureRenderer,
    },
};

/// Composites a CPU layer and an orbiting sprite, blurs them in two passes
/// and prints the frame rate on top.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "demos/assets/tiles.png")]
    background: PathBuf,
    #[arg(long, default_value = "demos/assets/cats.png")]
    sprite: PathBuf,
    /// Fragment shaders of the two blur passes.
    #[arg(long, default_value = "demos/assets/blur_h.glsl")]
    first_pass: PathBuf,
    #[arg(long, default_value = "demos/assets/blur_v.glsl")]
    second_pass: PathBuf,
    /// TrueType font for the frame rate overlay. Without it no text is shown.
    #[arg(long)]
    font: Option<PathBuf>,
    /// YAML file with window settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Radians per second.
const ORBIT_SPEED: f32 = 1.5;
const ORBIT_RADIUS: f32 = 120.;

struct LayersDemo {
    sprites: SpriteRenderer<SdlGl>,
    textures: TextureRenderer<SdlGl>,

    background_texture: Rc<<SdlGl as Graphics>::Texture>,
    hud: Layer,
    hud_texture: Rc<<SdlGl as Graphics>::Texture>,
    fps: Option<Text>,

    sprite: Sprite<SdlGl>,
    angle: f32,
    obstacle: Rect<i32>,
    colliding: bool,

    first_pass: RenderTarget<SdlGl>,
    second_pass: RenderTarget<SdlGl>,
}

impl LayersDemo {
    fn new(ctx: &mut Context<SdlGl>, args: &Args) -> Result<Self> {
        let size = (ctx.config.width, ctx.config.height);
        let indices = QuadIndexBuffer::new(&ctx.graphics, 256);

        let tile = load_png(&args.background)?;
        let mut background = Layer::new(size);
        for y in (0..size.1 as i32).step_by(tile.size.h as usize * 2) {
            for x in (0..size.0 as i32).step_by(tile.size.w as usize * 2) {
                background.draw_image(&tile, x, y);
            }
        }
        background.fill_rect(Rect::new(20, 20, 200, 40), Rgba::new(0, 0, 0, 160));

        let background_texture =
            Rc::new(ctx.graphics.new_texture(PixelFormat::Rgba, size, None));
        background.upload(&*background_texture);

        let fps = match &args.font {
            Some(path) => Some(Text::new(Font::load(path)?, 16., (24, 24))),
            None => {
                warn!("no font given, the frame rate is not shown");
                None
            }
        };

        let first_pass = load_text_file(&args.first_pass)?;
        let second_pass = load_text_file(&args.second_pass)?;

        Ok(Self {
            sprites: SpriteRenderer::new(&ctx.graphics, indices.clone())?,
            textures: TextureRenderer::new(&ctx.graphics, indices)?,
            background_texture,
            hud: Layer::new(size),
            hud_texture: Rc::new(ctx.graphics.new_texture(PixelFormat::Rgba, size, None)),
            fps,
            sprite: Sprite::new(Rc::new(texture_from_image(
                &ctx.graphics,
                &load_png(&args.sprite)?,
            ))),
            angle: 0.,
            obstacle: Rect::new(size.0 as i32 / 2 + 80, size.1 as i32 / 2 - 40, 40, 80),
            colliding: false,
            first_pass: RenderTarget::new(&ctx.graphics, &ctx.config, Some(&first_pass))?,
            second_pass: RenderTarget::new(&ctx.graphics, &ctx.config, Some(&second_pass))?,
        })
    }

    /// Screen box of the sprite, orbiting the center of the screen.
    fn sprite_rect(&self, config: &PixlConfig) -> Rect<i32> {
        let size = self.sprite.texture.size();
        let (w, h) = (size.w as i32, size.h as i32);
        let cx = config.width as f32 / 2. + self.angle.cos() * ORBIT_RADIUS;
        let cy = config.height as f32 / 2. + self.angle.sin() * ORBIT_RADIUS;

        Rect::new(cx as i32 - w / 2, cy as i32 - h / 2, w, h)
    }
}

impl Game<SdlGl> for LayersDemo {
    fn update(&mut self, ctx: &mut Context<SdlGl>, dt: f32) {
        self.angle = (self.angle + ORBIT_SPEED * dt) % TAU;

        let colliding = self.sprite_rect(&ctx.config).intersects(&self.obstacle);
        if colliding != self.colliding {
            info!("sprite {} the obstacle", if colliding { "hit" } else { "left" });
            self.colliding = colliding;
        }
    }

    fn render(&mut self, ctx: &mut Context<SdlGl>) {
        let first = self.first_pass.frame_buffer();
        self.first_pass.clear(Rgba::BLACK);

        self.textures
            .render(first, Source::Image(&*self.background_texture), None, &[]);

        let rect = self.sprite_rect(&ctx.config);
        self.sprite.draw(&mut self.sprites, first, (rect.x as f32, rect.y as f32));

        let obstacle = if self.colliding {
            Rgba::new(255, 60, 60, 255)
        } else {
            Rgba::new(60, 255, 60, 255)
        };

        self.hud.clear();
        self.hud.fill_rect(self.obstacle, obstacle);
        if let Some(fps) = &self.fps {
            let text = format!(
                "FPS: {:.1}\nframes: {}",
                ctx.stats.average_fps, ctx.stats.frames
            );
            fps.print(&mut self.hud, &text);
        }
        self.hud.upload(&*self.hud_texture);

        self.second_pass.clear(Rgba::BLACK);
        self.first_pass.draw(&self.textures, self.second_pass.frame_buffer());

        let screen = ctx.screen();
        screen.clear(Rgba::BLACK);
        self.second_pass.draw(&self.textures, &screen);
        self.textures
            .render(&screen, Source::Image(&*self.hud_texture), None, &[]);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PixlConfig::load(path)?,
        None => PixlConfig::default(),
    };

    pixl::app::run(config, |ctx| LayersDemo::new(ctx, &args))
}
