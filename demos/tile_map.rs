use std::{path::PathBuf, rc::Rc};

use anyhow::Result;
use clap::Parser;
use log::info;
use pixl::{
    app::{Context, Game, SdlGl},
    assets::{load_png, TileMapDescription},
    core::PixlConfig,
    graphics_hal::{frame_buffer::FrameBuffer, Point, Rgba},
    renderer_2d::{texture_from_image, QuadIndexBuffer, TileMapRenderer},
    world_2d::TileGeometry,
};

/// Draws a Tiled map every frame from geometry built once at start-up.
#[derive(Parser, Debug)]
struct Args {
    /// A `.tmx`, `.json` or `.tmj` map with one embedded tileset.
    #[arg(long, default_value = "demos/assets/map.tmx")]
    map: PathBuf,
    /// YAML file with window settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

struct TileMapDemo {
    map: TileMapRenderer<SdlGl>,
}

impl TileMapDemo {
    fn new(ctx: &mut Context<SdlGl>, args: &Args) -> Result<Self> {
        let map = TileMapDescription::load(&args.map)?.into_tile_map()?;
        let atlas = load_png(&map.atlas().source)?;
        let atlas = Rc::new(texture_from_image(&ctx.graphics, &atlas));

        let geometry = TileGeometry::build(&map, Point::new(0., 0.))?;
        info!(
            "{}x{} map, {} tiles drawn",
            map.size().w,
            map.size().h,
            geometry.quad_count()
        );

        let indices = QuadIndexBuffer::full(&ctx.graphics);
        Ok(Self {
            map: TileMapRenderer::new(&ctx.graphics, indices, atlas, &geometry)?,
        })
    }
}

impl Game<SdlGl> for TileMapDemo {
    fn render(&mut self, ctx: &mut Context<SdlGl>) {
        let screen = ctx.screen();
        screen.clear(Rgba::BLACK);
        self.map.draw(&screen);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PixlConfig::load(path)?,
        None => PixlConfig::default(),
    };

    pixl::app::run(config, |ctx| TileMapDemo::new(ctx, &args))
}
