use pixl_assets::Image;
use pixl_graphics_hal::{
    frame_buffer::FrameBufferError, shader::ShaderError, texture::PixelFormat, Graphics,
};
use thiserror::Error;

pub mod quad_index_buffer;
pub mod render_target;
pub mod shaders;
pub mod sprite;
pub mod sprite_renderer;
pub mod texture_renderer;
pub mod tile_map_renderer;

pub use quad_index_buffer::QuadIndexBuffer;
pub use render_target::RenderTarget;
pub use sprite::{AnimatedSprite, Sprite};
pub use sprite_renderer::{SpriteBatch, SpriteRenderer};
pub use texture_renderer::{Source, TextureRenderer};
pub use tile_map_renderer::TileMapRenderer;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    FrameBuffer(#[from] FrameBufferError),
}

/// Uploads a decoded image as an RGBA texture.
pub fn texture_from_image<G: Graphics>(ctx: &G, image: &Image) -> G::Texture {
    ctx.new_texture(PixelFormat::Rgba, image.size, Some(&image.pixels))
}
