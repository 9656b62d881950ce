use std::rc::Rc;

use pixl_core::PixlConfig;
use pixl_graphics_hal::{
    frame_buffer::FrameBuffer, texture::PixelFormat, uniforms::Uniform, Graphics, Rgba, Size,
};

use crate::{
    shaders,
    texture_renderer::{Source, TextureRenderer},
    Error,
};

/// An off-screen frame buffer the size of the screen, optionally drawn out
/// through a post process shader. Chaining targets gives multi-pass effects.
pub struct RenderTarget<G: Graphics> {
    texture: Rc<G::Texture>,
    frame_buffer: G::FrameBuffer,
    shader: Option<G::Shader>,
    uniforms: [Uniform; 2],
}

impl<G: Graphics> RenderTarget<G> {
    /// `post_process` is the source of a fragment shader sampling `sampler0`,
    /// which may read the screen size from the float uniforms `w` and `h`.
    pub fn new(ctx: &G, config: &PixlConfig, post_process: Option<&str>) -> Result<Self, Error> {
        let size = Size::new(config.width, config.height);
        let texture = Rc::new(ctx.new_texture(PixelFormat::Rgba, size, None));
        let frame_buffer = ctx.new_frame_buffer(texture.clone())?;

        let shader = match post_process {
            Some(fragment) => Some(ctx.new_shader(&shaders::post_process(fragment))?),
            None => None,
        };

        Ok(Self {
            texture,
            frame_buffer,
            shader,
            uniforms: [
                Uniform::float("w", config.width as f32),
                Uniform::float("h", config.height as f32),
            ],
        })
    }

    pub fn frame_buffer(&self) -> &G::FrameBuffer {
        &self.frame_buffer
    }

    pub fn texture(&self) -> &Rc<G::Texture> {
        &self.texture
    }

    pub fn clear(&self, color: Rgba<f32>) {
        self.frame_buffer.clear(color);
    }

    /// Draws the contents of this target over `target`, through the post
    /// process shader if there is one.
    pub fn draw(&self, renderer: &TextureRenderer<G>, target: &G::FrameBuffer) {
        let source = Source::RenderTarget(&*self.texture);

        match &self.shader {
            Some(shader) => renderer.render(target, source, Some(shader), &self.uniforms),
            None => renderer.render(target, source, None, &[]),
        }
    }
}
