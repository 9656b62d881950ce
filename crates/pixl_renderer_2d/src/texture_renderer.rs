use bytemuck::{Pod, Zeroable};
use derive_more::Constructor;
use pixl_graphics_hal::{
    buffer::{Buffer, BufferKind, BufferUsage},
    draw_params::DrawParameters,
    frame_buffer::FrameBuffer,
    quad::{QuadDraw, TextureBinding},
    shader::ShaderError,
    uniforms::Uniform,
    vertex::{AsVertexBindings, Vertex},
    Graphics,
};

use crate::{quad_index_buffer::QuadIndexBuffer, shaders};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Constructor, Zeroable, Pod, Vertex)]
struct BlitVertex {
    position: [f32; 2],
    tex_position: [f32; 2],
}

/// A quad covering the whole frame buffer in NDC. Textures rendered into a
/// frame buffer hold their top row at v = 1, so they are drawn with `flip_v`.
fn blit_vertices(flip_v: bool) -> [BlitVertex; 4] {
    let (top, bottom) = if flip_v { (1., 0.) } else { (0., 1.) };

    [
        BlitVertex::new([-1., 1.], [0., top]),
        BlitVertex::new([-1., -1.], [0., bottom]),
        BlitVertex::new([1., -1.], [1., bottom]),
        BlitVertex::new([1., 1.], [1., top]),
    ]
}

/// Source texture of a blit.
pub enum Source<'a, G: Graphics> {
    /// A texture uploaded from an image.
    Image(&'a G::Texture),
    /// A texture rendered into through a frame buffer.
    RenderTarget(&'a G::Texture),
}

/// Draws a texture over a whole frame buffer, either copied as is or
/// through a post process shader.
pub struct TextureRenderer<G: Graphics> {
    copy_shader: G::Shader,
    indices: QuadIndexBuffer<G>,
    upright: Buffer<G, BlitVertex>,
    flipped: Buffer<G, BlitVertex>,
    draw_parameters: DrawParameters,
}

impl<G: Graphics> TextureRenderer<G> {
    pub fn new(ctx: &G, indices: QuadIndexBuffer<G>) -> Result<Self, ShaderError> {
        Ok(Self {
            copy_shader: ctx.new_shader(&shaders::post_process(shaders::COPY_FRAGMENT))?,
            indices,
            upright: ctx.new_buffer(BufferKind::Vertex, BufferUsage::Static, &blit_vertices(false)),
            flipped: ctx.new_buffer(BufferKind::Vertex, BufferUsage::Static, &blit_vertices(true)),
            draw_parameters: DrawParameters::default(),
        })
    }

    /// Renders `source` into `fb`. A `shader` built with
    /// [shaders::post_process] replaces the plain copy.
    pub fn render(
        &self,
        fb: &G::FrameBuffer,
        source: Source<G>,
        shader: Option<&G::Shader>,
        uniforms: &[Uniform],
    ) {
        let (texture, vertices) = match source {
            Source::Image(texture) => (texture, &self.upright),
            Source::RenderTarget(texture) => (texture, &self.flipped),
        };

        fb.draw_quads(&QuadDraw {
            shader: shader.unwrap_or(&self.copy_shader),
            texture: TextureBinding {
                name: shaders::POST_PROCESS_SAMPLER,
                texture,
            },
            vertices: &[vertices.bindings()],
            indices: &self.indices,
            quads: 0..1,
            parameters: &self.draw_parameters,
            uniforms,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_blit_samples_top_row_at_top() {
        let vertices = blit_vertices(false);

        assert_eq!(vertices[0], BlitVertex::new([-1., 1.], [0., 0.]));
        assert_eq!(vertices[2], BlitVertex::new([1., -1.], [1., 1.]));
    }

    #[test]
    fn render_targets_are_flipped() {
        let upright = blit_vertices(false);
        let flipped = blit_vertices(true);

        for (u, f) in upright.iter().zip(&flipped) {
            assert_eq!(u.position, f.position);
            assert_eq!(u.tex_position[0], f.tex_position[0]);
            assert_eq!(u.tex_position[1], 1. - f.tex_position[1]);
        }
    }
}
