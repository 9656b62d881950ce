use std::iter::repeat_with;

use bytemuck::{Pod, Zeroable};
use pixl_graphics_hal::{
    buffer::{Buffer, BufferKind, BufferUsage},
    draw_params::DrawParameters,
    frame_buffer::FrameBuffer,
    quad::{QuadDraw, TextureBinding, VERTICES_PER_QUAD},
    shader::ShaderError,
    texture::Texture,
    uniforms::Uniform,
    vertex::{AsVertexBindings, Vertex},
    Graphics, Point, Rect, Size,
};

use crate::{quad_index_buffer::QuadIndexBuffer, shaders};

/// Quads collected before a batch is forced to draw.
const BATCH_QUADS: usize = 4096;
/// Vertex buffers used in turn, so a flush does not wait for the previous draw.
const BATCH_BUFFERS: usize = 2;

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Zeroable, Pod, Vertex)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_position: [f32; 2],
}

/// The four vertices of a quad covering `dest` in pixels and `uv` in texture space.
pub fn sprite_quad(dest: Rect<f32>, uv: Rect<f32>) -> [SpriteVertex; 4] {
    let positions = dest.points();
    let tex_positions = uv.points();

    [0, 1, 2, 3].map(|i| SpriteVertex {
        position: positions[i].into(),
        tex_position: tex_positions[i].into(),
    })
}

/// Draws textured quads in pixel coordinates, batching them into few draw calls.
pub struct SpriteRenderer<G: Graphics> {
    shader: G::Shader,
    indices: QuadIndexBuffer<G>,
    unflushed: Vec<SpriteVertex>,
    /// Vertices a single flush can hold.
    capacity: usize,
    vertices: Vec<Buffer<G, SpriteVertex>>,
    current_buffer: usize,
    draw_parameters: DrawParameters,
}

impl<G: Graphics> SpriteRenderer<G> {
    pub fn new(ctx: &G, indices: QuadIndexBuffer<G>) -> Result<Self, ShaderError> {
        let capacity = BATCH_QUADS.min(indices.quads()).max(1) * VERTICES_PER_QUAD;

        let vertices = repeat_with(|| {
            ctx.new_buffer(BufferKind::Vertex, BufferUsage::Stream, capacity)
        })
        .take(BATCH_BUFFERS)
        .collect();

        Ok(Self {
            shader: ctx.new_shader(&shaders::SPRITE)?,
            indices,
            unflushed: Vec::with_capacity(capacity),
            capacity,
            vertices,
            current_buffer: 0,
            draw_parameters: DrawParameters::default(),
        })
    }

    /// Starts collecting quads textured with `texture` for `fb`.
    /// Everything collected is drawn when the batch is dropped.
    pub fn start_batch<'a>(
        &'a mut self,
        fb: &'a G::FrameBuffer,
        texture: &'a G::Texture,
    ) -> SpriteBatch<'a, G> {
        SpriteBatch {
            fb,
            texture,
            renderer: self,
        }
    }
}

pub struct SpriteBatch<'a, G: Graphics> {
    fb: &'a G::FrameBuffer,
    texture: &'a G::Texture,
    renderer: &'a mut SpriteRenderer<G>,
}

impl<'a, G: Graphics> Drop for SpriteBatch<'a, G> {
    fn drop(&mut self) {
        self.flush();
    }
}

impl<'a, G: Graphics> SpriteBatch<'a, G> {
    pub fn texture(&self) -> &G::Texture {
        self.texture
    }

    /// Draws the `uv` region of the texture stretched over `dest`.
    pub fn draw_region(&mut self, dest: Rect<f32>, uv: Rect<f32>) {
        if self.renderer.unflushed.len() + VERTICES_PER_QUAD > self.renderer.capacity {
            self.flush();
        }

        self.renderer
            .unflushed
            .extend_from_slice(&sprite_quad(dest, uv));
    }

    /// Draws the `uv` region of the texture with its top-left corner at
    /// `position`, at its size in pixels.
    pub fn draw(&mut self, position: Point<f32>, uv: Rect<f32>) {
        let size = self.texture.size();
        let dest = Rect::new(
            position.x,
            position.y,
            uv.w * size.w as f32,
            uv.h * size.h as f32,
        );

        self.draw_region(dest, uv);
    }

    /// Draws the whole texture with its top-left corner at `position`.
    pub fn draw_texture(&mut self, position: Point<f32>) {
        let Size { w, h } = self.texture.size();
        self.draw_region(
            Rect::new(position.x, position.y, w as f32, h as f32),
            Rect::new(0., 0., 1., 1.),
        );
    }

    fn flush(&mut self) {
        let renderer = &mut *self.renderer;
        if renderer.unflushed.is_empty() {
            return;
        }

        let vertices = &renderer.vertices[renderer.current_buffer];
        vertices.write(0, &renderer.unflushed);

        let size = self.fb.size();
        self.fb.draw_quads(&QuadDraw {
            shader: &renderer.shader,
            texture: TextureBinding {
                name: shaders::SPRITE_SAMPLER,
                texture: self.texture,
            },
            vertices: &[vertices.bindings()],
            indices: &renderer.indices,
            quads: 0..renderer.unflushed.len() / VERTICES_PER_QUAD,
            parameters: &renderer.draw_parameters,
            uniforms: &[Uniform::vec2(
                "screen_size",
                [size.w as f32, size.h as f32],
            )],
        });

        renderer.unflushed.clear();
        renderer.current_buffer = (renderer.current_buffer + 1) % renderer.vertices.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_follows_index_winding() {
        let quad = sprite_quad(
            Rect::new(10., 20., 23., 23.),
            Rect::new(0.25, 0.5, 0.25, 0.5),
        );

        assert_eq!(
            quad.map(|v| v.position),
            [[10., 20.], [10., 43.], [33., 43.], [33., 20.]]
        );
        assert_eq!(
            quad.map(|v| v.tex_position),
            [[0.25, 0.5], [0.25, 1.], [0.5, 1.], [0.5, 0.5]]
        );
    }

    #[test]
    fn vertex_format_matches_shader_attributes() {
        let names = SpriteVertex::FORMAT
            .iter()
            .map(|a| (a.name, a.offset))
            .collect::<Vec<_>>();

        assert_eq!(names, vec![("position", 0), ("tex_position", 8)]);
    }
}
