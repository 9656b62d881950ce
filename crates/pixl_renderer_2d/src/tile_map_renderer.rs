use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
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
use pixl_world_2d::TileGeometry;

use crate::{quad_index_buffer::QuadIndexBuffer, shaders};

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Zeroable, Pod, Vertex)]
struct TilePosition {
    position: [f32; 2],
}

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Zeroable, Pod, Vertex)]
struct TileTexPosition {
    tex_position: [f32; 2],
}

/// Draws a tile map built once into static buffers. Positions and texture
/// coordinates live in separate buffers, as [TileGeometry] keeps them.
pub struct TileMapRenderer<G: Graphics> {
    shader: G::Shader,
    atlas: Rc<G::Texture>,
    indices: QuadIndexBuffer<G>,
    positions: Buffer<G, TilePosition>,
    tex_positions: Buffer<G, TileTexPosition>,
    quads: usize,
    draw_parameters: DrawParameters,
}

impl<G: Graphics> TileMapRenderer<G> {
    pub fn new(
        ctx: &G,
        indices: QuadIndexBuffer<G>,
        atlas: Rc<G::Texture>,
        geometry: &TileGeometry,
    ) -> Result<Self, ShaderError> {
        let positions: &[TilePosition] = bytemuck::cast_slice(&geometry.positions);
        let tex_positions: &[TileTexPosition] = bytemuck::cast_slice(&geometry.tex_coords);

        Ok(Self {
            shader: ctx.new_shader(&shaders::SPRITE)?,
            atlas,
            indices,
            positions: ctx.new_buffer(BufferKind::Vertex, BufferUsage::Static, positions),
            tex_positions: ctx.new_buffer(BufferKind::Vertex, BufferUsage::Static, tex_positions),
            quads: geometry.quad_count(),
            draw_parameters: DrawParameters::default(),
        })
    }

    pub fn quads(&self) -> usize {
        self.quads
    }

    pub fn atlas(&self) -> &Rc<G::Texture> {
        &self.atlas
    }

    /// Re-issues the uploaded quads. Maps larger than the index buffer are
    /// drawn in several calls.
    pub fn draw(&self, fb: &G::FrameBuffer) {
        let size = fb.size();

        fb.draw_quads(&QuadDraw {
            shader: &self.shader,
            texture: TextureBinding {
                name: shaders::SPRITE_SAMPLER,
                texture: &self.atlas,
            },
            vertices: &[self.positions.bindings(), self.tex_positions.bindings()],
            indices: &self.indices,
            quads: 0..self.quads,
            parameters: &self.draw_parameters,
            uniforms: &[Uniform::vec2(
                "screen_size",
                [size.w as f32, size.h as f32],
            )],
        });
    }
}
