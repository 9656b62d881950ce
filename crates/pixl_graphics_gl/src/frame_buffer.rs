use std::rc::Rc;

use glow::HasContext;
use pixl_graphics_hal::{
    buffer::BufferKind,
    frame_buffer::{FrameBuffer, FrameBufferError},
    quad::{quad_chunks, QuadDraw, INDICES_PER_QUAD, VERTICES_PER_QUAD},
    vertex::VertexBindings,
    Rect, Rgba, Size, WindowBackend,
};

use crate::{
    constants::GlConstant, context::GlContextRef, shader::GlShader, texture::GlTexture, Gl,
};

/// OpenGL puts the origin of viewports at the bottom left.
fn to_y_up(rect: &Rect<u32>, size: Size<u32>) -> Rect<u32> {
    Rect::new(rect.x, size.h.saturating_sub(rect.y + rect.h), rect.w, rect.h)
}

enum Target<B: WindowBackend> {
    Screen,
    Texture {
        frame_buffer: glow::Framebuffer,
        texture: Rc<GlTexture<B>>,
    },
}

pub struct GlFrameBuffer<B: WindowBackend> {
    ctx: Gl<B>,
    target: Target<B>,
}

impl<B: WindowBackend> GlFrameBuffer<B> {
    fn frame_buffer(&self) -> Option<glow::Framebuffer> {
        match &self.target {
            Target::Screen => None,
            Target::Texture { frame_buffer, .. } => Some(*frame_buffer),
        }
    }
}

impl<B: WindowBackend> FrameBuffer<Gl<B>> for GlFrameBuffer<B> {
    fn default(ctx: Gl<B>) -> Self {
        Self {
            ctx,
            target: Target::Screen,
        }
    }

    fn new(ctx: Gl<B>, texture: Rc<GlTexture<B>>) -> Result<Self, FrameBufferError> {
        let frame_buffer = {
            let mut gl_ctx = ctx.get_ref();
            let frame_buffer = unsafe { gl_ctx.gl.create_framebuffer() }
                .map_err(FrameBufferError::Create)?;

            gl_ctx.bind_frame_buffer(Some(frame_buffer));

            let status = unsafe {
                gl_ctx.gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::TEXTURE_2D,
                    Some(texture.texture),
                    0,
                );
                gl_ctx.gl.check_framebuffer_status(glow::FRAMEBUFFER)
            };

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl_ctx.bind_frame_buffer(None);
                unsafe { gl_ctx.gl.delete_framebuffer(frame_buffer) };
                return Err(FrameBufferError::Incomplete(status));
            }

            frame_buffer
        };

        Ok(Self {
            ctx,
            target: Target::Texture {
                frame_buffer,
                texture,
            },
        })
    }

    fn size(&self) -> Size<u32> {
        match &self.target {
            Target::Screen => self.ctx.default_frame_buffer_size(),
            Target::Texture { texture, .. } => texture.size.get(),
        }
    }

    fn texture(&self) -> Option<&Rc<GlTexture<B>>> {
        match &self.target {
            Target::Screen => None,
            Target::Texture { texture, .. } => Some(texture),
        }
    }

    fn clear(&self, color: Rgba<f32>) {
        let frame_buffer = self.frame_buffer();
        let mut ctx = self.ctx.get_ref();
        ctx.bind_frame_buffer(frame_buffer);
        ctx.clear(color);
    }

    fn draw_quads(&self, draw: &QuadDraw<Gl<B>>) {
        if draw.quads.is_empty() {
            return;
        }

        let size = self.size();
        let viewport = match &draw.parameters.viewport {
            Some(viewport) => to_y_up(viewport, size),
            None => size.into(),
        };

        let frame_buffer = self.frame_buffer();
        let mut ctx = self.ctx.get_ref();
        ctx.bind_frame_buffer(frame_buffer);
        ctx.set_viewport(viewport);
        ctx.set_blend(draw.parameters.blend);

        ctx.use_program(Some(draw.shader.program));
        draw.shader.set_sampler(&ctx, draw.texture.name);
        draw.shader.set_uniforms(&ctx, draw.uniforms);
        ctx.bind_texture(Some(draw.texture.texture.texture));

        draw_indexed(&mut ctx, draw);
    }
}

fn draw_indexed<B: WindowBackend>(ctx: &mut GlContextRef, draw: &QuadDraw<Gl<B>>) {
    ctx.bind_buffer(BufferKind::Index, Some(draw.indices.bytes.buffer));
    let indexed_quads = draw.indices.len() / INDICES_PER_QUAD;

    // GLES2 has no base vertex, so every chunk rebinds the attributes at an
    // offset and reuses the same indices.
    for chunk in quad_chunks(draw.quads.clone(), indexed_quads) {
        bind_vertices(ctx, draw.shader, draw.vertices, chunk.start * VERTICES_PER_QUAD);

        unsafe {
            ctx.gl.draw_elements(
                glow::TRIANGLES,
                (chunk.len() * INDICES_PER_QUAD) as i32,
                glow::UNSIGNED_SHORT,
                0,
            )
        };
    }
}

fn bind_vertices<B: WindowBackend>(
    ctx: &mut GlContextRef,
    shader: &GlShader<B>,
    vertices: &[VertexBindings<Gl<B>>],
    first_vertex: usize,
) {
    let mut enabled = 0u32;

    for binding in vertices {
        ctx.bind_buffer(BufferKind::Vertex, Some(binding.buffer.buffer));
        let base = first_vertex * binding.stride;

        for attribute in binding.attributes {
            // Attributes the program does not use are optimized out by the driver
            let Some(&location) = shader.attributes.get(attribute.name) else {
                continue;
            };

            enabled |= 1 << location;
            unsafe {
                ctx.gl.vertex_attrib_pointer_f32(
                    location,
                    attribute.size.size() as i32,
                    attribute.kind.gl_const(),
                    false,
                    binding.stride as i32,
                    (base + attribute.offset) as i32,
                );
            }
        }
    }

    ctx.set_enabled_attributes(enabled);
}

impl<B: WindowBackend> Drop for GlFrameBuffer<B> {
    fn drop(&mut self) {
        if let Target::Texture { frame_buffer, .. } = self.target {
            let mut ctx = self.ctx.get_ref();
            if ctx.state.bound_frame_buffer == Some(frame_buffer) {
                ctx.bind_frame_buffer(None);
            }

            unsafe { ctx.gl.delete_framebuffer(frame_buffer) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewports_are_flipped_to_y_up() {
        let size = Size::new(640, 480);

        assert_eq!(
            to_y_up(&Rect::new(0, 0, 640, 480), size),
            Rect::new(0, 0, 640, 480)
        );
        assert_eq!(
            to_y_up(&Rect::new(10, 20, 100, 50), size),
            Rect::new(10, 410, 100, 50)
        );
    }
}
