use std::ops::Range;

use crate::{
    buffer::Buffer, draw_params::DrawParameters, uniforms::Uniform, vertex::VertexBindings,
    Graphics,
};

/// Largest number of quads a single u16 index buffer can address.
pub const MAX_QUADS_PER_DRAW: usize = (u16::MAX as usize + 1) / 4;

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;

/// A texture bound to a named sampler uniform.
pub struct TextureBinding<'a, G: Graphics> {
    pub name: &'static str,
    pub texture: &'a G::Texture,
}

impl<'a, G: Graphics> Clone for TextureBinding<'a, G> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            texture: self.texture,
        }
    }
}

/// Draws a range of quads sharing one texture.
///
/// Every quad takes four consecutive vertices from each vertex buffer, and
/// `indices` holds the `0, 1, 2, 0, 2, 3` pattern for [MAX_QUADS_PER_DRAW]
/// quads (or fewer, if the draws never need more).
pub struct QuadDraw<'a, G: Graphics> {
    pub shader: &'a G::Shader,
    pub texture: TextureBinding<'a, G>,
    pub vertices: &'a [VertexBindings<'a, G>],
    pub indices: &'a Buffer<G, u16>,
    pub quads: Range<usize>,
    pub parameters: &'a DrawParameters,
    pub uniforms: &'a [Uniform],
}

/// Splits a quad range into chunks of at most `chunk` quads, never more than
/// a u16 index buffer can address.
pub fn quad_chunks(quads: Range<usize>, chunk: usize) -> impl Iterator<Item = Range<usize>> {
    let chunk = chunk.clamp(1, MAX_QUADS_PER_DRAW);
    let end = quads.end;
    quads
        .step_by(chunk)
        .map(move |start| start..end.min(start + chunk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_quad_index_fits_u16() {
        let last_vertex = MAX_QUADS_PER_DRAW * VERTICES_PER_QUAD - 1;
        assert_eq!(last_vertex, u16::MAX as usize);
    }

    #[test]
    fn small_ranges_are_drawn_at_once() {
        assert_eq!(quad_chunks(3..10, MAX_QUADS_PER_DRAW).collect::<Vec<_>>(), vec![3..10]);
    }

    #[test]
    fn large_ranges_are_split() {
        let chunks = quad_chunks(0..MAX_QUADS_PER_DRAW * 2 + 5, usize::MAX)
            .collect::<Vec<_>>();

        assert_eq!(
            chunks,
            vec![
                0..MAX_QUADS_PER_DRAW,
                MAX_QUADS_PER_DRAW..MAX_QUADS_PER_DRAW * 2,
                MAX_QUADS_PER_DRAW * 2..MAX_QUADS_PER_DRAW * 2 + 5,
            ]
        );
    }

    #[test]
    fn chunks_follow_short_index_buffers() {
        assert_eq!(
            quad_chunks(0..5, 2).collect::<Vec<_>>(),
            vec![0..2, 2..4, 4..5]
        );
    }

    #[test]
    fn empty_range_draws_nothing() {
        assert_eq!(quad_chunks(4..4, 8).count(), 0);
    }
}
