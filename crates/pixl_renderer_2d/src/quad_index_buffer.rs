use derive_more::Deref;
use pixl_graphics_hal::{
    buffer::{Buffer, BufferKind, BufferUsage},
    quad::{INDICES_PER_QUAD, MAX_QUADS_PER_DRAW, VERTICES_PER_QUAD},
    Graphics,
};

/// Static indices drawing every four vertices as two triangles.
/// Cheap to clone, clones share the GPU buffer.
#[derive(Deref)]
pub struct QuadIndexBuffer<G: Graphics>(Buffer<G, u16>);

impl<G: Graphics> Clone for QuadIndexBuffer<G> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

fn create_quad_indices(quads: usize) -> Vec<u16> {
    assert!(
        quads <= MAX_QUADS_PER_DRAW,
        "u16 indices address at most {MAX_QUADS_PER_DRAW} quads"
    );

    let mut indices = Vec::with_capacity(quads * INDICES_PER_QUAD);
    for quad in 0..quads {
        let j = (quad * VERTICES_PER_QUAD) as u16;
        indices.extend_from_slice(&[j, j + 1, j + 2, j, j + 2, j + 3]);
    }

    indices
}

impl<G: Graphics> QuadIndexBuffer<G> {
    pub fn new(ctx: &G, quads: usize) -> Self {
        let indices = create_quad_indices(quads);
        Self(ctx.new_buffer(BufferKind::Index, BufferUsage::Static, &indices))
    }

    /// Indices for the largest draw a u16 index buffer allows.
    pub fn full(ctx: &G) -> Self {
        Self::new(ctx, MAX_QUADS_PER_DRAW)
    }

    pub fn quads(&self) -> usize {
        self.0.len() / INDICES_PER_QUAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_per_quad() {
        assert_eq!(
            create_quad_indices(2),
            vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]
        );
    }

    #[test]
    fn largest_buffer_ends_at_u16_max() {
        let indices = create_quad_indices(MAX_QUADS_PER_DRAW);

        assert_eq!(indices.len(), MAX_QUADS_PER_DRAW * 6);
        assert_eq!(indices.iter().max(), Some(&u16::MAX));
    }

    #[test]
    #[should_panic]
    fn too_many_quads_panic() {
        create_quad_indices(MAX_QUADS_PER_DRAW + 1);
    }
}
