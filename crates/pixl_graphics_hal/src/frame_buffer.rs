use std::rc::Rc;

use thiserror::Error;

use crate::{quad::QuadDraw, Graphics, Rgba, Size};

#[derive(Debug, Error)]
pub enum FrameBufferError {
    #[error("unable to create a frame buffer: {0}")]
    Create(String),
    #[error("frame buffer is incomplete (status {0:#x})")]
    Incomplete(u32),
}

/// A draw target: the screen, or a texture.
pub trait FrameBuffer<G: Graphics>: Sized {
    /// The screen.
    fn default(renderer: G) -> Self;

    fn new(renderer: G, texture: Rc<G::Texture>) -> Result<Self, FrameBufferError>;

    fn size(&self) -> Size<u32>;

    /// The texture drawn into, `None` for the screen.
    fn texture(&self) -> Option<&Rc<G::Texture>>;

    fn clear(&self, color: Rgba<f32>);

    fn draw_quads(&self, draw: &QuadDraw<G>);
}
