use std::rc::Rc;

use pixl_core::Ticks;
use pixl_graphics_hal::{Graphics, Point, Rect};
use pixl_world_2d::{Animation, FrameUpdate};

use crate::sprite_renderer::SpriteRenderer;

/// A texture drawn whole, at its own size.
pub struct Sprite<G: Graphics> {
    pub texture: Rc<G::Texture>,
}

impl<G: Graphics> Clone for Sprite<G> {
    fn clone(&self) -> Self {
        Self {
            texture: self.texture.clone(),
        }
    }
}

impl<G: Graphics> Sprite<G> {
    pub fn new(texture: Rc<G::Texture>) -> Self {
        Self { texture }
    }

    pub fn draw(
        &self,
        renderer: &mut SpriteRenderer<G>,
        fb: &G::FrameBuffer,
        position: impl Into<Point<f32>>,
    ) {
        renderer
            .start_batch(fb, &self.texture)
            .draw_texture(position.into());
    }
}

/// An animation together with the sprite sheet texture it selects cells from.
pub struct AnimatedSprite<G: Graphics> {
    pub animation: Animation,
    pub texture: Rc<G::Texture>,
}

impl<G: Graphics> AnimatedSprite<G> {
    pub fn new(animation: Animation, texture: Rc<G::Texture>) -> Self {
        Self { animation, texture }
    }

    /// Advances the animation to `now` and draws the current cell with its
    /// top-left corner at `position`.
    pub fn draw(
        &mut self,
        renderer: &mut SpriteRenderer<G>,
        fb: &G::FrameBuffer,
        position: impl Into<Point<f32>>,
        now: Ticks,
    ) -> FrameUpdate {
        let update = self.animation.update(now);
        let cell = self.animation.sheet().cell_size();
        let position = position.into();

        renderer.start_batch(fb, &self.texture).draw_region(
            Rect::new(position.x, position.y, cell.w as f32, cell.h as f32),
            self.animation.uv_rect(),
        );

        update
    }
}
