//! Software compositing for overlays: images and text are drawn into a CPU
//! [Layer], which is then uploaded to a texture once per frame.

pub mod layer;
pub mod text;

pub use layer::Layer;
pub use text::{Font, Text};
