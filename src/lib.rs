//! PIXL, a small 2D toy layer over SDL2 and OpenGL.
//!
//! This crate only re-exports the workspace members, so the demos can be
//! written against a single dependency.

pub use pixl_app as app;
pub use pixl_assets as assets;
pub use pixl_canvas as canvas;
pub use pixl_core as core;
pub use pixl_geometry as geometry;
pub use pixl_graphics_gl as graphics_gl;
pub use pixl_graphics_hal as graphics_hal;
pub use pixl_renderer_2d as renderer_2d;
pub use pixl_sdl as sdl;
pub use pixl_world_2d as world_2d;
