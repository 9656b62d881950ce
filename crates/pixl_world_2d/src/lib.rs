pub mod animation;
pub mod error;
pub mod sprite_sheet;
pub mod tile_geometry;
pub mod tile_map;

pub use animation::{Animation, FrameUpdate, PlaybackState};
pub use error::{Error, ErrorKind};
pub use sprite_sheet::{Frame, SpriteSheet};
pub use tile_geometry::TileGeometry;
pub use tile_map::{TileAtlas, TileMap};
