pub mod png;
pub mod text;
pub mod tile_map;

pub use png::{decode_png, load_png, Image};
pub use text::load_text_file;
pub use tile_map::TileMapDescription;
