use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use pixl_geometry::Size;
use pixl_world_2d::{TileAtlas, TileMap};

pub mod json;
pub mod tmx;

/// Bits of a Tiled global tile id that encode flipping and rotation.
const FLIP_FLAGS: u32 = 0xE000_0000;

/// Tile size used when a map does not declare one.
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// A tile map as described by a Tiled file, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMapDescription {
    /// Grid size in tiles.
    pub size: Size<u32>,
    /// Tile size in pixels.
    pub tile_size: Size<u32>,
    pub atlas_source: PathBuf,
    /// Atlas image size in pixels.
    pub atlas_size: Size<u32>,
    /// 1-based atlas tile indices, 0 for empty cells.
    pub tiles: Vec<u32>,
}

impl TileMapDescription {
    /// Loads a `.tmx` or `.json` / `.tmj` map. The atlas path is resolved
    /// relative to the map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read tile map {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let mut description = match extension.as_deref() {
            Some("tmx") => Self::from_tmx(&source),
            Some("json" | "tmj") => Self::from_json(&source),
            _ => bail!("unknown tile map format {}", path.display()),
        }
        .with_context(|| format!("invalid tile map {}", path.display()))?;

        if let Some(dir) = path.parent() {
            description.atlas_source = dir.join(&description.atlas_source);
        }

        Ok(description)
    }

    pub fn from_tmx(xml: &str) -> Result<Self> {
        tmx::parse(xml)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        json::parse(json)
    }

    pub fn into_tile_map(self) -> Result<TileMap> {
        let atlas = TileAtlas::from_image(self.atlas_source, self.atlas_size, self.tile_size)?;
        Ok(TileMap::new(self.size, self.tile_size, self.tiles, atlas)?)
    }
}

/// Converts a Tiled global id into an atlas tile index of a tileset
/// starting at `first_gid`.
pub(crate) fn atlas_index(gid: u32, first_gid: u32) -> Result<u32> {
    let gid = gid & !FLIP_FLAGS;
    if gid == 0 {
        return Ok(0);
    }

    match gid.checked_sub(first_gid) {
        Some(index) => Ok(index + 1),
        None => bail!("tile {gid} is below the first tile id {first_gid} of the tileset"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_flags_are_ignored() {
        assert_eq!(atlas_index(0x8000_0003, 1).unwrap(), 3);
        assert_eq!(atlas_index(0x4000_0003, 1).unwrap(), 3);
        assert_eq!(atlas_index(0xE000_0000, 1).unwrap(), 0);
    }

    #[test]
    fn gids_are_rebased_to_the_tileset() {
        assert_eq!(atlas_index(0, 10).unwrap(), 0);
        assert_eq!(atlas_index(10, 10).unwrap(), 1);
        assert_eq!(atlas_index(14, 10).unwrap(), 5);
        assert!(atlas_index(3, 10).is_err());
    }

    #[test]
    fn converts_into_tile_map() {
        let description = TileMapDescription {
            size: Size::new(2, 1),
            tile_size: Size::new(16, 16),
            atlas_source: "tiles.png".into(),
            atlas_size: Size::new(64, 32),
            tiles: vec![1, 8],
        };

        let map = description.into_tile_map().unwrap();
        assert_eq!(map.atlas().grid, Size::new(4, 2));
        assert_eq!(map.tile(1, 0), Some(8));
    }

    #[test]
    fn invalid_tile_count_is_an_error() {
        let description = TileMapDescription {
            size: Size::new(2, 2),
            tile_size: Size::new(16, 16),
            atlas_source: "tiles.png".into(),
            atlas_size: Size::new(64, 32),
            tiles: vec![1, 8],
        };

        assert!(description.into_tile_map().is_err());
    }

    #[test]
    fn load_resolves_atlas_next_to_map() {
        let dir = std::env::temp_dir().join(format!("pixl-map-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("level.tmx");
        std::fs::write(&path, tmx::tests::MAP).unwrap();

        let description = TileMapDescription::load(&path).unwrap();
        assert_eq!(description.atlas_source, dir.join("tile.png"));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let error = TileMapDescription::load("/nonexistent/level.txt").unwrap_err();
        assert!(format!("{error:#}").contains("level.txt"));
    }
}
