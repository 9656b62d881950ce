use std::path::PathBuf;

use pixl_geometry::Size;

use crate::Error;

/// The image holding tile graphics, split into a grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileAtlas {
    pub source: PathBuf,
    /// Tiles per row and per column of the image.
    pub grid: Size<u32>,
}

impl TileAtlas {
    pub fn new(source: impl Into<PathBuf>, grid: impl Into<Size<u32>>) -> Self {
        Self {
            source: source.into(),
            grid: grid.into(),
        }
    }

    /// Derives the grid from the pixel size of the image. Partial tiles on the
    /// right and bottom edges are not addressable.
    pub fn from_image(
        source: impl Into<PathBuf>,
        image_size: Size<u32>,
        tile_size: Size<u32>,
    ) -> Result<Self, Error> {
        if tile_size.is_empty() {
            return Err(Error::InvalidTileMap("tile size can't be zero".into()));
        }

        Ok(Self::new(
            source,
            (image_size.w / tile_size.w, image_size.h / tile_size.h),
        ))
    }

    /// Number of addressable tiles, the largest valid tile index.
    pub fn len(&self) -> u64 {
        u64::from(self.grid.w) * u64::from(self.grid.h)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A grid of tiles referencing cells of an atlas.
///
/// Tile indices are 1-based in row-major atlas order, 0 means the cell is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    size: Size<u32>,
    tile_size: Size<u32>,
    tiles: Vec<u32>,
    atlas: TileAtlas,
}

impl TileMap {
    pub fn new(
        size: impl Into<Size<u32>>,
        tile_size: impl Into<Size<u32>>,
        tiles: Vec<u32>,
        atlas: TileAtlas,
    ) -> Result<Self, Error> {
        let size = size.into();
        let tile_size = tile_size.into();

        if tiles.len() != size.area() {
            return Err(Error::InvalidTileMap(format!(
                "{}x{} grid needs {} tiles, got {}",
                size.w,
                size.h,
                size.area(),
                tiles.len()
            )));
        }

        if tile_size.is_empty() {
            return Err(Error::InvalidTileMap("tile size can't be zero".into()));
        }

        if atlas.is_empty() {
            return Err(Error::InvalidTileMap(format!(
                "atlas {} has no tiles",
                atlas.source.display()
            )));
        }

        Ok(Self {
            size,
            tile_size,
            tiles,
            atlas,
        })
    }

    /// Grid size in tiles.
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// Tile size in pixels.
    pub fn tile_size(&self) -> Size<u32> {
        self.tile_size
    }

    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    /// Tile indices in row-major order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn tile(&self, column: u32, row: u32) -> Option<u32> {
        if column >= self.size.w || row >= self.size.h {
            return None;
        }

        self.tiles
            .get(row as usize * self.size.w as usize + column as usize)
            .copied()
    }

    /// Iterates over `(column, row, tile)` of every cell.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.size.w.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (i as u32 % width, i as u32 / width, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn atlas() -> TileAtlas {
        TileAtlas::new("tiles.png", (4, 2))
    }

    #[test]
    fn lookup_is_row_major() {
        let map = TileMap::new((3, 2), (16, 16), vec![1, 2, 3, 4, 5, 6], atlas()).unwrap();

        assert_eq!(map.tile(0, 0), Some(1));
        assert_eq!(map.tile(2, 0), Some(3));
        assert_eq!(map.tile(0, 1), Some(4));
        assert_eq!(map.tile(3, 0), None);
        assert_eq!(map.tile(0, 2), None);

        let cells: Vec<_> = map.cells().collect();
        assert_eq!(cells[4], (1, 1, 5));
    }

    #[test]
    fn tile_count_must_match_grid() {
        let error = TileMap::new((3, 2), (16, 16), vec![1, 2, 3], atlas()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn empty_grid_is_valid() {
        let map = TileMap::new((0, 5), (16, 16), vec![], atlas()).unwrap();
        assert_eq!(map.cells().count(), 0);
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(TileMap::new((1, 1), (0, 16), vec![1], atlas()).is_err());
        assert!(TileMap::new((1, 1), (16, 16), vec![1], TileAtlas::new("a.png", (0, 3))).is_err());
    }

    #[test]
    fn atlas_grid_from_image() {
        let atlas = TileAtlas::from_image("tiles.png", Size::new(128, 48), Size::new(16, 16)).unwrap();

        assert_eq!(atlas.grid, Size::new(8, 3));
        assert_eq!(atlas.len(), 24);
    }

    #[test]
    fn huge_atlas_counts_every_tile() {
        let atlas = TileAtlas::from_image("huge.png", Size::new(u32::MAX, u32::MAX), Size::new(1, 1))
            .unwrap();

        assert_eq!(atlas.len(), u64::from(u32::MAX) * u64::from(u32::MAX));
        assert!(!atlas.is_empty());
    }
}
