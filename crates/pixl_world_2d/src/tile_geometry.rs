use pixl_geometry::{Point, Rect};

use crate::{Error, TileMap};

/// Vertex positions and texture coordinates of a tile map, one quad per
/// non-empty cell.
///
/// Both buffers have four entries per quad, in the order top-left,
/// bottom-left, bottom-right, top-right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGeometry {
    pub positions: Vec<[f32; 2]>,
    pub tex_coords: Vec<[f32; 2]>,
}

impl TileGeometry {
    /// Builds the quads of `map` with the top-left corner of the grid at `origin`.
    /// Empty cells are skipped. Fails if any tile is not in the atlas.
    pub fn build(map: &TileMap, origin: Point<f32>) -> Result<Self, Error> {
        let tile_size = map.tile_size();
        let grid = map.atlas().grid;
        let max = map.atlas().len();

        let (w, h) = (tile_size.w as f32, tile_size.h as f32);
        let step = [1. / grid.w as f32, 1. / grid.h as f32];

        let quads = map.tiles().iter().filter(|&&tile| tile != 0).count();
        let mut geometry = Self {
            positions: Vec::with_capacity(quads * 4),
            tex_coords: Vec::with_capacity(quads * 4),
        };

        for (column, row, tile) in map.cells() {
            if tile == 0 {
                continue;
            }

            if u64::from(tile) > max {
                return Err(Error::TileOutOfRange {
                    column,
                    row,
                    tile,
                    max,
                });
            }

            let quad = Rect::new(
                origin.x + column as f32 * w,
                origin.y + row as f32 * h,
                w,
                h,
            );

            let cell = tile - 1;
            let uv = Rect::new(
                (cell % grid.w) as f32 * step[0],
                (cell / grid.w) as f32 * step[1],
                step[0],
                step[1],
            );

            geometry
                .positions
                .extend(quad.points().map(<[f32; 2]>::from));
            geometry
                .tex_coords
                .extend(uv.points().map(<[f32; 2]>::from));
        }

        Ok(geometry)
    }

    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
