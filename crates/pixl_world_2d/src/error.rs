use pixl_geometry::Size;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("frame duration must be greater than zero")]
    ZeroFrameDuration,

    #[error("image of {}x{} can't be split into cells of {}x{}", image.w, image.h, cell.w, cell.h)]
    InvalidSpriteSheet { image: Size<u32>, cell: Size<u32> },

    #[error("invalid tile map: {0}")]
    InvalidTileMap(String),

    #[error("row {row} is out of range, sprite sheet has {rows} rows")]
    RowOutOfRange { row: u32, rows: u32 },

    #[error("tile {tile} at ({column}, {row}) is out of range 1..={max}")]
    TileOutOfRange {
        column: u32,
        row: u32,
        tile: u32,
        max: u64,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ZeroFrameDuration | Error::InvalidSpriteSheet { .. } | Error::InvalidTileMap(_) => {
                ErrorKind::InvalidArgument
            }
            Error::RowOutOfRange { .. } | Error::TileOutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}
