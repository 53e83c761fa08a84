//! Error type shared by every board construction path.
//!
//! Only malformed configurations are errors. Player interactions that cannot
//! be honoured (clicks outside the grid, on face-up tiles, or while a pair is
//! waiting to be resolved) are silent no-ops and never surface here.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Board size must be at least 1")]
    EmptyBoard,

    #[error("Board size {size} gives {cells} tiles, which cannot be split into pairs")]
    OddCellCount { size: usize, cells: usize },

    #[error("Board size {size} exceeds the maximum of {max}")]
    TooLarge { size: usize, max: usize },

    #[error("Tile size must be at least 1 pixel")]
    ZeroTileSize,

    #[error("Tile size {tile_size} is too large for a {size}x{size} grid in surface coordinates")]
    TileTooLarge { tile_size: u32, size: usize },

    #[error("Surface {width}x{height} is too small for a {size}x{size} board")]
    SurfaceTooSmall { width: u32, height: u32, size: usize },

    #[error("Tick rate must be at least 1 frame per second")]
    ZeroTickRate,

    #[error("Layout is not square: expected {rows} characters in row {row}, found {len}")]
    NotSquare { rows: usize, row: usize, len: usize },

    #[error("Expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },

    #[error("Unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedChar { ch: char, row: usize, col: usize },

    #[error("Face '{face}' appears {count} times, expected exactly 2")]
    UnpairedFace { face: char, count: usize },
}
