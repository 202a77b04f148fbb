use thiserror::Error;

use crate::dims::Dims;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid maze size; {0:?}")]
    InvalidSize(Dims),
    #[error("Position {pos:?} is out of bounds of maze sized {size:?}")]
    OutOfBounds { pos: Dims, size: Dims },
    #[error("Settings error; {0}")]
    Settings(#[from] ron::error::SpannedError),
}
