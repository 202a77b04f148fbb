pub mod cell;
pub mod maze;

pub use cell::{Cell, CellWall};
pub use maze::Maze;
