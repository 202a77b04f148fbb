pub mod algorithms;
pub mod dims;
pub mod error;
pub mod game;
pub mod gameboard;
pub mod pathfinding;
pub mod settings;

pub use algorithms::generate_maze;
pub use error::MazeError;
pub use pathfinding::{find_distinct_paths, Route};
