mod depth_first_search;

use std::fmt;

use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{dims::Dims, error::MazeError, gameboard::Maze};

pub use depth_first_search::DepthFirstSearch;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

pub trait MazeAlgorithm: fmt::Debug {
    /// Generates a finished maze of the given size, carving from `entry`.
    ///
    /// The maze is either returned complete or not at all.
    fn generate(&self, size: Dims, entry: Dims, rng: &mut Random) -> Result<Maze, MazeError>;
}

/// Creates the rng for a generation run, random seed if none is given.
pub fn rng_from_seed(seed: Option<u64>) -> Random {
    Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
}

/// Generates a maze with [`DepthFirstSearch`].
pub fn generate_maze(size: Dims, entry: Dims, seed: Option<u64>) -> Result<Maze, MazeError> {
    let mut rng = rng_from_seed(seed);
    DepthFirstSearch.generate(size, entry, &mut rng)
}
