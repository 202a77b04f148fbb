use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::{CellWall, Maze},
};

use super::{MazeAlgorithm, Random};

/// Randomized depth-first backtracker.
///
/// Differs from the textbook version in three ways: the entry cell starts
/// open towards all of its neighbours, the exit and the two cells next to
/// the origin can be stepped into again after being visited, and once the
/// stack drains a tenth of the remaining inner walls is knocked out so the
/// maze has loops and more than one way to the goal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstSearch;

impl MazeAlgorithm for DepthFirstSearch {
    fn generate(&self, size: Dims, entry: Dims, rng: &mut Random) -> Result<Maze, MazeError> {
        let mut maze = Maze::new(size)?;
        maze.check_bounds(entry)?;

        let mut stack = Vec::with_capacity(maze.cells.len());
        let mut current = entry;
        let mut came_from = None;

        maze.cells[entry.linear_index(size)].visited = true;
        stack.push(entry);
        Self::open_entrance_paths(&mut maze, entry);

        loop {
            let eligible = Self::eligible_neighbors(&maze, current, came_from);

            if eligible.is_empty() {
                match stack.pop() {
                    Some(pos) => {
                        current = pos;
                        came_from = None;
                        continue;
                    }
                    None => break,
                }
            }

            let candidates = Self::prefer_unvisited(&maze, eligible);
            let Some(&next) = candidates.choose(rng) else {
                break;
            };

            maze.remove_wall_between(current, next);
            if !Self::is_visited(&maze, next) {
                // A popped cell must come back once the new branch is done
                if stack.last() != Some(&current) {
                    stack.push(current);
                }
                maze.cells[next.linear_index(size)].visited = true;
                stack.push(next);
            }

            came_from = Some(current);
            current = next;
        }

        let wall_count = (size.product() / 10) as usize;
        let removed = Self::remove_random_walls(&mut maze, wall_count, rng);
        Self::open_extra_start_paths(&mut maze);

        log::debug!(
            "Generated {}x{} maze from {:?}, removed {} extra walls",
            size.0,
            size.1,
            entry,
            removed
        );

        Ok(maze)
    }
}

impl DepthFirstSearch {
    fn is_visited(maze: &Maze, pos: Dims) -> bool {
        maze.get_cell(pos).map_or(true, |cell| cell.is_visited())
    }

    /// The exit and the two cells touching the origin, these can always be
    /// carved into regardless of their visited state.
    fn is_always_eligible(maze: &Maze, pos: Dims) -> bool {
        pos == maze.size() - Dims::ONE || pos == Dims(1, 0) || pos == Dims(0, 1)
    }

    fn eligible_neighbors(
        maze: &Maze,
        current: Dims,
        came_from: Option<Dims>,
    ) -> SmallVec<[Dims; 4]> {
        // Two always eligible cells can touch on tiny mazes, don't let the
        // walk bounce between them forever.
        let no_return = came_from.filter(|_| Self::is_always_eligible(maze, current));

        maze.get_neighbors_pos(current)
            .into_iter()
            .filter(|pos| {
                !Self::is_visited(maze, *pos)
                    || (Some(*pos) != no_return && Self::is_always_eligible(maze, *pos))
            })
            .collect()
    }

    /// Narrows the eligible cells down to the unvisited ones, if there are any.
    fn prefer_unvisited(maze: &Maze, eligible: SmallVec<[Dims; 4]>) -> SmallVec<[Dims; 4]> {
        let unvisited = eligible
            .iter()
            .copied()
            .filter(|pos| !Self::is_visited(maze, *pos))
            .collect::<SmallVec<[_; 4]>>();

        if unvisited.is_empty() {
            eligible
        } else {
            unvisited
        }
    }

    /// Opens the entry towards all of its neighbours, visited or not.
    fn open_entrance_paths(maze: &mut Maze, entry: Dims) {
        for wall in CellWall::get_in_order() {
            maze.remove_wall(entry, wall);
        }
    }

    /// Removes up to `count` randomly chosen inner walls, returns how many
    /// were actually removed.
    fn remove_random_walls(maze: &mut Maze, count: usize, rng: &mut Random) -> usize {
        let size = maze.size();

        // Only right and bottom walls, so every wall is listed once
        let mut walls = Dims::iter_fill(Dims::ZERO, size)
            .flat_map(|pos| [(pos, CellWall::Right), (pos, CellWall::Bottom)])
            .filter(|&(pos, wall)| {
                maze.is_valid_wall(pos, wall)
                    && maze.get_cell(pos).map_or(false, |cell| cell.get_wall(wall))
            })
            .collect::<Vec<_>>();

        walls.shuffle(rng);
        walls.truncate(count);

        for &(pos, wall) in &walls {
            maze.remove_wall(pos, wall);
        }

        log::trace!("Removed {} random walls", walls.len());

        walls.len()
    }

    /// Makes sure the origin is open both to the right and to the bottom.
    fn open_extra_start_paths(maze: &mut Maze) {
        maze.remove_wall(Dims::ZERO, CellWall::Right);
        maze.remove_wall(Dims::ZERO, CellWall::Bottom);
    }
}
