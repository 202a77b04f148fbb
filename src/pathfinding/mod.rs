mod graph;

use serde::{Deserialize, Serialize};

use crate::{dims::Dims, error::MazeError, gameboard::Maze};

pub use graph::MazeGraph;

/// Walkable sequence of cells, both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route(Vec<Dims>);

impl Route {
    pub fn cells(&self) -> &[Dims] {
        &self.0
    }

    /// Number of cells on the route, not the number of steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn start(&self) -> Option<Dims> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<Dims> {
        self.0.last().copied()
    }

    /// Cells between the endpoints.
    pub fn interior(&self) -> &[Dims] {
        match self.0.len() {
            0..=2 => &[],
            len => &self.0[1..len - 1],
        }
    }

    /// Rough time to walk the route, rounded to whole seconds.
    pub fn estimated_time(&self, seconds_per_cell: f32) -> u32 {
        (self.len() as f32 * seconds_per_cell).round() as u32
    }

    /// Pixel centres of the route cells, for drawing it as a polyline.
    pub fn centers(&self, cell_size: i32) -> Vec<(f32, f32)> {
        let half = cell_size as f32 / 2.0;
        self.0
            .iter()
            .map(|pos| {
                (
                    (pos.0 * cell_size) as f32 + half,
                    (pos.1 * cell_size) as f32 + half,
                )
            })
            .collect()
    }

    pub fn into_inner(self) -> Vec<Dims> {
        self.0
    }
}

/// Finds routes over a snapshot of the maze passages.
///
/// The graph is built once in [`PathFinder::new`], build a new finder after
/// the maze changes.
#[derive(Debug, Clone)]
pub struct PathFinder {
    graph: MazeGraph,
    size: Dims,
}

impl PathFinder {
    pub fn new(maze: &Maze) -> Self {
        PathFinder {
            graph: MazeGraph::from_maze(maze),
            size: maze.size(),
        }
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    fn check_bounds(&self, pos: Dims) -> Result<(), MazeError> {
        if pos.all_non_negative() && pos.0 < self.size.0 && pos.1 < self.size.1 {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                pos,
                size: self.size,
            })
        }
    }

    /// Shortest route from `start` to `end`, `None` if they aren't connected.
    pub fn find_path(&self, start: Dims, end: Dims) -> Result<Option<Route>, MazeError> {
        self.check_bounds(start)?;
        self.check_bounds(end)?;

        Ok(self.graph.shortest_path(start, end).map(Route))
    }

    /// Up to `max_paths` routes from `start` to `end` that share no cells
    /// other than the endpoints, in the order they were found.
    ///
    /// After each route its inner cells are removed from a copy of the graph,
    /// so later routes are never shorter than earlier ones, but are usually
    /// longer detours. Running out of routes isn't an error, the result can
    /// be empty.
    pub fn find_distinct_paths(
        &self,
        start: Dims,
        end: Dims,
        max_paths: usize,
    ) -> Result<Vec<Route>, MazeError> {
        self.check_bounds(start)?;
        self.check_bounds(end)?;

        let mut graph = self.graph.clone();
        let mut routes = Vec::new();

        while routes.len() < max_paths {
            let Some(path) = graph.shortest_path(start, end) else {
                break;
            };
            let route = Route(path);

            if start == end {
                routes.push(route);
                break;
            }

            if route.interior().is_empty() {
                graph.remove_edge(start, end);
            } else {
                for &node in route.interior() {
                    graph.remove_node(node);
                }
            }

            routes.push(route);
        }

        log::debug!(
            "Found {} of {} requested routes from {:?} to {:?}",
            routes.len(),
            max_paths,
            start,
            end
        );

        Ok(routes)
    }
}

/// Builds a [`PathFinder`] for `maze` and runs [`PathFinder::find_distinct_paths`].
pub fn find_distinct_paths(
    maze: &Maze,
    start: Dims,
    end: Dims,
    max_paths: usize,
) -> Result<Vec<Route>, MazeError> {
    PathFinder::new(maze).find_distinct_paths(start, end, max_paths)
}

#[cfg(test)]
mod tests {
    use hashbrown::HashSet;

    use super::*;
    use crate::{algorithms::generate_maze, gameboard::CellWall};

    fn maze_with(size: Dims, passages: &[(Dims, Dims)]) -> Maze {
        let mut maze = Maze::new(size).unwrap();
        for &(a, b) in passages {
            assert!(maze.remove_wall_between(a, b));
        }
        maze
    }

    /// Two equally long ways from the top left to the bottom right corner of
    /// a 3x3 maze, plus a dead end at (0, 2).
    fn two_ways() -> Maze {
        maze_with(
            Dims(3, 3),
            &[
                (Dims(0, 0), Dims(1, 0)),
                (Dims(1, 0), Dims(2, 0)),
                (Dims(2, 0), Dims(2, 1)),
                (Dims(2, 1), Dims(2, 2)),
                (Dims(0, 0), Dims(0, 1)),
                (Dims(0, 1), Dims(1, 1)),
                (Dims(1, 1), Dims(1, 2)),
                (Dims(1, 2), Dims(2, 2)),
                (Dims(0, 1), Dims(0, 2)),
            ],
        )
    }

    fn is_walkable(maze: &Maze, route: &Route) -> bool {
        route.cells().windows(2).all(|pair| {
            Maze::which_wall_between(pair[0], pair[1])
                .map_or(false, |wall| maze.is_passable(pair[0], wall))
        })
    }

    #[test]
    fn single_path_is_shortest() {
        let maze = two_ways();
        let route = PathFinder::new(&maze)
            .find_path(Dims(0, 0), Dims(2, 2))
            .unwrap()
            .unwrap();

        // 4 steps, so 5 cells
        assert_eq!(route.len(), 5);
        assert_eq!(route.start(), Some(Dims(0, 0)));
        assert_eq!(route.end(), Some(Dims(2, 2)));
        assert!(is_walkable(&maze, &route));
    }

    #[test]
    fn single_path_around_a_wall() {
        let maze = two_ways();
        let route = PathFinder::new(&maze)
            .find_path(Dims(0, 2), Dims(2, 1))
            .unwrap()
            .unwrap();
        assert_eq!(route.len(), 6);
    }

    #[test]
    fn distinct_paths_share_only_endpoints() {
        let maze = two_ways();
        let routes = find_distinct_paths(&maze, Dims(0, 0), Dims(2, 2), 3).unwrap();

        assert_eq!(
            routes,
            vec![
                Route(vec![Dims(0, 0), Dims(1, 0), Dims(2, 0), Dims(2, 1), Dims(2, 2)]),
                Route(vec![Dims(0, 0), Dims(0, 1), Dims(1, 1), Dims(1, 2), Dims(2, 2)]),
            ]
        );
    }

    #[test]
    fn generated_routes_are_disjoint() {
        for seed in 0..30 {
            let maze = generate_maze(Dims(10, 10), Dims(0, 5), Some(seed)).unwrap();
            let routes = find_distinct_paths(&maze, Dims(0, 5), Dims(9, 9), 3).unwrap();

            assert!(!routes.is_empty());
            for route in &routes {
                assert_eq!(route.start(), Some(Dims(0, 5)));
                assert_eq!(route.end(), Some(Dims(9, 9)));
                assert!(is_walkable(&maze, route));
            }

            for (i, a) in routes.iter().enumerate() {
                let a: HashSet<_> = a.interior().iter().collect();
                for b in &routes[i + 1..] {
                    assert!(b.interior().iter().all(|pos| !a.contains(pos)));
                }
            }
        }
    }

    #[test]
    fn two_by_two_has_one_route() {
        let maze = maze_with(
            Dims(2, 2),
            &[(Dims(0, 0), Dims(1, 0)), (Dims(1, 0), Dims(1, 1))],
        );

        let routes = find_distinct_paths(&maze, Dims(0, 0), Dims(1, 1), 2).unwrap();
        assert_eq!(
            routes,
            vec![Route(vec![Dims(0, 0), Dims(1, 0), Dims(1, 1)])]
        );
    }

    #[test]
    fn disconnected_gives_no_routes() {
        let maze = maze_with(Dims(3, 3), &[(Dims(0, 0), Dims(1, 0))]);
        let finder = PathFinder::new(&maze);

        assert_eq!(finder.find_path(Dims(0, 0), Dims(2, 2)).unwrap(), None);
        assert!(finder
            .find_distinct_paths(Dims(0, 0), Dims(2, 2), 2)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn neighbors_get_distinct_routes() {
        let mut maze = Maze::new(Dims(2, 2)).unwrap();
        maze.remove_wall(Dims(0, 0), CellWall::Right);
        maze.remove_wall(Dims(0, 0), CellWall::Bottom);
        maze.remove_wall(Dims(1, 1), CellWall::Top);
        maze.remove_wall(Dims(1, 1), CellWall::Left);

        let routes = find_distinct_paths(&maze, Dims(0, 0), Dims(1, 0), 3).unwrap();
        assert_eq!(
            routes,
            vec![
                Route(vec![Dims(0, 0), Dims(1, 0)]),
                Route(vec![Dims(0, 0), Dims(0, 1), Dims(1, 1), Dims(1, 0)]),
            ]
        );
    }

    #[test]
    fn same_start_and_end() {
        let maze = two_ways();
        let routes = find_distinct_paths(&maze, Dims(1, 1), Dims(1, 1), 2).unwrap();
        assert_eq!(routes, vec![Route(vec![Dims(1, 1)])]);
    }

    #[test]
    fn repeated_searches_match() {
        let maze = two_ways();
        let finder = PathFinder::new(&maze);
        let first = finder.find_distinct_paths(Dims(0, 0), Dims(2, 2), 2).unwrap();
        let second = finder.find_distinct_paths(Dims(0, 0), Dims(2, 2), 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(finder.graph().node_count(), 9);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let maze = two_ways();
        assert!(matches!(
            find_distinct_paths(&maze, Dims(0, 0), Dims(3, 0), 2),
            Err(MazeError::OutOfBounds { pos: Dims(3, 0), .. })
        ));
        assert!(find_distinct_paths(&maze, Dims(-1, 0), Dims(2, 2), 2).is_err());
    }

    #[test]
    fn zero_paths_requested() {
        let maze = two_ways();
        assert!(find_distinct_paths(&maze, Dims(0, 0), Dims(2, 2), 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unbounded_path_limit() {
        let maze = maze_with(Dims(2, 1), &[(Dims(0, 0), Dims(1, 0))]);
        let routes = find_distinct_paths(&maze, Dims(0, 0), Dims(1, 0), usize::MAX).unwrap();
        assert_eq!(routes, vec![Route(vec![Dims(0, 0), Dims(1, 0)])]);

        let finder = PathFinder::new(&two_ways());
        let routes = finder
            .find_distinct_paths(Dims(0, 0), Dims(2, 2), usize::MAX)
            .unwrap();
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn route_summary() {
        let route = Route(vec![Dims(0, 0), Dims(1, 0), Dims(1, 1)]);
        assert_eq!(route.estimated_time(0.5), 2);
        assert_eq!(route.interior(), &[Dims(1, 0)]);
        assert_eq!(
            route.centers(30),
            vec![(15.0, 15.0), (45.0, 15.0), (45.0, 45.0)]
        );
    }
}
