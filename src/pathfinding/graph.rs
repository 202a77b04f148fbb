use std::collections::VecDeque;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    gameboard::{CellWall, Maze},
};

/// Undirected, unweighted graph of the open passages of a maze.
///
/// Cloning copies the node map and every neighbour list, so a clone can be
/// pruned without touching the graph it came from.
#[derive(Debug, Clone, Default)]
pub struct MazeGraph {
    adjacency: HashMap<Dims, SmallVec<[Dims; 4]>>,
}

impl MazeGraph {
    pub fn from_maze(maze: &Maze) -> Self {
        let adjacency = Dims::iter_fill(Dims::ZERO, maze.size())
            .map(|pos| {
                let neighbors = CellWall::get_in_order()
                    .into_iter()
                    .filter(|wall| maze.is_passable(pos, *wall))
                    .map(|wall| pos + wall.to_coord())
                    .collect();
                (pos, neighbors)
            })
            .collect();

        MazeGraph { adjacency }
    }

    pub fn contains(&self, node: Dims) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbours of `node`, empty for nodes that aren't in the graph.
    pub fn neighbors(&self, node: Dims) -> &[Dims] {
        self.adjacency
            .get(&node)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Removes the node together with every edge pointing to it.
    pub fn remove_node(&mut self, node: Dims) {
        if let Some(neighbors) = self.adjacency.remove(&node) {
            for neighbor in neighbors {
                if let Some(list) = self.adjacency.get_mut(&neighbor) {
                    list.retain(|n| *n != node);
                }
            }
        }
    }

    pub fn remove_edge(&mut self, a: Dims, b: Dims) {
        if let Some(list) = self.adjacency.get_mut(&a) {
            list.retain(|n| *n != b);
        }
        if let Some(list) = self.adjacency.get_mut(&b) {
            list.retain(|n| *n != a);
        }
    }

    /// Breadth-first search, returns the nodes of a path with the fewest
    /// steps from `start` to `end`, both included.
    pub fn shortest_path(&self, start: Dims, end: Dims) -> Option<Vec<Dims>> {
        if !self.contains(start) || !self.contains(end) {
            return None;
        }

        let mut parents: HashMap<Dims, Dims> = HashMap::with_capacity(self.node_count());
        let mut queue = VecDeque::from([start]);
        parents.insert(start, start);

        while let Some(node) = queue.pop_front() {
            if node == end {
                let mut path = vec![end];
                let mut at = end;
                while at != start {
                    at = parents[&at];
                    path.push(at);
                }
                path.reverse();
                return Some(path);
            }

            for &neighbor in self.neighbors(node) {
                if !parents.contains_key(&neighbor) {
                    parents.insert(neighbor, node);
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }
}
