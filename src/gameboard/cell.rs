use serde::{Deserialize, Serialize};

use crate::dims::Dims;

use self::CellWall::*;

/// A single grid cell, only the owning [`Maze`](super::Maze) can knock its
/// walls down, so neighbouring walls always agree.
///
/// ```compile_fail
/// fn deserializable<T: serde::de::DeserializeOwned>() {}
/// deserializable::<mazepaths::gameboard::Cell>();
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    top: bool,
    right: bool,
    bottom: bool,
    left: bool,
    pub(crate) visited: bool,
    pub(crate) coord: Dims,
}

impl Cell {
    /// Creates a cell with all four walls standing.
    pub fn new(pos: Dims) -> Cell {
        Cell {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
            coord: pos,
        }
    }

    pub(crate) fn remove_wall(&mut self, wall: CellWall) {
        match wall {
            Top => self.top = false,
            Right => self.right = false,
            Bottom => self.bottom = false,
            Left => self.left = false,
        }
    }

    /// Returns `true` if the wall on the given side is standing.
    pub fn get_wall(&self, wall: CellWall) -> bool {
        match wall {
            Top => self.top,
            Right => self.right,
            Bottom => self.bottom,
            Left => self.left,
        }
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        !self.get_wall(wall)
    }

    pub fn walls(&self) -> [bool; 4] {
        CellWall::get_in_order().map(|wall| self.get_wall(wall))
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn get_coord(&self) -> Dims {
        self.coord
    }

    /// Line segments of the standing walls in pixel space, where a cell spans
    /// `coord * cell_size ..= (coord + 1) * cell_size`.
    pub fn wall_segments(&self, cell_size: i32) -> Vec<(Dims, Dims)> {
        let top_left = self.coord * cell_size;
        let Dims(x, y) = top_left;
        let s = cell_size;

        CellWall::get_in_order()
            .into_iter()
            .filter(|wall| self.get_wall(*wall))
            .map(|wall| match wall {
                Top => (Dims(x, y), Dims(x + s, y)),
                Right => (Dims(x + s, y), Dims(x + s, y + s)),
                Bottom => (Dims(x, y + s), Dims(x + s, y + s)),
                Left => (Dims(x, y), Dims(x, y + s)),
            })
            .collect()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellWall {
    Top,
    Right,
    Bottom,
    Left,
}

impl CellWall {
    pub fn to_coord(&self) -> Dims {
        match self {
            Top => Dims(0, -1),
            Right => Dims(1, 0),
            Bottom => Dims(0, 1),
            Left => Dims(-1, 0),
        }
    }

    pub fn reverse_wall(&self) -> CellWall {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }

    /// Clockwise from the top, the order neighbours are visited in.
    pub fn get_in_order() -> [CellWall; 4] {
        [Top, Right, Bottom, Left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_closed() {
        let cell = Cell::new(Dims(2, 3));
        assert_eq!(cell.walls(), [true; 4]);
        assert!(!cell.is_visited());
    }

    #[test]
    fn wall_segments_follow_cell_size() {
        let mut cell = Cell::new(Dims(1, 2));
        cell.remove_wall(Left);
        cell.remove_wall(Bottom);

        let segments = cell.wall_segments(30);
        assert_eq!(
            segments,
            vec![
                (Dims(30, 60), Dims(60, 60)),
                (Dims(60, 60), Dims(60, 90)),
            ]
        );
    }

    #[test]
    fn serializes_walls() {
        let mut cell = Cell::new(Dims(0, 0));
        cell.remove_wall(Top);
        let text = ron::to_string(&cell).unwrap();
        assert!(text.contains("top:false"), "{}", text);
        assert!(text.contains("right:true"), "{}", text);
    }

    #[test]
    fn reverse_is_opposite_offset() {
        for wall in CellWall::get_in_order() {
            assert_eq!(wall.to_coord() + wall.reverse_wall().to_coord(), Dims::ZERO);
        }
    }
}
