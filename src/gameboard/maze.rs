use smallvec::SmallVec;

use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::cell::{Cell, CellWall},
};

use self::CellWall::*;

/// Rectangular grid of cells, stored row by row.
///
/// Walls are only ever removed, and always from both sides at once, so the
/// wall between two neighbours reads the same from either cell.
#[derive(Debug, Clone)]
pub struct Maze {
    pub(crate) cells: Vec<Cell>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl Maze {
    /// Creates a fully walled maze, fails for non-positive sizes.
    pub fn new(size: Dims) -> Result<Self, MazeError> {
        if !size.all_positive() {
            return Err(MazeError::InvalidSize(size));
        }

        let cells = Dims::iter_fill(Dims::ZERO, size).map(Cell::new).collect();

        Ok(Maze {
            cells,
            width: size.0 as usize,
            height: size.1 as usize,
        })
    }

    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        0 <= pos.0 && pos.0 < self.width as i32 && 0 <= pos.1 && pos.1 < self.height as i32
    }

    pub fn check_bounds(&self, pos: Dims) -> Result<(), MazeError> {
        if self.is_in_bounds(pos) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                pos,
                size: self.size(),
            })
        }
    }

    pub fn is_valid_neighbor(&self, cell: Dims, off: Dims) -> bool {
        off.abs_sum() == 1 && self.is_in_bounds(cell) && self.is_in_bounds(cell + off)
    }

    pub fn is_valid_wall(&self, cell: Dims, wall: CellWall) -> bool {
        self.is_valid_neighbor(cell, wall.to_coord())
    }

    /// Returns the wall of `cell` facing `cell2`, if they are adjacent.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        match (cell.0 - cell2.0, cell.1 - cell2.1) {
            (0, 1) => Some(Top),
            (-1, 0) => Some(Right),
            (0, -1) => Some(Bottom),
            (1, 0) => Some(Left),
            _ => None,
        }
    }

    /// In-bounds neighbours of `cell`, in [`CellWall::get_in_order`] order.
    pub fn get_neighbors_pos(&self, cell: Dims) -> SmallVec<[Dims; 4]> {
        CellWall::get_in_order()
            .into_iter()
            .filter(|wall| self.is_valid_wall(cell, *wall))
            .map(|wall| cell + wall.to_coord())
            .collect()
    }

    /// Removes the wall on the given side of `cell` and the matching wall of
    /// the neighbour. Does nothing on the outer border.
    pub fn remove_wall(&mut self, cell: Dims, wall: CellWall) {
        if !self.is_valid_wall(cell, wall) {
            return;
        }

        let size = self.size();
        let neighbor = cell + wall.to_coord();
        self.cells[cell.linear_index(size)].remove_wall(wall);
        self.cells[neighbor.linear_index(size)].remove_wall(wall.reverse_wall());
    }

    /// Removes the wall between two adjacent cells, returns `false` if they
    /// aren't adjacent.
    pub fn remove_wall_between(&mut self, cell: Dims, cell2: Dims) -> bool {
        match Self::which_wall_between(cell, cell2) {
            Some(wall) if self.is_valid_wall(cell, wall) => {
                self.remove_wall(cell, wall);
                true
            }
            _ => false,
        }
    }

    /// Whether `wall` of `cell` is open to an in-bounds neighbour.
    pub fn is_passable(&self, cell: Dims, wall: CellWall) -> bool {
        self.is_valid_wall(cell, wall)
            && self
                .get_cell(cell)
                .map_or(false, |cell| cell.is_open(wall))
    }

    pub fn get_cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        if self.is_in_bounds(pos) {
            Some(&self.cells[pos.linear_index(self.size())])
        } else {
            None
        }
    }

    pub fn get_cell_mut(&mut self, pos: Dims) -> Option<&mut Cell> {
        if self.is_in_bounds(pos) {
            let size = self.size();
            Some(&mut self.cells[pos.linear_index(size)])
        } else {
            None
        }
    }

    /// Line segments of every standing wall, see [`Cell::wall_segments`].
    pub fn wall_segments(&self, cell_size: i32) -> Vec<(Dims, Dims)> {
        self.cells
            .iter()
            .flat_map(|cell| cell.wall_segments(cell_size))
            .collect()
    }
}
