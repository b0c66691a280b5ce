// cells are addressed with x growing to the right and y growing downwards,
// so moving up decreases y
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite_of(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// The neighbouring cell one step towards `direction`. The result may lie
    /// outside the grid, callers check bounds.
    pub fn step(&self, direction: Direction) -> Cell {
        match direction {
            Direction::Up => Cell::new(self.x, self.y - 1),
            Direction::Down => Cell::new(self.x, self.y + 1),
            Direction::Left => Cell::new(self.x - 1, self.y),
            Direction::Right => Cell::new(self.x + 1, self.y),
        }
    }
}

/// Square playing field of `size` x `size` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: i32) -> Grid {
        Grid { size }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        let side = self.size.max(0) as usize;
        side * side
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell::new(x, y)))
    }
}
