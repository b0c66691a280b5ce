// the body is stored head first; moving pushes a new head and, unless food
// was eaten, pops the tail
use std::collections::VecDeque;

use crate::grid::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(head: Cell) -> Snake {
        let mut body = VecDeque::new();
        body.push_back(head);
        Snake { body }
    }

    /// Builds a snake from its segments, head first.
    #[cfg(test)]
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Snake {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body }
    }

    pub fn head(&self) -> Cell {
        // never empty, see constructors
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, cell: &Cell) -> bool {
        self.body.iter().any(|segment| segment == cell)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Moves the head to `new_head`. The tail is kept when `grow` is set.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_keeps_length() {
        let mut snake = Snake::from_cells([Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)]);
        snake.advance(Cell::new(3, 0), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(3, 0));
        assert!(!snake.occupies(&Cell::new(0, 0)));
    }

    #[test]
    fn advance_with_growth_keeps_tail() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.advance(Cell::new(5, 4), true);
        assert_eq!(snake.len(), 2);
        assert!(snake.occupies(&Cell::new(5, 5)));
        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![Cell::new(5, 4), Cell::new(5, 5)]
        );
    }
}
