// food is placed uniformly at random on a cell the snake does not occupy
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Picks a free cell for the next piece of food, or `None` when the snake
/// covers the whole grid.
///
/// While the board is mostly empty random cells are drawn until a free one
/// comes up. Once the snake covers more than 80% of the board that gets slow,
/// so the free cells are collected and one of them is chosen instead.
pub fn place_food<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    let total = grid.cell_count();
    if snake.len() >= total {
        return None;
    }

    if snake.len() > (total * 4) / 5 {
        let free: Vec<Cell> = grid.cells().filter(|cell| !snake.occupies(cell)).collect();
        return free.choose(rng).copied();
    }

    loop {
        let candidate = Cell::new(
            rng.random_range(0..grid.size()),
            rng.random_range(0..grid.size()),
        );
        if !snake.occupies(&candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_on_the_snake() {
        let grid = Grid::new(5);
        let snake = Snake::from_cells((0..5).map(|x| Cell::new(x, 0)));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let food = place_food(&grid, &snake, &mut rng).unwrap();
            assert!(grid.contains(&food));
            assert!(!snake.occupies(&food));
        }
    }

    #[test]
    fn crowded_board_uses_free_cells() {
        let grid = Grid::new(5);
        // every cell except (4, 4)
        let snake = Snake::from_cells(grid.cells().filter(|c| *c != Cell::new(4, 4)));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(place_food(&grid, &snake, &mut rng), Some(Cell::new(4, 4)));
    }

    #[test]
    fn full_board_has_no_food() {
        let grid = Grid::new(5);
        let snake = Snake::from_cells(grid.cells());
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(place_food(&grid, &snake, &mut rng), None);
    }
}
