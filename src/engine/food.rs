use super::cell::Cell;
use super::grid::{CellState, Grid, NoEmptyCell};
use rand::Rng;

/// Places food on empty cells chosen uniformly at random
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawner<R> {
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    pub(crate) fn new(rng: R) -> FoodSpawner<R> {
        FoodSpawner { rng }
    }

    /// Mark a random empty cell of `grid` as food and return it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board is full, in which case `grid` is left
    /// untouched.
    pub(crate) fn spawn(&mut self, grid: &mut Grid) -> Result<Cell, NoEmptyCell> {
        let cell = grid.random_empty_cell(&mut self.rng)?;
        grid.set(cell, CellState::Food);
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn spawn_never_overlaps_body() {
        let mut spawner = FoodSpawner::new(ChaCha12Rng::seed_from_u64(7));
        for _ in 0..100 {
            let mut grid = Grid::new(6).unwrap();
            for col in 0..6 {
                grid.set(Cell::new(0, col), CellState::Body);
                grid.set(Cell::new(5, col), CellState::Body);
            }
            let food = spawner.spawn(&mut grid).unwrap();
            assert!((1..5).contains(&food.row));
            assert_eq!(grid.get(food), Some(CellState::Food));
            assert_eq!(grid.cells_in(CellState::Food), [food]);
            grid.assert_consistent();
        }
    }

    #[test]
    fn spawn_is_reproducible() {
        let cells = |seed| {
            let mut spawner = FoodSpawner::new(ChaCha12Rng::seed_from_u64(seed));
            let mut grid = Grid::new(10).unwrap();
            (0..10)
                .map(|_| spawner.spawn(&mut grid).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(cells(42), cells(42));
    }

    #[test]
    fn spawn_on_full_board() {
        let mut spawner = FoodSpawner::new(ChaCha12Rng::seed_from_u64(7));
        let mut grid = Grid::new(2).unwrap();
        for _ in 0..4 {
            spawner.spawn(&mut grid).unwrap();
        }
        let before = grid.clone();
        assert_eq!(spawner.spawn(&mut grid), Err(NoEmptyCell));
        assert_eq!(grid, before);
    }
}
