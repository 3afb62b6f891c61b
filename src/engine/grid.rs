use super::cell::Cell;
use super::EngineError;
use rand::{seq::IndexedRandom, Rng};
use thiserror::Error;

/// What occupies a cell
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum CellState {
    #[default]
    Empty,
    Body,
    Food,
}

/// A square board of cells, each in exactly one [`CellState`].
///
/// Alongside the states, the grid keeps the set of currently-empty cells as a
/// vector plus a per-cell slot index into that vector, so that marking a cell
/// and picking a random empty cell are both constant-time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,

    /// Cell states in row-major order
    cells: Vec<CellState>,

    /// Every cell whose state is `Empty`, in no particular order
    empty: Vec<Cell>,

    /// For each cell (row-major), its index in `empty`, if it is empty
    slots: Vec<Option<usize>>,
}

impl Grid {
    /// Create a `size`×`size` grid with every cell empty.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `size` is zero.
    pub(crate) fn new(size: u16) -> Result<Grid, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidConfiguration(String::from(
                "board size must be at least 1",
            )));
        }
        let area = usize::from(size) * usize::from(size);
        let mut empty = Vec::with_capacity(area);
        for row in 0..size {
            for col in 0..size {
                empty.push(Cell::new(i32::from(row), i32::from(col)));
            }
        }
        Ok(Grid {
            size,
            cells: vec![CellState::Empty; area],
            empty,
            slots: (0..area).map(Some).collect(),
        })
    }

    /// Return the length of each side of the board
    pub(crate) fn size(&self) -> u16 {
        self.size
    }

    /// Return `true` if `cell` lies on the board
    pub(crate) fn in_bounds(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Map a cell that may be off the board back onto it, wrapping each
    /// coordinate around to the opposite edge
    pub(crate) fn wrap(&self, cell: Cell) -> Cell {
        let size = i32::from(self.size);
        Cell {
            row: cell.row.rem_euclid(size),
            col: cell.col.rem_euclid(size),
        }
    }

    /// Return the state of `cell`, or `None` if it is off the board
    pub(crate) fn get(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Set the state of `cell` to `state`, keeping the empty-cell set in
    /// step, and return the cell's previous state.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is off the board.
    pub(crate) fn set(&mut self, cell: Cell, state: CellState) -> CellState {
        let Some(i) = self.index(cell) else {
            panic!("Grid::set() called with out-of-bounds cell {cell}");
        };
        let old = std::mem::replace(&mut self.cells[i], state);
        match (old, state) {
            (CellState::Empty, CellState::Body | CellState::Food) => self.remove_empty(i),
            (CellState::Body | CellState::Food, CellState::Empty) => {
                self.slots[i] = Some(self.empty.len());
                self.empty.push(cell);
            }
            _ => (),
        }
        old
    }

    /// Pick a cell uniformly at random from among the empty cells.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board has no empty cells left.
    pub(crate) fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Cell, NoEmptyCell> {
        self.empty.choose(rng).copied().ok_or(NoEmptyCell)
    }

    /// Return the number of empty cells
    pub(crate) fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// Iterate over every cell on the board along with its state, in
    /// row-major order
    pub(crate) fn cells(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        let size = usize::from(self.size);
        self.cells.iter().enumerate().map(move |(i, &st)| {
            let (row, col) = (i / size, i % size);
            (
                Cell::new(
                    i32::try_from(row).unwrap_or(i32::MAX),
                    i32::try_from(col).unwrap_or(i32::MAX),
                ),
                st,
            )
        })
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let row = u16::try_from(cell.row).ok().filter(|&r| r < self.size)?;
        let col = u16::try_from(cell.col).ok().filter(|&c| c < self.size)?;
        Some(usize::from(row) * usize::from(self.size) + usize::from(col))
    }

    fn remove_empty(&mut self, i: usize) {
        let Some(slot) = self.slots[i].take() else {
            return;
        };
        let _ = self.empty.swap_remove(slot);
        if let Some(&moved) = self.empty.get(slot) {
            if let Some(j) = self.index(moved) {
                self.slots[j] = Some(slot);
            }
        }
    }
}

/// Error returned when asking for an empty cell on a full board
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no empty cells left on the board")]
pub(crate) struct NoEmptyCell;

#[cfg(test)]
impl Grid {
    /// Panic unless the empty-cell set matches the cell states exactly
    pub(crate) fn assert_consistent(&self) {
        let mut expected = self
            .cells()
            .filter_map(|(c, st)| (st == CellState::Empty).then_some(c))
            .collect::<Vec<_>>();
        let mut actual = self.empty.clone();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected, "empty-cell set out of sync with cell states");
        for (slot, &cell) in self.empty.iter().enumerate() {
            let i = self.index(cell).expect("empty cell should be in bounds");
            assert_eq!(self.slots[i], Some(slot), "slot index out of sync for {cell}");
        }
        let occupied = self.slots.iter().filter(|s| s.is_none()).count();
        assert_eq!(occupied + self.empty.len(), self.cells.len());
    }

    /// Return the cells currently in state `state`, in row-major order
    pub(crate) fn cells_in(&self, state: CellState) -> Vec<Cell> {
        self.cells()
            .filter_map(|(c, st)| (st == state).then_some(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(10).unwrap();
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.empty_count(), 100);
        assert!(grid.cells().all(|(_, st)| st == CellState::Empty));
        grid.assert_consistent();
    }

    #[test]
    fn zero_size() {
        assert!(matches!(
            Grid::new(0),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[rstest]
    #[case(Cell::new(0, 0), true)]
    #[case(Cell::new(9, 9), true)]
    #[case(Cell::new(0, 9), true)]
    #[case(Cell::new(-1, 0), false)]
    #[case(Cell::new(0, -1), false)]
    #[case(Cell::new(10, 0), false)]
    #[case(Cell::new(0, 10), false)]
    #[case(Cell::new(i32::MIN, i32::MAX), false)]
    fn test_in_bounds(#[case] cell: Cell, #[case] r: bool) {
        let grid = Grid::new(10).unwrap();
        assert_eq!(grid.in_bounds(cell), r);
        assert_eq!(grid.get(cell).is_some(), r);
    }

    #[rstest]
    #[case(Cell::new(-1, 3), Cell::new(9, 3))]
    #[case(Cell::new(10, 3), Cell::new(0, 3))]
    #[case(Cell::new(3, -1), Cell::new(3, 9))]
    #[case(Cell::new(3, 10), Cell::new(3, 0))]
    #[case(Cell::new(4, 5), Cell::new(4, 5))]
    fn test_wrap(#[case] cell: Cell, #[case] r: Cell) {
        let grid = Grid::new(10).unwrap();
        assert_eq!(grid.wrap(cell), r);
    }

    #[test]
    fn set_tracks_empty_cells() {
        let mut grid = Grid::new(4).unwrap();
        let a = Cell::new(1, 2);
        let b = Cell::new(3, 0);
        assert_eq!(grid.set(a, CellState::Body), CellState::Empty);
        assert_eq!(grid.set(b, CellState::Food), CellState::Empty);
        grid.assert_consistent();
        assert_eq!(grid.empty_count(), 14);
        assert_eq!(grid.get(a), Some(CellState::Body));
        assert_eq!(grid.get(b), Some(CellState::Food));

        // Re-marking an occupied cell doesn't disturb the empty set
        assert_eq!(grid.set(b, CellState::Body), CellState::Food);
        grid.assert_consistent();
        assert_eq!(grid.empty_count(), 14);

        assert_eq!(grid.set(a, CellState::Empty), CellState::Body);
        grid.assert_consistent();
        assert_eq!(grid.empty_count(), 15);

        // So does re-marking an empty cell as empty
        assert_eq!(grid.set(a, CellState::Empty), CellState::Empty);
        grid.assert_consistent();
        assert_eq!(grid.empty_count(), 15);
    }

    #[test]
    #[should_panic(expected = "out-of-bounds")]
    fn set_out_of_bounds() {
        let mut grid = Grid::new(4).unwrap();
        grid.set(Cell::new(4, 0), CellState::Body);
    }

    #[test]
    fn random_empty_cell_is_empty() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        let mut grid = Grid::new(5).unwrap();
        for col in 0..5 {
            grid.set(Cell::new(2, col), CellState::Body);
        }
        for _ in 0..200 {
            let cell = grid.random_empty_cell(&mut rng).unwrap();
            assert_eq!(grid.get(cell), Some(CellState::Empty));
        }
    }

    #[test]
    fn random_empty_cell_finds_last_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        let mut grid = Grid::new(3).unwrap();
        for (cell, _) in grid.clone().cells() {
            if cell != Cell::new(1, 1) {
                grid.set(cell, CellState::Body);
            }
        }
        grid.assert_consistent();
        assert_eq!(grid.random_empty_cell(&mut rng), Ok(Cell::new(1, 1)));
        grid.set(Cell::new(1, 1), CellState::Food);
        assert_eq!(grid.random_empty_cell(&mut rng), Err(NoEmptyCell));
        assert_eq!(grid.empty_count(), 0);
        grid.assert_consistent();
    }

    #[test]
    fn random_fill_and_drain_stays_consistent() {
        let mut rng = ChaCha12Rng::seed_from_u64(0xDEADBEEF);
        let mut grid = Grid::new(6).unwrap();
        let mut filled = Vec::new();
        while let Ok(cell) = grid.random_empty_cell(&mut rng) {
            grid.set(cell, CellState::Body);
            filled.push(cell);
            grid.assert_consistent();
        }
        assert_eq!(filled.len(), 36);
        for cell in filled.into_iter().step_by(2) {
            grid.set(cell, CellState::Empty);
            grid.assert_consistent();
        }
        assert_eq!(grid.empty_count(), 18);
    }
}
