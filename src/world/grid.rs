//! Grid - fixed-size 2D field of molecule cells

use thiserror::Error;

use crate::simulation::molecules::MoleculeId;

/// Coordinate outside the grid extents passed to a direct accessor.
/// Neighbor arithmetic should use [`Grid::in_bounds`] instead, since an
/// out-of-range neighbor is a normal "no such neighbor" condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("coordinate ({x}, {y}) outside grid {width}x{height}")]
pub struct OutOfBoundsError {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A single cell in the grid
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Molecule kind (0 = air)
    pub molecule_id: u8,
    /// Brightness offset applied to the kind's base color at render
    /// time. Cosmetic only; physics never reads it.
    pub tint: i8,
}

impl Cell {
    pub const BACKGROUND: Cell = Cell {
        molecule_id: MoleculeId::AIR,
        tint: 0,
    };

    pub fn new(molecule_id: u8) -> Self {
        Self {
            molecule_id,
            tint: 0,
        }
    }

    pub fn with_tint(molecule_id: u8, tint: i8) -> Self {
        Self { molecule_id, tint }
    }

    pub fn is_background(&self) -> bool {
        self.molecule_id == MoleculeId::AIR
    }
}

/// The simulation field: width x height cells, row-major order.
/// Coordinates are `i32` so neighbor and brush offsets can go negative
/// without casts; anything outside `[0, width) x [0, height)` is out of
/// bounds.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Index = y * width + x
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate a grid with every cell set to `background`
    pub fn new(width: i32, height: i32, background: Cell) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![background; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Get the cell at `(x, y)`
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, OutOfBoundsError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.cells[self.index(x, y)])
    }

    /// Overwrite the cell at `(x, y)` unconditionally
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), OutOfBoundsError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Get without the bounds check. Callers must have checked
    /// `in_bounds` already.
    #[inline]
    pub(crate) fn cell(&self, x: i32, y: i32) -> Cell {
        debug_assert!(self.in_bounds(x, y));
        self.cells[self.index(x, y)]
    }

    /// Set without the bounds check. Callers must have checked
    /// `in_bounds` already.
    #[inline]
    pub(crate) fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        debug_assert!(self.in_bounds(x, y));
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Reset every cell
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Row-major cell slice
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count cells holding something other than air
    pub fn count_non_background(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_background()).count()
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> OutOfBoundsError {
        OutOfBoundsError {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_background() {
        let grid = Grid::new(4, 3, Cell::BACKGROUND);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 12);
        assert!(grid.cells().iter().all(|c| c.is_background()));
        assert_eq!(grid.count_non_background(), 0);
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut grid = Grid::new(4, 3, Cell::BACKGROUND);
        let cell = Cell::with_tint(MoleculeId::SAND, -7);
        grid.set(2, 1, cell).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), cell);
        assert_eq!(grid.count_non_background(), 1);
    }

    #[test]
    fn test_out_of_bounds_get_fails() {
        let grid = Grid::new(4, 3, Cell::BACKGROUND);
        let err = grid.get(4, 0).unwrap_err();
        assert_eq!(
            err,
            OutOfBoundsError {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            }
        );
        assert!(grid.get(0, 3).is_err());
        assert!(grid.get(-1, 0).is_err());
        assert!(grid.get(0, -1).is_err());
    }

    #[test]
    fn test_out_of_bounds_set_fails() {
        let mut grid = Grid::new(4, 3, Cell::BACKGROUND);
        assert!(grid.set(4, 3, Cell::new(MoleculeId::WATER)).is_err());
        assert_eq!(grid.count_non_background(), 0);
    }

    #[test]
    fn test_in_bounds_edges() {
        let grid = Grid::new(4, 3, Cell::BACKGROUND);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(3, 2));
        assert!(!grid.in_bounds(4, 2));
        assert!(!grid.in_bounds(3, 3));
        assert!(!grid.in_bounds(-1, 1));
    }

    #[test]
    fn test_fill_resets_all_cells() {
        let mut grid = Grid::new(3, 3, Cell::BACKGROUND);
        grid.set(1, 1, Cell::new(MoleculeId::WATER)).unwrap();
        grid.set(2, 2, Cell::new(MoleculeId::SOOT)).unwrap();
        grid.fill(Cell::BACKGROUND);
        assert_eq!(grid.count_non_background(), 0);
    }
}
