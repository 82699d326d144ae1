//! Simulation core: the molecule catalog, brush painting, and the
//! tick facade that owns the grid

pub mod brush;
pub mod molecules;

pub use brush::{paint, Brush};
pub use molecules::{MoleculeCatalog, MoleculeId, MoleculeKind, UnknownMoleculeError};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::world::grid::{Cell, Grid};
use crate::world::physics;

/// Owns the current generation and everything needed to advance it.
/// The driver calls `paint` then `advance` once per tick; each advance
/// commits a whole new generation with a single assignment, so readers
/// never observe a partial one.
pub struct Simulation {
    grid: Grid,
    catalog: MoleculeCatalog,
    /// Cosmetic RNG for brush jitter and coverage; physics never
    /// touches it
    rng: Xoshiro256StarStar,
    ticks: u64,
}

impl Simulation {
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        Self {
            grid: Grid::new(width, height, Cell::BACKGROUND),
            catalog: MoleculeCatalog::new(),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            ticks: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &MoleculeCatalog {
        &self.catalog
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Stamp the brush at a grid coordinate
    pub fn paint(&mut self, brush: Brush, cell_scale: u32, x: i32, y: i32, molecule_id: u8) {
        brush::paint(
            &mut self.grid,
            brush,
            cell_scale,
            x,
            y,
            molecule_id,
            &mut self.rng,
        );
    }

    /// Advance one generation
    pub fn advance(&mut self) -> Result<(), UnknownMoleculeError> {
        let next = physics::step(&self.grid, &self.catalog)?;
        self.grid = next;
        self.ticks += 1;
        Ok(())
    }

    /// Reset every cell back to air
    pub fn clear(&mut self) {
        self.grid.fill(Cell::BACKGROUND);
    }

    /// Cells holding something other than air
    pub fn molecule_count(&self) -> usize {
        self.grid.count_non_background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_then_advance_drops_the_paint() {
        let mut sim = Simulation::new(8, 8, 1);
        sim.paint(Brush::new(2), 4, 4, 2, MoleculeId::SAND);
        assert_eq!(sim.molecule_count(), 1);

        sim.advance().unwrap();

        assert_eq!(sim.grid().get(4, 2).unwrap().molecule_id, MoleculeId::AIR);
        assert_eq!(sim.grid().get(4, 3).unwrap().molecule_id, MoleculeId::SAND);
        assert_eq!(sim.molecule_count(), 1);
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_clear_resets_to_background() {
        let mut sim = Simulation::new(8, 8, 1);
        sim.paint(Brush::new(12), 4, 4, 4, MoleculeId::WATER);
        assert!(sim.molecule_count() > 0);

        sim.clear();

        assert_eq!(sim.molecule_count(), 0);
    }

    #[test]
    fn test_same_seed_paints_identically() {
        let mut a = Simulation::new(8, 8, 99);
        let mut b = Simulation::new(8, 8, 99);
        let brush = Brush {
            radius: 12,
            coverage: 0.4,
        };
        a.paint(brush, 4, 4, 4, MoleculeId::SAND);
        b.paint(brush, 4, 4, 4, MoleculeId::SAND);

        assert_eq!(a.grid().cells(), b.grid().cells());
    }
}
