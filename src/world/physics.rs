//! Per-tick generation transition - gravity displacement and lateral flow

use crate::simulation::molecules::{MoleculeCatalog, MoleculeKind, UnknownMoleculeError};
use crate::world::grid::{Cell, Grid};

/// Gravity directions in strict priority order: straight down, then
/// down-left, then down-right.
const GRAVITY: [(i32, i32); 3] = [(0, 1), (-1, 1), (1, 1)];

/// Tracks which next-generation slots a move already wrote this tick.
/// First writer wins; claimed slots are never written again. The next
/// grid itself starts as a copy of the current one, so an unclaimed
/// slot already holds its stay-put value.
struct ClaimMap {
    width: i32,
    claimed: Vec<bool>,
}

impl ClaimMap {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            claimed: vec![false; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    fn is_claimed(&self, x: i32, y: i32) -> bool {
        self.claimed[(y * self.width + x) as usize]
    }

    #[inline]
    fn claim(&mut self, x: i32, y: i32) {
        self.claimed[(y * self.width + x) as usize] = true;
    }
}

/// Compute one generation transition.
///
/// The current grid is read-only; the returned grid is the next
/// generation and the caller commits it with a single assignment, so
/// observers only ever see whole generations. Scan order is row-major
/// from the top row (y = 0), x ascending within each row.
///
/// Fails only when a cell holds an identifier the catalog does not
/// know, which indicates corrupted state rather than a reachable
/// simulation condition.
pub fn step(grid: &Grid, catalog: &MoleculeCatalog) -> Result<Grid, UnknownMoleculeError> {
    let mut next = grid.clone();
    let mut claims = ClaimMap::new(grid.width(), grid.height());

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            // A prior cell's move already claimed this slot
            if claims.is_claimed(x, y) {
                continue;
            }
            step_cell(grid, &mut next, &mut claims, catalog, x, y)?;
        }
    }

    Ok(next)
}

fn step_cell(
    current: &Grid,
    next: &mut Grid,
    claims: &mut ClaimMap,
    catalog: &MoleculeCatalog,
    x: i32,
    y: i32,
) -> Result<(), UnknownMoleculeError> {
    let cell = current.cell(x, y);
    let kind = catalog.lookup(cell.molecule_id)?;

    // Gravity, first match wins. A matched direction whose destination
    // is already claimed abandons the move for this tick rather than
    // falling through to a lower-priority direction, and a gravity
    // match always precludes lateral flow.
    for (dx, dy) in GRAVITY {
        let (nx, ny) = (x + dx, y + dy);
        if !current.in_bounds(nx, ny) {
            continue;
        }
        let neighbor = current.cell(nx, ny);
        if displaces(kind, catalog.lookup(neighbor.molecule_id)?) {
            if !claims.is_claimed(nx, ny) {
                swap(next, claims, (x, y), cell, (nx, ny), neighbor);
            }
            return Ok(());
        }
    }

    if !kind.flows {
        return Ok(());
    }

    // Lateral flow. Both sides open is a tie and ties do not move;
    // the situation re-evaluates every tick until one side closes.
    let left = flow_candidate(current, claims, catalog, kind, x - 1, y)?;
    let right = flow_candidate(current, claims, catalog, kind, x + 1, y)?;
    match (left, right) {
        (Some(neighbor), None) => swap(next, claims, (x, y), cell, (x - 1, y), neighbor),
        (None, Some(neighbor)) => swap(next, claims, (x, y), cell, (x + 1, y), neighbor),
        _ => {}
    }

    Ok(())
}

/// Whether `mover` can push into a slot holding `target`: the target
/// must itself flow out of the way and be strictly less dense than
/// the mover. Equal densities never displace each other.
#[inline]
fn displaces(mover: &MoleculeKind, target: &MoleculeKind) -> bool {
    target.flows && target.density < mover.density
}

/// A lateral destination is only a candidate while its next-generation
/// slot is unclaimed.
fn flow_candidate(
    current: &Grid,
    claims: &ClaimMap,
    catalog: &MoleculeCatalog,
    kind: &MoleculeKind,
    nx: i32,
    ny: i32,
) -> Result<Option<Cell>, UnknownMoleculeError> {
    if !current.in_bounds(nx, ny) || claims.is_claimed(nx, ny) {
        return Ok(None);
    }
    let neighbor = current.cell(nx, ny);
    if displaces(kind, catalog.lookup(neighbor.molecule_id)?) {
        Ok(Some(neighbor))
    } else {
        Ok(None)
    }
}

/// Swap two cells in the next generation and claim both slots. The
/// tint travels with its molecule.
fn swap(
    next: &mut Grid,
    claims: &mut ClaimMap,
    from: (i32, i32),
    from_cell: Cell,
    to: (i32, i32),
    to_cell: Cell,
) {
    next.set_cell(from.0, from.1, to_cell);
    next.set_cell(to.0, to.1, from_cell);
    claims.claim(from.0, from.1);
    claims.claim(to.0, to.1);
}
