//! Circular brush painting

use rand::Rng;

use crate::world::grid::{Cell, Grid};

/// Brightness jitter range for freshly painted cells
const TINT_JITTER: i8 = 14;

/// Circular stamp parameters for one paint action
#[derive(Clone, Copy, Debug)]
pub struct Brush {
    /// Radius in display pixels; divided by the cell scale to get the
    /// radius in cells
    pub radius: u32,
    /// Fraction of in-circle cells painted per stroke, in (0, 1].
    /// Below 1 the stroke comes out grainy. Cosmetic only.
    pub coverage: f32,
}

impl Brush {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            coverage: 1.0,
        }
    }
}

/// Stamp a filled circle of `molecule_id` centered at a grid coordinate.
///
/// Every offset with `dx^2 + dy^2 <= r^2` is painted with a fresh cell
/// of the selected kind carrying its own brightness jitter. Offsets
/// that land outside the grid are skipped silently; a center that is
/// itself off the grid paints nothing.
pub fn paint<R: Rng>(
    grid: &mut Grid,
    brush: Brush,
    cell_scale: u32,
    center_x: i32,
    center_y: i32,
    molecule_id: u8,
    rng: &mut R,
) {
    if !grid.in_bounds(center_x, center_y) {
        return;
    }

    let r = (brush.radius / cell_scale.max(1)) as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (center_x + dx, center_y + dy);
            if !grid.in_bounds(x, y) {
                continue;
            }
            if brush.coverage < 1.0 && !rng.random_bool(brush.coverage.clamp(0.0, 1.0) as f64) {
                continue;
            }
            let tint = rng.random_range(-TINT_JITTER..=TINT_JITTER);
            grid.set_cell(x, y, Cell::with_tint(molecule_id, tint));
        }
    }
}
