//! Grid rasterization - cells to display pixels

use thiserror::Error;

use crate::simulation::molecules::{MoleculeCatalog, UnknownMoleculeError};
use crate::world::grid::{Grid, OutOfBoundsError};

/// Failures while resolving grid contents to colors
#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),
    #[error(transparent)]
    UnknownMolecule(#[from] UnknownMoleculeError),
}

/// Apply a cell's brightness tint to one color channel
#[inline]
fn shade(channel: u8, tint: i8) -> u8 {
    (channel as i16 + tint as i16).clamp(0, 255) as u8
}

/// Display color of a single display pixel.
///
/// The pixel maps to its owning cell by integer division with the cell
/// scale. Total over the whole display area when the grid is sized
/// `display / cell_scale`.
pub fn color_at(
    grid: &Grid,
    catalog: &MoleculeCatalog,
    cell_scale: u32,
    pixel_x: i32,
    pixel_y: i32,
) -> Result<[u8; 3], RasterError> {
    let scale = cell_scale.max(1) as i32;
    // Euclidean division so negative pixels land outside the grid
    // instead of truncating onto column or row zero
    let cell = grid.get(pixel_x.div_euclid(scale), pixel_y.div_euclid(scale))?;
    let kind = catalog.lookup(cell.molecule_id)?;
    Ok([
        shade(kind.color[0], cell.tint),
        shade(kind.color[1], cell.tint),
        shade(kind.color[2], cell.tint),
    ])
}

/// Fill an RGBA8 buffer from the grid, one `cell_scale` x `cell_scale`
/// pixel block per cell. The buffer must hold exactly
/// `grid.width() * grid.height() * cell_scale^2 * 4` bytes, row-major
/// at display resolution.
pub fn rasterize(
    grid: &Grid,
    catalog: &MoleculeCatalog,
    cell_scale: u32,
    buffer: &mut [u8],
) -> Result<(), RasterError> {
    let scale = cell_scale.max(1) as usize;
    let display_width = grid.width() as usize * scale;
    debug_assert_eq!(
        buffer.len(),
        display_width * grid.height() as usize * scale * 4
    );

    for cy in 0..grid.height() {
        for cx in 0..grid.width() {
            let cell = grid.cell(cx, cy);
            let kind = catalog.lookup(cell.molecule_id)?;
            let rgba = [
                shade(kind.color[0], cell.tint),
                shade(kind.color[1], cell.tint),
                shade(kind.color[2], cell.tint),
                255,
            ];

            let base_x = cx as usize * scale;
            let base_y = cy as usize * scale;
            for py in 0..scale {
                let row = (base_y + py) * display_width + base_x;
                for px in 0..scale {
                    let idx = (row + px) * 4;
                    buffer[idx..idx + 4].copy_from_slice(&rgba);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::molecules::MoleculeId;
    use crate::world::grid::Cell;

    #[test]
    fn test_color_at_maps_pixels_to_cells() {
        let catalog = MoleculeCatalog::new();
        let mut grid = Grid::new(4, 4, Cell::BACKGROUND);
        grid.set(1, 1, Cell::new(MoleculeId::WATER)).unwrap();

        // Cell scale 4: pixels 4..8 in both axes belong to cell (1, 1)
        assert_eq!(
            color_at(&grid, &catalog, 4, 4, 4).unwrap(),
            [60, 60, 254]
        );
        assert_eq!(
            color_at(&grid, &catalog, 4, 7, 7).unwrap(),
            [60, 60, 254]
        );
        // Neighboring pixel block is still air
        assert_eq!(color_at(&grid, &catalog, 4, 8, 7).unwrap(), [2, 2, 2]);
    }

    #[test]
    fn test_color_at_applies_and_clamps_tint() {
        let catalog = MoleculeCatalog::new();
        let mut grid = Grid::new(2, 2, Cell::BACKGROUND);
        grid.set(0, 0, Cell::with_tint(MoleculeId::SAND, 10)).unwrap();
        grid.set(1, 0, Cell::with_tint(MoleculeId::AIR, -14)).unwrap();

        assert_eq!(
            color_at(&grid, &catalog, 4, 0, 0).unwrap(),
            [204, 188, 138]
        );
        // Air (2, 2, 2) with tint -14 clamps to black
        assert_eq!(color_at(&grid, &catalog, 4, 4, 0).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_color_at_outside_display_area_fails() {
        let catalog = MoleculeCatalog::new();
        let grid = Grid::new(2, 2, Cell::BACKGROUND);

        assert!(matches!(
            color_at(&grid, &catalog, 4, 8, 0),
            Err(RasterError::OutOfBounds(_))
        ));
        assert!(matches!(
            color_at(&grid, &catalog, 4, -1, 0),
            Err(RasterError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_rasterize_splats_cell_blocks() {
        let catalog = MoleculeCatalog::new();
        let mut grid = Grid::new(2, 1, Cell::BACKGROUND);
        grid.set(1, 0, Cell::new(MoleculeId::SAND)).unwrap();

        // Scale 2: a 4x2 pixel frame
        let mut buffer = vec![0u8; 4 * 2 * 4];
        rasterize(&grid, &catalog, 2, &mut buffer).unwrap();

        let pixel = |x: usize, y: usize| -> [u8; 4] {
            let idx = (y * 4 + x) * 4;
            [buffer[idx], buffer[idx + 1], buffer[idx + 2], buffer[idx + 3]]
        };

        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(pixel(x, y), [2, 2, 2, 255]);
            }
            for x in 2..4 {
                assert_eq!(pixel(x, y), [194, 178, 128, 255]);
            }
        }
    }

    #[test]
    fn test_rasterize_rejects_corrupted_cells() {
        let catalog = MoleculeCatalog::new();
        let mut grid = Grid::new(2, 1, Cell::BACKGROUND);
        grid.set(0, 0, Cell::new(200)).unwrap();

        let mut buffer = vec![0u8; 2 * 1 * 4];
        assert!(matches!(
            rasterize(&grid, &catalog, 1, &mut buffer),
            Err(RasterError::UnknownMolecule(_))
        ));
    }
}
