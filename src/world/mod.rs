//! World state - the cell grid and the per-tick physics rule

pub mod grid;
pub mod physics;

pub use grid::{Cell, Grid, OutOfBoundsError};
