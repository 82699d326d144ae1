//! # Molecula - 2D Falling Sand Molecule Simulator
//!
//! A discrete cellular automaton where every grid cell holds a molecule
//! and denser molecules sink through lighter flowing ones.

pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod simulation;
pub mod ui;
pub mod world;

pub use app::App;

/// Common imports for internal use
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::simulation::{Brush, MoleculeCatalog, MoleculeId, MoleculeKind, Simulation};
    pub use crate::world::{Cell, Grid};
    pub use glam::IVec2;
}
