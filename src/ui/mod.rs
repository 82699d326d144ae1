//! UI overlays drawn with egui on top of the world texture

mod hud;

pub use hud::{show_brush_outline, show_hud, HudStats};
