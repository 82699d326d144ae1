//! Rendering - grid rasterization and the wgpu display path

pub mod frame;
mod renderer;

pub use frame::{color_at, rasterize, RasterError};
pub use renderer::Renderer;
