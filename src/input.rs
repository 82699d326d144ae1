//! Pointer and selection state the driver samples once per tick

use glam::IVec2;

use crate::simulation::molecules::MoleculeCatalog;

pub const MIN_BRUSH_RADIUS: u32 = 1;
pub const MAX_BRUSH_RADIUS: u32 = 50;

/// Snapshot of everything the brush needs: where to paint, whether to
/// paint, what kind, and how wide. The event loop mutates it from
/// window events; the tick reads it without blocking.
#[derive(Clone, Debug)]
pub struct InputState {
    /// Pointer position in grid coordinates while the cursor is over
    /// the window
    pointer: Option<IVec2>,
    /// Paint button held
    painting: bool,
    /// Kind the brush stamps
    selected: u8,
    /// Brush radius in display pixels
    radius: u32,
}

impl InputState {
    pub fn new(selected: u8, radius: u32) -> Self {
        Self {
            pointer: None,
            painting: false,
            selected,
            radius: radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS),
        }
    }

    pub fn pointer(&self) -> Option<IVec2> {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Option<IVec2>) {
        self.pointer = pointer;
    }

    pub fn painting(&self) -> bool {
        self.painting
    }

    pub fn set_painting(&mut self, held: bool) {
        self.painting = held;
    }

    pub fn selected(&self) -> u8 {
        self.selected
    }

    /// Advance the selection to the next kind in catalog order,
    /// wrapping at the end
    pub fn cycle_selected(&mut self, catalog: &MoleculeCatalog) {
        let ids: Vec<u8> = catalog.identifiers().collect();
        if ids.is_empty() {
            return;
        }
        let pos = ids.iter().position(|&id| id == self.selected).unwrap_or(0);
        self.selected = ids[(pos + 1) % ids.len()];
        log::debug!("Selected molecule {}", self.selected);
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Adjust the brush radius by a signed number of pixels, clamped
    /// to the allowed range
    pub fn adjust_radius(&mut self, delta: i32) {
        let radius = (self.radius as i32 + delta)
            .clamp(MIN_BRUSH_RADIUS as i32, MAX_BRUSH_RADIUS as i32);
        self.radius = radius as u32;
    }
}
