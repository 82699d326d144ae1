//! HUD overlay and brush outline

use egui::{Align2, Color32, CornerRadius, Stroke, StrokeKind, Vec2};

/// Stats for the HUD display
pub struct HudStats<'a> {
    pub fps: f32,
    pub ticks: u64,
    pub molecule_count: usize,
    pub brush_radius: u32,
    pub selected_name: &'a str,
    pub selected_color: [u8; 3],
    pub paused: bool,
}

/// Show the HUD overlay
pub fn show_hud(ctx: &egui::Context, stats: &HudStats) {
    egui::Area::new(egui::Id::new("molecula_hud"))
        .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_rgba_unmultiplied(0, 0, 0, 180))
                .inner_margin(8.0)
                .outer_margin(0.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        show_molecule_chip(ui, stats.selected_color);
                        ui.label(stats.selected_name);
                    });
                    ui.label(format!("Brush: {}px", stats.brush_radius));
                    ui.label(format!("Molecules: {}", stats.molecule_count));
                    ui.label(format!("Tick: {}", stats.ticks));
                    ui.label(format!("FPS: {:.0}", stats.fps));
                    if stats.paused {
                        ui.colored_label(Color32::YELLOW, "PAUSED");
                    }
                });
        });
}

/// Draw the brush outline at the cursor, in logical window coordinates
pub fn show_brush_outline(ctx: &egui::Context, center: (f32, f32), radius: f32) {
    // Background layer so the circle sits under the HUD panel
    let painter = ctx.layer_painter(egui::LayerId::background());
    painter.circle_stroke(
        egui::pos2(center.0, center.1),
        radius,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 200)),
    );
}

/// Show a small color chip for the selected molecule
fn show_molecule_chip(ui: &mut egui::Ui, color: [u8; 3]) {
    let (response, painter) = ui.allocate_painter(Vec2::new(14.0, 14.0), egui::Sense::hover());
    let fill = Color32::from_rgb(color[0], color[1], color[2]);
    painter.rect_filled(response.rect, CornerRadius::same(3), fill);
    painter.rect_stroke(
        response.rect,
        CornerRadius::same(3),
        Stroke::new(1.0, Color32::WHITE),
        StrokeKind::Outside,
    );
}
