//! Wireframe viewport painted with the egui painter

use egui::{Color32, Pos2, Rgba, Stroke, Ui};
use shared::wireframe::to_screen;

use crate::state::ViewerState;

/// Radians per dragged point
const DRAG_SENSITIVITY: f64 = 0.005;

pub fn show(ui: &mut Ui, state: &mut ViewerState) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
    let rect = response.rect;

    if response.dragged() {
        let delta = response.drag_delta();
        state.drag_rotate(
            f64::from(delta.x) * DRAG_SENSITIVITY,
            f64::from(delta.y) * DRAG_SENSITIVITY,
        );
    }

    state.set_viewport_size(rect.width(), rect.height());

    let [r, g, b] = state.settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(r, g, b));

    if !ui.is_rect_visible(rect) {
        return;
    }

    let width = f64::from(rect.width());
    let height = f64::from(rect.height());
    let to_pos = |p: shared::Point2D| {
        let s = to_screen(p, width, height);
        Pos2::new(rect.left() + s.x as f32, rect.top() + s.y as f32)
    };

    let line_width = state.settings.viewport.line_width;
    state.project();
    for segment in &state.segments {
        let [r, g, b, a] = state.segment_color(segment);
        let color = Color32::from(Rgba::from_rgba_unmultiplied(r, g, b, a));
        painter.line_segment(
            [to_pos(segment.start), to_pos(segment.end)],
            Stroke::new(line_width, color),
        );
    }

    if state.settings.viewport.show_hud {
        draw_hud(&painter, rect, state);
    }
}

fn draw_hud(painter: &egui::Painter, rect: egui::Rect, state: &ViewerState) {
    let [x, y, z, a] = state.scene.camera.position;
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        format!("{}  x {x:.2}  y {y:.2}  z {z:.2}  a {a:.2}", state.source.label()),
        egui::FontId::monospace(12.0),
        Color32::from_gray(170),
    );
}
