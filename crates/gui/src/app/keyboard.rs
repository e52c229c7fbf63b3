//! Keyboard handling

use eframe::egui;
use shared::Control;

use crate::keymap::held_controls;
use crate::state::ViewerState;

/// Handle one-shot shortcuts and return the held movement/rotation controls
pub fn handle_keyboard(ctx: &egui::Context, state: &mut ViewerState) -> Vec<Control> {
    // Don't handle keys when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return Vec::new();
    }

    ctx.input(|i| {
        // Escape: camera back to the scene start
        if i.key_pressed(egui::Key::Escape) {
            state.reset_camera();
        }
        // P: pause / resume animation
        if i.key_pressed(egui::Key::P) {
            state.animate = !state.animate;
        }
        held_controls(&i.keys_down, i.modifiers)
    })
}
