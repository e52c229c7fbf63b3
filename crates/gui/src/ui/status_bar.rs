use egui::Ui;
use shared::CameraType;

use crate::i18n::t;
use crate::state::ViewerState;

pub fn show(ui: &mut Ui, state: &ViewerState) {
    ui.horizontal(|ui| {
        ui.weak(format!("{}: {}", t("status.segments"), state.segments.len()));
        ui.separator();

        let mode = match state.scene.scene.cam_type {
            CameraType::Single => t("mode.single"),
            CameraType::Free => t("mode.free"),
            CameraType::Fps => t("mode.fps"),
        };
        ui.weak(mode);

        if !state.animate {
            ui.separator();
            ui.weak(t("status.paused"));
        }

        if let Some(error) = &state.last_error {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(230, 90, 80), error);
        }
    });
}
