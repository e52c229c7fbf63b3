use egui::Ui;
use shared::scenes::preset_names;
use shared::{CameraType, Control, MoveDirection, RotationPlane};

use crate::app::menus::{open_scene_dialog, save_scene_dialog};
use crate::i18n::t;
use crate::keymap::describe;
use crate::state::{SceneSource, ViewerState};

pub fn show(ui: &mut Ui, state: &mut ViewerState) {
    scene_section(ui, state);
    ui.separator();
    camera_section(ui, state);
    ui.separator();
    settings_section(ui, state);
    ui.separator();
    help_section(ui, state.scene.scene.cam_type);
}

fn scene_section(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading(t("panel.scene"));

    let current = match &state.source {
        SceneSource::Preset(name) => Some(name.clone()),
        SceneSource::File(_) => None,
    };
    let mut chosen = None;
    egui::ComboBox::from_id_salt("preset_picker")
        .selected_text(state.source.label())
        .show_ui(ui, |ui| {
            for name in preset_names() {
                let selected = current.as_deref() == Some(*name);
                if ui.selectable_label(selected, *name).clicked() && !selected {
                    chosen = Some(*name);
                }
            }
        });
    if let Some(name) = chosen {
        if let Err(e) = state.load_preset(name) {
            state.report(e);
        }
    }

    let scene = &state.scene.scene;
    ui.weak(format!(
        "{}: {}  {}: {}  {}: {}",
        t("panel.shapes"),
        scene.shapes.len(),
        t("panel.nodes"),
        scene.node_count(),
        t("panel.edges"),
        scene.edge_count()
    ));

    ui.horizontal(|ui| {
        if ui.button(t("menu.open")).clicked() {
            open_scene_dialog(state);
        }
        if ui.button(t("menu.save")).clicked() {
            save_scene_dialog(state);
        }
    });
}

fn camera_section(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading(t("panel.camera"));

    let cam = &state.scene.camera;
    egui::Grid::new("camera_readout").num_columns(2).show(ui, |ui| {
        for (label, value) in ["x", "y", "z", "a"].iter().zip(cam.position) {
            ui.label(*label);
            ui.monospace(format!("{value:>9.3}"));
            ui.end_row();
        }
        for (plane, angle) in RotationPlane::ALL.iter().zip(cam.theta) {
            ui.label(format!("θ {}", plane_name(*plane)));
            ui.monospace(format!("{:>8.1}°", angle.to_degrees()));
            ui.end_row();
        }
    });

    ui.checkbox(&mut state.animate, t("menu.animate"));
    if ui.button(t("menu.reset_camera")).clicked() {
        state.reset_camera();
    }
}

fn settings_section(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading(t("panel.settings"));

    let settings = &mut state.settings;
    ui.add(
        egui::Slider::new(&mut settings.controls.move_sensitivity, 0.1..=30.0)
            .logarithmic(true)
            .text(t("settings.move")),
    );
    ui.add(
        egui::Slider::new(&mut settings.controls.rotate_sensitivity, 0.05..=5.0)
            .text(t("settings.rotate")),
    );
    ui.add(egui::Slider::new(&mut settings.viewport.line_width, 0.5..=5.0).text(t("settings.line_width")));
    ui.add(egui::Slider::new(&mut settings.ui.font_size, 10.0..=24.0).text(t("settings.font_size")));

    ui.horizontal(|ui| {
        ui.label(t("settings.bg_color"));
        ui.color_edit_button_srgb(&mut settings.viewport.background_color);
    });
}

fn help_section(ui: &mut Ui, cam_type: CameraType) {
    ui.collapsing(t("panel.keys"), |ui| {
        let mode = match cam_type {
            CameraType::Single => t("mode.single"),
            CameraType::Free => t("mode.free"),
            CameraType::Fps => t("mode.fps"),
        };
        ui.weak(mode);

        let rows = [
            (t("help.forward_back"), Control::movement(MoveDirection::Forward), Control::movement(MoveDirection::Back)),
            (t("help.left_right"), Control::movement(MoveDirection::Left), Control::movement(MoveDirection::Right)),
            (t("help.up_down"), Control::movement(MoveDirection::Up), Control::movement(MoveDirection::Down)),
            (t("help.ana_kata"), Control::movement(MoveDirection::Ana), Control::movement(MoveDirection::Kata)),
        ];
        egui::Grid::new("key_help").num_columns(2).show(ui, |ui| {
            for (label, a, b) in rows {
                ui.label(label);
                ui.monospace(format!("{}, {}", describe(a), describe(b)));
                ui.end_row();
            }
            for plane in RotationPlane::ALL {
                ui.label(format!("{} {}", t("help.rotate"), plane_name(plane)));
                ui.monospace(format!(
                    "{}, {}",
                    describe(Control::rotation(plane, true)),
                    describe(Control::rotation(plane, false))
                ));
                ui.end_row();
            }
        });
        ui.weak(t("help.shortcuts"));
    });
}

fn plane_name(plane: RotationPlane) -> &'static str {
    match plane {
        RotationPlane::Xy => "xy",
        RotationPlane::Yz => "yz",
        RotationPlane::Xz => "xz",
        RotationPlane::Xa => "xa",
        RotationPlane::Ya => "ya",
        RotationPlane::Za => "za",
    }
}
