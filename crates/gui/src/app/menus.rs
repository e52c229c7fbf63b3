//! Application menu bar

use eframe::egui;
use shared::scenes::preset_names;

use crate::i18n::{lang, set_lang, t, Lang};
use crate::state::ViewerState;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut ViewerState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            open_scene_dialog(state);
        }
        if ui.button(t("menu.save")).clicked() {
            ui.close_menu();
            save_scene_dialog(state);
        }
        ui.separator();
        ui.menu_button(t("menu.presets"), |ui| {
            for name in preset_names() {
                if ui.button(*name).clicked() {
                    ui.close_menu();
                    if let Err(e) = state.load_preset(name) {
                        state.report(e);
                    }
                }
            }
        });
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            std::process::exit(0);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut ViewerState) {
    ui.menu_button(t("menu.view"), |ui| {
        if ui.button(t("menu.reset_camera")).clicked() {
            state.reset_camera();
            ui.close_menu();
        }
        ui.checkbox(&mut state.animate, t("menu.animate"));
        ui.checkbox(&mut state.settings.viewport.show_hud, t("menu.hud"));
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for (l, label) in [(Lang::Ru, "Русский"), (Lang::En, "English")] {
                if ui.radio(lang() == l, label).clicked() {
                    set_lang(l);
                    state.settings.ui.language = l.code().to_string();
                    ui.close_menu();
                }
            }
        });
    });
}

pub fn open_scene_dialog(state: &mut ViewerState) {
    if let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.open_title"))
        .add_filter("JSON", &["json"])
        .pick_file()
    {
        if let Err(e) = state.load_file(&path) {
            state.report(e);
        }
    }
}

pub fn save_scene_dialog(state: &mut ViewerState) {
    if let Some(path) = rfd::FileDialog::new()
        .set_title(t("menu.save_title"))
        .add_filter("JSON", &["json"])
        .set_file_name("scene.json")
        .save_file()
    {
        if let Err(e) = state.save_file(&path) {
            state.report(e);
        }
    }
}
