//! Main application module

mod keyboard;
pub(crate) mod menus;
mod styles;

use std::path::PathBuf;

use eframe::egui;

use crate::i18n::{set_lang, Lang};
use crate::state::{ViewerSettings, ViewerState};
use crate::ui::{side_panel, status_bar};
use crate::viewport;

/// Main application
pub struct ViewerApp {
    state: ViewerState,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Settings as last written to disk
    saved_settings: ViewerSettings,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_scene: Option<PathBuf>) -> Self {
        let settings = ViewerSettings::load();
        set_lang(Lang::from_code(&settings.ui.language));

        let mut state = ViewerState::new(settings.clone());

        // CLI argument takes priority over the last preset
        if let Some(path) = initial_scene {
            if let Err(e) = state.load_file(&path) {
                state.report(e);
            }
        }

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        Self {
            last_font_size: state.settings.ui.font_size,
            saved_settings: settings,
            state,
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        let pointer_down = ctx.input(|i| i.pointer.any_down());
        if self.state.settings.needs_save(&self.saved_settings, pointer_down) {
            self.state.settings.save();
            self.saved_settings = self.state.settings.clone();
        }

        let controls = keyboard::handle_keyboard(ctx, &mut self.state);
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.state.step(&controls, f64::from(dt));

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state);
            });
        });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: scene and camera ─────────────────────
        egui::SidePanel::left("side_panel")
            .default_width(240.0)
            .width_range(180.0..=400.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    side_panel::show(ui, &mut self.state);
                });
            });

        // ── Central panel: wireframe ─────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                viewport::show(ui, &mut self.state);
            });

        ctx.request_repaint();
    }
}
