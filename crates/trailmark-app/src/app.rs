//! Application shell: window setup, per-frame update loop, and
//! keyboard handling.

use egui::{Key, Vec2 as EguiVec2};
use kurbo::{Point, Vec2};

use crate::drawing::DrawingManager;
use crate::map_view::MapView;
use crate::ui::{self, ControlAnchor, UiAction};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Trailmark".to_string(),
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Top level application state.
pub struct TrailmarkApp {
    map: MapView,
    /// `None` when the drawing engine failed to mount. The map still
    /// renders; the roster panel and tools are absent.
    drawing: Option<DrawingManager>,
}

impl TrailmarkApp {
    pub fn new() -> Self {
        let drawing = match DrawingManager::mount() {
            Ok(drawing) => Some(drawing),
            Err(err) => {
                log::error!("drawing engine unavailable: {err}");
                None
            }
        };
        Self {
            map: MapView::new(),
            drawing,
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let Some(drawing) = &mut self.drawing else {
            return;
        };
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            if self.map.has_draft() {
                self.map.cancel_draft();
            } else {
                drawing.engine_mut().clear_selection();
            }
        }
        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            self.map.finish_draft(drawing);
        }
        if ctx.input(|i| i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace)) {
            if !self.map.has_draft() {
                drawing.delete_selected();
            }
        }
    }

    fn apply_action(&mut self, action: UiAction, ctx: &egui::Context) {
        let viewport = ctx.screen_rect().size();
        let viewport = Vec2::new(viewport.x as f64, viewport.y as f64);
        let center = Point::new(viewport.x / 2.0, viewport.y / 2.0);

        match action {
            UiAction::SelectTool(tool) => self.map.set_tool(tool),
            UiAction::ZoomIn => self.map.camera.zoom_by(1.0, center, viewport),
            UiAction::ZoomOut => self.map.camera.zoom_by(-1.0, center, viewport),
            UiAction::EditFeature(id) => {
                if let Some(drawing) = &mut self.drawing {
                    drawing.edit_feature(&id);
                }
            }
            UiAction::DeleteFeature(id) => {
                if let Some(drawing) = &mut self.drawing {
                    drawing.delete_feature(&id);
                }
            }
            UiAction::TrashSelection => {
                if let Some(drawing) = &mut self.drawing {
                    drawing.delete_selected();
                }
            }
        }
    }
}

impl eframe::App for TrailmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(drawing) = &mut self.drawing {
            drawing.pump_events();
        }

        self.handle_keys(ctx);

        let mut actions: Vec<UiAction> = Vec::new();
        if let Some(drawing) = &self.drawing {
            ui::toolbar(ctx, ControlAnchor::TopLeft, self.map.tool, &mut actions);
            ui::nav_controls(ctx, ControlAnchor::BottomRight, &mut actions);
            ui::features_panel(ctx, drawing.roster(), &mut actions);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| match &mut self.drawing {
                Some(drawing) => self.map.show(ui, drawing),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Drawing engine unavailable.");
                    });
                }
            });

        for action in actions {
            self.apply_action(action, ctx);
        }
    }
}

/// Open the application window and run the event loop.
pub fn run(config: AppConfig) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.clone())
            .with_inner_size(EguiVec2::new(config.width, config.height)),
        ..Default::default()
    };
    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(TrailmarkApp::new()))),
    )
}
