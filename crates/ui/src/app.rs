use eframe::egui;
use phasefolio_core::config::{PortfolioConfig, Tuning};
use phasefolio_core::engine::Controller;
use phasefolio_core::model::ScrollGeometry;
use phasefolio_core::views::{self, enter_button_rect, illustration_rect};
use phasefolio_protocol::{Point, Viewport};

use crate::panels::{self, PanelAction};
use crate::renderer;

/// Fraction of a viewport height one arrow key press scrolls.
const ARROW_STEP: f64 = 0.1;

/// Number keys that pick an item in the open panel.
const DIGITS: [egui::Key; 9] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
    egui::Key::Num6,
    egui::Key::Num7,
    egui::Key::Num8,
    egui::Key::Num9,
];

/// Main application state.
pub struct PortfolioApp {
    controller: Controller,
    /// Virtual document scroll offset in pixels.
    scroll_y: f64,
    viewport: Option<Viewport>,
    /// Error message to display.
    error: Option<String>,
}

impl PortfolioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: PortfolioConfig) -> Self {
        let controller = Controller::new(config);
        cc.egui_ctx.set_visuals(crate::theme::visuals(controller.accent()));
        Self {
            controller,
            scroll_y: 0.0,
            viewport: None,
            error: None,
        }
    }

    fn load_config(&mut self, data: &[u8]) {
        let text = String::from_utf8_lossy(data);
        match PortfolioConfig::from_json(&text) {
            Ok(config) => {
                tracing::info!("configuration replaced from dropped file");
                let progress = self.controller.progress();
                self.controller = Controller::new(config);
                self.controller.set_progress(progress);
                if let Some(vp) = self.viewport {
                    self.controller.resize(&vp);
                    // The new document may be taller or shorter; keep the same progress.
                    self.scroll_y =
                        document_geometry(&self.controller.config().tuning, 0.0, &vp).offset_for(progress);
                }
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected dropped configuration");
                self.error = Some(format!("Failed to load configuration: {e}"));
            }
        }
    }

    fn geometry(&self, viewport: &Viewport) -> ScrollGeometry {
        document_geometry(&self.controller.config().tuning, self.scroll_y, viewport)
    }

    fn scroll_by(&mut self, delta: f64, viewport: &Viewport) {
        let max = self.geometry(viewport).scrollable().max(0.0);
        self.scroll_y = (self.scroll_y + delta).clamp(0.0, max);
    }

    fn handle_scroll_input(&mut self, ui: &egui::Ui, response: &egui::Response, viewport: &Viewport) {
        let vh = viewport.height;

        let wheel = ui.input(|i| i.smooth_scroll_delta.y);
        if wheel.abs() > 0.1 {
            self.scroll_by(-f64::from(wheel), viewport);
        }
        if response.dragged() {
            self.scroll_by(-f64::from(response.drag_delta().y), viewport);
        }

        let mut delta = 0.0;
        ui.input(|i| {
            if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::J) {
                delta += vh * ARROW_STEP;
            }
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::K) {
                delta -= vh * ARROW_STEP;
            }
            if i.key_pressed(egui::Key::PageDown) || i.key_pressed(egui::Key::Space) {
                delta += vh;
            }
            if i.key_pressed(egui::Key::PageUp) {
                delta -= vh;
            }
            if i.key_pressed(egui::Key::Home) {
                delta = f64::NEG_INFINITY;
            }
            if i.key_pressed(egui::Key::End) {
                delta = f64::INFINITY;
            }
        });
        if delta != 0.0 {
            self.scroll_by(delta, viewport);
        }

        self.controller.on_scroll(&self.geometry(viewport));
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        self.controller.tick(f64::from(dt));

        if let Some(panel) = self.controller.open_panel().cloned() {
            let frame = self.controller.frame();
            match panels::show_panel(ctx, &panel, &frame, self.controller.accent()) {
                Some(PanelAction::Close) => {
                    self.controller.close();
                }
                Some(PanelAction::Select(id)) => {
                    self.controller.select(&id);
                }
                None => {}
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let viewport = Viewport::new(f64::from(available.width()), f64::from(available.height()));
                if self.viewport != Some(viewport) {
                    self.controller.resize(&viewport);
                    self.viewport = Some(viewport);
                }

                let response = ui.allocate_rect(available, egui::Sense::click_and_drag());
                let local = response
                    .interact_pointer_pos()
                    .map(|p| {
                        Point::new(
                            f64::from(p.x - available.left()),
                            f64::from(p.y - available.top()),
                        )
                    });

                if self.controller.boot().is_entered() {
                    self.handle_scroll_input(ui, &response, &viewport);
                    let expanded = self.controller.expansion().is_expanded();
                    if response.clicked()
                        && local.is_some_and(|p| illustration_rect(&viewport, expanded).contains(p))
                    {
                        self.controller.interact();
                    }
                    if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.controller.interact();
                    }
                    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        self.controller.close();
                    }
                    let digit = ui.input(|i| DIGITS.iter().position(|key| i.key_pressed(*key)));
                    if let Some(index) = digit {
                        self.controller.select_nth(index + 1);
                    }
                } else {
                    let clicked_enter = response.clicked()
                        && local.is_some_and(|p| enter_button_rect(&viewport).contains(p));
                    if clicked_enter || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.controller.enter();
                    }
                }

                let commands = views::render_scene(&self.controller, &viewport);
                let painter = ui.painter_at(available);
                renderer::render_commands(&painter, &commands, available.min, self.controller.accent());
            });

        if let Some(err) = self.error.clone() {
            egui::Window::new("Configuration")
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    if ui.button("Dismiss").clicked() {
                        self.error = None;
                    }
                });
        }

        // Handle file drop
        let dropped: Option<Vec<u8>> = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|file| file.bytes.as_ref())
                .map(|bytes| bytes.to_vec())
        });
        if let Some(data) = dropped {
            self.load_config(&data);
        }

        ctx.set_visuals(crate::theme::visuals(self.controller.accent()));
        if self.controller.is_animating() {
            ctx.request_repaint();
        }
    }
}

/// The virtual document laid out by `tuning`, scrolled to `scroll_y`.
fn document_geometry(tuning: &Tuning, scroll_y: f64, viewport: &Viewport) -> ScrollGeometry {
    ScrollGeometry::new(scroll_y, tuning.document_height(viewport.height), viewport.height)
}
