use phasefolio_core::engine::Frame;
use phasefolio_core::model::{ContentItem, Panel, PhaseName};
use phasefolio_protocol::{Color, ThemeToken};

use crate::theme;

/// How far a panel section travels while it slides in, in points.
const SLIDE_DISTANCE: f32 = 48.0;

/// What the visitor did inside a detail panel this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Close,
    Select(String),
}

/// Show the open detail panel on the right. Sections appear as the reveal
/// sequence reaches them.
pub fn show_panel(ctx: &egui::Context, panel: &Panel, frame: &Frame, accent: Color) -> Option<PanelAction> {
    let mut action = None;
    let accent32 = theme::to_color32(accent);
    let muted = theme::resolve(ThemeToken::TextMuted, accent, 1.0);

    let width = (ctx.available_rect().width() * 0.6).max(320.0);
    egui::SidePanel::right("detail-panel")
        .exact_width(width)
        .resizable(false)
        .frame(egui::Frame::new().fill(theme::resolve(ThemeToken::Surface, accent, 1.0)).inner_margin(32.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("DETAIL VIEW").monospace().small().color(muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(egui::RichText::new("✕ CLOSE").monospace()).clicked() {
                        action = Some(PanelAction::Close);
                    }
                });
            });
            ui.add_space(16.0);

            if let Some(progress) = frame.reveal("heading") {
                section(ui, progress, |ui| {
                    ui.label(egui::RichText::new(&panel.heading).heading().strong().color(accent32));
                });
            }
            if let Some(progress) = frame.reveal("subheading").filter(|_| !panel.subheading.is_empty()) {
                section(ui, progress, |ui| {
                    ui.label(egui::RichText::new(&panel.subheading).monospace().color(muted));
                });
            }
            ui.add_space(24.0);

            let selected = frame.expansion.selected();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (item, progress) in panel
                    .items
                    .iter()
                    .filter_map(|item| frame.reveal(&item.id).map(|p| (item, p)))
                {
                    let is_selected = selected == Some(item.id.as_str());
                    let clicked = section(ui, progress, |ui| match panel.phase {
                        PhaseName::Brands => brand_row(ui, item, is_selected, accent32, muted),
                        PhaseName::Worlds => volume(ui, item, is_selected, accent32, muted),
                        _ => {
                            paragraph(ui, item, accent32);
                            false
                        }
                    });
                    if clicked {
                        action = Some(PanelAction::Select(item.id.clone()));
                    }
                    ui.add_space(12.0);
                }
            });
        });
    action
}

/// Horizontal offset and opacity of a section at eased entrance `progress`.
fn slide_in(progress: f64) -> (f32, f32) {
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) as f32 };
    ((1.0 - p) * SLIDE_DISTANCE, p)
}

/// Lay out one panel section, shifted and faded by its entrance progress.
fn section<R>(ui: &mut egui::Ui, progress: f64, add: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let (offset, opacity) = slide_in(progress);
    ui.horizontal(|ui| {
        ui.add_space(offset);
        ui.vertical(|ui| {
            ui.multiply_opacity(opacity);
            add(ui)
        })
        .inner
    })
    .inner
}

fn paragraph(ui: &mut egui::Ui, item: &ContentItem, accent: egui::Color32) {
    ui.label(egui::RichText::new(&item.title).monospace().color(accent));
    ui.label(&item.body);
}

fn brand_row(
    ui: &mut egui::Ui,
    item: &ContentItem,
    selected: bool,
    accent: egui::Color32,
    muted: egui::Color32,
) -> bool {
    let title = egui::RichText::new(&item.title).strong().size(18.0);
    let clicked = ui.selectable_label(selected, title).clicked();
    if let Some(tag) = &item.tag {
        ui.label(egui::RichText::new(tag).monospace().small().color(muted));
    }
    if selected {
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, accent))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(&item.body);
            });
    }
    clicked
}

fn volume(
    ui: &mut egui::Ui,
    item: &ContentItem,
    selected: bool,
    accent: egui::Color32,
    muted: egui::Color32,
) -> bool {
    let response = ui.horizontal(|ui| {
        let clicked = ui
            .selectable_label(selected, egui::RichText::new(&item.title).monospace().color(accent))
            .clicked();
        if let Some(date) = &item.tag {
            ui.label(egui::RichText::new(date).small().color(muted));
        }
        clicked
    });
    if selected {
        ui.label(&item.body);
    }
    response.inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasefolio_core::effects::Easing;

    #[test]
    fn hidden_and_settled_sections() {
        assert_eq!(slide_in(0.0), (SLIDE_DISTANCE, 0.0));
        assert_eq!(slide_in(1.0), (0.0, 1.0));
        assert_eq!(slide_in(f64::NAN), (SLIDE_DISTANCE, 0.0));
    }

    #[test]
    fn section_is_mid_slide_halfway_through_its_step() {
        let (offset, opacity) = slide_in(Easing::SLIDE.apply(0.5));
        assert!(offset > 0.0 && offset < SLIDE_DISTANCE / 2.0, "offset {offset}");
        assert!(opacity > 0.5 && opacity < 1.0, "opacity {opacity}");
    }
}
