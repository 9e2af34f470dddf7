use phasefolio_protocol::{Color, ThemeToken};

/// Paint color for `token` under the frame's accent, with `alpha` applied on
/// top of the palette's own alpha.
pub fn resolve(token: ThemeToken, accent: Color, alpha: f32) -> egui::Color32 {
    let color = token.resolve(accent);
    to_color32(color.with_alpha(color.a * alpha))
}

pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Dark egui visuals with the accent on selection and hover, for the
/// detail panels.
pub fn visuals(accent: Color) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    let accent32 = to_color32(accent);
    let bg = to_color32(ThemeToken::Surface.resolve(accent));
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.extreme_bg_color = to_color32(ThemeToken::Background.resolve(accent));
    visuals.selection.bg_fill = accent32.linear_multiply(0.3);
    visuals.selection.stroke = egui::Stroke::new(1.0, accent32);
    visuals.hyperlink_color = accent32;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, accent32);
    visuals
}
