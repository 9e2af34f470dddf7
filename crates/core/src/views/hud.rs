use phasefolio_protocol::{Point, Rect, RenderCommand, Stroke, TextAlign, ThemeToken, Viewport};

use crate::engine::Frame;
use crate::model::PhaseTable;

const EDGE: f64 = 24.0;
const EDGE_COMPACT: f64 = 16.0;
const BAR_HEIGHT: f64 = 32.0;
const SMALL_FONT: f64 = 10.0;
const TINY_FONT: f64 = 9.0;
const HEADING_FONT: f64 = 44.0;
const HEADING_FONT_COMPACT: f64 = 32.0;
const TERMINAL_HEIGHT: f64 = 360.0;
const MATRIX_CELL: f64 = 32.0;
const MATRIX_GAP: f64 = 4.0;
const STRIP_WIDTH: f64 = 2.0;

/// Render the HUD: status bar, data terminal, bottom readout, progress strip.
///
/// The chrome fades and slides with `frame.hud`; the terminal is hidden
/// while a detail panel is open.
pub fn render_hud(frame: &Frame, phases: &PhaseTable, viewport: &Viewport) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(96);
    let hud = frame.hud;
    let opacity = hud.opacity as f32;

    // Top status bar slides up as proximity drops.
    commands.push(RenderCommand::group("hud-top"));
    commands.push(RenderCommand::PushOpacity { opacity });
    commands.push(RenderCommand::PushTransform {
        translate: Point::new(0.0, -hud.vertical_offset),
        scale: 1.0,
        origin: Point::new(0.0, 0.0),
    });
    top_bar(&mut commands, frame, viewport);
    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::PopOpacity);
    commands.push(RenderCommand::EndGroup);

    if !frame.expansion.is_expanded() {
        commands.push(RenderCommand::group("hud-terminal"));
        commands.push(RenderCommand::PushOpacity { opacity });
        commands.push(RenderCommand::PushTransform {
            translate: Point::new(0.0, 0.0),
            scale: hud.scale,
            origin: viewport.rect().center(),
        });
        terminal(&mut commands, frame, viewport);
        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::PopOpacity);
        commands.push(RenderCommand::EndGroup);
    }

    // Bottom bar slides down.
    commands.push(RenderCommand::group("hud-bottom"));
    commands.push(RenderCommand::PushOpacity { opacity });
    commands.push(RenderCommand::PushTransform {
        translate: Point::new(0.0, hud.vertical_offset),
        scale: 1.0,
        origin: Point::new(0.0, 0.0),
    });
    bottom_bar(&mut commands, frame, phases, viewport);
    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::PopOpacity);
    commands.push(RenderCommand::EndGroup);

    progress_strip(&mut commands, frame, viewport);

    if viewport.is_compact() {
        commands.push(RenderCommand::PushOpacity {
            opacity: 1.0 - opacity,
        });
        commands.push(RenderCommand::text(
            Point::new(viewport.width / 2.0, viewport.height - 96.0),
            "NAVIGATING PROTOCOL...",
            ThemeToken::TextMuted,
            SMALL_FONT,
            TextAlign::Center,
        ));
        commands.push(RenderCommand::PopOpacity);
    }

    commands
}

fn edge(viewport: &Viewport) -> f64 {
    if viewport.is_compact() { EDGE_COMPACT } else { EDGE }
}

fn top_bar(commands: &mut Vec<RenderCommand>, frame: &Frame, viewport: &Viewport) {
    let e = edge(viewport);
    let bar = Rect::new(e, e, 300.0_f64.min(viewport.width - 2.0 * e), BAR_HEIGHT);
    let mid = bar.y + bar.h / 2.0;

    commands.push(RenderCommand::DrawRect {
        rect: bar,
        fill: Some(ThemeToken::Glass),
        stroke: Some(Stroke::new(ThemeToken::Border, 1.0)),
        alpha: 1.0,
    });
    commands.push(RenderCommand::text(
        Point::new(bar.x + 16.0, mid),
        "PACMARSAN // PORTFOLIO",
        ThemeToken::TextMuted,
        SMALL_FONT,
        TextAlign::Left,
    ));
    let divider = bar.x + 168.0;
    commands.push(RenderCommand::line(
        Point::new(divider, mid - 6.0),
        Point::new(divider, mid + 6.0),
        ThemeToken::Border,
        1.0,
    ));
    commands.push(RenderCommand::text(
        Point::new(divider + 12.0, mid),
        "SYSTEM:",
        ThemeToken::TextMuted,
        SMALL_FONT,
        TextAlign::Left,
    ));
    commands.push(RenderCommand::text(
        Point::new(divider + 62.0, mid),
        "ONLINE",
        ThemeToken::StatusOnline,
        SMALL_FONT,
        TextAlign::Left,
    ));
    // Blinking status dot, one blink per second.
    let blink = if frame.clock.fract() < 0.5 { 1.0 } else { 0.2 };
    commands.push(RenderCommand::DrawCircle {
        center: Point::new(divider + 112.0, mid),
        radius: 3.0,
        fill: Some(ThemeToken::StatusOnline),
        stroke: None,
        alpha: blink,
    });
}

fn terminal(commands: &mut Vec<RenderCommand>, frame: &Frame, viewport: &Viewport) {
    let compact = viewport.is_compact();
    let e = edge(viewport);
    let width = if compact {
        viewport.width - 2.0 * e
    } else {
        (viewport.width / 2.0 - 2.0 * EDGE).max(320.0)
    };
    let left = if compact { e } else { EDGE * 4.0 };
    let top = (viewport.height - TERMINAL_HEIGHT) / 2.0;
    let panel = Rect::new(left, top, width, TERMINAL_HEIGHT);
    let pad = if compact { 24.0 } else { 40.0 };
    let x = panel.x + pad;

    commands.push(RenderCommand::DrawRect {
        rect: panel,
        fill: Some(ThemeToken::Surface),
        stroke: Some(Stroke::new(ThemeToken::Border, 1.0)),
        alpha: 1.0,
    });
    commands.push(RenderCommand::fill_rect(
        Rect::new(panel.x, panel.y, 4.0, panel.h),
        ThemeToken::Accent,
        1.0,
    ));
    commands.push(RenderCommand::fill_rect(
        Rect::new(panel.x, panel.y + panel.h - 2.0, panel.w, 2.0),
        ThemeToken::BorderFaint,
        1.0,
    ));

    commands.push(RenderCommand::text(
        Point::new(x, panel.y + pad),
        "PACMARSAN PROTOCOL // PORTFOLIO",
        ThemeToken::TextFaint,
        SMALL_FONT,
        TextAlign::Left,
    ));

    let [heading, label, subtext] = &frame.terminal;
    let heading_font = if compact { HEADING_FONT_COMPACT } else { HEADING_FONT };
    let heading_y = panel.y + pad + 56.0;
    commands.push(RenderCommand::text(
        Point::new(x, heading_y),
        heading.as_str(),
        ThemeToken::Accent,
        heading_font,
        TextAlign::Left,
    ));
    if heading != &frame.title {
        // Reveal cursor after the scrambled text.
        let cursor_x = x + heading.chars().count() as f64 * heading_font * 0.6 + 6.0;
        commands.push(RenderCommand::fill_rect(
            Rect::new(cursor_x, heading_y - heading_font * 0.35, heading_font * 0.3, heading_font * 0.7),
            ThemeToken::Accent,
            if frame.clock.fract() < 0.5 { 1.0 } else { 0.0 },
        ));
    }

    let rows_y = heading_y + 64.0;
    commands.push(RenderCommand::line(
        Point::new(x, rows_y - 24.0),
        Point::new(panel.x + panel.w - pad, rows_y - 24.0),
        ThemeToken::BorderFaint,
        1.0,
    ));
    for (i, (key, value)) in [("PHASE:", label), ("TYPE:", subtext)].into_iter().enumerate() {
        let y = rows_y + i as f64 * 24.0;
        commands.push(RenderCommand::text(
            Point::new(x, y),
            key,
            ThemeToken::TextFaint,
            SMALL_FONT,
            TextAlign::Left,
        ));
        commands.push(RenderCommand::text(
            Point::new(x + 72.0, y),
            value.as_str(),
            ThemeToken::TextPrimary,
            11.0,
            TextAlign::Left,
        ));
    }

    let button = Rect::new(x, panel.y + panel.h - pad - 28.0, 168.0, 28.0);
    commands.push(RenderCommand::fill_rect(button, ThemeToken::Accent, 1.0));
    commands.push(RenderCommand::text(
        button.center(),
        "INITIATE SEQUENCE",
        ThemeToken::OnAccent,
        SMALL_FONT,
        TextAlign::Center,
    ));
    for i in 0..4 {
        let bx = panel.x + panel.w - pad - 4.0 - f64::from(i) * 8.0;
        commands.push(RenderCommand::fill_rect(
            Rect::new(bx, button.center().y - 6.0, 4.0, 12.0),
            ThemeToken::BorderFaint,
            1.0,
        ));
    }
}

fn bottom_bar(
    commands: &mut Vec<RenderCommand>,
    frame: &Frame,
    phases: &PhaseTable,
    viewport: &Viewport,
) {
    let e = edge(viewport);
    let base = viewport.height - e;

    commands.push(RenderCommand::text(
        Point::new(e, base - 22.0),
        format!("COORDS: {}", frame.coords),
        ThemeToken::TextMuted,
        SMALL_FONT,
        TextAlign::Left,
    ));
    commands.push(RenderCommand::text(
        Point::new(e, base - 6.0),
        "SCROLL-LINKED ENGINE V1.0",
        ThemeToken::TextFaint,
        SMALL_FONT,
        TextAlign::Left,
    ));

    if viewport.is_compact() {
        return;
    }

    let right = viewport.width - e;
    let count = phases.len() as f64;
    let matrix_width = count * MATRIX_CELL + (count - 1.0).max(0.0) * MATRIX_GAP;
    for (i, phase) in phases.iter().enumerate() {
        let x = right - matrix_width + i as f64 * (MATRIX_CELL + MATRIX_GAP);
        let token = if phase.name == frame.active {
            ThemeToken::Accent
        } else {
            ThemeToken::MatrixIdle
        };
        commands.push(RenderCommand::fill_rect(
            Rect::new(x, base - 24.0, MATRIX_CELL, 4.0),
            token,
            1.0,
        ));
    }
    commands.push(RenderCommand::text(
        Point::new(right, base - 6.0),
        "PHASE PROGRESSION MATRIX",
        ThemeToken::TextFaint,
        TINY_FONT,
        TextAlign::Right,
    ));
}

fn progress_strip(commands: &mut Vec<RenderCommand>, frame: &Frame, viewport: &Viewport) {
    commands.push(RenderCommand::group("progress"));
    commands.push(RenderCommand::fill_rect(
        Rect::new(0.0, 0.0, STRIP_WIDTH, viewport.height),
        ThemeToken::ProgressTrack,
        1.0,
    ));
    commands.push(RenderCommand::fill_rect(
        Rect::new(0.0, 0.0, STRIP_WIDTH, frame.progress * viewport.height),
        ThemeToken::Accent,
        1.0,
    ));
    commands.push(RenderCommand::EndGroup);
}
