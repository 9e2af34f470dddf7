use std::f64::consts::{PI, TAU};

use phasefolio_protocol::{Point, Rect, RenderCommand, Stroke, TextAlign, ThemeToken, Viewport};

use crate::effects::easing::ease_in_out_quart;
use crate::engine::Frame;

const GRID_SPACING: f64 = 40.0;
const GLOBE_RADIUS: f64 = 60.0;
const LOADER_WIDTH: f64 = 192.0;
const LOADER_SWEEP_SECS: f64 = 1.5;
const GLOBE_TURN_SECS: f64 = 10.0;
const BRACKET: f64 = 24.0;

/// The "ENTER PROTOCOL" button, for hit testing.
pub fn enter_button_rect(viewport: &Viewport) -> Rect {
    let c = viewport.rect().center();
    Rect::new(c.x - 96.0, c.y + 150.0, 192.0, 40.0)
}

/// Start-up overlay: dotted grid, rotating globe, loader, and the enter
/// button once the system is ready.
pub fn render_splash(frame: &Frame, viewport: &Viewport) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(256);
    let c = viewport.rect().center();

    commands.push(RenderCommand::group("splash"));
    commands.push(RenderCommand::fill_rect(viewport.rect(), ThemeToken::Background, 1.0));

    let mut y = GRID_SPACING / 2.0;
    while y < viewport.height {
        let mut x = GRID_SPACING / 2.0;
        while x < viewport.width {
            commands.push(RenderCommand::DrawCircle {
                center: Point::new(x, y),
                radius: 1.0,
                fill: Some(ThemeToken::SplashGrid),
                stroke: None,
                alpha: 1.0,
            });
            x += GRID_SPACING;
        }
        y += GRID_SPACING;
    }

    globe(&mut commands, Point::new(c.x, c.y - 60.0), frame.clock);

    commands.push(RenderCommand::text(
        Point::new(c.x, c.y + 40.0),
        "PACMARSAN SYSTEMS READY",
        ThemeToken::TextPrimary,
        14.0,
        TextAlign::Center,
    ));

    let track = Rect::new(c.x - LOADER_WIDTH / 2.0, c.y + 64.0, LOADER_WIDTH, 1.0);
    commands.push(RenderCommand::fill_rect(track, ThemeToken::ProgressTrack, 1.0));
    let sweep = ease_in_out_quart((frame.clock / LOADER_SWEEP_SECS).fract());
    let head = track.x - LOADER_WIDTH + sweep * 2.0 * LOADER_WIDTH;
    let (from, to) = (head.max(track.x), (head + LOADER_WIDTH).min(track.x + track.w));
    if to > from {
        commands.push(RenderCommand::fill_rect(
            Rect::new(from, track.y, to - from, track.h),
            ThemeToken::SplashAccent,
            1.0,
        ));
    }

    for (i, label) in ["SECURE_LINK", "AUDIO_ENABLED"].into_iter().enumerate() {
        let x = if i == 0 { track.x } else { track.x + track.w };
        let align = if i == 0 { TextAlign::Left } else { TextAlign::Right };
        commands.push(RenderCommand::text(
            Point::new(x, track.y + 16.0),
            label,
            ThemeToken::TextFaint,
            9.0,
            align,
        ));
    }

    if frame.boot.is_ready() {
        let button = enter_button_rect(viewport);
        commands.push(RenderCommand::stroke_rect(
            button,
            Stroke::new(ThemeToken::SplashAccent, 1.0),
            1.0,
        ));
        commands.push(RenderCommand::text(
            button.center(),
            "ENTER PROTOCOL",
            ThemeToken::SplashAccent,
            12.0,
            TextAlign::Center,
        ));
    }

    corner_brackets(&mut commands, viewport);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn globe(commands: &mut Vec<RenderCommand>, center: Point, clock: f64) {
    let stroke = Stroke::new(ThemeToken::SplashAccent, 1.0);
    commands.push(RenderCommand::DrawCircle {
        center,
        radius: GLOBE_RADIUS,
        fill: None,
        stroke: Some(stroke),
        alpha: 0.8,
    });

    // Meridians are ellipses whose width follows the rotation.
    let turn = (clock / GLOBE_TURN_SECS).fract() * TAU;
    for k in 0..3 {
        let angle = turn + f64::from(k) * PI / 3.0;
        let rx = GLOBE_RADIUS * angle.cos().abs();
        commands.push(ellipse(center, rx, GLOBE_RADIUS, stroke, 0.5));
    }
    for lat in [-0.5_f64, 0.0, 0.5] {
        let y = center.y + lat * GLOBE_RADIUS;
        let rx = GLOBE_RADIUS * (1.0 - lat * lat).sqrt();
        commands.push(ellipse(Point::new(center.x, y), rx, rx * 0.2, stroke, 0.3));
    }
}

fn ellipse(center: Point, rx: f64, ry: f64, stroke: Stroke, alpha: f32) -> RenderCommand {
    let points = (0..48)
        .map(|i| {
            let a = f64::from(i) * TAU / 48.0;
            Point::new(center.x + rx * a.cos(), center.y + ry * a.sin())
        })
        .collect();
    RenderCommand::DrawPath {
        points,
        closed: true,
        stroke,
        alpha,
    }
}

fn corner_brackets(commands: &mut Vec<RenderCommand>, viewport: &Viewport) {
    let m = 32.0;
    let (w, h) = (viewport.width, viewport.height);
    let corners = [
        (Point::new(m, m), 1.0, 1.0),
        (Point::new(w - m, m), -1.0, 1.0),
        (Point::new(m, h - m), 1.0, -1.0),
        (Point::new(w - m, h - m), -1.0, -1.0),
    ];
    for (p, sx, sy) in corners {
        commands.push(RenderCommand::line(
            p,
            Point::new(p.x + sx * BRACKET, p.y),
            ThemeToken::SplashAccent,
            1.0,
        ));
        commands.push(RenderCommand::line(
            p,
            Point::new(p.x, p.y + sy * BRACKET),
            ThemeToken::SplashAccent,
            1.0,
        ));
    }
}
