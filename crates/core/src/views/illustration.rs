use std::f64::consts::{PI, TAU};

use phasefolio_protocol::{Point, Rect, RenderCommand, Stroke, ThemeToken, Viewport};

use crate::effects::easing::ease_out_cubic;
use crate::effects::kind::{EFFECT_BOX, EffectSample};
use crate::engine::Frame;
use crate::model::{Phase, PhaseName};

/// Seconds for an illustration to fade and scale in after a phase change.
const ENTRANCE_SECS: f64 = 0.5;

/// Where the illustration sits: the right half of the stage, or the left
/// third while a detail panel is open.
pub fn illustration_rect(viewport: &Viewport, expanded: bool) -> Rect {
    let side = (viewport.height * 0.6).min(viewport.width * 0.35).max(0.0);
    let cx = if viewport.is_compact() {
        viewport.width / 2.0
    } else if expanded {
        viewport.width * 0.175
    } else {
        viewport.width * 0.75
    };
    let cy = viewport.height / 2.0;
    Rect::new(cx - side / 2.0, cy - side / 2.0, side, side)
}

/// Maps the 200×200 authoring box onto the screen.
#[derive(Clone, Copy)]
struct Canvas {
    origin: Point,
    scale: f64,
}

impl Canvas {
    fn new(frame: Rect) -> Self {
        Self {
            origin: Point::new(frame.x, frame.y),
            scale: frame.w.min(frame.h) / EFFECT_BOX,
        }
    }

    fn pt(self, x: f64, y: f64) -> Point {
        Point::new(self.origin.x + x * self.scale, self.origin.y + y * self.scale)
    }

    fn len(self, v: f64) -> f64 {
        v * self.scale
    }

    fn circle(self, x: f64, y: f64, r: f64, fill: Option<ThemeToken>, alpha: f32) -> RenderCommand {
        RenderCommand::DrawCircle {
            center: self.pt(x, y),
            radius: self.len(r),
            fill,
            stroke: Some(Stroke::new(ThemeToken::Accent, 1.0)),
            alpha,
        }
    }

    fn path(self, pts: &[(f64, f64)], closed: bool, alpha: f32) -> RenderCommand {
        RenderCommand::DrawPath {
            points: pts.iter().map(|&(x, y)| self.pt(x, y)).collect(),
            closed,
            stroke: Stroke::new(ThemeToken::Accent, 1.0),
            alpha,
        }
    }

    fn line(self, from: (f64, f64), to: (f64, f64), alpha: f32) -> RenderCommand {
        RenderCommand::DrawLine {
            from: self.pt(from.0, from.1),
            to: self.pt(to.0, to.1),
            color: ThemeToken::Accent,
            width: 1.0,
            alpha,
        }
    }
}

/// Line illustration for the active phase, with its effect sampled at
/// the time since the phase became active.
pub fn render_illustration(frame: &Frame, phase: &Phase, viewport: &Viewport) -> Vec<RenderCommand> {
    let rect = illustration_rect(viewport, frame.expansion.is_expanded());
    if rect.w <= 0.0 || phase.name == PhaseName::Contacts {
        return Vec::new();
    }

    let t = frame.phase_elapsed;
    let entrance = ease_out_cubic(t / ENTRANCE_SECS);
    let canvas = Canvas::new(rect);
    let mut commands = Vec::with_capacity(64);

    commands.push(RenderCommand::group(format!("illustration-{}", phase.name)));
    commands.push(RenderCommand::PushOpacity {
        opacity: entrance as f32,
    });
    commands.push(RenderCommand::PushTransform {
        translate: Point::new(0.0, 0.0),
        scale: 0.8 + 0.2 * entrance,
        origin: rect.center(),
    });

    match phase.name {
        PhaseName::Hero => hero(&mut commands, canvas, t),
        PhaseName::Worlds => worlds(&mut commands, canvas, t),
        PhaseName::Brands => brands(&mut commands, canvas, t),
        PhaseName::Experiences => experiences(&mut commands, canvas, t),
        PhaseName::Products => products(&mut commands, canvas, t),
        PhaseName::Contacts => {}
    }

    if let Some(effect) = &phase.effect {
        match effect.sample(t, rect) {
            EffectSample::Orbit { satellites, .. } => {
                for (i, s) in satellites.into_iter().enumerate() {
                    // Satellites pop in one after another.
                    let pop = ((t - 0.5 - i as f64 * 0.1) / 0.3).clamp(0.0, 1.0);
                    commands.push(RenderCommand::DrawCircle {
                        center: s,
                        radius: canvas.len(3.0) * pop,
                        fill: Some(ThemeToken::Accent),
                        stroke: None,
                        alpha: 1.0,
                    });
                }
            }
            EffectSample::Blocks(blocks) => {
                for block in blocks.into_iter().filter(|b| b.opacity > 0.0) {
                    commands.push(RenderCommand::fill_rect(
                        block.rect,
                        ThemeToken::Background,
                        block.opacity,
                    ));
                }
            }
            EffectSample::Bubbles(bubbles) => {
                for bubble in bubbles.into_iter().filter(|b| b.radius > 0.0) {
                    commands.push(RenderCommand::DrawCircle {
                        center: bubble.center,
                        radius: bubble.radius,
                        fill: Some(ThemeToken::Accent),
                        stroke: None,
                        alpha: bubble.opacity * 0.15,
                    });
                }
            }
        }
    }

    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::PopOpacity);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn hero(commands: &mut Vec<RenderCommand>, c: Canvas, t: f64) {
    commands.push(c.circle(100.0, 100.0, 40.0, None, (t / 1.5).min(1.0) as f32));
    commands.push(c.circle(100.0, 100.0, 60.0, None, 0.6));
    let cross = (0.3 * (t / 1.0).min(1.0)) as f32;
    commands.push(c.line((100.0, 20.0), (100.0, 180.0), cross));
    commands.push(c.line((20.0, 100.0), (180.0, 100.0), cross));
    let breathe = 1.0 + 0.05 * (t * TAU / 3.0).sin().abs();
    commands.push(c.circle(100.0, 100.0, 80.0 * breathe, None, 0.2));
}

fn worlds(commands: &mut Vec<RenderCommand>, c: Canvas, t: f64) {
    commands.push(c.path(&[(50.0, 40.0), (150.0, 40.0), (150.0, 160.0), (50.0, 160.0)], true, 1.0));
    let lines = (((t - 0.5) / 1.0).clamp(0.0, 1.0)) * 80.0;
    for (y, max) in [(60.0, 80.0), (80.0, 80.0), (100.0, 60.0)] {
        commands.push(c.line((60.0, y), (60.0 + lines.min(max), y), 0.5));
    }
    let bob = -10.0 * (t * PI / 3.0).sin().abs();
    commands.push(c.circle(160.0, 60.0 + bob, 10.0, None, 1.0));
    commands.push(c.circle(40.0, 140.0, 15.0, None, 0.6));
}

fn brands(commands: &mut Vec<RenderCommand>, c: Canvas, t: f64) {
    commands.push(c.path(&[(60.0, 80.0), (100.0, 60.0), (100.0, 140.0), (60.0, 120.0)], true, 1.0));
    commands.push(c.path(&[(30.0, 85.0), (60.0, 85.0), (60.0, 115.0), (30.0, 115.0)], true, 1.0));
    for i in 1..=3 {
        let fi = f64::from(i);
        let phase = ((t - fi * 0.3) / 1.5).rem_euclid(1.0);
        let alpha = (phase * PI).sin() as f32;
        let reach = 130.0 + fi * 10.0;
        let arc: Vec<(f64, f64)> = (0..=12)
            .map(|k| {
                let s = f64::from(k) / 12.0;
                // Quadratic bezier from (110, 100 - 15i) through (reach, 100).
                let (y0, y2) = (100.0 - fi * 15.0, 100.0 + fi * 15.0);
                let inv = 1.0 - s;
                let x = inv * inv * 110.0 + 2.0 * inv * s * reach + s * s * 110.0;
                let y = inv * inv * y0 + 2.0 * inv * s * 100.0 + s * s * y2;
                (x, y)
            })
            .collect();
        commands.push(c.path(&arc, false, alpha));
    }
    commands.push(c.circle(100.0, 100.0, 90.0, None, 0.2));
}

fn experiences(commands: &mut Vec<RenderCommand>, c: Canvas, t: f64) {
    let skew = (10.0_f64).to_radians().tan();
    let skewed = |x: f64, y: f64| (x - y * skew, y);
    let sway = (t * TAU / 4.0).sin() * 5.0;
    for (x, y, dy, alpha) in [(40.0, 40.0, sway, 0.6), (50.0, 70.0, -sway, 1.0)] {
        let y = y + dy;
        let pts = [
            skewed(x, y),
            skewed(x + 120.0, y),
            skewed(x + 120.0, y + 80.0),
            skewed(x, y + 80.0),
        ];
        commands.push(c.path(&pts, true, alpha));
    }
    let drawn = ((t - 1.0) / 1.0).clamp(0.0, 1.0);
    for (y, len) in [(90.0, 40.0), (105.0, 80.0), (120.0, 20.0)] {
        commands.push(c.path(&[skewed(60.0, y), skewed(60.0 + len * drawn, y)], false, 1.0));
    }
    let wander = (t * TAU / 3.0).sin().abs() * 20.0;
    commands.push(c.path(
        &[
            (140.0 + wander, 130.0 + wander),
            (150.0 + wander, 150.0 + wander),
            (140.0 + wander, 145.0 + wander),
        ],
        true,
        1.0,
    ));
}

fn products(commands: &mut Vec<RenderCommand>, c: Canvas, t: f64) {
    let spin = (t / 15.0).fract() * TAU;
    commands.push(c.circle(100.0, 100.0, 30.0, None, 1.0));
    for k in 0..8 {
        let angle = f64::from(k) * PI / 4.0 + spin;
        let (sin, cos) = angle.sin_cos();
        let rotate = |x: f64, y: f64| {
            let (dx, dy) = (x - 100.0, y - 100.0);
            (100.0 + dx * cos - dy * sin, 100.0 + dx * sin + dy * cos)
        };
        let tooth = [rotate(95.0, 55.0), rotate(105.0, 55.0), rotate(105.0, 70.0), rotate(95.0, 70.0)];
        commands.push(c.path(&tooth, true, 0.6));
    }
    let dash = (t % 1.0) * 20.0;
    for (from, to) in [((40.0, 100.0), (70.0, 100.0)), ((130.0, 100.0), (160.0, 100.0))] {
        commands.push(c.line(from, to, 0.4 + 0.2 * (dash / 20.0) as f32));
    }
    commands.push(c.circle(35.0, 100.0, 4.0, Some(ThemeToken::Accent), 1.0));
    commands.push(c.circle(165.0, 100.0, 4.0, Some(ThemeToken::Accent), 1.0));
}
