use phasefolio_protocol::{Point, Rect, RenderCommand, Stroke, ThemeToken, Viewport};

use crate::effects::particles::FIELD_OPACITY;
use crate::effects::{Outline, ParticleField};

const SHAPE_OPACITY: f32 = 0.4;
const MAX_STAGE: f64 = 800.0;
const BRACKET: f64 = 24.0;

/// The square stage the core shape is drawn in, centred in the viewport.
pub fn stage_rect(viewport: &Viewport) -> Rect {
    let (pad_x, pad_y) = if viewport.is_compact() {
        (32.0, 96.0)
    } else {
        (192.0, 128.0)
    };
    let w = (viewport.width - 2.0 * pad_x).clamp(0.0, MAX_STAGE);
    let h = (viewport.height - 2.0 * pad_y).clamp(0.0, MAX_STAGE);
    let center = viewport.rect().center();
    Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
}

/// Background, particles, and the morphing core shape with its brackets.
pub fn render_backdrop(
    particles: Option<&ParticleField>,
    outline: &Outline,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let count = particles.map_or(0, ParticleField::len);
    let mut commands = Vec::with_capacity(count + 24);

    commands.push(RenderCommand::fill_rect(
        viewport.rect(),
        ThemeToken::Background,
        1.0,
    ));

    if let Some(field) = particles {
        commands.push(RenderCommand::group("particles"));
        commands.push(RenderCommand::PushOpacity {
            opacity: FIELD_OPACITY,
        });
        for p in field.particles() {
            commands.push(RenderCommand::DrawCircle {
                center: p.position,
                radius: p.size,
                fill: Some(ThemeToken::Accent),
                stroke: None,
                alpha: p.alpha,
            });
        }
        commands.push(RenderCommand::PopOpacity);
        commands.push(RenderCommand::EndGroup);
    }

    let stage = stage_rect(viewport);
    if stage.w <= 0.0 || stage.h <= 0.0 {
        return commands;
    }

    commands.push(RenderCommand::group("core-shape"));
    commands.push(RenderCommand::stroke_rect(
        stage,
        Stroke::new(ThemeToken::BorderFaint, 1.0),
        1.0,
    ));
    brackets(&mut commands, stage);

    // The shape fills 80% of the stage.
    let inset_w = stage.w * 0.1;
    let inset_h = stage.h * 0.1;
    let shape_frame = Rect::new(
        stage.x + inset_w,
        stage.y + inset_h,
        stage.w - 2.0 * inset_w,
        stage.h - 2.0 * inset_h,
    );
    commands.push(RenderCommand::PushOpacity {
        opacity: SHAPE_OPACITY,
    });
    for contour in outline.fit(shape_frame).contours() {
        // Soft halo under the crisp stroke.
        commands.push(RenderCommand::DrawPath {
            points: contour.clone(),
            closed: true,
            stroke: Stroke::new(ThemeToken::AccentGlow, 6.0),
            alpha: 0.5,
        });
        commands.push(RenderCommand::DrawPath {
            points: contour.clone(),
            closed: true,
            stroke: Stroke::new(ThemeToken::Accent, 1.5),
            alpha: 1.0,
        });
    }
    commands.push(RenderCommand::PopOpacity);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn brackets(commands: &mut Vec<RenderCommand>, r: Rect) {
    let corners = [
        (Point::new(r.x, r.y), 1.0, 1.0),
        (Point::new(r.x + r.w, r.y), -1.0, 1.0),
        (Point::new(r.x, r.y + r.h), 1.0, -1.0),
        (Point::new(r.x + r.w, r.y + r.h), -1.0, -1.0),
    ];
    for (corner, dx, dy) in corners {
        commands.push(RenderCommand::line(
            corner,
            Point::new(corner.x + dx * BRACKET, corner.y),
            ThemeToken::Accent,
            1.0,
        ));
        commands.push(RenderCommand::line(
            corner,
            Point::new(corner.x, corner.y + dy * BRACKET),
            ThemeToken::Accent,
            1.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortfolioConfig;
    use crate::effects::morph::CONTOUR_POINTS;
    use crate::engine::Controller;

    #[test]
    fn draws_every_particle_and_contour() {
        let config = PortfolioConfig::load_default().unwrap_or_else(|e| panic!("{e}"));
        let mut c = Controller::new(config);
        let vp = Viewport::new(1280.0, 900.0);
        c.resize(&vp);
        let cmds = render_backdrop(c.particles(), &c.outline(), &vp);

        let circles = cmds
            .iter()
            .filter(|cmd| matches!(cmd, RenderCommand::DrawCircle { .. }))
            .count();
        assert_eq!(circles, 600);

        let paths: Vec<&Vec<Point>> = cmds
            .iter()
            .filter_map(|cmd| match cmd {
                RenderCommand::DrawPath { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        // Halo and stroke for each of the three contours.
        assert_eq!(paths.len(), 6);
        let stage = stage_rect(&vp);
        for points in paths {
            assert_eq!(points.len(), CONTOUR_POINTS);
            assert!(points.iter().all(|p| stage.contains(*p)));
        }
    }

    #[test]
    fn stage_is_capped_and_centred() {
        let vp = Viewport::new(2400.0, 1600.0);
        let stage = stage_rect(&vp);
        assert_eq!((stage.w, stage.h), (800.0, 800.0));
        assert_eq!(stage.center(), vp.rect().center());
    }

    #[test]
    fn no_particles_before_first_resize() {
        let config = PortfolioConfig::load_default().unwrap_or_else(|e| panic!("{e}"));
        let c = Controller::new(config);
        let vp = Viewport::new(1280.0, 900.0);
        let cmds = render_backdrop(c.particles(), &c.outline(), &vp);
        assert!(!cmds.iter().any(|cmd| matches!(cmd, RenderCommand::DrawCircle { .. })));
    }
}
