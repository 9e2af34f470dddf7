use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Shape, Stroke, StrokeKind};
use phasefolio_protocol::{Color, Point, RenderCommand, TextAlign};

use crate::theme;

/// Transform state for PushTransform/PopTransform: uniform scale, then offset.
#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    s: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            s: 1.0,
        }
    }

    /// Compose a child transform that scales about `origin` and then translates.
    fn then(self, translate: Point, scale: f64, origin: Point) -> Self {
        Self {
            tx: self.tx + self.s * (origin.x * (1.0 - scale) + translate.x),
            ty: self.ty + self.s * (origin.y * (1.0 - scale) + translate.y),
            s: self.s * scale,
        }
    }

    fn point(&self, p: Point, offset: Pos2) -> Pos2 {
        Pos2::new(
            (p.x * self.s + self.tx) as f32 + offset.x,
            (p.y * self.s + self.ty) as f32 + offset.y,
        )
    }

    fn len(&self, v: f64) -> f32 {
        (v * self.s) as f32
    }
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area and
/// `accent` the color accent tokens resolve to this frame.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    accent: Color,
) {
    let mut transform_stack: Vec<Transform> = vec![Transform::identity()];
    let mut opacity_stack: Vec<f32> = vec![1.0];

    for cmd in commands {
        let tf = transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::identity());
        let opacity = opacity_stack.last().copied().unwrap_or(1.0);

        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                stroke,
                alpha,
            } => {
                let min = tf.point(Point::new(rect.x, rect.y), offset);
                let (w, h) = (tf.len(rect.w), tf.len(rect.h));
                if w < 0.5 || h < 0.5 {
                    continue;
                }
                let egui_rect = Rect::from_min_size(min, egui::vec2(w, h));

                // Cull off-screen
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }

                let a = alpha * opacity;
                if let Some(token) = fill {
                    painter.rect_filled(egui_rect, CornerRadius::ZERO, theme::resolve(*token, accent, a));
                }
                if let Some(s) = stroke {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::ZERO,
                        Stroke::new(tf.len(s.width), theme::resolve(s.color, accent, a)),
                        StrokeKind::Inside,
                    );
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                alpha,
            } => {
                let c = tf.point(*center, offset);
                let r = tf.len(*radius);
                if r <= 0.0 {
                    continue;
                }
                let a = alpha * opacity;
                if let Some(token) = fill {
                    painter.circle_filled(c, r, theme::resolve(*token, accent, a));
                }
                if let Some(s) = stroke {
                    painter.circle_stroke(
                        c,
                        r,
                        Stroke::new(tf.len(s.width), theme::resolve(s.color, accent, a)),
                    );
                }
            }

            RenderCommand::DrawPath {
                points,
                closed,
                stroke,
                alpha,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let pts: Vec<Pos2> = points.iter().map(|p| tf.point(*p, offset)).collect();
                let s = Stroke::new(
                    tf.len(stroke.width),
                    theme::resolve(stroke.color, accent, alpha * opacity),
                );
                if *closed {
                    painter.add(Shape::closed_line(pts, s));
                } else {
                    painter.add(Shape::line(pts, s));
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                alpha,
            } => {
                let size = tf.len(*font_size);
                if size < 1.0 {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    tf.point(*position, offset),
                    anchor,
                    text,
                    FontId::monospace(size),
                    theme::resolve(*color, accent, alpha * opacity),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
                alpha,
            } => {
                painter.line_segment(
                    [tf.point(*from, offset), tf.point(*to, offset)],
                    Stroke::new(tf.len(*width), theme::resolve(*color, accent, alpha * opacity)),
                );
            }

            RenderCommand::PushTransform {
                translate,
                scale,
                origin,
            } => {
                transform_stack.push(tf.then(*translate, *scale, *origin));
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::PushOpacity { opacity: o } => {
                opacity_stack.push(opacity * o.clamp(0.0, 1.0));
            }

            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic — no visual effect in egui
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_about_origin_keeps_origin_fixed() {
        let origin = Point::new(100.0, 50.0);
        let tf = Transform::identity().then(Point::new(0.0, 0.0), 0.5, origin);
        let p = tf.point(origin, Pos2::ZERO);
        assert_eq!((p.x, p.y), (100.0, 50.0));
        let q = tf.point(Point::new(200.0, 50.0), Pos2::ZERO);
        assert_eq!(q.x, 150.0);
    }

    #[test]
    fn nested_translate_accumulates() {
        let tf = Transform::identity()
            .then(Point::new(0.0, -10.0), 1.0, Point::new(0.0, 0.0))
            .then(Point::new(5.0, 0.0), 1.0, Point::new(0.0, 0.0));
        let p = tf.point(Point::new(1.0, 1.0), Pos2::new(2.0, 2.0));
        assert_eq!((p.x, p.y), (8.0, -7.0));
    }
}
