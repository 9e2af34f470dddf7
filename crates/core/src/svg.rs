//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use phasefolio_protocol::{Color, RenderCommand, Stroke, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions. `accent` is the
/// phase color that accent tokens resolve to.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, accent: Color) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:ui-monospace,monospace">"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                stroke,
                alpha,
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    fill_attrs(*fill, *alpha, accent),
                    stroke_attrs(*stroke, *alpha, accent),
                ));
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                alpha,
            } => {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
                    center.x,
                    center.y,
                    radius,
                    fill_attrs(*fill, *alpha, accent),
                    stroke_attrs(*stroke, *alpha, accent),
                ));
            }
            RenderCommand::DrawPath {
                points,
                closed,
                stroke,
                alpha,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                let mut d = format!("M{:.1} {:.1}", first.x, first.y);
                for p in rest {
                    d.push_str(&format!(" L{:.1} {:.1}", p.x, p.y));
                }
                if *closed {
                    d.push_str(" Z");
                }
                svg.push_str(&format!(
                    r#"<path d="{d}" fill="none"{}/>"#,
                    stroke_attrs(Some(*stroke), *alpha, accent),
                ));
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                alpha,
            } => {
                let (hex, opacity) = paint(*color, *alpha, accent);
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{hex}" stroke-opacity="{opacity}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                ));
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                alpha,
            } => {
                let (hex, opacity) = paint(*color, *alpha, accent);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="middle" fill="{hex}" fill-opacity="{opacity}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            RenderCommand::PushTransform {
                translate,
                scale,
                origin,
            } => {
                svg.push_str(&format!(
                    r#"<g transform="translate({} {}) translate({} {}) scale({scale}) translate({} {})">"#,
                    translate.x, translate.y, origin.x, origin.y, -origin.x, -origin.y,
                ));
            }
            RenderCommand::PushOpacity { opacity } => {
                svg.push_str(&format!(r#"<g opacity="{opacity}">"#));
            }
            RenderCommand::BeginGroup { id } => {
                svg.push_str(&format!(r#"<g id="{}">"#, escape_xml(id)));
            }
            RenderCommand::PopTransform | RenderCommand::PopOpacity | RenderCommand::EndGroup => {
                svg.push_str("</g>");
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn paint(token: ThemeToken, alpha: f32, accent: Color) -> (String, f32) {
    let color = token.resolve(accent);
    (color.to_hex(), (color.a * alpha).clamp(0.0, 1.0))
}

fn fill_attrs(fill: Option<ThemeToken>, alpha: f32, accent: Color) -> String {
    match fill {
        Some(token) => {
            let (hex, opacity) = paint(token, alpha, accent);
            format!(r#" fill="{hex}" fill-opacity="{opacity}""#)
        }
        None => r#" fill="none""#.to_string(),
    }
}

fn stroke_attrs(stroke: Option<Stroke>, alpha: f32, accent: Color) -> String {
    match stroke {
        Some(Stroke { color, width }) => {
            let (hex, opacity) = paint(color, alpha, accent);
            format!(r#" stroke="{hex}" stroke-opacity="{opacity}" stroke-width="{width}""#)
        }
        None => String::new(),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasefolio_protocol::{Point, Rect};

    fn gold() -> Color {
        Color::from_rgb8(0xff, 0xb7, 0x03)
    }

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::fill_rect(Rect::new(10.0, 20.0, 100.0, 18.0), ThemeToken::Accent, 1.0),
            RenderCommand::text(
                Point::new(5.0, 5.0),
                "COORDS",
                ThemeToken::TextMuted,
                10.0,
                TextAlign::Left,
            ),
        ];
        let svg = render_svg(&commands, 800.0, 400.0, gold());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("#ffb703"));
        assert!(svg.contains("COORDS"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::text(
            Point::new(0.0, 0.0),
            "Ziro & <Robotics>",
            ThemeToken::TextPrimary,
            12.0,
            TextAlign::Center,
        )];
        let svg = render_svg(&commands, 400.0, 100.0, gold());
        assert!(svg.contains("Ziro &amp; &lt;Robotics&gt;"));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn groups_are_balanced() {
        let commands = vec![
            RenderCommand::group("hud-top"),
            RenderCommand::PushOpacity { opacity: 0.5 },
            RenderCommand::PushTransform {
                translate: Point::new(2.0, 0.0),
                scale: 0.5,
                origin: Point::new(5.0, 5.0),
            },
            RenderCommand::DrawPath {
                points: vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
                closed: true,
                stroke: Stroke::new(ThemeToken::Accent, 1.5),
                alpha: 1.0,
            },
            RenderCommand::PopTransform,
            RenderCommand::PopOpacity,
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 10.0, 10.0, gold());
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
        assert_eq!(svg.matches("<g").count(), 3);
        let mut depth = 0i32;
        for (i, _) in svg.match_indices('<') {
            if svg[i..].starts_with("<g") {
                depth += 1;
            } else if svg[i..].starts_with("</g>") {
                depth -= 1;
            }
            assert!(depth >= 0, "unbalanced at {i}: {svg}");
        }
        assert!(svg.contains("M0.0 0.0 L5.0 5.0 Z"));
    }
}
