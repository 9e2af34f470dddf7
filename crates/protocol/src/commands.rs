use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each view. Renderers consume
/// this list sequentially — each command carries all the data it needs.
/// Colors are semantic tokens; `ThemeToken::Accent` resolves to the
/// animated accent color the renderer is given for the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a rectangle, filled and/or stroked. `alpha` multiplies the
    /// token's own alpha.
    DrawRect {
        rect: Rect,
        fill: Option<ThemeToken>,
        stroke: Option<Stroke>,
        alpha: f32,
    },

    /// Draw a circle.
    DrawCircle {
        center: Point,
        radius: f64,
        fill: Option<ThemeToken>,
        stroke: Option<Stroke>,
        alpha: f32,
    },

    /// Draw a polyline through `points`, closing it when `closed` is set.
    DrawPath {
        points: Vec<Point>,
        closed: bool,
        stroke: Stroke,
        alpha: f32,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
        alpha: f32,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
        alpha: f32,
    },

    /// Push an affine transform (applied to all subsequent commands until
    /// the matching `PopTransform`). Scaling is about `origin`.
    PushTransform {
        translate: Point,
        scale: f64,
        origin: Point,
    },

    /// Pop the most recent transform.
    PopTransform,

    /// Multiply the alpha of all subsequent commands until `PopOpacity`.
    PushOpacity { opacity: f32 },

    /// Pop the most recent opacity.
    PopOpacity,

    /// Begin a logical group (e.g. the HUD top bar). Renderers may use this
    /// for layer separation or hit-testing.
    BeginGroup { id: String },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: ThemeToken,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: ThemeToken, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl RenderCommand {
    pub fn fill_rect(rect: Rect, fill: ThemeToken, alpha: f32) -> Self {
        Self::DrawRect {
            rect,
            fill: Some(fill),
            stroke: None,
            alpha,
        }
    }

    pub fn stroke_rect(rect: Rect, stroke: Stroke, alpha: f32) -> Self {
        Self::DrawRect {
            rect,
            fill: None,
            stroke: Some(stroke),
            alpha,
        }
    }

    pub fn text(
        position: Point,
        text: impl Into<String>,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    ) -> Self {
        Self::DrawText {
            position,
            text: text.into(),
            color,
            font_size,
            align,
            alpha: 1.0,
        }
    }

    pub fn line(from: Point, to: Point, color: ThemeToken, width: f64) -> Self {
        Self::DrawLine {
            from,
            to,
            color,
            width,
            alpha: 1.0,
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::BeginGroup { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_as_tagged_json() {
        let cmds = vec![
            RenderCommand::PushOpacity { opacity: 0.5 },
            RenderCommand::fill_rect(Rect::new(0.0, 0.0, 10.0, 2.0), ThemeToken::Accent, 1.0),
            RenderCommand::PopOpacity,
        ];
        let json = serde_json::to_string(&cmds).unwrap_or_default();
        assert!(json.contains("PushOpacity"));
        assert!(json.contains("\"Accent\""));

        let back: Vec<RenderCommand> = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back, cmds);
    }

    #[test]
    fn text_helper_defaults_to_opaque() {
        let cmd = RenderCommand::text(
            Point::new(1.0, 2.0),
            "COORDS",
            ThemeToken::TextMuted,
            10.0,
            TextAlign::Left,
        );
        assert!(matches!(cmd, RenderCommand::DrawText { alpha, .. } if alpha == 1.0));
    }
}
