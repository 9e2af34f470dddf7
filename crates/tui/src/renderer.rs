use phasefolio_protocol::{Color as Rgba, Point, RenderCommand, TextAlign, ThemeToken};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Virtual pixels per terminal cell. Views lay out in pixels; the terminal
/// shows one cell per `CELL_W × CELL_H` block.
pub const CELL_W: f64 = 8.0;
pub const CELL_H: f64 = 16.0;

/// Below this effective alpha nothing is drawn.
const MIN_ALPHA: f32 = 0.12;

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

    fn then(self, translate: Point, scale: f64, origin: Point) -> Self {
        Self {
            tx: self.tx + self.s * (origin.x * (1.0 - scale) + translate.x),
            ty: self.ty + self.s * (origin.y * (1.0 - scale) + translate.y),
            s: self.s * scale,
        }
    }

    fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.s + self.tx, p.y * self.s + self.ty)
    }
}

/// Blend a palette color over black, since cells cannot be translucent.
fn cell_color(token: ThemeToken, accent: Rgba, alpha: f32) -> Color {
    let c = token.resolve(accent);
    let a = (c.a * alpha).clamp(0.0, 1.0);
    let [r, g, b, _] = Rgba::rgba(c.r * a, c.g * a, c.b * a, 1.0).to_rgba8();
    Color::Rgb(r, g, b)
}

/// Rasterises render commands into terminal cells.
struct Cells<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl Cells<'_> {
    fn cell_of(&self, p: Point) -> Option<(u16, u16)> {
        let col = (p.x / CELL_W).floor();
        let row = (p.y / CELL_H).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.area.width) || row >= f64::from(self.area.height) {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }

    fn put(&mut self, p: Point, ch: char, fg: Color) {
        if let Some((x, y)) = self.cell_of(p) {
            self.buf[(x, y)].set_char(ch).set_fg(fg);
        }
    }

    fn fill(&mut self, min: Point, max: Point, bg: Color) {
        let (x0, y0) = ((min.x / CELL_W).floor().max(0.0), (min.y / CELL_H).floor().max(0.0));
        let x1 = (max.x / CELL_W).ceil().min(f64::from(self.area.width));
        let y1 = (max.y / CELL_H).ceil().min(f64::from(self.area.height));
        let (mut row, end_col) = (y0, x1);
        while row < y1 {
            let mut col = x0;
            while col < end_col {
                let cell = &mut self.buf[(self.area.x + col as u16, self.area.y + row as u16)];
                cell.set_char(' ').set_bg(bg);
                col += 1.0;
            }
            row += 1.0;
        }
    }

    fn line(&mut self, from: Point, to: Point, fg: Color) {
        let dx = (to.x - from.x) / CELL_W;
        let dy = (to.y - from.y) / CELL_H;
        let ch = if dy.abs() < 0.5 * dx.abs() {
            '─'
        } else if dx.abs() < 0.5 * dy.abs() {
            '│'
        } else if (dx > 0.0) == (dy > 0.0) {
            '╲'
        } else {
            '╱'
        };
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            self.put(from.lerp(to, i as f64 / steps as f64), ch, fg);
        }
    }

    fn text(&mut self, at: Point, text: &str, align: TextAlign, fg: Color) {
        let width = text.chars().count() as f64 * CELL_W;
        let left = match align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - width / 2.0,
            TextAlign::Right => at.x - width,
        };
        for (i, ch) in text.chars().enumerate() {
            self.put(Point::new(left + i as f64 * CELL_W, at.y), ch, fg);
        }
    }
}

/// Draw `commands` into `area` of `buf`. The commands' pixel space is
/// `area.width * CELL_W` by `area.height * CELL_H`.
pub fn render_commands(buf: &mut Buffer, area: Rect, commands: &[RenderCommand], accent: Rgba) {
    let mut cells = Cells { buf, area };
    let mut transforms = vec![Transform::identity()];
    let mut opacities = vec![1.0_f32];

    for cmd in commands {
        let tf = transforms.last().copied().unwrap_or(Transform::identity());
        let opacity = opacities.last().copied().unwrap_or(1.0);

        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                stroke,
                alpha,
            } => {
                let a = alpha * opacity;
                if a < MIN_ALPHA {
                    continue;
                }
                let min = tf.apply(Point::new(rect.x, rect.y));
                let max = tf.apply(Point::new(rect.x + rect.w, rect.y + rect.h));
                if let Some(token) = fill {
                    cells.fill(min, max, cell_color(*token, accent, a));
                }
                if let Some(s) = stroke {
                    let fg = cell_color(s.color, accent, a);
                    let (tr, bl) = (Point::new(max.x, min.y), Point::new(min.x, max.y));
                    cells.line(min, tr, fg);
                    cells.line(bl, max, fg);
                    cells.line(min, bl, fg);
                    cells.line(tr, max, fg);
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                alpha,
            } => {
                let a = alpha * opacity;
                let r = radius * tf.s;
                if a < MIN_ALPHA || r <= 0.0 {
                    continue;
                }
                let c = tf.apply(*center);
                if r < CELL_W {
                    let token = fill.or(stroke.map(|s| s.color)).unwrap_or(ThemeToken::Accent);
                    cells.put(c, '•', cell_color(token, accent, a));
                    continue;
                }
                let token = stroke.map(|s| s.color).or(*fill).unwrap_or(ThemeToken::Accent);
                let fg = cell_color(token, accent, a);
                let n = ((r * std::f64::consts::TAU) / CELL_W).ceil().max(8.0) as usize;
                for i in 0..n {
                    let t = i as f64 / n as f64 * std::f64::consts::TAU;
                    cells.put(Point::new(c.x + r * t.cos(), c.y + r * t.sin()), '·', fg);
                }
            }
            RenderCommand::DrawPath {
                points,
                closed,
                stroke,
                alpha,
            } => {
                let a = alpha * opacity;
                if a < MIN_ALPHA || points.len() < 2 {
                    continue;
                }
                let fg = cell_color(stroke.color, accent, a);
                let pts: Vec<Point> = points.iter().map(|p| tf.apply(*p)).collect();
                for pair in pts.windows(2) {
                    cells.line(pair[0], pair[1], fg);
                }
                if *closed && let (Some(first), Some(last)) = (pts.first(), pts.last()) {
                    cells.line(*last, *first, fg);
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                alpha,
                ..
            } => {
                let a = alpha * opacity;
                if a >= MIN_ALPHA {
                    cells.line(tf.apply(*from), tf.apply(*to), cell_color(*color, accent, a));
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                alpha,
                ..
            } => {
                let a = alpha * opacity;
                if a >= MIN_ALPHA {
                    cells.text(tf.apply(*position), text, *align, cell_color(*color, accent, a));
                }
            }
            RenderCommand::PushTransform {
                translate,
                scale,
                origin,
            } => transforms.push(tf.then(*translate, *scale, *origin)),
            RenderCommand::PopTransform => {
                if transforms.len() > 1 {
                    transforms.pop();
                }
            }
            RenderCommand::PushOpacity { opacity: o } => opacities.push(opacity * o.clamp(0.0, 1.0)),
            RenderCommand::PopOpacity => {
                if opacities.len() > 1 {
                    opacities.pop();
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}
