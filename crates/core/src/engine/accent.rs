use phasefolio_protocol::Color;

use crate::effects::easing::ease_out_cubic;

/// The animated phase accent colour.
#[derive(Debug, Clone, PartialEq)]
pub struct AccentTransition {
    from: Color,
    to: Color,
    elapsed: f64,
    duration: f64,
}

impl AccentTransition {
    pub fn new(color: Color) -> Self {
        Self {
            from: color,
            to: color,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    /// Head for `color`, starting from the colour shown right now.
    pub fn retarget(&mut self, color: Color, duration: f64) {
        if color == self.to {
            return;
        }
        self.from = self.color();
        self.to = color;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
    }

    /// Jump straight to `color`.
    pub fn snap(&mut self, color: Color) {
        *self = Self::new(color);
    }

    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    pub fn color(&self) -> Color {
        if !self.is_animating() {
            return self.to;
        }
        let t = ease_out_cubic(self.elapsed / self.duration);
        self.from.lerp(self.to, t as f32)
    }
}
