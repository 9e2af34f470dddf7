use phasefolio_protocol::{Point, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::ParticleKind;

/// Overall opacity of the particle layer.
pub const FIELD_OPACITY: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Point,
    pub size: f64,
    pub alpha: f32,
}

/// The ambient particle backdrop. Each `step` is one animation frame.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Rect,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(count: usize, bounds: Rect, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            bounds,
            rng: StdRng::seed_from_u64(seed),
        };
        field.populate(count);
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Adopt new bounds and scatter a fresh population across them.
    pub fn resize(&mut self, bounds: Rect, count: usize) {
        self.bounds = bounds;
        self.populate(count);
    }

    fn populate(&mut self, count: usize) {
        let Rect { x, y, w, h } = self.bounds;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                position: Point::new(x + rng.r#gen::<f64>() * w, y + rng.r#gen::<f64>() * h),
                velocity: Point::new(rng.r#gen::<f64>() - 0.5, rng.r#gen::<f64>() - 0.5),
                size: rng.r#gen::<f64>() * 2.0 + 1.0,
                alpha: rng.r#gen::<f32>() * 0.5 + 0.1,
            })
            .collect();
    }

    /// Advance one frame with the given behaviour. `now_ms` drives the pulse.
    pub fn step(&mut self, kind: ParticleKind, now_ms: f64) {
        let bounds = self.bounds;
        let center = bounds.center();
        let pulse = 1.0 + (now_ms * 0.005).sin() * 0.2;

        for p in &mut self.particles {
            let pos = &mut p.position;
            match kind {
                ParticleKind::Drift => {
                    pos.x += p.velocity.x * 0.5;
                    pos.y += p.velocity.y * 0.5;
                }
                ParticleKind::Spiral => {
                    let dx = pos.x - center.x;
                    let dy = pos.y - center.y;
                    let dist = dx.hypot(dy);
                    let angle = dy.atan2(dx) + 0.01;
                    pos.x = center.x + angle.cos() * dist;
                    pos.y = center.y + angle.sin() * dist + 1.0;
                }
                ParticleKind::Linear => pos.x += 2.0,
                ParticleKind::Flow => {
                    pos.y += (pos.x * 0.005).sin() * 2.0;
                    pos.x += 1.0;
                }
                ParticleKind::Pulse => {
                    pos.x += p.velocity.x * pulse;
                    pos.y += p.velocity.y * pulse;
                }
            }
            wrap(pos, bounds);
        }
    }
}

/// Leaving one edge re-enters at the opposite edge.
fn wrap(pos: &mut Point, bounds: Rect) {
    let right = bounds.x + bounds.w;
    let bottom = bounds.y + bounds.h;
    if pos.x < bounds.x {
        pos.x = right;
    } else if pos.x > right {
        pos.x = bounds.x;
    }
    if pos.y < bounds.y {
        pos.y = bottom;
    } else if pos.y > bottom {
        pos.y = bounds.y;
    }
}
