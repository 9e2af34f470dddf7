use std::f64::consts::TAU;

use phasefolio_protocol::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::EffectError;
use super::easing::{ease_out_cubic, ease_out_elastic};

/// Side of the square box effect geometry is authored in.
pub const EFFECT_BOX: f64 = 200.0;

/// An illustration effect. Each variant carries only the fields it needs and
/// is checked with [`validate`](Self::validate) when the configuration loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    /// Cover blocks that fade away in a diagonal wave.
    BlockReveal {
        rows: u32,
        cols: u32,
        stagger_ms: f64,
        duration_ms: f64,
    },
    /// A lattice of mask circles that grow from the centre outwards.
    BubbleMerge {
        grid: u32,
        max_radius: f64,
        stagger_ms: f64,
        duration_ms: f64,
    },
    /// Satellites evenly spaced on a ring, rotating with a fixed period.
    OrbitalLayout {
        count: u32,
        radius: f64,
        period_secs: f64,
    },
}

/// One cover block of a [`EffectKind::BlockReveal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub rect: Rect,
    pub opacity: f32,
}

/// One mask circle of a [`EffectKind::BubbleMerge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub center: Point,
    pub radius: f64,
    pub opacity: f32,
}

/// An effect evaluated at one instant, laid out in a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectSample {
    Blocks(Vec<Block>),
    Bubbles(Vec<Bubble>),
    Orbit { center: Point, radius: f64, satellites: Vec<Point> },
}

impl EffectKind {
    /// The reference bubble reveal: 15×15 cells, radius 15, 20 ms stagger, 1.5 s.
    pub fn bubble_merge() -> Self {
        Self::BubbleMerge {
            grid: 15,
            max_radius: 15.0,
            stagger_ms: 20.0,
            duration_ms: 1500.0,
        }
    }

    /// The identity ring: five satellites at radius 60.
    pub fn orbital() -> Self {
        Self::OrbitalLayout {
            count: 5,
            radius: 60.0,
            period_secs: 20.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BlockReveal { .. } => "block_reveal",
            Self::BubbleMerge { .. } => "bubble_merge",
            Self::OrbitalLayout { .. } => "orbital_layout",
        }
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        let effect = self.name();
        match *self {
            Self::BlockReveal {
                rows,
                cols,
                stagger_ms,
                duration_ms,
            } => {
                if rows == 0 || cols == 0 {
                    return Err(EffectError::EmptyGrid { effect });
                }
                non_negative("stagger_ms", stagger_ms)?;
                positive("duration_ms", duration_ms)
            }
            Self::BubbleMerge {
                grid,
                max_radius,
                stagger_ms,
                duration_ms,
            } => {
                if grid == 0 {
                    return Err(EffectError::EmptyGrid { effect });
                }
                positive("max_radius", max_radius)?;
                non_negative("stagger_ms", stagger_ms)?;
                positive("duration_ms", duration_ms)
            }
            Self::OrbitalLayout {
                count,
                radius,
                period_secs,
            } => {
                if count == 0 {
                    return Err(EffectError::EmptyGrid { effect });
                }
                positive("radius", radius)?;
                positive("period_secs", period_secs)
            }
        }
    }

    /// Seconds until the effect comes to rest, or `None` if it loops.
    pub fn settle_secs(&self) -> Option<f64> {
        match *self {
            Self::BlockReveal {
                rows,
                cols,
                stagger_ms,
                duration_ms,
            } => {
                let last = f64::from(rows + cols).max(2.0) - 2.0;
                Some((last * stagger_ms + duration_ms) / 1000.0)
            }
            Self::BubbleMerge {
                grid,
                stagger_ms,
                duration_ms,
                ..
            } => {
                let half = f64::from(grid) / 2.0;
                let farthest = (2.0 * half * half).sqrt();
                Some((farthest * stagger_ms + duration_ms) / 1000.0)
            }
            Self::OrbitalLayout { .. } => None,
        }
    }

    /// Evaluate the effect `elapsed` seconds after it started, scaled from
    /// the authoring box into `frame`.
    pub fn sample(&self, elapsed: f64, frame: Rect) -> EffectSample {
        let elapsed_ms = elapsed.max(0.0) * 1000.0;
        match *self {
            Self::BlockReveal {
                rows,
                cols,
                stagger_ms,
                duration_ms,
            } => {
                let w = frame.w / f64::from(cols);
                let h = frame.h / f64::from(rows);
                let mut blocks = Vec::with_capacity((rows * cols) as usize);
                for r in 0..rows {
                    for c in 0..cols {
                        let delay = f64::from(r + c) * stagger_ms;
                        let t = (elapsed_ms - delay) / duration_ms;
                        blocks.push(Block {
                            rect: Rect::new(
                                frame.x + f64::from(c) * w,
                                frame.y + f64::from(r) * h,
                                w,
                                h,
                            ),
                            opacity: (1.0 - ease_out_cubic(t)) as f32,
                        });
                    }
                }
                EffectSample::Blocks(blocks)
            }
            Self::BubbleMerge {
                grid,
                max_radius,
                stagger_ms,
                duration_ms,
            } => {
                let scale = frame.w.min(frame.h) / EFFECT_BOX;
                let spacing = EFFECT_BOX / f64::from(grid) * scale;
                let middle = f64::from(grid) / 2.0;
                let side = grid + 1;
                let mut bubbles = Vec::with_capacity((side * side) as usize);
                for i in 0..side {
                    for j in 0..side {
                        let (fi, fj) = (f64::from(i), f64::from(j));
                        let distance = ((fi - middle).powi(2) + (fj - middle).powi(2)).sqrt();
                        let t = (elapsed_ms - distance * stagger_ms) / duration_ms;
                        let eased = if t <= 0.0 {
                            0.0
                        } else {
                            ease_out_elastic(t, 1.0, 0.6)
                        };
                        bubbles.push(Bubble {
                            center: Point::new(frame.x + fj * spacing, frame.y + fi * spacing),
                            radius: (max_radius * scale * eased).max(0.0),
                            opacity: eased.clamp(0.0, 1.0) as f32,
                        });
                    }
                }
                EffectSample::Bubbles(bubbles)
            }
            Self::OrbitalLayout {
                count,
                radius,
                period_secs,
            } => {
                let center = frame.center();
                let radius = radius * frame.w.min(frame.h) / EFFECT_BOX;
                let turn = (elapsed.max(0.0) / period_secs).fract() * TAU;
                let satellites = (0..count)
                    .map(|i| {
                        let angle = f64::from(i) * TAU / f64::from(count) + turn;
                        Point::new(
                            center.x + radius * angle.cos(),
                            center.y + radius * angle.sin(),
                        )
                    })
                    .collect();
                EffectSample::Orbit {
                    center,
                    radius,
                    satellites,
                }
            }
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), EffectError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EffectError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), EffectError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EffectError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_frame() -> Rect {
        Rect::new(0.0, 0.0, EFFECT_BOX, EFFECT_BOX)
    }

    #[test]
    fn validation_rejects_degenerate_effects() {
        let zero_grid = EffectKind::BlockReveal {
            rows: 0,
            cols: 4,
            stagger_ms: 10.0,
            duration_ms: 300.0,
        };
        assert!(matches!(zero_grid.validate(), Err(EffectError::EmptyGrid { .. })));

        let no_time = EffectKind::BubbleMerge {
            grid: 15,
            max_radius: 15.0,
            stagger_ms: 20.0,
            duration_ms: 0.0,
        };
        assert!(matches!(
            no_time.validate(),
            Err(EffectError::NonPositive { field: "duration_ms", .. })
        ));

        let still = EffectKind::OrbitalLayout {
            count: 5,
            radius: 60.0,
            period_secs: -1.0,
        };
        assert!(still.validate().is_err());

        assert!(EffectKind::bubble_merge().validate().is_ok());
        assert!(EffectKind::orbital().validate().is_ok());
    }

    #[test]
    fn bubble_lattice_grows_from_centre() {
        let effect = EffectKind::bubble_merge();
        let EffectSample::Bubbles(at_start) = effect.sample(0.0, unit_frame()) else {
            unreachable!("bubble merge samples bubbles");
        };
        assert_eq!(at_start.len(), 16 * 16);
        assert!(at_start.iter().all(|b| b.radius <= 15.0 * 1.2));

        // 100ms in: the centre has started, the corners have not.
        let EffectSample::Bubbles(early) = effect.sample(0.1, unit_frame()) else {
            unreachable!("bubble merge samples bubbles");
        };
        let centre = early[8 * 16 + 8];
        let corner = early[0];
        assert!(centre.radius > 0.0);
        assert_eq!(corner.radius, 0.0);
    }

    #[test]
    fn bubbles_settle_at_full_radius() {
        let effect = EffectKind::bubble_merge();
        let settle = effect.settle_secs().unwrap_or_default();
        let EffectSample::Bubbles(done) = effect.sample(settle + 0.01, unit_frame()) else {
            unreachable!("bubble merge samples bubbles");
        };
        assert!(done.iter().all(|b| (b.radius - 15.0).abs() < 1e-6));
        assert!(done.iter().all(|b| b.opacity == 1.0));
    }

    #[test]
    fn blocks_clear_in_a_diagonal_wave() {
        let effect = EffectKind::BlockReveal {
            rows: 2,
            cols: 3,
            stagger_ms: 100.0,
            duration_ms: 200.0,
        };
        let EffectSample::Blocks(blocks) = effect.sample(0.2, unit_frame()) else {
            unreachable!("block reveal samples blocks");
        };
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0].opacity, 0.0);
        assert!(blocks[5].opacity == 1.0);
        assert!(blocks[1].opacity > 0.0 && blocks[1].opacity < 1.0);

        let settle = effect.settle_secs().unwrap_or_default();
        assert!((settle - 0.5).abs() < 1e-9);
    }

    #[test]
    fn orbit_places_satellites_on_the_ring() {
        let effect = EffectKind::orbital();
        let EffectSample::Orbit {
            center,
            radius,
            satellites,
        } = effect.sample(0.0, unit_frame())
        else {
            unreachable!("orbital layout samples an orbit");
        };
        assert_eq!(satellites.len(), 5);
        assert!((satellites[0].x - 160.0).abs() < 1e-9);
        assert!((satellites[0].y - 100.0).abs() < 1e-9);
        for s in &satellites {
            assert!((s.distance(center) - radius).abs() < 1e-9);
        }
        assert_eq!(effect.settle_secs(), None);
    }
}
