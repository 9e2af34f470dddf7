use std::f64::consts::TAU;

use phasefolio_protocol::{Point, Rect};

use super::easing::ease_in_out_quart;
use crate::model::PhaseName;

/// Outlines are authored in a `MORPH_BOX × MORPH_BOX` square.
pub const MORPH_BOX: f64 = 1000.0;
/// Points per contour after resampling.
pub const CONTOUR_POINTS: usize = 64;
/// Every outline is padded to this many contours so any two can be blended.
pub const MAX_CONTOURS: usize = 3;

/// A set of closed contours with a common point count.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    contours: Vec<Vec<Point>>,
}

impl Outline {
    /// The core shape shown while `phase` is active.
    pub fn for_phase(phase: PhaseName) -> Self {
        let raw: Vec<Vec<Point>> = match phase {
            PhaseName::Hero => vec![circle(500.0, 500.0, 400.0), circle(500.0, 500.0, 300.0)],
            PhaseName::Worlds => vec![
                poly(&[(500., 50.), (950., 500.), (500., 950.), (50., 500.)]),
                poly(&[(500., 300.), (700., 500.), (500., 700.), (300., 500.)]),
            ],
            PhaseName::Brands => vec![
                poly(&[(100., 100.), (900., 100.), (900., 900.), (100., 900.)]),
                poly(&[(200., 200.), (800., 200.), (800., 800.), (200., 800.)]),
            ],
            PhaseName::Experiences => vec![
                poly(&[(50., 400.), (450., 400.), (550., 600.), (150., 600.)]),
                poly(&[(550., 400.), (950., 400.), (850., 600.), (450., 600.)]),
            ],
            PhaseName::Products => vec![
                poly(&[(400., 400.), (600., 400.), (600., 600.), (400., 600.)]),
                poly(&[(100., 100.), (200., 100.), (200., 200.), (100., 200.)]),
                poly(&[(800., 800.), (900., 800.), (900., 900.), (800., 900.)]),
            ],
            PhaseName::Contacts => vec![
                poly(&[(500., 100.), (846., 300.), (846., 700.), (500., 900.), (154., 700.), (154., 300.)]),
                poly(&[(500., 250.), (673., 350.), (673., 650.), (500., 750.), (327., 650.), (327., 350.)]),
            ],
        };

        let mut contours: Vec<Vec<Point>> = raw.iter().map(|c| resample(c, CONTOUR_POINTS)).collect();
        // Pad by repeating the innermost contour; duplicates draw on top of each other.
        while contours.len() < MAX_CONTOURS {
            let Some(last) = contours.last().cloned() else {
                break;
            };
            contours.push(last);
        }
        Self { contours }
    }

    pub fn contours(&self) -> &[Vec<Point>] {
        &self.contours
    }

    /// Point-wise blend; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(&self, other: &Outline, t: f64) -> Outline {
        let contours = self
            .contours
            .iter()
            .zip(&other.contours)
            .map(|(a, b)| a.iter().zip(b).map(|(p, q)| p.lerp(*q, t)).collect())
            .collect();
        Outline { contours }
    }

    /// Map from the authoring box into `frame`, preserving aspect ratio.
    pub fn fit(&self, frame: Rect) -> Outline {
        let side = frame.w.min(frame.h);
        let scale = side / MORPH_BOX;
        let ox = frame.x + (frame.w - side) / 2.0;
        let oy = frame.y + (frame.h - side) / 2.0;
        let contours = self
            .contours
            .iter()
            .map(|c| c.iter().map(|p| Point::new(ox + p.x * scale, oy + p.y * scale)).collect())
            .collect();
        Outline { contours }
    }

    /// SVG path data: one `M … L … Z` run per contour.
    pub fn to_svg_path(&self) -> String {
        let mut d = String::with_capacity(self.contours.len() * CONTOUR_POINTS * 16);
        for contour in &self.contours {
            for (i, p) in contour.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{cmd}{:.1},{:.1} ", p.x, p.y));
            }
            d.push_str("Z ");
        }
        d.truncate(d.trim_end().len());
        d
    }
}

fn circle(cx: f64, cy: f64, r: f64) -> Vec<Point> {
    // Start at the top, like the polygons, and go clockwise.
    (0..CONTOUR_POINTS)
        .map(|i| {
            let a = -TAU / 4.0 + TAU * i as f64 / CONTOUR_POINTS as f64;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

fn poly(vertices: &[(f64, f64)]) -> Vec<Point> {
    vertices.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// Resample a closed contour to `n` points evenly spaced by arc length.
fn resample(contour: &[Point], n: usize) -> Vec<Point> {
    if contour.len() < 2 || n == 0 {
        return vec![contour.first().copied().unwrap_or(Point::new(0.0, 0.0)); n];
    }

    let edges: Vec<(Point, Point, f64)> = contour
        .iter()
        .zip(contour.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b, a.distance(*b)))
        .collect();
    let perimeter: f64 = edges.iter().map(|e| e.2).sum();
    if perimeter <= 0.0 {
        return vec![contour[0]; n];
    }

    let step = perimeter / n as f64;
    let mut out = Vec::with_capacity(n);
    let mut edge = 0;
    let mut walked = 0.0;
    for i in 0..n {
        let target = i as f64 * step;
        while edge + 1 < edges.len() && walked + edges[edge].2 < target {
            walked += edges[edge].2;
            edge += 1;
        }
        let (a, b, len) = edges[edge];
        let t = if len > 0.0 { ((target - walked) / len).clamp(0.0, 1.0) } else { 0.0 };
        out.push(a.lerp(b, t));
    }
    out
}

/// The core shape, easing from one phase's outline to the next.
#[derive(Debug, Clone)]
pub struct MorphState {
    from: Outline,
    to: Outline,
    target: PhaseName,
    elapsed: f64,
    duration: f64,
}

impl MorphState {
    pub fn new(phase: PhaseName) -> Self {
        let outline = Outline::for_phase(phase);
        Self {
            from: outline.clone(),
            to: outline,
            target: phase,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn target(&self) -> PhaseName {
        self.target
    }

    /// Start morphing toward `phase` from wherever the shape is now.
    pub fn retarget(&mut self, phase: PhaseName, duration: f64) {
        if phase == self.target {
            return;
        }
        self.from = self.current();
        self.to = Outline::for_phase(phase);
        self.target = phase;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
    }

    pub fn advance(&mut self, dt: f64) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration
    }

    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            ease_in_out_quart(self.elapsed / self.duration)
        }
    }

    pub fn current(&self) -> Outline {
        if !self.is_animating() {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outline_has_uniform_shape() {
        for phase in PhaseName::ALL {
            let outline = Outline::for_phase(phase);
            assert_eq!(outline.contours().len(), MAX_CONTOURS, "{phase}");
            for contour in outline.contours() {
                assert_eq!(contour.len(), CONTOUR_POINTS);
                for p in contour {
                    assert!((0.0..=MORPH_BOX).contains(&p.x) && (0.0..=MORPH_BOX).contains(&p.y));
                }
            }
        }
    }

    #[test]
    fn resample_keeps_vertices_of_a_square() {
        let square = poly(&[(0., 0.), (4., 0.), (4., 4.), (0., 4.)]);
        let pts = resample(&square, 8);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[2], Point::new(4.0, 0.0));
        assert_eq!(pts[4], Point::new(4.0, 4.0));
        assert_eq!(pts[6], Point::new(0.0, 4.0));
    }

    #[test]
    fn morph_runs_to_target_and_stops() {
        let mut morph = MorphState::new(PhaseName::Hero);
        assert!(!morph.is_animating());

        morph.retarget(PhaseName::Brands, 1.2);
        assert!(morph.is_animating());
        assert_eq!(morph.current(), Outline::for_phase(PhaseName::Hero));

        morph.advance(0.6);
        let mid = morph.current();
        assert_ne!(mid, Outline::for_phase(PhaseName::Hero));
        assert_ne!(mid, Outline::for_phase(PhaseName::Brands));

        morph.advance(1.0);
        assert!(!morph.is_animating());
        assert_eq!(morph.current(), Outline::for_phase(PhaseName::Brands));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_shape() {
        let mut morph = MorphState::new(PhaseName::Hero);
        morph.retarget(PhaseName::Worlds, 1.0);
        morph.advance(0.5);
        let snapshot = morph.current();
        morph.retarget(PhaseName::Contacts, 1.0);
        assert_eq!(morph.current(), snapshot);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut morph = MorphState::new(PhaseName::Hero);
        morph.retarget(PhaseName::Products, 0.0);
        assert!(!morph.is_animating());
        assert_eq!(morph.current(), Outline::for_phase(PhaseName::Products));
    }

    #[test]
    fn svg_path_has_one_subpath_per_contour() {
        let d = Outline::for_phase(PhaseName::Worlds).to_svg_path();
        assert!(d.starts_with("M500.0,50.0"));
        assert_eq!(d.matches('M').count(), MAX_CONTOURS);
        assert_eq!(d.matches('Z').count(), MAX_CONTOURS);
        assert!(d.ends_with('Z'));
    }
}
