//! Easing curves. Every curve maps `t ∈ [0, 1]` to progress with
//! `f(0) = 0` and `f(1) = 1`; inputs outside the range are clamped.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// A named easing curve, carried by sequence steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInOutQuart,
    EaseOutExpo,
    EaseOutElastic { amplitude: f64, period: f64 },
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// The `(0.16, 1, 0.3, 1)` curve used for panel slides.
    pub const SLIDE: Easing = Easing::CubicBezier {
        x1: 0.16,
        y1: 1.0,
        x2: 0.3,
        y2: 1.0,
    };

    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => clamp_unit(t),
            Self::EaseOutCubic => ease_out_cubic(t),
            Self::EaseInOutQuart => ease_in_out_quart(t),
            Self::EaseOutExpo => ease_out_expo(t),
            Self::EaseOutElastic { amplitude, period } => ease_out_elastic(t, amplitude, period),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = clamp_unit(t);
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out_quart(t: f64) -> f64 {
    let t = clamp_unit(t);
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

pub fn ease_out_expo(t: f64) -> f64 {
    let t = clamp_unit(t);
    if t >= 1.0 { 1.0 } else { 1.0 - 2f64.powf(-10.0 * t) }
}

/// Elastic overshoot. `amplitude` is clamped to `[1, 10]` and `period` to
/// `[0.1, 2]`; `(1, 0.6)` gives the bubble-merge wobble.
pub fn ease_out_elastic(t: f64, amplitude: f64, period: f64) -> f64 {
    let t = clamp_unit(t);
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let a = amplitude.clamp(1.0, 10.0);
    let p = period.clamp(0.1, 2.0);
    let s = p / TAU * (1.0 / a).asin();
    // Mirror of the elastic ease-in.
    let u = 1.0 - t;
    let ease_in = -a * 2f64.powf(10.0 * (u - 1.0)) * (((u - 1.0) - s) * TAU / p).sin();
    1.0 - ease_in
}

/// CSS `cubic-bezier(x1, y1, x2, y2)`.
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let x = clamp_unit(t);
    if x == 0.0 || x == 1.0 {
        return x;
    }

    let bez = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f64, b: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    // Newton first, bisection if the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = bez(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return bez(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..50 {
        let v = bez(x1, x2, s);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bez(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseOutCubic,
        Easing::EaseInOutQuart,
        Easing::EaseOutExpo,
        Easing::EaseOutElastic {
            amplitude: 1.0,
            period: 0.6,
        },
        Easing::SLIDE,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-9, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-9, "{curve:?} at 1");
        }
    }

    #[test]
    fn out_of_range_inputs_clamp() {
        for curve in CURVES {
            assert_eq!(curve.apply(-3.0), curve.apply(0.0));
            assert_eq!(curve.apply(7.0), curve.apply(1.0));
            assert_eq!(curve.apply(f64::NAN), curve.apply(0.0));
        }
    }

    #[test]
    fn quart_is_symmetric() {
        assert!((ease_in_out_quart(0.5) - 0.5).abs() < 1e-12);
        let a = ease_in_out_quart(0.2);
        let b = ease_in_out_quart(0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn elastic_overshoots() {
        let peak = (1..100)
            .map(|i| ease_out_elastic(f64::from(i) / 100.0, 1.0, 0.6))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn slide_curve_is_fast_then_settles() {
        let early = Easing::SLIDE.apply(0.2);
        assert!(early > 0.5, "got {early}");
        let mut last = 0.0;
        for i in 0..=20 {
            let v = Easing::SLIDE.apply(f64::from(i) / 20.0);
            assert!(v + 1e-9 >= last);
            last = v;
        }
    }
}
