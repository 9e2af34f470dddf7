use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Decorative readout derived from scroll progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coords {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Coords {
    pub fn from_progress(progress: f64) -> Self {
        let scaled = |v: f64| (v * 99.0).floor().clamp(0.0, 99.0) as u32;
        Self {
            x: scaled(progress),
            y: scaled(1.0 - progress),
            z: scaled((progress * PI).sin()),
        }
    }
}

/// `xx.yy.zz`, each zero-padded to two digits.
impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.x, self.y, self.z)
    }
}
