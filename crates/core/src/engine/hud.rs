use serde::{Deserialize, Serialize};

use super::resolver::{in_any_phase, nearest_boundary_distance};
use crate::config::Tuning;
use crate::model::PhaseTable;

/// Maximum HUD slide, in display pixels, at zero proximity.
pub const MAX_SLIDE: f64 = 20.0;

/// Presentation values for the peripheral chrome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudState {
    pub proximity: f64,
    pub opacity: f64,
    pub scale: f64,
    /// Pixels the top bar slides up and the bottom bar slides down.
    pub vertical_offset: f64,
}

impl HudState {
    pub fn from_proximity(proximity: f64) -> Self {
        Self {
            proximity,
            opacity: proximity,
            scale: 0.95 + 0.05 * proximity,
            vertical_offset: (1.0 - proximity) * MAX_SLIDE,
        }
    }

    /// HUD for `progress`: fully shown inside a phase, fading with the
    /// distance to the nearest boundary outside, never below the floor.
    pub fn compute(table: &PhaseTable, progress: f64, tuning: &Tuning) -> Self {
        Self::from_proximity(proximity(
            table,
            progress,
            tuning.hud_margin,
            tuning.proximity_floor,
        ))
    }
}

impl Default for HudState {
    fn default() -> Self {
        Self::from_proximity(1.0)
    }
}

pub fn proximity(table: &PhaseTable, progress: f64, margin: f64, floor: f64) -> f64 {
    if in_any_phase(table, progress) {
        return 1.0;
    }
    let d = nearest_boundary_distance(table, progress);
    (1.0 - d / margin).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::abc_table;

    #[test]
    fn inside_a_phase_is_fully_visible() {
        let hud = HudState::compute(&abc_table(), 0.5, &Tuning::default());
        assert_eq!(hud.proximity, 1.0);
        assert_eq!(hud.opacity, 1.0);
        assert_eq!(hud.scale, 1.0);
        assert_eq!(hud.vertical_offset, 0.0);
    }

    #[test]
    fn gap_fades_with_distance() {
        let hud = HudState::compute(&abc_table(), 0.35, &Tuning::default());
        assert!((hud.proximity - 0.375).abs() < 1e-9);
        assert!((hud.scale - (0.95 + 0.05 * 0.375)).abs() < 1e-9);
        assert!((hud.vertical_offset - 12.5).abs() < 1e-9);
    }

    #[test]
    fn floor_holds_deep_in_a_gap() {
        let table = abc_table();
        assert_eq!(proximity(&table, 0.75, 0.02, 0.3), 0.3);
        let hud = HudState::from_proximity(0.3);
        assert!((hud.vertical_offset - 14.0).abs() < 1e-9);
    }
}
