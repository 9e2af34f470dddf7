use std::path::Path;

use phasefolio_protocol::Viewport;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{Panel, PhaseName, PhaseSpec, PhaseTable};

const DEFAULT_CONFIG: &str = include_str!("../assets/portfolio.json");

/// Numeric knobs of the experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance outside a phase over which the HUD fades in.
    pub hud_margin: f64,
    /// Lowest HUD proximity, so the chrome never disappears.
    pub proximity_floor: f64,
    pub splash_secs: f64,
    pub accent_transition_secs: f64,
    pub morph_secs: f64,
    /// Document height in viewport heights.
    pub document_pages: f64,
    pub particle_count: usize,
    pub particle_count_compact: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hud_margin: 0.08,
            proximity_floor: 0.3,
            splash_secs: 2.0,
            accent_transition_secs: 1.0,
            morph_secs: 1.2,
            document_pages: 6.0,
            particle_count: 600,
            particle_count_compact: 120,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |field: &'static str, value: f64, ok: bool| {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(ConfigError::InvalidTuning { field, value })
            }
        };
        check("hud_margin", self.hud_margin, self.hud_margin > 0.0)?;
        check(
            "proximity_floor",
            self.proximity_floor,
            (0.0..=1.0).contains(&self.proximity_floor),
        )?;
        check("splash_secs", self.splash_secs, self.splash_secs >= 0.0)?;
        check(
            "accent_transition_secs",
            self.accent_transition_secs,
            self.accent_transition_secs >= 0.0,
        )?;
        check("morph_secs", self.morph_secs, self.morph_secs >= 0.0)?;
        check(
            "document_pages",
            self.document_pages,
            self.document_pages > 1.0,
        )?;
        Ok(())
    }

    /// Full document height for a viewport of the given height.
    pub fn document_height(&self, viewport_height: f64) -> f64 {
        self.document_pages * viewport_height
    }

    /// Particle population for a viewport; small screens get fewer.
    pub fn particle_count_for(&self, viewport: &Viewport) -> usize {
        if viewport.is_compact() {
            self.particle_count_compact
        } else {
            self.particle_count
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    phases: Vec<PhaseSpec>,
    #[serde(default)]
    panels: Vec<Panel>,
    #[serde(default)]
    tuning: Tuning,
}

/// Validated portfolio configuration: the phase table, detail panel
/// content, and tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioConfig {
    pub phases: PhaseTable,
    pub panels: Vec<Panel>,
    pub tuning: Tuning,
}

impl PortfolioConfig {
    /// The built-in portfolio.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;
        raw.tuning.validate()?;
        let phases = PhaseTable::new(raw.phases)?;

        let mut panels = Vec::with_capacity(raw.panels.len());
        for panel in raw.panels {
            if !panel.phase.has_detail_panel() {
                tracing::warn!(phase = %panel.phase, "ignoring panel for a phase without a detail view");
                continue;
            }
            panels.push(panel);
        }
        for phase in &phases {
            if phase.name.has_detail_panel() && !panels.iter().any(|p| p.phase == phase.name) {
                return Err(ConfigError::MissingPanel(phase.name));
            }
        }

        tracing::info!(
            phases = phases.len(),
            panels = panels.len(),
            "portfolio configuration loaded"
        );
        Ok(Self {
            phases,
            panels,
            tuning: raw.tuning,
        })
    }

    pub fn panel(&self, phase: PhaseName) -> Option<&Panel> {
        self.panels.iter().find(|p| p.phase == phase)
    }
}
