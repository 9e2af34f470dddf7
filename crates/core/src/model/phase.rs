use std::collections::HashSet;
use std::fmt;

use phasefolio_protocol::Color;
use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;
use crate::error::ConfigError;

/// The fixed set of portfolio sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseName {
    Hero,
    Worlds,
    Brands,
    Experiences,
    Products,
    Contacts,
}

impl PhaseName {
    pub const ALL: [PhaseName; 6] = [
        Self::Hero,
        Self::Worlds,
        Self::Brands,
        Self::Experiences,
        Self::Products,
        Self::Contacts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Worlds => "worlds",
            Self::Brands => "brands",
            Self::Experiences => "experiences",
            Self::Products => "products",
            Self::Contacts => "contacts",
        }
    }

    /// Heading shown in the data terminal.
    pub fn title(self) -> String {
        match self {
            Self::Hero => "WHO I AM".to_string(),
            other => other.as_str().to_uppercase(),
        }
    }

    /// Phases whose illustration opens a detail panel.
    pub fn has_detail_panel(self) -> bool {
        matches!(self, Self::Hero | Self::Worlds | Self::Brands)
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background particle behaviour while a phase is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Drift,
    Spiral,
    Linear,
    Flow,
    Pulse,
}

/// A phase as written in configuration, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub name: PhaseName,
    pub start: f64,
    pub end: f64,
    pub color: String,
    pub label: String,
    pub subtext: String,
    pub particles: ParticleKind,
    #[serde(default)]
    pub effect: Option<EffectKind>,
}

/// A validated phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub name: PhaseName,
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub label: String,
    pub subtext: String,
    pub particles: ParticleKind,
    pub effect: Option<EffectKind>,
}

impl Phase {
    /// Inclusive on both ends.
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress <= self.end
    }

    /// Distance from `progress` to the nearer interval boundary.
    pub fn boundary_distance(&self, progress: f64) -> f64 {
        (progress - self.start).abs().min((progress - self.end).abs())
    }

    fn from_spec(spec: PhaseSpec) -> Result<Self, ConfigError> {
        let PhaseSpec {
            name,
            start,
            end,
            color,
            label,
            subtext,
            particles,
            effect,
        } = spec;

        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(start) || !in_unit(end) || start > end {
            return Err(ConfigError::InvalidBounds {
                phase: name,
                start,
                end,
            });
        }

        let parsed = Color::from_hex(&color).ok_or(ConfigError::InvalidColor {
            phase: name,
            value: color,
        })?;

        if let Some(effect) = &effect {
            effect
                .validate()
                .map_err(|source| ConfigError::Effect { phase: name, source })?;
        }

        Ok(Self {
            name,
            start,
            end,
            color: parsed,
            label,
            subtext,
            particles,
            effect,
        })
    }
}

/// The static, validated, start-ordered list of phases.
///
/// Intervals may leave gaps but never overlap; two phases may share a
/// boundary point, in which case the earlier phase owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl PhaseTable {
    pub fn new(specs: Vec<PhaseSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyPhaseTable);
        }

        let mut seen = HashSet::new();
        let mut phases: Vec<Phase> = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name) {
                return Err(ConfigError::DuplicatePhase(spec.name));
            }
            let phase = Phase::from_spec(spec)?;
            if let Some(previous) = phases.last() {
                if phase.start < previous.start {
                    return Err(ConfigError::Unordered {
                        previous: previous.name,
                        phase: phase.name,
                    });
                }
                if phase.start < previous.end {
                    return Err(ConfigError::Overlap {
                        previous: previous.name,
                        phase: phase.name,
                    });
                }
            }
            phases.push(phase);
        }

        let (first, last) = match (phases.first(), phases.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ConfigError::EmptyPhaseTable),
        };
        if first.start > 0.0 {
            return Err(ConfigError::UncoveredStart(first.start));
        }
        if last.end < 1.0 {
            return Err(ConfigError::UncoveredEnd(last.end));
        }

        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, name: PhaseName) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, name: PhaseName) -> Option<usize> {
        self.phases.iter().position(|p| p.name == name)
    }

    /// First phase in table order. Tables are never empty.
    pub fn first(&self) -> &Phase {
        &self.phases[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }
}

impl<'a> IntoIterator for &'a PhaseTable {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn spec(name: PhaseName, start: f64, end: f64) -> PhaseSpec {
        PhaseSpec {
            name,
            start,
            end,
            color: "#00f5ff".into(),
            label: name.as_str().to_uppercase(),
            subtext: String::new(),
            particles: ParticleKind::Drift,
            effect: None,
        }
    }

    /// A, B, C from the reference scenario: `[0,0.3]`, `[0.4,0.7]`, `[0.8,1.0]`.
    pub(crate) fn abc_table() -> PhaseTable {
        PhaseTable::new(vec![
            spec(PhaseName::Hero, 0.0, 0.3),
            spec(PhaseName::Worlds, 0.4, 0.7),
            spec(PhaseName::Brands, 0.8, 1.0),
        ])
        .unwrap_or_else(|e| unreachable!("reference table is valid: {e}"))
    }

    #[test]
    fn accepts_gapped_table() {
        let table = abc_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.first().name, PhaseName::Hero);
        assert_eq!(table.index_of(PhaseName::Brands), Some(2));
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(
            PhaseTable::new(vec![]),
            Err(ConfigError::EmptyPhaseTable)
        ));
    }

    #[test]
    fn rejects_overlap() {
        let result = PhaseTable::new(vec![
            spec(PhaseName::Hero, 0.0, 0.5),
            spec(PhaseName::Worlds, 0.4, 1.0),
        ]);
        assert!(matches!(result, Err(ConfigError::Overlap { .. })));
    }

    #[test]
    fn allows_shared_boundary() {
        let result = PhaseTable::new(vec![
            spec(PhaseName::Hero, 0.0, 0.5),
            spec(PhaseName::Worlds, 0.5, 1.0),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_unordered() {
        let result = PhaseTable::new(vec![
            spec(PhaseName::Worlds, 0.5, 1.0),
            spec(PhaseName::Hero, 0.0, 0.4),
        ]);
        assert!(matches!(result, Err(ConfigError::Unordered { .. })));
    }

    #[test]
    fn rejects_inverted_and_out_of_range_bounds() {
        let inverted = PhaseTable::new(vec![spec(PhaseName::Hero, 0.6, 0.2)]);
        assert!(matches!(inverted, Err(ConfigError::InvalidBounds { .. })));

        let nan = PhaseTable::new(vec![spec(PhaseName::Hero, f64::NAN, 1.0)]);
        assert!(matches!(nan, Err(ConfigError::InvalidBounds { .. })));

        let beyond = PhaseTable::new(vec![spec(PhaseName::Hero, 0.0, 1.5)]);
        assert!(matches!(beyond, Err(ConfigError::InvalidBounds { .. })));
    }

    #[test]
    fn rejects_duplicates() {
        let result = PhaseTable::new(vec![
            spec(PhaseName::Hero, 0.0, 0.4),
            spec(PhaseName::Hero, 0.5, 1.0),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicatePhase(PhaseName::Hero))));
    }

    #[test]
    fn requires_bracketing() {
        let late = PhaseTable::new(vec![spec(PhaseName::Hero, 0.1, 1.0)]);
        assert!(matches!(late, Err(ConfigError::UncoveredStart(_))));

        let early = PhaseTable::new(vec![spec(PhaseName::Hero, 0.0, 0.9)]);
        assert!(matches!(early, Err(ConfigError::UncoveredEnd(_))));
    }

    #[test]
    fn rejects_bad_color() {
        let mut bad = spec(PhaseName::Hero, 0.0, 1.0);
        bad.color = "cyan".into();
        assert!(matches!(
            PhaseTable::new(vec![bad]),
            Err(ConfigError::InvalidColor { .. })
        ));
    }

    #[test]
    fn titles() {
        assert_eq!(PhaseName::Hero.title(), "WHO I AM");
        assert_eq!(PhaseName::Experiences.title(), "EXPERIENCES");
        assert!(PhaseName::Brands.has_detail_panel());
        assert!(!PhaseName::Contacts.has_detail_panel());
    }
}
