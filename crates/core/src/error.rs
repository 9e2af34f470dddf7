use thiserror::Error;

use crate::effects::EffectError;
use crate::model::PhaseName;

/// A misconfigured portfolio, detected once when the configuration is loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("phase table is empty")]
    EmptyPhaseTable,
    #[error("phase {phase}: interval [{start}, {end}] must satisfy 0 <= start <= end <= 1")]
    InvalidBounds { phase: PhaseName, start: f64, end: f64 },
    #[error("phase {phase} starts before {previous}; phases must be ordered by start")]
    Unordered { previous: PhaseName, phase: PhaseName },
    #[error("phase {phase} overlaps {previous}")]
    Overlap { previous: PhaseName, phase: PhaseName },
    #[error("phase {0} is defined more than once")]
    DuplicatePhase(PhaseName),
    #[error("first phase starts at {0}; the table must begin at 0")]
    UncoveredStart(f64),
    #[error("last phase ends at {0}; the table must end at 1")]
    UncoveredEnd(f64),
    #[error("phase {phase}: invalid color {value:?} (expected #rrggbb)")]
    InvalidColor { phase: PhaseName, value: String },
    #[error("tuning {field} = {value} is out of range")]
    InvalidTuning { field: &'static str, value: f64 },
    #[error("phase {phase}: {source}")]
    Effect {
        phase: PhaseName,
        #[source]
        source: EffectError,
    },
    #[error("panel {0} has no detail content but is listed as interactive")]
    MissingPanel(PhaseName),
}
