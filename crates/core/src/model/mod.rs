pub mod content;
pub mod expansion;
pub mod phase;
pub mod scroll;

pub use content::{ContentItem, Panel};
pub use expansion::{Expansion, ItemId};
pub use phase::{ParticleKind, Phase, PhaseName, PhaseSpec, PhaseTable};
pub use scroll::{ScrollGeometry, ScrollState, clamp_progress};

#[cfg(test)]
pub(crate) use phase::tests::{abc_table, spec};
