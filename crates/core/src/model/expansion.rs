use serde::{Deserialize, Serialize};

use super::phase::PhaseName;

/// Identifier of an item inside a detail panel (a book, a brand, a section).
pub type ItemId = String;

/// Which detail panel is open, and which of its items is selected.
///
/// The selection lives inside the `Expanded` variant so that collapsing a
/// panel always drops its selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded {
        phase: PhaseName,
        selected: Option<ItemId>,
    },
}

impl Expansion {
    pub fn is_expanded(&self) -> bool {
        matches!(self, Self::Expanded { .. })
    }

    pub fn phase(&self) -> Option<PhaseName> {
        match self {
            Self::Collapsed => None,
            Self::Expanded { phase, .. } => Some(*phase),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Expanded {
                selected: Some(id), ..
            } => Some(id),
            _ => None,
        }
    }

    /// Open `phase`'s panel. Returns `false` (and leaves the state alone) if
    /// the phase has no detail panel or a panel is already open.
    pub fn expand(&mut self, phase: PhaseName) -> bool {
        if !phase.has_detail_panel() || self.is_expanded() {
            return false;
        }
        *self = Self::Expanded {
            phase,
            selected: None,
        };
        true
    }

    /// Toggle `id` inside the open panel. Selecting the current item, or an
    /// empty id, clears the selection. Ignored while collapsed.
    pub fn select(&mut self, id: &str) -> bool {
        let Self::Expanded { selected, .. } = self else {
            return false;
        };
        if id.is_empty() || selected.as_deref() == Some(id) {
            *selected = None;
        } else {
            *selected = Some(id.to_string());
        }
        true
    }

    /// Collapse. Returns `true` if a panel was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_expanded();
        *self = Self::Collapsed;
        was_open
    }

    /// Collapse if the open panel does not belong to `active`.
    /// Returns `true` if this evicted a panel.
    pub fn sync(&mut self, active: PhaseName) -> bool {
        match self.phase() {
            Some(phase) if phase != active => self.close(),
            _ => false,
        }
    }

    /// The open panel belongs to `active` (or nothing is open).
    pub fn is_consistent_with(&self, active: PhaseName) -> bool {
        self.phase().is_none_or(|phase| phase == active)
    }
}
