use crate::model::{Phase, PhaseTable};

/// The phase for a scroll position.
///
/// A phase whose interval contains `progress` (inclusive) wins, first in
/// table order. In a gap the phase with the nearest boundary wins; on a tie
/// the earlier phase is kept. Total for any input because tables are never
/// empty.
pub fn resolve_phase(table: &PhaseTable, progress: f64) -> &Phase {
    if let Some(found) = table.iter().find(|p| p.contains(progress)) {
        return found;
    }

    let mut best = table.first();
    let mut best_distance = best.boundary_distance(progress);
    for phase in table.iter().skip(1) {
        let distance = phase.boundary_distance(progress);
        if distance < best_distance {
            best = phase;
            best_distance = distance;
        }
    }
    best
}

/// Whether any phase contains `progress`.
pub fn in_any_phase(table: &PhaseTable, progress: f64) -> bool {
    table.iter().any(|p| p.contains(progress))
}

/// Distance from `progress` to the nearest boundary of any phase.
pub fn nearest_boundary_distance(table: &PhaseTable, progress: f64) -> f64 {
    table
        .iter()
        .map(|p| p.boundary_distance(progress))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PhaseName, abc_table, spec};

    #[test]
    fn containment_wins() {
        let table = abc_table();
        assert_eq!(resolve_phase(&table, 0.5).name, PhaseName::Worlds);
        assert_eq!(resolve_phase(&table, 0.0).name, PhaseName::Hero);
        assert_eq!(resolve_phase(&table, 1.0).name, PhaseName::Brands);
        assert_eq!(resolve_phase(&table, 0.4).name, PhaseName::Worlds);
        assert_eq!(resolve_phase(&table, 0.3).name, PhaseName::Hero);
    }

    #[test]
    fn gap_tie_keeps_earlier_phase() {
        assert_eq!(resolve_phase(&abc_table(), 0.35).name, PhaseName::Hero);
    }

    #[test]
    fn gap_prefers_nearer_boundary() {
        let table = abc_table();
        assert_eq!(resolve_phase(&table, 0.32).name, PhaseName::Hero);
        assert_eq!(resolve_phase(&table, 0.38).name, PhaseName::Worlds);
        assert_eq!(resolve_phase(&table, 0.76).name, PhaseName::Brands);
    }

    #[test]
    fn shared_boundary_goes_to_earlier_phase() {
        let table = PhaseTable::new(vec![
            spec(PhaseName::Hero, 0.0, 0.5),
            spec(PhaseName::Worlds, 0.5, 1.0),
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(resolve_phase(&table, 0.5).name, PhaseName::Hero);
    }

    #[test]
    fn nearest_distance() {
        let table = abc_table();
        assert!(in_any_phase(&table, 0.2));
        assert!(!in_any_phase(&table, 0.75));
        assert!((nearest_boundary_distance(&table, 0.75) - 0.05).abs() < 1e-12);
    }
}
