//! Integration test: drive a controller through scroll sessions and check
//! the phase, HUD, coordinate, and expansion invariants end to end.

use phasefolio_core::config::{PortfolioConfig, Tuning};
use phasefolio_core::engine::hud::proximity;
use phasefolio_core::engine::{Controller, Coords, resolve_phase};
use phasefolio_core::model::{ParticleKind, PhaseName, PhaseSpec, PhaseTable, ScrollGeometry};
use proptest::prelude::*;

fn spec(name: PhaseName, start: f64, end: f64, color: &str) -> PhaseSpec {
    PhaseSpec {
        name,
        start,
        end,
        color: color.into(),
        label: name.as_str().to_uppercase(),
        subtext: String::new(),
        particles: ParticleKind::Drift,
        effect: None,
    }
}

/// A `[0,0.3]`, B `[0.4,0.7]`, C `[0.8,1.0]`.
fn abc() -> PhaseTable {
    PhaseTable::new(vec![
        spec(PhaseName::Hero, 0.0, 0.3, "#00f5ff"),
        spec(PhaseName::Worlds, 0.4, 0.7, "#7c5cff"),
        spec(PhaseName::Brands, 0.8, 1.0, "#ffffff"),
    ])
    .unwrap_or_else(|e| panic!("{e}"))
}

fn abc_controller() -> Controller {
    let mut c = Controller::new(PortfolioConfig {
        phases: abc(),
        panels: Vec::new(),
        tuning: Tuning::default(),
    });
    c.tick(2.5);
    assert!(c.enter());
    c
}

fn default_controller() -> Controller {
    Controller::new(PortfolioConfig::load_default().unwrap_or_else(|e| panic!("{e}")))
}

#[test]
fn gap_between_a_and_b_keeps_a() {
    let table = abc();
    assert_eq!(resolve_phase(&table, 0.35).name, PhaseName::Hero);
    let p = proximity(&table, 0.35, 0.08, 0.3);
    assert!((p - 0.375).abs() < 1e-9, "proximity {p}");
}

#[test]
fn inside_b_shows_full_hud() {
    let mut c = abc_controller();
    c.set_progress(0.5);
    let frame = c.frame();
    assert_eq!(frame.active, PhaseName::Worlds);
    assert_eq!(frame.hud.proximity, 1.0);
    assert_eq!(frame.hud.opacity, 1.0);
    assert_eq!(frame.hud.scale, 1.0);
    assert_eq!(frame.hud.vertical_offset, 0.0);
}

#[test]
fn coords_at_top_of_page() {
    let c = default_controller();
    assert_eq!(c.coords(), Coords { x: 0, y: 99, z: 0 });
    assert_eq!(c.coords().to_string(), "00.99.00");
}

#[test]
fn expanded_b_collapses_when_scrolling_into_c() {
    let mut c = abc_controller();
    c.set_progress(0.5);
    assert!(c.interact());
    assert_eq!(c.expansion().phase(), Some(PhaseName::Worlds));

    c.set_progress(0.9);
    assert_eq!(c.active_phase().name, PhaseName::Brands);
    assert!(!c.expansion().is_expanded());
}

#[test]
fn full_visit_through_the_reference_portfolio() {
    let mut c = default_controller();
    c.tick(2.0);
    assert!(c.boot().is_ready());
    assert!(c.enter());

    // Six viewport heights of document, stopping in the middle of each phase
    // and finally overscrolling past the bottom.
    let (vh, height) = (800.0, 4800.0);
    let mut seen = Vec::new();
    for scroll_y in [0.0, 920.0, 1560.0, 2200.0, 2840.0, 3600.0, 4100.0] {
        c.on_scroll(&ScrollGeometry::new(scroll_y, height, vh));
        c.tick(0.1);
        let name = c.active_phase().name;
        if seen.last() != Some(&name) {
            seen.push(name);
        }
    }
    assert_eq!(
        seen,
        [
            PhaseName::Hero,
            PhaseName::Worlds,
            PhaseName::Brands,
            PhaseName::Experiences,
            PhaseName::Products,
            PhaseName::Contacts,
        ]
    );
    assert_eq!(c.progress(), 1.0);
    assert_eq!(c.coords().x, 99);
}

#[test]
fn brand_selection_round_trip() {
    let mut c = default_controller();
    c.tick(2.0);
    c.enter();
    c.set_progress(0.4);
    assert!(c.interact());
    assert!(c.select("ziro-robotics"));
    assert_eq!(c.expansion().selected(), Some("ziro-robotics"));
    assert!(c.select("ziro-robotics"));
    assert_eq!(c.expansion().selected(), None);
    assert!(!c.select("not-a-brand"));
    assert!(c.close());
    assert!(!c.expansion().is_expanded());
}

#[derive(Debug, Clone)]
enum Op {
    Scroll(f64),
    Interact,
    SelectNth(usize),
    Close,
    Tick(f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-0.2f64..1.2).prop_map(Op::Scroll),
        Just(Op::Interact),
        (1usize..8).prop_map(Op::SelectNth),
        Just(Op::Close),
        (0.0f64..0.5).prop_map(Op::Tick),
    ]
}

/// The phase at minimum boundary distance, the earlier one on ties.
fn nearest_by_boundary(table: &PhaseTable, p: f64) -> PhaseName {
    let mut best = table.first();
    for phase in table {
        if phase.boundary_distance(p) < best.boundary_distance(p) {
            best = phase;
        }
    }
    best.name
}

#[test]
fn gap_midpoint_tie_keeps_earlier_phase() {
    let table = PhaseTable::new(vec![
        spec(PhaseName::Hero, 0.0, 0.25, "#00f5ff"),
        spec(PhaseName::Worlds, 0.75, 1.0, "#7c5cff"),
    ])
    .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(resolve_phase(&table, 0.5).name, PhaseName::Hero);
    assert_eq!(resolve_phase(&table, 0.5 + f64::EPSILON).name, PhaseName::Worlds);
}

proptest! {
    #[test]
    fn gap_resolves_to_nearest_boundary(
        p in prop_oneof![0.3f64..0.4, 0.7f64..0.8]
            .prop_filter("strictly inside a gap", |p| !abc().iter().any(|phase| phase.contains(*p)))
    ) {
        let table = abc();
        prop_assert_eq!(resolve_phase(&table, p).name, nearest_by_boundary(&table, p));
    }

    #[test]
    fn resolver_is_total(p in 0.0f64..=1.0) {
        let table = abc();
        let phase = resolve_phase(&table, p);
        prop_assert!(table.iter().any(|candidate| candidate.name == phase.name));
    }

    #[test]
    fn containing_phase_wins(p in 0.0f64..=1.0) {
        let table = abc();
        if let Some(inside) = table.iter().find(|phase| phase.contains(p)) {
            prop_assert_eq!(resolve_phase(&table, p).name, inside.name);
        }
    }

    #[test]
    fn proximity_stays_in_range(p in 0.0f64..=1.0) {
        let table = abc();
        let value = proximity(&table, p, 0.08, 0.3);
        prop_assert!((0.3..=1.0).contains(&value));
        if table.iter().any(|phase| phase.contains(p)) {
            prop_assert_eq!(value, 1.0);
        }
    }

    #[test]
    fn coords_sum_is_nearly_constant(p in 0.0f64..=1.0) {
        let coords = Coords::from_progress(p);
        prop_assert!((98..=99).contains(&(coords.x + coords.y)));
    }

    #[test]
    fn expansion_tracks_active_phase(ops in prop::collection::vec(op(), 1..40)) {
        let mut c = default_controller();
        c.tick(2.0);
        c.enter();
        for op in ops {
            match op {
                Op::Scroll(p) => { c.set_progress(p); }
                Op::Interact => { c.interact(); }
                Op::SelectNth(n) => { c.select_nth(n); }
                Op::Close => { c.close(); }
                Op::Tick(dt) => c.tick(dt),
            }
            let active = c.active_phase().name;
            prop_assert!(c.expansion().phase().is_none_or(|phase| phase == active));
        }
    }
}
