use phasefolio_protocol::{Color, Viewport};
use serde::Serialize;

use super::accent::AccentTransition;
use super::boot::BootState;
use super::coords::Coords;
use super::hud::HudState;
use super::resolver::resolve_phase;
use super::terminal::TerminalReadout;
use crate::config::PortfolioConfig;
use crate::effects::{Easing, MorphState, Outline, ParticleField, Sequence, Step};
use crate::model::{Expansion, Panel, Phase, PhaseName, ScrollGeometry, ScrollState};

const DEFAULT_SEED: u64 = 0x5eed;

/// A detail-panel section that has started to appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reveal {
    pub label: String,
    /// Eased entrance progress in `[0, 1]`; drives the section's slide and fade.
    pub progress: f64,
}

/// Everything a presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub progress: f64,
    pub active: PhaseName,
    pub title: String,
    pub label: String,
    pub subtext: String,
    pub hud: HudState,
    pub coords: Coords,
    pub expansion: Expansion,
    pub accent: Color,
    pub boot: BootState,
    /// Heading, label and subtext of the data terminal as currently scrambled.
    pub terminal: [String; 3],
    /// Seconds since the active phase last changed.
    pub phase_elapsed: f64,
    /// Seconds since start-up.
    pub clock: f64,
    /// Panel sections whose reveal has started, in order.
    pub revealed: Vec<Reveal>,
}

impl Frame {
    /// Entrance progress of a panel section, or `None` while it is hidden.
    pub fn reveal(&self, label: &str) -> Option<f64> {
        self.revealed.iter().find(|r| r.label == label).map(|r| r.progress)
    }
}

/// Owns all mutable portfolio state and keeps the derived values current.
///
/// After every public call the open panel, if any, belongs to the active phase.
#[derive(Debug, Clone)]
pub struct Controller {
    config: PortfolioConfig,
    scroll: ScrollState,
    active: usize,
    hud: HudState,
    coords: Coords,
    expansion: Expansion,
    boot: BootState,
    accent: AccentTransition,
    morph: MorphState,
    terminal: TerminalReadout,
    reveal: Option<Sequence>,
    particles: Option<ParticleField>,
    clock: f64,
    phase_elapsed: f64,
    seed: u64,
}

impl Controller {
    pub fn new(config: PortfolioConfig) -> Self {
        Self::with_seed(config, DEFAULT_SEED)
    }

    pub fn with_seed(config: PortfolioConfig, seed: u64) -> Self {
        let first = config.phases.first();
        let terminal = TerminalReadout::for_phase(first, seed);
        let accent = AccentTransition::new(first.color);
        let morph = MorphState::new(first.name);
        let hud = HudState::compute(&config.phases, 0.0, &config.tuning);

        let mut controller = Self {
            config,
            scroll: ScrollState::default(),
            active: 0,
            hud,
            coords: Coords::from_progress(0.0),
            expansion: Expansion::Collapsed,
            boot: BootState::default(),
            accent,
            morph,
            terminal,
            reveal: None,
            particles: None,
            clock: 0.0,
            phase_elapsed: 0.0,
            seed: seed.wrapping_add(3),
        };
        controller.recompute();
        controller
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn active_phase(&self) -> &Phase {
        &self.config.phases.phases()[self.active]
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn boot(&self) -> BootState {
        self.boot
    }

    pub fn hud(&self) -> HudState {
        self.hud
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn accent(&self) -> Color {
        self.accent.color()
    }

    /// The open panel's content.
    pub fn open_panel(&self) -> Option<&Panel> {
        self.expansion.phase().and_then(|p| self.config.panel(p))
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    /// The core shape as currently drawn.
    pub fn outline(&self) -> Outline {
        self.morph.current()
    }

    /// Whether anything is still moving, so front ends know to keep repainting.
    pub fn is_animating(&self) -> bool {
        !self.boot.is_ready()
            || self.accent.is_animating()
            || self.morph.is_animating()
            || !self.terminal.is_done()
            || self.reveal.as_ref().is_some_and(|s| !s.is_done())
            || self.particles.is_some()
    }

    /// New host geometry from a scroll event.
    pub fn on_scroll(&mut self, geometry: &ScrollGeometry) -> bool {
        let changed = self.scroll.apply(geometry);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn set_progress(&mut self, progress: f64) -> bool {
        let changed = self.scroll.set_progress(progress);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Match the particle field to a new viewport.
    pub fn resize(&mut self, viewport: &Viewport) {
        let count = self.config.tuning.particle_count_for(viewport);
        let seed = self.next_seed();
        if let Some(field) = &mut self.particles {
            field.resize(viewport.rect(), count);
        } else {
            self.particles = Some(ParticleField::new(count, viewport.rect(), seed));
        }
        tracing::debug!(count, width = viewport.width, height = viewport.height, "particle field resized");
    }

    /// Advance every clock-driven animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;
        self.phase_elapsed += dt;

        self.boot.advance(dt, self.config.tuning.splash_secs);
        self.accent.advance(dt);
        self.morph.advance(dt);
        self.terminal.advance(dt);
        if let Some(reveal) = &mut self.reveal {
            for event in reveal.tick(dt) {
                tracing::trace!(?event, "panel reveal");
            }
        }
        let kind = self.active_phase().particles;
        let now_ms = self.clock * 1000.0;
        if let Some(field) = &mut self.particles {
            field.step(kind, now_ms);
        }
    }

    /// The visitor clicked the active phase's illustration.
    pub fn interact(&mut self) -> bool {
        if !self.boot.is_entered() {
            return false;
        }
        let phase = self.active_phase().name;
        if !self.expansion.expand(phase) {
            return false;
        }
        self.reveal = self.config.panel(phase).map(reveal_sequence);
        tracing::debug!(%phase, "panel expanded");
        true
    }

    pub fn close(&mut self) -> bool {
        let closed = self.expansion.close();
        if closed {
            self.reveal = None;
            tracing::debug!("panel closed");
        }
        closed
    }

    /// Toggle an item in the open panel. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !id.is_empty() && self.open_panel().and_then(|p| p.item(id)).is_none() {
            tracing::warn!(id, "ignoring selection of an unknown item");
            return false;
        }
        self.expansion.select(id)
    }

    /// Toggle the item at a 1-based position in the open panel.
    pub fn select_nth(&mut self, position: usize) -> bool {
        let Some(id) = self
            .open_panel()
            .and_then(|p| p.nth(position))
            .map(|item| item.id.clone())
        else {
            return false;
        };
        self.expansion.select(&id)
    }

    /// End the splash timer now, for hosts that run it on their own clock.
    pub fn finish_splash(&mut self) -> bool {
        let splash_secs = self.config.tuning.splash_secs;
        self.boot.advance(f64::INFINITY, splash_secs)
    }

    /// Leave the splash screen.
    pub fn enter(&mut self) -> bool {
        self.boot.enter()
    }

    pub fn frame(&self) -> Frame {
        let phase = self.active_phase();
        let revealed = match (&self.reveal, self.open_panel()) {
            (Some(reveal), Some(_)) => reveal
                .steps()
                .iter()
                .filter_map(|s| {
                    reveal.progress(&s.label).map(|progress| Reveal {
                        label: s.label.clone(),
                        progress,
                    })
                })
                .collect(),
            _ => Vec::new(),
        };
        Frame {
            progress: self.scroll.progress(),
            active: phase.name,
            title: phase.name.title(),
            label: phase.label.clone(),
            subtext: phase.subtext.clone(),
            hud: self.hud,
            coords: self.coords,
            expansion: self.expansion.clone(),
            accent: self.accent.color(),
            boot: self.boot,
            terminal: self.terminal.lines(),
            phase_elapsed: self.phase_elapsed,
            clock: self.clock,
            revealed,
        }
    }

    fn recompute(&mut self) {
        let progress = self.scroll.progress();
        let table = &self.config.phases;
        let resolved = resolve_phase(table, progress).name;
        self.hud = HudState::compute(table, progress, &self.config.tuning);
        self.coords = Coords::from_progress(progress);

        let index = table.index_of(resolved).unwrap_or(0);
        if index != self.active {
            let previous = self.active_phase().name;
            self.active = index;
            self.on_phase_change(previous);
        }

        if self.expansion.sync(resolved) {
            self.reveal = None;
            tracing::debug!(phase = %resolved, "panel auto-collapsed after phase change");
        }
        debug_assert!(self.expansion.is_consistent_with(resolved));
    }

    fn on_phase_change(&mut self, previous: PhaseName) {
        let tuning = &self.config.tuning;
        let (name, color) = {
            let phase = self.active_phase();
            (phase.name, phase.color)
        };
        tracing::debug!(from = %previous, to = %name, "active phase changed");

        if self.boot.is_entered() {
            self.accent.retarget(color, tuning.accent_transition_secs);
        } else {
            self.accent.snap(color);
        }
        let morph_secs = tuning.morph_secs;
        self.morph.retarget(name, morph_secs);
        let seed = self.next_seed();
        self.terminal = TerminalReadout::for_phase(self.active_phase(), seed);
        self.phase_elapsed = 0.0;
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
        self.seed
    }
}

/// Staged reveal of a detail panel: heading, subheading, then each item.
fn reveal_sequence(panel: &Panel) -> Sequence {
    let mut steps = vec![
        Step::new("heading", 0.0, 0.8).eased(Easing::SLIDE),
        Step::new("subheading", 0.0, 0.2).eased(Easing::EaseOutExpo),
    ];
    steps.extend(
        panel
            .items
            .iter()
            .map(|item| Step::new(item.id.clone(), 0.0, 0.4).eased(Easing::SLIDE)),
    );
    Sequence::new(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::model::abc_table;

    fn controller() -> Controller {
        let config = PortfolioConfig::load_default().unwrap_or_else(|e| panic!("{e}"));
        Controller::new(config)
    }

    fn entered() -> Controller {
        let mut c = controller();
        c.tick(2.0);
        assert!(c.enter());
        c
    }

    #[test]
    fn starts_on_first_phase() {
        let c = controller();
        let frame = c.frame();
        assert_eq!(frame.active, PhaseName::Hero);
        assert_eq!(frame.coords, Coords { x: 0, y: 99, z: 0 });
        assert_eq!(frame.hud.proximity, 1.0);
        assert_eq!(frame.expansion, Expansion::Collapsed);
        assert_eq!(frame.boot, BootState::Initializing { elapsed: 0.0 });
        assert_eq!(frame.accent.to_hex(), "#00f5ff");
    }

    #[test]
    fn scroll_geometry_drives_phase() {
        let mut c = controller();
        // 6 viewport heights of document, scrolled to 40 %.
        assert!(c.on_scroll(&ScrollGeometry::new(2000.0, 6000.0, 1000.0)));
        assert_eq!(c.frame().active, PhaseName::Brands);
        assert!(!c.on_scroll(&ScrollGeometry::new(2000.0, 6000.0, 1000.0)));
    }

    #[test]
    fn interaction_requires_entry_and_whitelist() {
        let mut c = controller();
        assert!(!c.interact());

        let mut c = entered();
        assert!(c.interact());
        assert_eq!(c.expansion().phase(), Some(PhaseName::Hero));
        assert!(c.close());

        c.set_progress(0.7);
        assert_eq!(c.frame().active, PhaseName::Products);
        assert!(!c.interact());
        assert_eq!(c.expansion(), &Expansion::Collapsed);
    }

    #[test]
    fn host_can_end_the_splash_early() {
        let mut c = controller();
        assert!(!c.enter());
        assert!(c.finish_splash());
        assert!(!c.finish_splash());
        assert!(c.enter());
    }

    #[test]
    fn scrolling_away_collapses_the_panel() {
        let mut c = entered();
        c.set_progress(0.2);
        assert!(c.interact());
        assert!(c.select("specter"));
        c.set_progress(0.25);
        assert_eq!(c.expansion().selected(), Some("specter"));

        c.set_progress(0.4);
        assert_eq!(c.frame().active, PhaseName::Brands);
        assert_eq!(c.expansion(), &Expansion::Collapsed);
    }

    #[test]
    fn selection_is_checked_against_the_open_panel() {
        let mut c = entered();
        c.set_progress(0.4);
        c.interact();
        assert!(!c.select("specter"));
        assert!(c.select("echo-sound"));
        assert!(c.select("echo-sound"));
        assert_eq!(c.expansion().selected(), None);
        assert!(c.select_nth(2));
        assert_eq!(c.expansion().selected(), Some("aether-systems"));
        assert!(c.select(""));
        assert_eq!(c.expansion().selected(), None);
    }

    #[test]
    fn accent_snaps_before_entry_and_animates_after() {
        let mut c = controller();
        c.set_progress(0.2);
        assert_eq!(c.accent().to_hex(), "#7c5cff");

        c.tick(2.0);
        c.enter();
        c.set_progress(0.9);
        assert_eq!(c.accent().to_hex(), "#7c5cff");
        c.tick(0.5);
        let mid = c.accent().to_hex();
        assert_ne!(mid, "#7c5cff");
        assert_ne!(mid, "#ff2a6d");
        c.tick(0.6);
        assert_eq!(c.accent().to_hex(), "#ff2a6d");
    }

    #[test]
    fn panel_reveal_is_staged() {
        let mut c = entered();
        c.interact();
        c.tick(0.0);
        let labels = |c: &Controller| -> Vec<String> {
            c.frame().revealed.into_iter().map(|r| r.label).collect()
        };
        assert_eq!(labels(&c), ["heading"]);
        c.tick(1.05);
        assert_eq!(labels(&c), ["heading", "subheading", "about"]);
        c.tick(5.0);
        assert_eq!(c.frame().revealed.len(), 5);
        assert!(c.frame().revealed.iter().all(|r| r.progress == 1.0));
        c.close();
        assert!(c.frame().revealed.is_empty());
    }

    #[test]
    fn panel_sections_slide_in_on_the_slide_curve() {
        let mut c = entered();
        c.interact();
        c.tick(0.0);
        assert_eq!(c.frame().reveal("heading"), Some(0.0));
        c.tick(0.4);
        let frame = c.frame();
        let heading = frame.reveal("heading").unwrap_or_default();
        assert!((heading - Easing::SLIDE.apply(0.5)).abs() < 1e-9);
        assert!(heading > 0.5 && heading < 1.0, "got {heading}");
        assert_eq!(frame.reveal("subheading"), None);

        c.tick(0.5);
        let frame = c.frame();
        assert_eq!(frame.reveal("heading"), Some(1.0));
        let subheading = frame.reveal("subheading").unwrap_or_default();
        assert!((subheading - Easing::EaseOutExpo.apply(0.5)).abs() < 1e-9);
    }

    #[test]
    fn terminal_restarts_on_phase_change() {
        let mut c = entered();
        c.tick(5.0);
        assert_eq!(c.frame().terminal[0], "WHO I AM");
        c.set_progress(0.55);
        assert_eq!(c.frame().terminal[0], "");
        assert_eq!(c.frame().phase_elapsed, 0.0);
        c.tick(5.0);
        assert_eq!(c.frame().terminal[0], "EXPERIENCES");
    }

    #[test]
    fn resize_builds_a_viewport_sized_field() {
        let mut c = controller();
        c.resize(&Viewport::new(1280.0, 800.0));
        assert_eq!(c.particles().map(ParticleField::len), Some(600));
        c.resize(&Viewport::new(400.0, 800.0));
        assert_eq!(c.particles().map(ParticleField::len), Some(120));
    }

    #[test]
    fn frame_serializes_for_the_web() {
        let json = serde_json::to_string(&controller().frame()).unwrap_or_default();
        assert!(json.contains(r#""active":"hero""#));
        assert!(json.contains(r#""state":"collapsed""#));
    }

    #[test]
    fn gap_resolves_to_nearest_phase() {
        let config = PortfolioConfig {
            phases: abc_table(),
            panels: Vec::new(),
            tuning: Tuning::default(),
        };
        let mut c = Controller::new(config);
        c.set_progress(0.35);
        let frame = c.frame();
        assert_eq!(frame.active, PhaseName::Hero);
        assert!((frame.hud.proximity - 0.375).abs() < 1e-9);
    }
}
