//! Scroll-driven phase engine for the phasefolio portfolio.
//!
//! A single scroll progress value in `[0, 1]` selects the active phase;
//! everything visible (HUD, accent, core shape, detail panels) is derived
//! from it by the [`engine::Controller`] and turned into render commands by
//! [`views`].

pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod model;
pub mod svg;
pub mod views;

pub use config::{PortfolioConfig, Tuning};
pub use engine::{Controller, Frame};
pub use error::ConfigError;
pub use model::{Expansion, Phase, PhaseName, PhaseTable, ScrollGeometry};
