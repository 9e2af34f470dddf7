//! Time-driven visual effects. Everything here is a deterministic function
//! of elapsed time (and of a seed where randomness is involved).

pub mod easing;
pub mod kind;
pub mod morph;
pub mod particles;
pub mod scramble;
pub mod sequence;

use thiserror::Error;

pub use easing::Easing;
pub use kind::{Block, Bubble, EffectKind, EffectSample};
pub use morph::{MorphState, Outline};
pub use particles::{Particle, ParticleField};
pub use scramble::TextScramble;
pub use sequence::{Sequence, Step, StepEvent};

#[derive(Debug, Error, PartialEq)]
pub enum EffectError {
    #[error("{effect} needs at least one cell")]
    EmptyGrid { effect: &'static str },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}
