//! The scroll-driven engine: phase resolution, HUD proximity, the
//! coordinate readout, and the controller that ties them together.

pub mod accent;
pub mod boot;
pub mod controller;
pub mod coords;
pub mod hud;
pub mod resolver;
pub mod terminal;

pub use accent::AccentTransition;
pub use boot::BootState;
pub use controller::{Controller, Frame, Reveal};
pub use coords::Coords;
pub use hud::HudState;
pub use resolver::resolve_phase;
pub use terminal::TerminalReadout;
