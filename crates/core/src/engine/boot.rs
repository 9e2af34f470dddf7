use serde::{Deserialize, Serialize};

/// Start-up lifecycle: the splash runs a fixed timer, then waits for the
/// visitor to enter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BootState {
    Initializing { elapsed: f64 },
    Ready,
    Entered,
}

impl Default for BootState {
    fn default() -> Self {
        Self::Initializing { elapsed: 0.0 }
    }
}

impl BootState {
    /// Run the splash timer. Returns `true` on the tick that made the system ready.
    pub fn advance(&mut self, dt: f64, splash_secs: f64) -> bool {
        let Self::Initializing { elapsed } = *self else {
            return false;
        };
        let elapsed = elapsed + dt.max(0.0);
        if elapsed >= splash_secs {
            *self = Self::Ready;
            tracing::info!(after_secs = elapsed, "splash complete, system ready");
            true
        } else {
            *self = Self::Initializing { elapsed };
            false
        }
    }

    /// Leave the splash. Only honoured once ready.
    pub fn enter(&mut self) -> bool {
        if *self == Self::Ready {
            *self = Self::Entered;
            tracing::info!("protocol entered");
            true
        } else {
            false
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready | Self::Entered)
    }

    pub fn is_entered(&self) -> bool {
        *self == Self::Entered
    }
}
