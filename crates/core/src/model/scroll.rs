use serde::{Deserialize, Serialize};

/// Host viewport geometry, as reported by the scrolling surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollGeometry {
    /// Distance scrolled from the top, in pixels.
    pub scroll_y: f64,
    /// Full document height, in pixels.
    pub scroll_height: f64,
    /// Visible height, in pixels.
    pub viewport_height: f64,
}

impl ScrollGeometry {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    /// Scrollable distance; zero or negative when the document fits the viewport.
    pub fn scrollable(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }

    /// `scroll_y / (scroll_height - viewport_height)`, clamped to `[0, 1]`.
    ///
    /// A document with no scrollable height maps to 0 rather than NaN.
    pub fn progress(&self) -> f64 {
        let scrollable = self.scrollable();
        if scrollable <= 0.0 || !scrollable.is_finite() {
            return 0.0;
        }
        clamp_progress(self.scroll_y / scrollable)
    }

    /// Inverse of [`progress`](Self::progress): the scroll offset for a progress value.
    pub fn offset_for(&self, progress: f64) -> f64 {
        clamp_progress(progress) * self.scrollable().max(0.0)
    }
}

/// Clamp to `[0, 1]`; NaN becomes 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// The single scroll signal every derivation consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    progress: f64,
}

impl ScrollState {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Store a new progress value. Returns `true` if it changed.
    pub fn set_progress(&mut self, progress: f64) -> bool {
        let next = clamp_progress(progress);
        let changed = next != self.progress;
        self.progress = next;
        changed
    }

    pub fn apply(&mut self, geometry: &ScrollGeometry) -> bool {
        self.set_progress(geometry.progress())
    }
}
