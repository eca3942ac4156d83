//! Simulator and display configuration.
//!
//! Layout multipliers for the meter itself live in [`crate::layout`]; this
//! module holds the values that describe the *host*: how dense the display
//! is, which container the meter sits in, and the simulator's frame timing.
//!
//! # Explicit Display Configuration
//!
//! Density is not read from a global cache on first access. The host builds a
//! [`DisplayConfig`] once, hands it to whoever needs it, and calls
//! [`DisplayConfig::reload`] when the display metrics actually change (e.g. a
//! density switch in developer settings). Everything downstream recomputes
//! from the value it was given.

use std::time::Duration;

// =============================================================================
// Simulator Window
// =============================================================================

/// Simulated screen width in pixels. Wide enough for the quick-settings
/// variant of every style at the default density.
pub const SCREEN_WIDTH: u32 = 160;

/// Simulated screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes
/// early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Host Container
// =============================================================================

/// Which container hosts the meter. The original shipped the same view in two
/// places with different size and text rules, keyed by a styleable string
/// ("statusbar" / "quicksettings").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewKind {
    /// Status bar slot: 16 dp tall, compact text.
    #[default]
    StatusBar,
    /// Quick-settings tile: 32 dp tall, larger text.
    QuickSettings,
}

// =============================================================================
// Display Configuration
// =============================================================================

/// Display metrics and host placement, passed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Logical pixel density (pixels per dp). 1.0 = mdpi baseline.
    density: f32,
    /// Host container the meter is mounted in.
    pub view: ViewKind,
}

impl DisplayConfig {
    pub fn new(density: f32, view: ViewKind) -> Self {
        Self { density, view }
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Refresh the density after a display-metrics change. Callers are
    /// expected to re-run layout afterwards.
    pub fn reload(&mut self, density: f32) {
        self.density = density;
    }

    /// Convert a dp value to physical pixels with the platform's
    /// round-half-up rule (`density * dp + 0.5`, truncated).
    pub fn dp(&self, dp: f32) -> u32 {
        (self.density * dp + 0.5) as u32
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(1.0, ViewKind::StatusBar)
    }
}
