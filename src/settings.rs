//! Persisted user settings for the battery meter.
//!
//! The platform's settings storage is an external collaborator; the meter
//! only needs four integers out of it. [`SettingsStore`] is the seam, and
//! [`MeterSettings`] is the immutable snapshot taken on every settings-change
//! notification. Color values stay raw ARGB integers here because the
//! sentinel encoding (-2 = "use default") is part of their meaning; they are
//! only resolved to display colors at draw time.

use std::collections::HashMap;

use crate::styles::RenderStyle;

// =============================================================================
// Setting Keys
// =============================================================================

/// Persisted battery display style (integer, see [`RenderStyle`]).
pub const STATUS_BAR_BATTERY: &str = "status_bar_battery";

/// Persisted fill color (ARGB or the -2 sentinel).
pub const STATUS_BAR_BATTERY_COLOR: &str = "status_bar_battery_color";

/// Persisted percentage text color (ARGB or the -2 sentinel).
pub const STATUS_BAR_BATTERY_TEXT_COLOR: &str = "status_bar_battery_text_color";

/// Persisted percentage/bolt color while charging (ARGB or the -2 sentinel).
pub const STATUS_BAR_BATTERY_TEXT_CHARGING_COLOR: &str = "status_bar_battery_text_charging_color";

// =============================================================================
// Settings Seam
// =============================================================================

/// Read access to the platform's persisted integer settings.
pub trait SettingsStore {
    fn int_for(&self, key: &str, default: i32) -> i32;
}

/// In-memory store backing the simulator and tests.
#[derive(Clone, Debug, Default)]
pub struct SimSettings {
    values: HashMap<String, i32>,
}

impl SimSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_owned(), value);
    }
}

impl SettingsStore for SimSettings {
    fn int_for(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Snapshot of the meter's persisted preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeterSettings {
    pub style: RenderStyle,
    /// Raw ARGB fill color, or -2 for "computed default".
    pub battery_color: i32,
    /// Raw ARGB percentage text color, or -2.
    pub percentage_color: i32,
    /// Raw ARGB charging text/bolt color, or -2.
    pub percentage_charging_color: i32,
    /// Whether the meter is hosted as a quick-settings tile.
    pub is_quicksettings: bool,
}

impl MeterSettings {
    /// Take a fresh snapshot. A quick-settings host never hides its battery
    /// tile, so `Gone` is coerced back to `Normal` there.
    pub fn load(store: &impl SettingsStore, is_quicksettings: bool) -> Self {
        let mut style = RenderStyle::from_setting(store.int_for(STATUS_BAR_BATTERY, 0));
        if is_quicksettings && style == RenderStyle::Gone {
            style = RenderStyle::Normal;
        }
        Self {
            style,
            battery_color: store.int_for(STATUS_BAR_BATTERY_COLOR, -2),
            percentage_color: store.int_for(STATUS_BAR_BATTERY_TEXT_COLOR, -2),
            percentage_charging_color: store.int_for(STATUS_BAR_BATTERY_TEXT_CHARGING_COLOR, -2),
            is_quicksettings,
        }
    }
}
