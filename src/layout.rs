//! Meter dimensions per style, host container, and level.
//!
//! Sizes are specified in dp and multiplied out by the display density the
//! host passed in (see [`crate::config::DisplayConfig`]). The percent-only
//! style reserves width by digit count - "100%" needs visibly more room than
//! "45%" and "7%" less - so hosts must re-run layout on every tracker update,
//! not just on settings changes.

use embedded_graphics::prelude::Size;

use crate::config::{DisplayConfig, ViewKind};
use crate::styles::RenderStyle;

// =============================================================================
// Size Table (dp)
// =============================================================================

/// Status bar meter height.
const BAR_HEIGHT_DP: f32 = 16.0;
/// Percent-only width with three digits showing (level 100).
const BAR_PERCENT_100_DP: f32 = 38.0;
/// Percent-only width with a single digit (level < 10).
const BAR_PERCENT_1DIGIT_DP: f32 = 18.0;
/// Percent-only width with two digits.
const BAR_PERCENT_DP: f32 = 28.0;
/// JB icon + text width.
const BAR_JB_DP: f32 = 28.0;
/// Plain icon width.
const BAR_ICON_DP: f32 = 10.5;

/// Quick-settings meter height.
const QS_HEIGHT_DP: f32 = 32.0;
/// Quick-settings percent-only width (no digit-count variants in the tile).
const QS_PERCENT_DP: f32 = 52.0;
/// Quick-settings JB width.
const QS_JB_DP: f32 = 37.0;
/// Quick-settings icon width.
const QS_ICON_DP: f32 = 22.0;

// =============================================================================
// Sizing
// =============================================================================

/// Pixel size of the meter for the host's layout constraints. Deactivated
/// styles take no space at all.
pub fn meter_size(style: RenderStyle, config: &DisplayConfig, level: i32) -> Size {
    if !style.is_visible() {
        return Size::zero();
    }
    match config.view {
        ViewKind::StatusBar => {
            let width_dp = match style {
                RenderStyle::Percent if level == 100 => BAR_PERCENT_100_DP,
                RenderStyle::Percent if level < 10 => BAR_PERCENT_1DIGIT_DP,
                RenderStyle::Percent => BAR_PERCENT_DP,
                RenderStyle::IconJbPercent => BAR_JB_DP,
                _ => BAR_ICON_DP,
            };
            Size::new(config.dp(width_dp), config.dp(BAR_HEIGHT_DP))
        }
        ViewKind::QuickSettings => {
            let width_dp = match style {
                RenderStyle::Percent => QS_PERCENT_DP,
                RenderStyle::IconJbPercent => QS_JB_DP,
                _ => QS_ICON_DP,
            };
            Size::new(config.dp(width_dp), config.dp(QS_HEIGHT_DP))
        }
    }
}
