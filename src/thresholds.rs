//! Battery-level thresholds driving fill, color, and text decisions.
//!
//! The meter deliberately snaps the painted fill to "looks full" / "looks
//! empty" before the literal 100%/0% boundaries: a sliver of unfilled frame
//! at 98% reads as a rendering bug, not as information.
//!
//! All values are percentage points on the 0-100 battery scale.

// =============================================================================
// Fill Snap Thresholds
// =============================================================================

/// Levels at or above this paint a completely full meter.
pub const FULL: i32 = 96;

/// Levels at or below this paint a completely empty meter (and the warning
/// glyph in the plain icon style).
pub const EMPTY: i32 = 4;

// =============================================================================
// Percentage Text Thresholds
// =============================================================================

/// At or below this level the percentage text turns red in text-bearing
/// styles.
pub const TEXT_CRITICAL: i32 = 14;

/// At or above this level, while charging, the percentage text turns green in
/// the percent-forward styles.
pub const TEXT_CHARGED: i32 = 90;
