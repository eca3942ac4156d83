//! Threshold-indexed charge color table and the tint override rule.
//!
//! The fill color for a discharging battery comes from an ordered table of
//! `(threshold, color)` pairs loaded once at construction (the original read
//! them from a pair of resource arrays). The *first* entry whose threshold is
//! at or above the current level wins.
//!
//! If the level exceeds every threshold the *last* entry's color is returned.
//! That fallback is defined behavior, not an error: shipped tables end with a
//! 100 entry, so the path is only reachable with a truncated custom table,
//! and the least-alarming color is the sensible degradation.
//!
//! # Status-bar Tint
//!
//! Hosts can push a dynamic tint (e.g. from a transparency theme). The tint
//! replaces the table lookup - including while charging - but only when the
//! user's persisted fill color is one of the two "not customized" sentinels:
//! [`COLOR_DEFAULT`] or plain white. A deliberately chosen custom color always
//! beats the theme.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{RED, WHITE};

/// Persisted-color sentinel for "no override configured; use the computed
/// default".
pub const COLOR_DEFAULT: i32 = -2;

/// Opaque white as a persisted ARGB value; treated as tintable alongside
/// [`COLOR_DEFAULT`].
pub const COLOR_WHITE: i32 = 0xFFFF_FFFFu32 as i32;

/// Default table mirroring the shipped resource arrays: red up to 15%,
/// default white for everything above.
const DEFAULT_ENTRIES: [(i32, Rgb565); 2] = [(15, RED), (100, WHITE)];

/// Resolve the tint override: `Some(tint)` only when a tint is active *and*
/// the persisted color setting leaves room for it.
pub fn tint_override(tint: Option<Rgb565>, persisted: i32) -> Option<Rgb565> {
    match tint {
        Some(c) if persisted == COLOR_DEFAULT || persisted == COLOR_WHITE => Some(c),
        _ => None,
    }
}

/// Ordered `(threshold, color)` pairs, ascending by threshold. Immutable
/// after construction.
#[derive(Clone, Debug)]
pub struct ColorTable {
    entries: Vec<(i32, Rgb565)>,
}

impl ColorTable {
    /// Build a table from ascending `(threshold, color)` pairs. Empty input
    /// falls back to the default table.
    pub fn new(entries: &[(i32, Rgb565)]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }
        Self { entries: entries.to_vec() }
    }

    /// Color for `level`, honoring the tint override at every exit point the
    /// way the original's `getColorForLevel` did.
    pub fn color_for_level(&self, level: i32, override_color: Option<Rgb565>) -> Rgb565 {
        if let Some(c) = override_color {
            return c;
        }
        let mut color = WHITE;
        for &(threshold, entry_color) in &self.entries {
            color = entry_color;
            if level <= threshold {
                return entry_color;
            }
        }
        // Past every threshold: last entry wins (see module docs).
        color
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self { entries: DEFAULT_ENTRIES.to_vec() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, GREEN};

    const BLUE: Rgb565 = Rgb565::new(0, 0, 31);

    fn three_bucket_table() -> ColorTable {
        ColorTable::new(&[(5, RED), (90, GREEN), (100, BLUE)])
    }

    // -------------------------------------------------------------------------
    // Table Lookup
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_matching_threshold_wins() {
        let table = three_bucket_table();
        assert_eq!(table.color_for_level(50, None), GREEN, "50 falls into the <=90 bucket");
        assert_eq!(table.color_for_level(3, None), RED);
        assert_eq!(table.color_for_level(5, None), RED, "thresholds are inclusive");
        assert_eq!(table.color_for_level(95, None), BLUE);
    }

    #[test]
    fn test_bucket_stability() {
        // Every level inside one bucket maps to the same color, and repeated
        // lookups never disagree.
        let table = three_bucket_table();
        for level in 6..=90 {
            assert_eq!(table.color_for_level(level, None), GREEN);
            assert_eq!(table.color_for_level(level, None), GREEN);
        }
    }

    #[test]
    fn test_past_the_end_falls_back_to_last_entry() {
        // Documented edge case: a table that stops short of 100 returns its
        // last color for higher levels instead of failing.
        let truncated = ColorTable::new(&[(5, RED), (60, GREEN)]);
        assert_eq!(truncated.color_for_level(100, None), GREEN);
    }

    #[test]
    fn test_default_table_matches_resources() {
        let table = ColorTable::default();
        assert_eq!(table.color_for_level(10, None), RED);
        assert_eq!(table.color_for_level(16, None), WHITE);
        assert_eq!(table.color_for_level(100, None), WHITE);
    }

    // -------------------------------------------------------------------------
    // Tint Override
    // -------------------------------------------------------------------------

    #[test]
    fn test_tint_needs_uncustomized_setting() {
        assert_eq!(tint_override(Some(GREEN), COLOR_DEFAULT), Some(GREEN));
        assert_eq!(tint_override(Some(GREEN), COLOR_WHITE), Some(GREEN));
        assert_eq!(tint_override(Some(GREEN), 0xFF123456u32 as i32), None, "custom color beats tint");
        assert_eq!(tint_override(None, COLOR_DEFAULT), None);
    }

    #[test]
    fn test_override_beats_table_everywhere() {
        let table = three_bucket_table();
        for level in [0, 5, 50, 90, 100, 250] {
            assert_eq!(table.color_for_level(level, Some(BLACK)), BLACK);
        }
    }
}
