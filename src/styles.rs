//! Battery display styles and pre-computed text styles.
//!
//! [`RenderStyle`] is the persisted user preference: nine mutually exclusive
//! display modes stored as an integer setting. The style decides which
//! sub-elements exist (shell icon, bolt, percentage text) and which layout
//! and font rules apply.
//!
//! The circle variants are listed for completeness of the persisted encoding
//! but deactivate *this* meter: the original delegated them to a separate
//! circle view and set this one's visibility to GONE.
//!
//! # Font Mapping
//!
//! The original sized vector text as a fraction of the icon height or in dp.
//! Monospaced bitmap fonts don't scale, so each (style, host, level) text
//! rule maps to the nearest `embedded-graphics`/`profont` font instead; the
//! dp rule being approximated is noted on each arm.

use embedded_graphics::{
    mono_font::{
        MonoFont,
        ascii::{FONT_5X8, FONT_6X10, FONT_10X20},
    },
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::config::ViewKind;

// =============================================================================
// Render Style
// =============================================================================

/// The nine persisted battery display modes, in their stored integer order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Battery icon only.
    #[default]
    Normal = 0,
    /// Percentage text only, no icon.
    Percent = 1,
    /// Icon with the percentage drawn inside it.
    IconPercent = 2,
    /// Circle gauge (handled by a different view; hides this meter).
    Circle = 3,
    /// Circle gauge with text (hides this meter).
    CirclePercent = 4,
    /// Dotted circle gauge (hides this meter).
    DottedCircle = 5,
    /// Dotted circle gauge with text (hides this meter).
    DottedCirclePercent = 6,
    /// Jelly-Bean arrangement: narrow icon on the right, text beside it.
    IconJbPercent = 7,
    /// Battery hidden entirely.
    Gone = 8,
}

impl RenderStyle {
    /// Decode the persisted integer. Unknown values fall back to the stored
    /// default of 0 (`Normal`).
    pub fn from_setting(value: i32) -> Self {
        match value {
            1 => Self::Percent,
            2 => Self::IconPercent,
            3 => Self::Circle,
            4 => Self::CirclePercent,
            5 => Self::DottedCircle,
            6 => Self::DottedCirclePercent,
            7 => Self::IconJbPercent,
            8 => Self::Gone,
            _ => Self::Normal,
        }
    }

    pub fn setting_value(self) -> i32 {
        self as i32
    }

    /// Whether this meter renders at all for the style. Circle variants and
    /// `Gone` deactivate it.
    pub fn is_visible(self) -> bool {
        matches!(
            self,
            Self::Normal | Self::Percent | Self::IconPercent | Self::IconJbPercent
        )
    }

    /// Whether the battery shell icon is drawn.
    pub fn shows_icon(self) -> bool {
        matches!(self, Self::Normal | Self::IconPercent | Self::IconJbPercent)
    }

    /// Whether the percentage text is drawn.
    pub fn shows_percent(self) -> bool {
        matches!(self, Self::Percent | Self::IconPercent | Self::IconJbPercent)
    }

    /// Text-only mode: no icon, "%" suffix on the number.
    pub fn percent_only(self) -> bool {
        self == Self::Percent
    }

    /// Next style in stored order, wrapping after `Gone`. Simulator helper
    /// for cycling through every persisted value, including the deactivating
    /// ones.
    pub fn next(self) -> Self {
        Self::from_setting((self.setting_value() + 1) % 9)
    }
}

// =============================================================================
// Text Styles (const - zero runtime cost)
// =============================================================================

/// Horizontally centered text anchored on its vertical midpoint. The original
/// centered text at `y = (height + textHeight) * 0.47`; center alignment with
/// a middle baseline lands on the same optical center.
pub const CENTERED_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Font Selection
// =============================================================================

/// Font for the percentage text under the active style's size rule.
///
/// `level` matters because the in-icon styles shrink the digits at 100 to
/// make room for the third digit (the original's 0.5h vs 0.38h rule).
pub fn percent_font(style: RenderStyle, view: ViewKind, level: i32) -> &'static MonoFont<'static> {
    match (style, view) {
        // 16 dp / 22.5 dp free-standing text.
        (RenderStyle::Percent, ViewKind::StatusBar) => &PROFONT_14_POINT,
        (RenderStyle::Percent, ViewKind::QuickSettings) => &PROFONT_18_POINT,
        // Digits inside the shell: 0.5h, shrinking to 0.38h at 100.
        // The JB status-bar column follows the same shrink rule (0.7h/0.58h).
        (RenderStyle::IconPercent, _) | (RenderStyle::IconJbPercent, ViewKind::StatusBar) => {
            if level == 100 {
                &FONT_5X8
            } else {
                &FONT_6X10
            }
        }
        // JB text column in the tile: 14 dp.
        (RenderStyle::IconJbPercent, ViewKind::QuickSettings) => &PROFONT_12_POINT,
        // Styles without percent text never ask; keep a sane answer anyway.
        _ => &FONT_6X10,
    }
}

/// Font for the low-battery warning glyph (the original's bold text at 0.75
/// of the view height).
pub fn warning_font(view: ViewKind) -> &'static MonoFont<'static> {
    match view {
        ViewKind::StatusBar => &FONT_10X20,
        ViewKind::QuickSettings => &PROFONT_24_POINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_round_trip() {
        for value in 0..9 {
            assert_eq!(
                RenderStyle::from_setting(value).setting_value(),
                value,
                "persisted value {value} must survive decode/encode"
            );
        }
    }

    #[test]
    fn test_unknown_setting_defaults_to_normal() {
        assert_eq!(RenderStyle::from_setting(-1), RenderStyle::Normal);
        assert_eq!(RenderStyle::from_setting(9), RenderStyle::Normal);
        assert_eq!(RenderStyle::from_setting(1234), RenderStyle::Normal);
    }

    #[test]
    fn test_visibility_matches_activation_rule() {
        // Only the four non-circle, non-gone styles activate this meter.
        let visible: Vec<RenderStyle> = (0..9)
            .map(RenderStyle::from_setting)
            .filter(|s| s.is_visible())
            .collect();
        assert_eq!(
            visible,
            [
                RenderStyle::Normal,
                RenderStyle::Percent,
                RenderStyle::IconPercent,
                RenderStyle::IconJbPercent
            ]
        );
    }

    #[test]
    fn test_element_flags() {
        assert!(RenderStyle::Normal.shows_icon() && !RenderStyle::Normal.shows_percent());
        assert!(!RenderStyle::Percent.shows_icon() && RenderStyle::Percent.percent_only());
        assert!(RenderStyle::IconPercent.shows_icon() && RenderStyle::IconPercent.shows_percent());
        assert!(!RenderStyle::Gone.shows_icon() && !RenderStyle::Gone.shows_percent());
    }

    #[test]
    fn test_next_cycles_all_nine() {
        let mut style = RenderStyle::Normal;
        for _ in 0..9 {
            style = style.next();
        }
        assert_eq!(style, RenderStyle::Normal, "cycle length is exactly 9");
    }

    #[test]
    fn test_icon_percent_shrinks_digits_at_100() {
        let mid = percent_font(RenderStyle::IconPercent, ViewKind::StatusBar, 45);
        let full = percent_font(RenderStyle::IconPercent, ViewKind::StatusBar, 100);
        assert!(
            full.character_size.width < mid.character_size.width,
            "three digits need narrower glyphs than two"
        );
    }
}
