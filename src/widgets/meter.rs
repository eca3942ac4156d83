//! The battery meter widget: frame, fill, bolt, warning glyph, and
//! percentage text.
//!
//! One draw pass renders the whole meter from the active [`BatteryStatus`]
//! and the current settings snapshot. The pass is a pure function of its
//! inputs except for the cached bolt polygon, which is rebuilt only when the
//! bolt frame moves.
//!
//! # Draw Pass
//!
//! 1. Deactivated style or unknown level: draw nothing at all.
//! 2. Geometry: shell frame (right third of the view in the JB style),
//!    button cap, bottom-anchored clip rect from the fill fraction, bolt
//!    frame.
//! 3. Shell rectangle in the translucent shell color, cap in the fill color
//!    once the meter reads full.
//! 4. Fill painted through the clip rectangle.
//! 5. Charging: the bolt polygon (except in percent-only mode). Empty and
//!    unplugged in the plain icon style: the warning glyph instead.
//! 6. Percentage text, unless the in-icon style suppresses it while the bolt
//!    occupies the same pixels.
//!
//! Color precedence throughout: status-bar tint (when the user hasn't picked
//! a custom color) > persisted custom color > computed default.

use core::fmt::Write;

use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::charge_colors::{COLOR_DEFAULT, ColorTable, tint_override};
use crate::colors::{BLACK, GREEN, RED, SHELL_ALPHA, TINT_SHELL_ALPHA, WHITE, argb_to_rgb565, is_bright, scaled};
use crate::config::{DisplayConfig, ViewKind};
use crate::settings::MeterSettings;
use crate::styles::{CENTERED_MIDDLE, RenderStyle, percent_font, warning_font};
use crate::thresholds::{EMPTY, FULL, TEXT_CHARGED, TEXT_CRITICAL};
use crate::tracker::{BatteryStatus, UNKNOWN_LEVEL};
use crate::widgets::bolt::BoltPath;

/// Render the level as a single rounded digit (e.g. "4" for 42%). Shipped
/// off, kept as the original did for quick experiments.
pub const SINGLE_DIGIT_PERCENT: bool = false;

/// Glyph drawn over an empty, unplugged battery in the plain icon style.
const WARNING_GLYPH: &str = "!";

// =============================================================================
// Fill Fraction
// =============================================================================

/// Fraction of the shell painted as charge, with the "looks full / looks
/// empty" snap at [`FULL`] / [`EMPTY`].
pub fn fill_fraction(level: i32) -> f32 {
    if level >= FULL {
        1.0
    } else if level <= EMPTY {
        0.0
    } else {
        level as f32 / 100.0
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Derived rectangles for one draw pass.
#[derive(Debug, PartialEq)]
struct Frames {
    /// Battery shell (below the button cap).
    frame: Rectangle,
    /// Button cap on top of the shell.
    button: Rectangle,
    /// Bottom-anchored portion of `frame` covered by charge.
    clip: Rectangle,
    /// Bounding box of the charging bolt.
    bolt: Rectangle,
}

/// Build a pixel rectangle from float edges, collapsing negative extents to
/// empty (the original's float rects simply didn't paint when inverted).
fn rect_f(left: f32, top: f32, width: f32, height: f32) -> Rectangle {
    Rectangle::new(
        Point::new(left.round() as i32, top.round() as i32),
        Size::new(width.round().max(0.0) as u32, height.round().max(0.0) as u32),
    )
}

fn compute_frames(bounds: Rectangle, style: RenderStyle, fraction: f32) -> Frames {
    let left = bounds.top_left.x as f32;
    let top = bounds.top_left.y as f32;
    let width = bounds.size.width as f32;
    let height = bounds.size.height as f32;

    let button_h = height * 0.12;

    // The JB arrangement squeezes the shell into the right third and leaves
    // the rest of the view to the text column.
    let (frame_left, frame_w) = if style == RenderStyle::IconJbPercent {
        (left + width * (2.0 / 3.0), width / 3.0)
    } else {
        (left, width)
    };

    // The cap insets are fractions of the *full* view width, as shipped. In
    // the JB style they exceed the narrow shell and the cap degenerates to an
    // empty rect, which matches the original's undrawn inverted RectF.
    let cap_left = frame_left + width * 0.25;
    let cap_right = (frame_left + frame_w) - width * 0.25;
    // +1 px so the cap covers the shell border it intersects.
    let button = rect_f(cap_left, top, cap_right - cap_left, button_h + 1.0);

    let frame_top = top + button_h;
    let frame_h = height - button_h;
    let frame = rect_f(frame_left, frame_top, frame_w, frame_h);

    let clip_top = frame_top + frame_h * (1.0 - fraction);
    let clip = rect_f(frame_left, clip_top, frame_w, frame_h * fraction);

    let bolt = rect_f(
        frame_left + frame_w / 4.5,
        frame_top + frame_h / 6.0,
        frame_w - frame_w / 4.5 - frame_w / 7.0,
        frame_h - frame_h / 6.0 - frame_h / 10.0,
    );

    Frames { frame, button, clip, bolt }
}

// =============================================================================
// Widget
// =============================================================================

/// The battery meter. Holds the settings snapshot, display configuration,
/// charge color table, optional status-bar tint, and the cached bolt path.
#[derive(Debug)]
pub struct BatteryMeter {
    settings: MeterSettings,
    config: DisplayConfig,
    table: ColorTable,
    tint: Option<Rgb565>,
    bounds: Rectangle,
    bolt: BoltPath,
}

impl BatteryMeter {
    pub fn new(settings: MeterSettings, config: DisplayConfig) -> Self {
        Self::with_table(settings, config, ColorTable::default())
    }

    pub fn with_table(settings: MeterSettings, config: DisplayConfig, table: ColorTable) -> Self {
        Self {
            settings,
            config,
            table,
            tint: None,
            bounds: Rectangle::zero(),
            bolt: BoltPath::new(),
        }
    }

    /// Replace the settings snapshot after a settings-change notification.
    pub fn apply_settings(&mut self, settings: MeterSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &MeterSettings {
        &self.settings
    }

    /// Replace the display configuration (density change, host move).
    pub fn apply_config(&mut self, config: DisplayConfig) {
        self.config = config;
    }

    /// Dynamic status-bar tint pushed by the host; `None` clears it.
    pub fn set_tint(&mut self, tint: Option<Rgb565>) {
        self.tint = tint;
    }

    /// Position and size assigned by the host layout (see
    /// [`crate::layout::meter_size`]).
    pub fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    // -------------------------------------------------------------------------
    // Color Decisions
    // -------------------------------------------------------------------------

    /// Persisted fill color with the sentinel resolved to the default white.
    fn persisted_fill(&self) -> Rgb565 {
        if self.settings.battery_color == COLOR_DEFAULT {
            WHITE
        } else {
            argb_to_rgb565(self.settings.battery_color)
        }
    }

    fn shell_color(&self) -> Rgb565 {
        match tint_override(self.tint, self.settings.battery_color) {
            Some(t) => scaled(t, TINT_SHELL_ALPHA),
            None => scaled(self.persisted_fill(), SHELL_ALPHA),
        }
    }

    fn fill_color(&self, status: &BatteryStatus) -> Rgb565 {
        let tint = tint_override(self.tint, self.settings.battery_color);
        if status.plugged {
            tint.unwrap_or_else(|| self.persisted_fill())
        } else {
            self.table.color_for_level(status.level, tint)
        }
    }

    fn bolt_color(&self) -> Rgb565 {
        if let Some(t) = tint_override(self.tint, self.settings.percentage_charging_color) {
            // Contrast against the tinted bar, not the tint itself.
            if is_bright(t) { BLACK } else { WHITE }
        } else if self.settings.percentage_charging_color == COLOR_DEFAULT {
            WHITE
        } else {
            argb_to_rgb565(self.settings.percentage_charging_color)
        }
    }

    fn percent_text_color(&self, status: &BatteryStatus) -> Rgb565 {
        let style = self.settings.style;
        if status.level <= TEXT_CRITICAL && style.shows_percent() {
            return RED;
        }
        if status.level >= TEXT_CHARGED
            && status.plugged
            && matches!(style, RenderStyle::Percent | RenderStyle::IconJbPercent)
        {
            return GREEN;
        }
        if status.plugged && style.percent_only() {
            // Free-standing text doubles as the charging indicator.
            return self.bolt_color();
        }
        if let Some(t) = tint_override(self.tint, self.settings.percentage_color) {
            return t;
        }
        if self.settings.percentage_color == COLOR_DEFAULT {
            WHITE
        } else {
            argb_to_rgb565(self.settings.percentage_color)
        }
    }

    // -------------------------------------------------------------------------
    // Draw Pass
    // -------------------------------------------------------------------------

    pub fn draw<D>(&mut self, target: &mut D, status: &BatteryStatus) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = self.settings.style;
        if !style.is_visible() || status.level == UNKNOWN_LEVEL {
            return Ok(());
        }

        let level = status.level;
        let fraction = fill_fraction(level);
        let frames = compute_frames(self.bounds, style, fraction);

        let shell = self.shell_color();
        let fill = self.fill_color(status);

        if style.shows_icon() {
            frames.frame.into_styled(PrimitiveStyle::with_fill(shell)).draw(target)?;

            // The cap only lights up once the meter reads full.
            let cap_color = if fraction == 1.0 { fill } else { shell };
            frames.button.into_styled(PrimitiveStyle::with_fill(cap_color)).draw(target)?;

            // Charge level: the shell repainted through the clip rect.
            let mut clipped = target.clipped(&frames.clip);
            frames.frame.into_styled(PrimitiveStyle::with_fill(fill)).draw(&mut clipped)?;
        }

        if status.plugged && !style.percent_only() {
            self.bolt.update(frames.bolt);
            self.bolt.draw(target, self.bolt_color())?;
        } else if level <= EMPTY && style == RenderStyle::Normal {
            // Out of juice, not charging: "!" over the empty shell, in the
            // table's most-critical color.
            let warn_style = MonoTextStyle::new(warning_font(self.config.view), self.table.color_for_level(0, None));
            let center = self.bounds.center();
            Text::with_text_style(WARNING_GLYPH, center, warn_style, CENTERED_MIDDLE).draw(target)?;
        }

        // The in-icon percent style gives its pixels to the bolt while
        // charging.
        let text_suppressed = style == RenderStyle::IconPercent && status.plugged;
        if style.shows_percent() && !text_suppressed {
            let font = percent_font(style, self.config.view, level);
            let color = self.percent_text_color(status);

            let mut text: String<8> = String::new();
            let shown = if SINGLE_DIGIT_PERCENT { level / 10 } else { level };
            if style.percent_only() {
                let _ = write!(text, "{shown}%");
            } else {
                let _ = write!(text, "{shown}");
            }

            let width = self.bounds.size.width as f32;
            // The JB text column sits left of the shell; everything else
            // centers on the view.
            let x_frac = if style == RenderStyle::IconJbPercent {
                match self.config.view {
                    ViewKind::StatusBar => 0.25,
                    ViewKind::QuickSettings => 0.3,
                }
            } else {
                0.5
            };
            let anchor = Point::new(
                self.bounds.top_left.x + (width * x_frac) as i32,
                self.bounds.top_left.y + (self.bounds.size.height as f32 * 0.47) as i32,
            );
            Text::with_text_style(&text, anchor, MonoTextStyle::new(font, color), CENTERED_MIDDLE)
                .draw(target)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewKind;
    use crate::settings::{STATUS_BAR_BATTERY, SimSettings};
    use crate::settings::SettingsStore as _;
    use crate::tracker::{BatteryEvent, BatteryTracker, PlugType};
    use embedded_graphics::mock_display::MockDisplay;

    fn meter_with_style(style: RenderStyle) -> BatteryMeter {
        let mut store = SimSettings::new();
        store.set(STATUS_BAR_BATTERY, style.setting_value());
        let settings = MeterSettings::load(&store, false);
        let config = DisplayConfig::new(1.0, ViewKind::StatusBar);
        let mut meter = BatteryMeter::new(settings, config);
        meter.set_bounds(Rectangle::new(Point::new(4, 4), Size::new(22, 16)));
        meter
    }

    fn status_at(level: i32, plug: PlugType) -> BatteryStatus {
        let mut tracker = BatteryTracker::new();
        tracker.handle_event(&BatteryEvent::synthetic(level, plug));
        tracker.status().clone()
    }

    fn lenient_display() -> MockDisplay<Rgb565> {
        // The shell is intentionally repainted through the clip rect and the
        // bolt/text overlap it; overdraw is part of the design.
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    fn drawn_area(display: &MockDisplay<Rgb565>) -> u32 {
        let area = display.affected_area();
        area.size.width * area.size.height
    }

    // -------------------------------------------------------------------------
    // Fill Fraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_fill_fraction_stays_in_unit_range() {
        for level in 0..=100 {
            let f = fill_fraction(level);
            assert!((0.0..=1.0).contains(&f), "level {level} -> {f}");
        }
    }

    #[test]
    fn test_fill_fraction_snaps_at_thresholds() {
        for level in FULL..=100 {
            assert_eq!(fill_fraction(level), 1.0, "level {level} looks full");
        }
        for level in 0..=EMPTY {
            assert_eq!(fill_fraction(level), 0.0, "level {level} looks empty");
        }
        assert!(fill_fraction(50) > 0.0 && fill_fraction(50) < 1.0);
        assert!(fill_fraction(95) < 1.0, "snap starts exactly at FULL");
        assert!(fill_fraction(5) > 0.0, "snap ends exactly at EMPTY");
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    #[test]
    fn test_clip_anchors_to_the_bottom() {
        let bounds = Rectangle::new(Point::zero(), Size::new(20, 100));
        let half = compute_frames(bounds, RenderStyle::Normal, 0.5);
        let full = compute_frames(bounds, RenderStyle::Normal, 1.0);
        let empty = compute_frames(bounds, RenderStyle::Normal, 0.0);

        let frame_bottom = half.frame.top_left.y + half.frame.size.height as i32;
        let clip_bottom = half.clip.top_left.y + half.clip.size.height as i32;
        assert_eq!(clip_bottom, frame_bottom, "charge grows upward from the bottom edge");
        assert_eq!(full.clip, full.frame, "full charge covers the whole shell");
        assert_eq!(empty.clip.size.height, 0, "no charge, no clip area");
        assert!(half.clip.size.height < half.frame.size.height);
    }

    #[test]
    fn test_jb_style_confines_shell_to_right_third() {
        let bounds = Rectangle::new(Point::zero(), Size::new(30, 15));
        let jb = compute_frames(bounds, RenderStyle::IconJbPercent, 0.5);
        let normal = compute_frames(bounds, RenderStyle::Normal, 0.5);

        assert_eq!(jb.frame.top_left.x, 20, "shell starts at 2/3 of the width");
        assert_eq!(jb.frame.size.width, 10);
        assert_eq!(normal.frame.size.width, 30);
        assert_eq!(jb.button.size.width, 0, "full-width cap insets collapse the JB cap");
    }

    #[test]
    fn test_bolt_frame_nested_inside_shell() {
        let bounds = Rectangle::new(Point::zero(), Size::new(22, 16));
        let frames = compute_frames(bounds, RenderStyle::Normal, 0.5);
        assert!(frames.bolt.top_left.x > frames.frame.top_left.x);
        assert!(frames.bolt.top_left.y > frames.frame.top_left.y);
        assert!(frames.bolt.size.width < frames.frame.size.width);
        assert!(frames.bolt.size.height < frames.frame.size.height);
    }

    // -------------------------------------------------------------------------
    // Draw Pass
    // -------------------------------------------------------------------------

    #[test]
    fn test_unknown_level_draws_nothing() {
        let mut meter = meter_with_style(RenderStyle::Normal);
        let mut display = lenient_display();
        meter.draw(&mut display, &BatteryStatus::default()).unwrap();
        assert_eq!(drawn_area(&display), 0, "unknown level short-circuits the pass");
    }

    #[test]
    fn test_deactivated_styles_draw_nothing() {
        for style in [RenderStyle::Gone, RenderStyle::Circle, RenderStyle::DottedCirclePercent] {
            let mut meter = meter_with_style(style);
            let mut display = lenient_display();
            meter.draw(&mut display, &status_at(50, PlugType::None)).unwrap();
            assert_eq!(drawn_area(&display), 0, "{style:?}");
        }
    }

    #[test]
    fn test_icon_style_paints_the_shell() {
        let mut meter = meter_with_style(RenderStyle::Normal);
        assert_eq!(meter.bounds(), Rectangle::new(Point::new(4, 4), Size::new(22, 16)));
        let mut display = lenient_display();
        meter.draw(&mut display, &status_at(50, PlugType::None)).unwrap();
        assert!(drawn_area(&display) > 0);
    }

    #[test]
    fn test_percent_style_paints_text_only() {
        let mut meter = meter_with_style(RenderStyle::Percent);
        let mut display = lenient_display();
        meter.draw(&mut display, &status_at(50, PlugType::None)).unwrap();
        assert!(drawn_area(&display) > 0, "percent text is visible");
    }

    #[test]
    fn test_charging_adds_the_bolt() {
        let mut meter = meter_with_style(RenderStyle::Normal);
        let mut with = lenient_display();
        meter.draw(&mut with, &status_at(50, PlugType::Ac)).unwrap();

        let bolt_color = meter.bolt_color();
        let mut bolt_pixels = 0;
        for y in 0..40 {
            for x in 0..40 {
                if with.get_pixel(Point::new(x, y)) == Some(bolt_color) {
                    bolt_pixels += 1;
                }
            }
        }
        assert!(bolt_pixels > 0, "plugged draw includes bolt-colored pixels");
    }

    #[test]
    fn test_low_level_fill_is_red_from_the_table() {
        let mut meter = meter_with_style(RenderStyle::Normal);
        assert_eq!(meter.fill_color(&status_at(10, PlugType::None)), RED);
        assert_ne!(meter.fill_color(&status_at(50, PlugType::None)), RED);
        // The tint wins at every exit of the resolver, critical bucket
        // included - as shipped.
        meter.set_tint(Some(GREEN));
        assert_eq!(meter.fill_color(&status_at(10, PlugType::None)), GREEN);
        assert_eq!(meter.fill_color(&status_at(10, PlugType::Ac)), GREEN);
    }

    #[test]
    fn test_percent_text_color_rules() {
        let meter = meter_with_style(RenderStyle::Percent);
        assert_eq!(meter.percent_text_color(&status_at(10, PlugType::None)), RED, "critical level");
        assert_eq!(meter.percent_text_color(&status_at(95, PlugType::Ac)), GREEN, "nearly charged");
        assert_eq!(
            meter.percent_text_color(&status_at(95, PlugType::None)),
            WHITE,
            "high level alone is not green"
        );
        assert_eq!(
            meter.percent_text_color(&status_at(14, PlugType::Ac)),
            RED,
            "critical beats charging"
        );
    }

    #[test]
    fn test_custom_color_beats_tint() {
        let mut store = SimSettings::new();
        store.set(STATUS_BAR_BATTERY, RenderStyle::Normal.setting_value());
        store.set(crate::settings::STATUS_BAR_BATTERY_COLOR, 0xFF00FF00u32 as i32);
        assert_eq!(store.int_for(crate::settings::STATUS_BAR_BATTERY_COLOR, -2), 0xFF00FF00u32 as i32);

        let settings = MeterSettings::load(&store, false);
        let mut meter = BatteryMeter::new(settings, DisplayConfig::default());
        meter.set_tint(Some(RED));
        assert_eq!(
            meter.fill_color(&status_at(80, PlugType::Ac)),
            GREEN,
            "persisted custom color wins over the tint"
        );
    }
}
