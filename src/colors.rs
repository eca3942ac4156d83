//! Color constants and conversions for the battery meter.
//!
//! The original stored every configurable color as a 32-bit ARGB integer and
//! leaned on the compositor's alpha channel for the translucent battery
//! shell. The simulated display is `Rgb565` with no alpha, so this module
//! provides:
//!
//! - ARGB -> `Rgb565` conversion (alpha dropped, like the original's
//!   `extractRGB`),
//! - channel scaling to stand in for alpha compositing over the (black)
//!   status bar,
//! - an integer ITU-R BT.601 luminance, used for the "is this tint bright?"
//!   contrast decision.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! ARGB components (8 bits each) are truncated into that grid on conversion.

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Simulator background and dark-contrast text.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Default fill and percentage color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Low-battery fill and critical percentage text.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Percentage text while nearly charged.
pub const GREEN: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Alpha Stand-ins
// =============================================================================

/// Shell brightness numerator: the original's `FRAME_MASK` alpha (0x66/0xFF,
/// 40%) applied to the battery outline.
pub const SHELL_ALPHA: u8 = 0x66;

/// Shell brightness while a status-bar tint override is active (the
/// original's 75/255 transparency change).
pub const TINT_SHELL_ALPHA: u8 = 75;

/// Luminance above which a color counts as "bright" and gets black contrast
/// elements instead of white. 8-bit luma scale.
const BRIGHT_LUMA: u32 = 170;

// =============================================================================
// Conversions
// =============================================================================

/// Drop the alpha byte of an ARGB integer and squeeze the RGB channels into
/// `Rgb565`.
pub fn argb_to_rgb565(argb: i32) -> Rgb565 {
    let raw = argb as u32;
    let r = ((raw >> 16) & 0xFF) as u8;
    let g = ((raw >> 8) & 0xFF) as u8;
    let b = (raw & 0xFF) as u8;
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Scale all channels of a color by `alpha / 255` with fixed-point math.
///
/// Stands in for alpha compositing against the black status bar: painting
/// ARGB `0x66FFFFFF` over black looks the same as opaque 40%-gray.
pub fn scaled(color: Rgb565, alpha: u8) -> Rgb565 {
    let raw = u32::from(color.into_storage());
    let a = u32::from(alpha);
    let r = ((raw >> 11) & 0x1F) * a / 255;
    let g = ((raw >> 5) & 0x3F) * a / 255;
    let b = (raw & 0x1F) * a / 255;
    Rgb565::new(r as u8, g as u8, b as u8)
}

/// Integer ITU-R BT.601 luminance of an `Rgb565` color on the 0-255 scale:
/// `luma = (77*R + 150*G + 29*B) >> 8` with channels expanded to 8 bits.
pub fn luminance(color: Rgb565) -> u32 {
    let raw = u32::from(color.into_storage());
    // Expand 5/6-bit channels to 8 bits by bit replication.
    let r5 = (raw >> 11) & 0x1F;
    let g6 = (raw >> 5) & 0x3F;
    let b5 = raw & 0x1F;
    let r = (r5 << 3) | (r5 >> 2);
    let g = (g6 << 2) | (g6 >> 4);
    let b = (b5 << 3) | (b5 >> 2);
    (77 * r + 150 * g + 29 * b) >> 8
}

/// Whether contrast elements drawn over `color` should be black.
pub fn is_bright(color: Rgb565) -> bool {
    luminance(color) >= BRIGHT_LUMA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_conversion_drops_alpha() {
        assert_eq!(argb_to_rgb565(0x66FF0000u32 as i32), RED, "alpha byte is ignored");
        assert_eq!(argb_to_rgb565(-1), WHITE, "0xFFFFFFFF is opaque white");
        assert_eq!(argb_to_rgb565(0xFF000000u32 as i32), BLACK);
    }

    #[test]
    fn test_scaled_darkens_every_channel() {
        let shell = scaled(WHITE, SHELL_ALPHA);
        assert!(shell.r() < WHITE.r());
        assert!(shell.g() < WHITE.g());
        assert!(shell.b() < WHITE.b());
        assert_ne!(shell, BLACK, "40% of white is still visible");
    }

    #[test]
    fn test_scaled_full_alpha_is_identity() {
        for c in [WHITE, RED, GREEN, Rgb565::new(9, 33, 17)] {
            assert_eq!(scaled(c, 255), c);
        }
        assert_eq!(scaled(WHITE, 0), BLACK);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(BLACK), 0);
        assert!(luminance(WHITE) >= 254, "white luma expands to full scale");
        assert!(luminance(GREEN) > luminance(RED), "green dominates BT.601 weights");
    }

    #[test]
    fn test_bright_classification() {
        assert!(is_bright(WHITE));
        assert!(!is_bright(BLACK));
        assert!(!is_bright(RED), "pure red reads as dark; white contrast applies");
    }
}
