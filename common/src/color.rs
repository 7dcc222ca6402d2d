//! RGB color with non-destructive intensity scaling.
//!
//! The display pipeline works in RGB888 (8 bits per channel) until the
//! final flush, where colors are packed into the RGB565 format most LED
//! matrix and TFT controllers expect. Keeping full 8-bit channels inside
//! the widget tree means drawing and reading back a pixel is lossless;
//! only the flush pays the 5-6-5 truncation.
//!
//! # Intensity
//!
//! Each [`Color`] carries an intensity ratio next to its base channels.
//! [`Color::set_intensity`] never modifies the base values; the scaled
//! channels are computed on read. Calling `set_intensity(255)` therefore
//! always restores the undimmed color, no matter how often the color was
//! dimmed before. This is what makes fading a frame in and out possible
//! without accumulating rounding losses.
//!
//! # Rgb565 Conversion
//!
//! `to_565` truncates each channel to the display bit depth (5 bits red,
//! 6 bits green, 5 bits blue). The reverse conversion shifts the channels
//! back into 8-bit range with zeroed low bits, so an RGB888 value survives
//! a round trip only if it originated from a 565 source.

use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::pixelcolor::raw::{RawData, RawU24};

// =============================================================================
// Packed Format Conversions
// =============================================================================

/// Pack a 24-bit RGB888 value into 16-bit RGB565.
///
/// Each channel loses its low bits: red and blue keep 5 bits, green keeps 6.
#[inline]
pub const fn convert_888_to_565(rgb: u32) -> u16 {
    let red = ((rgb >> 16) & 0xFF) as u16;
    let green = ((rgb >> 8) & 0xFF) as u16;
    let blue = (rgb & 0xFF) as u16;

    ((red >> 3) << 11) | ((green >> 2) << 5) | (blue >> 3)
}

/// Unpack a 16-bit RGB565 value back into 24-bit RGB888.
///
/// The low bits zeroed by [`convert_888_to_565`] stay zero, so the result
/// is bit-exact only for values that came out of a 565 conversion.
#[inline]
pub const fn convert_565_to_888(raw: u16) -> u32 {
    let red = ((raw >> 11) & 0x1F) as u32;
    let green = ((raw >> 5) & 0x3F) as u32;
    let blue = (raw & 0x1F) as u32;

    (red << 19) | (green << 10) | (blue << 3)
}

/// Scale one 8-bit channel by an intensity ratio, 255 meaning no change.
#[inline]
const fn scale_channel(channel: u8, intensity: u8) -> u8 {
    ((channel as u16 * intensity as u16) / 255) as u8
}

// =============================================================================
// Color
// =============================================================================

/// RGB color with 8-bit base channels and an intensity ratio.
///
/// The base channels are stored unscaled; [`Color::r`], [`Color::g`] and
/// [`Color::b`] return the intensity-scaled values that end up on the
/// display. Equality compares the scaled channels, matching what a viewer
/// would see.
#[derive(Clone, Copy, Debug)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    intensity: u8,
}

impl Color {
    /// Maximum intensity ratio (no dimming).
    pub const MAX_INTENSITY: u8 = u8::MAX;

    /// Minimum intensity ratio (fully dark).
    pub const MIN_INTENSITY: u8 = 0;

    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);
    pub const RED: Self = Self::new(0xFF, 0x00, 0x00);
    pub const GREEN: Self = Self::new(0x00, 0xFF, 0x00);
    pub const BLUE: Self = Self::new(0x00, 0x00, 0xFF);
    pub const YELLOW: Self = Self::new(0xFF, 0xFF, 0x00);
    pub const CYAN: Self = Self::new(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Self = Self::new(0xFF, 0x00, 0xFF);
    pub const ORANGE: Self = Self::new(0xFF, 0xA5, 0x00);
    pub const GRAY: Self = Self::new(0x80, 0x80, 0x80);

    /// Create a color from base channels at full intensity.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            intensity: Self::MAX_INTENSITY,
        }
    }

    /// Create a color from a packed 24-bit RGB888 value (`0x00RRGGBB`).
    pub const fn from_rgb888(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Create a color from a packed 16-bit RGB565 value.
    pub const fn from_565(raw: u16) -> Self {
        Self::from_rgb888(convert_565_to_888(raw))
    }

    /// Red channel, scaled by the current intensity.
    pub const fn r(&self) -> u8 {
        scale_channel(self.red, self.intensity)
    }

    /// Green channel, scaled by the current intensity.
    pub const fn g(&self) -> u8 {
        scale_channel(self.green, self.intensity)
    }

    /// Blue channel, scaled by the current intensity.
    pub const fn b(&self) -> u8 {
        scale_channel(self.blue, self.intensity)
    }

    /// Replace the base red channel.
    pub const fn set_r(&mut self, red: u8) {
        self.red = red;
    }

    /// Replace the base green channel.
    pub const fn set_g(&mut self, green: u8) {
        self.green = green;
    }

    /// Replace the base blue channel.
    pub const fn set_b(&mut self, blue: u8) {
        self.blue = blue;
    }

    /// Current intensity ratio.
    pub const fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Set the intensity ratio, 255 meaning no change and 0 fully dark.
    ///
    /// The base channels are untouched, so repeated calls never compound:
    /// `set_intensity(255)` always restores the original color.
    pub const fn set_intensity(&mut self, intensity: u8) {
        self.intensity = intensity;
    }

    /// Copy of this color with the given intensity applied.
    pub const fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    /// Packed 24-bit RGB888 value of the scaled channels.
    pub const fn to_rgb888(&self) -> u32 {
        ((self.r() as u32) << 16) | ((self.g() as u32) << 8) | (self.b() as u32)
    }

    /// Packed 16-bit RGB565 value of the scaled channels.
    pub const fn to_565(&self) -> u16 {
        convert_888_to_565(self.to_rgb888())
    }
}

impl Default for Color {
    /// Default color is black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl PartialEq for Color {
    /// Colors compare by their intensity-scaled channels.
    fn eq(&self, other: &Self) -> bool {
        self.to_rgb888() == other.to_rgb888()
    }
}

impl Eq for Color {}

impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Self::from_rgb888(rgb)
    }
}

// =============================================================================
// embedded-graphics Integration
// =============================================================================

// Implementing PixelColor lets widgets drive embedded-graphics primitives
// and text rendering directly in RGB888; the 565 truncation happens once
// at flush time instead of per drawing call.
impl PixelColor for Color {
    type Raw = RawU24;
}

impl From<RawU24> for Color {
    fn from(raw: RawU24) -> Self {
        Self::from_rgb888(raw.into_inner())
    }
}

impl From<Color> for RawU24 {
    fn from(color: Color) -> Self {
        Self::new(color.to_rgb888())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
