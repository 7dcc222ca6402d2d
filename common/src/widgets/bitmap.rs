//! Raw pixel blit widget.

use crate::color::Color;
use crate::surface::Surface;
use crate::widgets::{Widget, WidgetBase};

/// Widget type tag of [`BitmapWidget`].
pub const WIDGET_TYPE: &str = "bitmap";

/// Widget blitting a borrowed rectangular pixel buffer.
///
/// The widget never copies: [`BitmapWidget::set`] stores a reference and
/// the caller keeps ownership of the pixel data for the widget's
/// lifetime (or re-`set`s with new storage). Without a buffer the widget
/// draws nothing.
pub struct BitmapWidget<'b> {
    base: WidgetBase,
    bitmap: Option<BitmapRef<'b>>,
}

#[derive(Clone, Copy)]
struct BitmapRef<'b> {
    pixels: &'b [Color],
    width: u32,
    height: u32,
}

impl<'b> BitmapWidget<'b> {
    /// Create a bitmap widget without pixel data.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(WIDGET_TYPE),
            bitmap: None,
        }
    }

    /// Assign the pixel buffer: `width * height` colors in row-major
    /// order (row 0 first).
    pub fn set(&mut self, pixels: &'b [Color], width: u32, height: u32) {
        self.bitmap = Some(BitmapRef {
            pixels,
            width,
            height,
        });
    }

    /// Stored pixel buffer with its dimensions, if one was assigned.
    pub fn get(&self) -> Option<(&'b [Color], u32, u32)> {
        self.bitmap
            .map(|bitmap| (bitmap.pixels, bitmap.width, bitmap.height))
    }
}

impl Default for BitmapWidget<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for BitmapWidget<'_> {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, surface: &mut dyn Surface) {
        let Some(bitmap) = self.bitmap else {
            return;
        };

        let (x, y) = self.base.position();
        for row in 0..bitmap.height {
            for col in 0..bitmap.width {
                let index = (col + row * bitmap.width) as usize;
                if let Some(&color) = bitmap.pixels.get(index) {
                    surface.draw_pixel(x + col as i32, y + row as i32, color);
                }
            }
        }
    }

    fn find(&mut self, name: &str) -> Option<&mut dyn Widget> {
        if !name.is_empty() && self.base.name() == name {
            Some(self)
        } else {
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
