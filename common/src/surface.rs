//! Pixel-addressable drawing surfaces.
//!
//! Widgets draw through the minimal [`Surface`] trait: report dimensions,
//! write one pixel. A surface performs its own bounds checking and
//! silently discards out-of-range writes; partial overlap is normal
//! operation, not an error, so widgets never pre-clip.
//!
//! Two bridges connect the trait to the `embedded-graphics` ecosystem:
//!
//! - [`SurfacePainter`] wraps any surface as a `DrawTarget<Color = Color>`
//!   so widgets can use `Rectangle`, `Text` and friends instead of raw
//!   pixel loops.
//! - [`FrameBuffer::flush_to`] converts a composed RGB888 frame into
//!   `Rgb565` for the actual display driver, applying a global brightness
//!   ratio on the way out.

use core::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::color::Color;

// =============================================================================
// Surface Trait
// =============================================================================

/// Drawable surface with integer pixel addressing.
///
/// Coordinates have their origin at the top-left corner. Implementations
/// must ignore writes outside `[0, width) x [0, height)` without failing.
pub trait Surface {
    /// Drawing area width in pixels.
    fn width(&self) -> u32;

    /// Drawing area height in pixels.
    fn height(&self) -> u32;

    /// Write a single pixel, discarding out-of-range coordinates.
    fn draw_pixel(&mut self, x: i32, y: i32, color: Color);
}

// =============================================================================
// Frame Buffer
// =============================================================================

/// Owned RGB888 pixel store the widget tree composes into.
///
/// Keeps a counter of accepted pixel writes, which the tests (and the
/// debug overlay) use to tell "drew nothing" apart from "drew black".
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    write_count: u32,
}

impl FrameBuffer {
    /// Create a frame buffer of the given size, filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
            write_count: 0,
        }
    }

    /// Fill every pixel with one color (not counted as pixel writes).
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Pixel color at the given position, if it is inside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some(self.pixels[(x as u32 + y as u32 * self.width) as usize])
        } else {
            None
        }
    }

    /// Whether every pixel of the given rectangle equals `color`.
    ///
    /// Pixels of the rectangle outside the buffer are ignored.
    pub fn region_is(&self, x: i32, y: i32, width: u32, height: u32, color: Color) -> bool {
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                if let Some(actual) = self.pixel(x + col, y + row)
                    && actual != color
                {
                    return false;
                }
            }
        }
        true
    }

    /// Number of in-bounds pixel writes since the last reset.
    pub const fn write_count(&self) -> u32 {
        self.write_count
    }

    /// Reset the pixel write counter.
    pub const fn reset_write_count(&mut self) {
        self.write_count = 0;
    }

    /// Flush the frame into an RGB565 draw target, dimming every pixel by
    /// the given brightness ratio (255 = full brightness).
    pub fn flush_to<D>(&self, target: &mut D, brightness: u8) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = Rectangle::new(Point::zero(), Size::new(self.width, self.height));
        target.fill_contiguous(
            &area,
            self.pixels.iter().map(|color| {
                let dimmed = Color::new(color.r(), color.g(), color.b()).with_intensity(brightness);
                Rgb565::new(dimmed.r() >> 3, dimmed.g() >> 2, dimmed.b() >> 3)
            }),
        )
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.pixels[(x as u32 + y as u32 * self.width) as usize] = color;
            self.write_count += 1;
        }
    }
}

// =============================================================================
// embedded-graphics Bridge
// =============================================================================

/// Adapter presenting a [`Surface`] as an embedded-graphics draw target.
///
/// Lets widgets render rectangles and text with the ecosystem primitives
/// while the surface keeps doing the bounds checking. Drawing is
/// infallible; out-of-range pixels are dropped by the surface.
pub struct SurfacePainter<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> SurfacePainter<'a> {
    /// Wrap a surface for embedded-graphics drawing.
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self { surface }
    }
}

impl OriginDimensions for SurfacePainter<'_> {
    fn size(&self) -> Size {
        Size::new(self.surface.width(), self.surface.height())
    }
}

impl DrawTarget for SurfacePainter<'_> {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.surface.draw_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::PrimitiveStyle;

    use super::*;

    #[test]
    fn test_new_frame_buffer_is_black() {
        let buffer = FrameBuffer::new(8, 4);
        assert!(buffer.region_is(0, 0, 8, 4, Color::BLACK));
        assert_eq!(buffer.write_count(), 0);
    }

    #[test]
    fn test_draw_pixel_and_read_back() {
        let mut buffer = FrameBuffer::new(8, 4);
        buffer.draw_pixel(3, 2, Color::RED);
        assert_eq!(buffer.pixel(3, 2), Some(Color::RED));
        assert_eq!(buffer.write_count(), 1);
    }

    #[test]
    fn test_out_of_range_writes_are_discarded() {
        let mut buffer = FrameBuffer::new(8, 4);
        buffer.draw_pixel(-1, 0, Color::RED);
        buffer.draw_pixel(0, -1, Color::RED);
        buffer.draw_pixel(8, 0, Color::RED);
        buffer.draw_pixel(0, 4, Color::RED);

        assert_eq!(buffer.write_count(), 0, "Discarded writes must not count");
        assert!(buffer.region_is(0, 0, 8, 4, Color::BLACK));
    }

    #[test]
    fn test_out_of_range_reads_are_none() {
        let buffer = FrameBuffer::new(8, 4);
        assert!(buffer.pixel(-1, 0).is_none());
        assert!(buffer.pixel(8, 0).is_none());
        assert!(buffer.pixel(0, 4).is_none());
    }

    #[test]
    fn test_fill() {
        let mut buffer = FrameBuffer::new(8, 4);
        buffer.fill(Color::BLUE);
        assert!(buffer.region_is(0, 0, 8, 4, Color::BLUE));
    }

    #[test]
    fn test_painter_draws_primitives_onto_surface() {
        let mut buffer = FrameBuffer::new(8, 4);

        let mut painter = SurfacePainter::new(&mut buffer);
        Rectangle::new(Point::new(1, 1), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Color::GREEN))
            .draw(&mut painter)
            .ok();

        assert!(buffer.region_is(1, 1, 3, 2, Color::GREEN));
        assert_eq!(buffer.write_count(), 6);
        assert_eq!(buffer.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(buffer.pixel(4, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_painter_reports_surface_dimensions() {
        let mut buffer = FrameBuffer::new(8, 4);
        let painter = SurfacePainter::new(&mut buffer);
        assert_eq!(painter.size(), Size::new(8, 4));
    }

    #[test]
    fn test_flush_applies_brightness() {
        use embedded_graphics::mock_display::MockDisplay;

        let mut buffer = FrameBuffer::new(2, 1);
        buffer.draw_pixel(0, 0, Color::WHITE);
        buffer.draw_pixel(1, 0, Color::WHITE);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_out_of_bounds_drawing(true);
        buffer.flush_to(&mut display, 255).unwrap();
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::new(31, 63, 31)));

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_out_of_bounds_drawing(true);
        buffer.flush_to(&mut display, 0).unwrap();
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(Rgb565::new(0, 0, 0)));
    }
}
