//! Progress indicator widget with two fill algorithms.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::color::Color;
use crate::surface::{Surface, SurfacePainter};
use crate::widgets::{Widget, WidgetBase};

/// Widget type tag of [`ProgressBar`].
pub const WIDGET_TYPE: &str = "progressBar";

/// Fill algorithm of a [`ProgressBar`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Algorithm {
    /// Solid rectangle covering the left `floor(width * progress / 100)`
    /// columns at full height.
    #[default]
    Bar,

    /// The widget area as `width * height` cells in row-major order
    /// (row 0 fills completely before row 1); the first
    /// `round(width * height * progress / 100)` cells are foreground.
    PixelWise,
}

/// Percentage indicator over a fixed rectangle.
///
/// Both algorithms are monotonic in `progress`: raising the percentage
/// never lowers the number of filled cells. Unfilled cells are painted in
/// the background color, so a repaint after lowering the percentage
/// leaves no stale foreground pixels behind.
pub struct ProgressBar {
    base: WidgetBase,
    width: u32,
    height: u32,
    progress: u8,
    algorithm: Algorithm,
    fill_color: Color,
    background_color: Color,
}

impl ProgressBar {
    /// Create a bar of the given size at 0%, using the default
    /// [`Algorithm::Bar`] with a red fill on black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            base: WidgetBase::new(WIDGET_TYPE),
            width,
            height,
            progress: 0,
            algorithm: Algorithm::default(),
            fill_color: Color::RED,
            background_color: Color::BLACK,
        }
    }

    /// Set the progress percentage, clamped to [0, 100].
    pub const fn set_progress(&mut self, progress: u8) {
        self.progress = if progress > 100 { 100 } else { progress };
    }

    /// Current progress percentage.
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Select the fill algorithm.
    pub const fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Foreground (filled) color.
    pub const fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Background (unfilled) color.
    pub const fn set_background_color(&mut self, color: Color) {
        self.background_color = color;
    }

    /// Number of filled cells for the pixel-wise algorithm, rounded to
    /// the nearest cell.
    const fn filled_cells(&self) -> u32 {
        (self.width * self.height * self.progress as u32 + 50) / 100
    }

    /// Number of filled columns for the bar algorithm.
    const fn filled_columns(&self) -> u32 {
        self.width * self.progress as u32 / 100
    }

    fn draw_bar(&self, surface: &mut dyn Surface) {
        let (x, y) = self.base.position();
        let filled = self.filled_columns();

        let mut painter = SurfacePainter::new(surface);
        Rectangle::new(Point::new(x, y), Size::new(filled, self.height))
            .into_styled(PrimitiveStyle::with_fill(self.fill_color))
            .draw(&mut painter)
            .ok();
        Rectangle::new(Point::new(x + filled as i32, y), Size::new(self.width - filled, self.height))
            .into_styled(PrimitiveStyle::with_fill(self.background_color))
            .draw(&mut painter)
            .ok();
    }

    fn draw_pixel_wise(&self, surface: &mut dyn Surface) {
        let (x, y) = self.base.position();
        let filled = self.filled_cells();

        for index in 0..self.width * self.height {
            let col = (index % self.width) as i32;
            let row = (index / self.width) as i32;
            let color = if index < filled {
                self.fill_color
            } else {
                self.background_color
            };
            surface.draw_pixel(x + col, y + row, color);
        }
    }
}

impl Widget for ProgressBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, surface: &mut dyn Surface) {
        match self.algorithm {
            Algorithm::Bar => self.draw_bar(surface),
            Algorithm::PixelWise => self.draw_pixel_wise(surface),
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
