//! Binary indicator widget.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::color::Color;
use crate::surface::{Surface, SurfacePainter};
use crate::widgets::{Widget, WidgetBase};

/// Widget type tag of [`LampWidget`].
pub const WIDGET_TYPE: &str = "lamp";

/// Two-color lamp: a fixed-height block drawn entirely in the color
/// matching its current on/off state.
pub struct LampWidget {
    base: WidgetBase,
    is_on: bool,
    color_off: Color,
    color_on: Color,
    width: u32,
}

impl LampWidget {
    /// Default lamp width in pixels.
    pub const DEFAULT_WIDTH: u32 = 4;

    /// Lamp height in pixels.
    pub const HEIGHT: u32 = 1;

    /// Create a lamp with the given initial state, colors and width.
    pub fn new(is_on: bool, color_off: Color, color_on: Color, width: u32) -> Self {
        Self {
            base: WidgetBase::new(WIDGET_TYPE),
            is_on,
            color_off,
            color_on,
            width,
        }
    }

    /// Switch the lamp on or off.
    pub const fn set_on_state(&mut self, is_on: bool) {
        self.is_on = is_on;
    }

    /// Whether the lamp is on.
    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    /// Color shown while off.
    pub const fn set_color_off(&mut self, color: Color) {
        self.color_off = color;
    }

    /// Color shown while on.
    pub const fn set_color_on(&mut self, color: Color) {
        self.color_on = color;
    }
}

impl Default for LampWidget {
    /// Off lamp of default width, black when off and red when on.
    fn default() -> Self {
        Self::new(false, Color::BLACK, Color::RED, Self::DEFAULT_WIDTH)
    }
}

impl Widget for LampWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, surface: &mut dyn Surface) {
        let (x, y) = self.base.position();
        let color = if self.is_on { self.color_on } else { self.color_off };

        let mut painter = SurfacePainter::new(surface);
        Rectangle::new(Point::new(x, y), Size::new(self.width, Self::HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut painter)
            .ok();
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
