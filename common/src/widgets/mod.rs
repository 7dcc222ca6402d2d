//! Named, positioned drawables and their compositor.
//!
//! Every element on the display implements [`Widget`]: it has an
//! immutable type tag, a mutable (possibly empty) name for lookup, an
//! integer position relative to whatever surface its `update` receives,
//! and it repaints itself idempotently on demand. Translation into
//! absolute display coordinates is the composing [`Canvas`]'s job, not
//! the widget's, and a surface smaller than the widget simply swallows
//! the out-of-range pixels.
//!
//! The widget set is open: [`Canvas`] stores trait objects, so new
//! widget kinds plug in without touching the compositor.

mod bitmap;
mod canvas;
mod lamp;
mod progress;
mod text;

pub use bitmap::BitmapWidget;
pub use canvas::{Canvas, ClippedSurface};
pub use lamp::LampWidget;
pub use progress::{Algorithm, ProgressBar};
pub use text::TextWidget;

use heapless::String;

use crate::surface::Surface;

/// Maximum widget name length in bytes.
pub const MAX_NAME_LEN: usize = 32;

// =============================================================================
// Widget Trait
// =============================================================================

/// Capability set shared by all drawable elements.
pub trait Widget {
    /// Shared identity state (type tag, name, position).
    fn base(&self) -> &WidgetBase;

    /// Mutable access to the shared identity state.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Repaint the widget's current visual state onto the surface at the
    /// widget's own position.
    ///
    /// Must be idempotent: repeated calls with unchanged state produce
    /// the same pixels.
    fn update(&mut self, surface: &mut dyn Surface);

    /// Look up a widget by name in this widget's subtree.
    ///
    /// Leaf widgets match only themselves; an empty query never matches.
    fn find(&mut self, name: &str) -> Option<&mut dyn Widget>;

    /// Immutable type tag distinguishing widget kinds.
    fn widget_type(&self) -> &'static str {
        self.base().widget_type()
    }

    /// Widget name, empty when unset.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Rename the widget (empty clears the name).
    fn set_name(&mut self, name: &str) {
        self.base_mut().set_name(name);
    }

    /// Position of the widget's top-left corner on its drawing surface.
    fn position(&self) -> (i32, i32) {
        self.base().position()
    }

    /// Move the widget's top-left corner.
    fn move_to(&mut self, x: i32, y: i32) {
        self.base_mut().move_to(x, y);
    }
}

// =============================================================================
// Widget Base State
// =============================================================================

/// Identity state embedded in every widget implementation.
#[derive(Clone, Debug)]
pub struct WidgetBase {
    widget_type: &'static str,
    name: String<MAX_NAME_LEN>,
    x: i32,
    y: i32,
}

impl WidgetBase {
    /// Create base state with the given type tag at position (0, 0).
    pub fn new(widget_type: &'static str) -> Self {
        Self {
            widget_type,
            name: String::new(),
            x: 0,
            y: 0,
        }
    }

    /// Type tag set at construction.
    pub const fn widget_type(&self) -> &'static str {
        self.widget_type
    }

    /// Current name, empty when unset.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Replace the name. Names longer than [`MAX_NAME_LEN`] bytes are
    /// rejected and the previous name is kept.
    pub fn set_name(&mut self, name: &str) {
        let mut new_name = String::new();
        if new_name.push_str(name).is_ok() {
            self.name = new_name;
        }
    }

    /// Current position.
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Set the position.
    pub const fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;
    use crate::color::Color;
    use crate::surface::{FrameBuffer, SurfacePainter};

    /// Minimal widget drawing a fixed-size block in a pen color.
    pub(crate) struct TestWidget {
        base: WidgetBase,
        pen_color: Color,
    }

    impl TestWidget {
        pub(crate) const WIDTH: u32 = 10;
        pub(crate) const HEIGHT: u32 = 5;

        pub(crate) fn new() -> Self {
            Self {
                base: WidgetBase::new("test"),
                pen_color: Color::BLACK,
            }
        }

        pub(crate) fn set_pen_color(&mut self, color: Color) {
            self.pen_color = color;
        }
    }

    impl Widget for TestWidget {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn update(&mut self, surface: &mut dyn Surface) {
            let (x, y) = self.base.position();
            let mut painter = SurfacePainter::new(surface);
            Rectangle::new(Point::new(x, y), Size::new(Self::WIDTH, Self::HEIGHT))
                .into_styled(PrimitiveStyle::with_fill(self.pen_color))
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

    #[test]
    fn test_widget_type() {
        let widget = TestWidget::new();
        assert_eq!(widget.widget_type(), "test");
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let widget = TestWidget::new();
        assert_eq!(widget.name(), "");
    }

    #[test]
    fn test_set_name_and_clear() {
        let mut widget = TestWidget::new();
        widget.set_name("myWidget");
        assert_eq!(widget.name(), "myWidget");

        widget.set_name("");
        assert_eq!(widget.name(), "");
    }

    #[test]
    fn test_overlong_name_is_rejected() {
        let mut widget = TestWidget::new();
        widget.set_name("short");

        let overlong = "x".repeat(MAX_NAME_LEN + 1);
        widget.set_name(&overlong);
        assert_eq!(widget.name(), "short", "Overlong names keep the previous name");
    }

    #[test]
    fn test_find_with_empty_query_fails() {
        let mut widget = TestWidget::new();
        widget.set_name("myWidget");
        assert!(widget.find("").is_none());
    }

    #[test]
    fn test_find_matches_own_name() {
        let mut widget = TestWidget::new();
        widget.set_name("myWidget");
        assert!(widget.find("myWidget").is_some());
        assert!(widget.find("other").is_none());
    }

    #[test]
    fn test_position_defaults_to_origin() {
        let widget = TestWidget::new();
        assert_eq!(widget.position(), (0, 0));
    }

    #[test]
    fn test_move_widget() {
        let mut widget = TestWidget::new();
        widget.move_to(10, 20);
        assert_eq!(widget.position(), (10, 20));
    }

    #[test]
    fn test_update_draws_at_position() {
        let mut surface = FrameBuffer::new(32, 8);
        let mut widget = TestWidget::new();
        widget.set_pen_color(Color::RED);

        widget.move_to(2, 1);
        widget.update(&mut surface);
        assert!(surface.region_is(2, 1, TestWidget::WIDTH, TestWidget::HEIGHT, Color::RED));
        assert_eq!(surface.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(surface.pixel(2, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_update_survives_surface_smaller_than_widget() {
        // 10x5 widget on a 4x4 surface: out-of-surface pixels are dropped.
        let mut surface = FrameBuffer::new(4, 4);
        let mut widget = TestWidget::new();
        widget.set_pen_color(Color::RED);

        widget.update(&mut surface);
        assert!(surface.region_is(0, 0, 4, 4, Color::RED));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut surface = FrameBuffer::new(32, 8);
        let mut widget = TestWidget::new();
        widget.set_pen_color(Color::GREEN);

        widget.update(&mut surface);
        let first_count = surface.write_count();
        widget.update(&mut surface);
        assert!(surface.region_is(0, 0, TestWidget::WIDTH, TestWidget::HEIGHT, Color::GREEN));
        assert_eq!(surface.write_count(), first_count * 2, "Same pixels repainted");
    }
}
