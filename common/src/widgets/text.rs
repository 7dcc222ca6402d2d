//! Text widget with inline color directives and horizontal scrolling.
//!
//! # Format Tags
//!
//! The source string may embed escaped color directives of the form
//! `\#RRGGBB` (backslash, hash, six hex digits). A directive is consumed
//! during [`TextWidget::set_format_str`] and changes the draw color for
//! the characters that follow; it never appears in the rendered text. A
//! `#` without the escaping backslash, or an escaped sequence whose six
//! characters are not all hex digits, is no directive: it stays in the
//! text verbatim (the lone escape backslash is dropped). Malformed input
//! is therefore displayed, never reported as an error.
//!
//! # Scrolling
//!
//! When the rendered text is wider than the widget's display window, the
//! text scrolls: it enters from the right edge, moves one step further
//! left whenever the scroll timer expires, and wraps around to re-enter
//! after it has fully left the window. Text that fits is drawn statically
//! and engages no scrolling state. Drawing is clipped to the widget's own
//! window in both cases.

use std::time::Duration;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use heapless::{String, Vec};

use crate::color::Color;
use crate::surface::{Surface, SurfacePainter};
use crate::timer::SimpleTimer;
use crate::widgets::canvas::ClippedSurface;
use crate::widgets::{Widget, WidgetBase};

/// Widget type tag of [`TextWidget`].
pub const WIDGET_TYPE: &str = "text";

/// Maximum rendered text length in bytes.
pub const MAX_TEXT_LEN: usize = 256;

/// Maximum number of color directives per text.
pub const MAX_COLOR_RUNS: usize = 8;

/// Backing storage for [`TextWidget::DEFAULT_FONT`] so the default font has a
/// single stable `'static` address (a bare `&FONT_6X10` is const-promoted
/// afresh at each use site).
static DEFAULT_FONT_STORAGE: MonoFont<'static> = FONT_6X10;

/// Color change taking effect at a byte offset of the rendered text.
#[derive(Clone, Copy, Debug)]
struct ColorRun {
    start: usize,
    color: Color,
}

/// Scrollable text line with inline color markup.
pub struct TextWidget {
    base: WidgetBase,
    text: String<MAX_TEXT_LEN>,
    color_runs: Vec<ColorRun, MAX_COLOR_RUNS>,
    font: &'static MonoFont<'static>,
    text_color: Color,
    display_width: u32,
    scroll_offset: u32,
    scroll_timer: SimpleTimer,
    scroll_period: Duration,
}

impl TextWidget {
    /// Font used when none is selected.
    pub const DEFAULT_FONT: &'static MonoFont<'static> = &DEFAULT_FONT_STORAGE;

    /// Draw color used when none is selected.
    pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;

    /// Time between scroll steps when none is configured.
    pub const DEFAULT_SCROLL_PERIOD: Duration = Duration::from_millis(120);

    /// Pixels the text moves per scroll step.
    const SCROLL_STEP: u32 = 1;

    /// Create an empty text widget with default font and color.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(WIDGET_TYPE),
            text: String::new(),
            color_runs: Vec::new(),
            font: Self::DEFAULT_FONT,
            text_color: Self::DEFAULT_TEXT_COLOR,
            display_width: 0,
            scroll_offset: 0,
            scroll_timer: SimpleTimer::new(),
            scroll_period: Self::DEFAULT_SCROLL_PERIOD,
        }
    }

    /// Parse a format string into rendered text and color directives.
    ///
    /// Text beyond [`MAX_TEXT_LEN`] bytes and directives beyond
    /// [`MAX_COLOR_RUNS`] are dropped silently. Any pending scroll state
    /// is reset.
    pub fn set_format_str(&mut self, format: &str) {
        self.text.clear();
        self.color_runs.clear();
        self.scroll_offset = 0;
        self.scroll_timer.stop();

        let mut chars = format.chars().peekable();
        while let Some(character) = chars.next() {
            if character == '\\' && chars.peek() == Some(&'#') {
                chars.next();

                // Collect up to six hex digits following the tag marker.
                let mut tag: String<6> = String::new();
                while tag.len() < 6 {
                    match chars.peek() {
                        Some(&digit) if digit.is_ascii_hexdigit() => {
                            tag.push(digit).ok();
                            chars.next();
                        }
                        _ => break,
                    }
                }

                if tag.len() == 6 {
                    let rgb = u32::from_str_radix(tag.as_str(), 16).unwrap_or(0);
                    self.color_runs
                        .push(ColorRun {
                            start: self.text.len(),
                            color: Color::from_rgb888(rgb),
                        })
                        .ok();
                } else {
                    // No directive: keep everything but the escape backslash.
                    self.text.push('#').ok();
                    self.text.push_str(tag.as_str()).ok();
                }
            } else {
                self.text.push(character).ok();
            }
        }
    }

    /// Rendered text: directives removed, invalid-looking sequences
    /// preserved character for character.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Select the font.
    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    /// Currently selected font.
    pub const fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Color for text before the first directive.
    pub const fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    /// Currently selected base text color.
    pub const fn text_color(&self) -> Color {
        self.text_color
    }

    /// Width of the display window in pixels; 0 means the full width of
    /// the surface `update` receives.
    pub const fn set_display_width(&mut self, width: u32) {
        self.display_width = width;
    }

    /// Time between scroll steps.
    pub const fn set_scroll_period(&mut self, period: Duration) {
        self.scroll_period = period;
    }

    /// Whether the text is currently wider than its window and scrolling.
    pub const fn is_scrolling(&self) -> bool {
        self.scroll_timer.is_timer_running()
    }

    #[cfg(test)]
    const fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Horizontal advance per character in pixels.
    const fn char_advance(&self) -> u32 {
        self.font.character_size.width + self.font.character_spacing
    }

    /// Rendered width of the whole text in pixels.
    fn text_width(&self) -> u32 {
        self.text.chars().count() as u32 * self.char_advance()
    }

    /// Draw the text runs starting at a window-local x position.
    fn draw_text(&self, window: &mut ClippedSurface<'_>, origin_x: i32) {
        let mut painter = SurfacePainter::new(window);
        let advance = self.char_advance() as i32;

        let mut cursor_x = origin_x;
        let mut segment_start = 0;
        let mut segment_color = self.text_color;

        // Each directive closes the previous segment and recolors the rest.
        for run in &self.color_runs {
            let segment = &self.text[segment_start..run.start];
            if !segment.is_empty() {
                Text::with_baseline(
                    segment,
                    Point::new(cursor_x, 0),
                    MonoTextStyle::new(self.font, segment_color),
                    Baseline::Top,
                )
                .draw(&mut painter)
                .ok();
                cursor_x += segment.chars().count() as i32 * advance;
            }
            segment_start = run.start;
            segment_color = run.color;
        }

        let tail = &self.text[segment_start..];
        if !tail.is_empty() {
            Text::with_baseline(
                tail,
                Point::new(cursor_x, 0),
                MonoTextStyle::new(self.font, segment_color),
                Baseline::Top,
            )
            .draw(&mut painter)
            .ok();
        }
    }
}

impl Default for TextWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn update(&mut self, surface: &mut dyn Surface) {
        let display_width = if self.display_width > 0 {
            self.display_width
        } else {
            surface.width()
        };
        let text_width = self.text_width();

        let origin_x = if text_width <= display_width {
            // Fits: static position, no scrolling state engaged.
            self.scroll_timer.stop();
            self.scroll_offset = 0;
            0
        } else {
            if !self.scroll_timer.is_timer_running() {
                self.scroll_offset = 0;
                self.scroll_timer.start(self.scroll_period);
            } else if self.scroll_timer.is_timeout() {
                self.scroll_offset += Self::SCROLL_STEP;
                // Wrap after the text has fully left the window.
                if self.scroll_offset >= display_width + text_width {
                    self.scroll_offset = 0;
                }
                self.scroll_timer.restart();
            }
            display_width as i32 - self.scroll_offset as i32
        };

        let (x, y) = self.base.position();
        let mut window = ClippedSurface::new(surface, x, y, display_width, self.font.character_size.height);
        self.draw_text(&mut window, origin_x);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameBuffer;

    /// Count pixels of one color in the whole buffer.
    fn count_pixels(surface: &FrameBuffer, color: Color) -> u32 {
        let mut count = 0;
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.pixel(x, y) == Some(color) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_widget_type() {
        let widget = TextWidget::new();
        assert_eq!(widget.widget_type(), WIDGET_TYPE);
    }

    #[test]
    fn test_find_by_name() {
        let mut widget = TextWidget::new();
        assert_eq!(widget.name(), "");
        widget.set_name("textWidgetName");

        assert!(widget.find("").is_none());
        assert!(widget.find("textWidgetName").is_some());
    }

    #[test]
    fn test_defaults() {
        let widget = TextWidget::new();
        assert_eq!(widget.text(), "");
        assert_eq!(widget.text_color(), TextWidget::DEFAULT_TEXT_COLOR);
        assert!(core::ptr::eq(widget.font(), TextWidget::DEFAULT_FONT));
    }

    #[test]
    fn test_plain_text_round_trip() {
        let mut widget = TextWidget::new();
        widget.set_format_str("test");
        assert_eq!(widget.text(), "test");
    }

    #[test]
    fn test_valid_directive_is_stripped() {
        let mut widget = TextWidget::new();
        widget.set_format_str("\\#FF00FFHello World!");
        assert_eq!(widget.text(), "Hello World!");
    }

    #[test]
    fn test_unescaped_tag_stays_verbatim() {
        let mut widget = TextWidget::new();
        widget.set_format_str("#FF00FFHello World!");
        assert_eq!(widget.text(), "#FF00FFHello World!");
    }

    #[test]
    fn test_invalid_hex_stays_verbatim() {
        let mut widget = TextWidget::new();
        widget.set_format_str("\\#ZZ00FFHello World!");
        assert_eq!(widget.text(), "#ZZ00FFHello World!");
    }

    #[test]
    fn test_short_hex_stays_verbatim() {
        let mut widget = TextWidget::new();
        widget.set_format_str("\\#FF00FYeah!");
        assert_eq!(widget.text(), "#FF00FYeah!");
    }

    #[test]
    fn test_directive_consumes_exactly_six_digits() {
        let mut widget = TextWidget::new();
        widget.set_format_str("\\#FF00FFF");
        assert_eq!(widget.text(), "F", "Seventh hex digit belongs to the text");
    }

    #[test]
    fn test_set_text_color() {
        let mut widget = TextWidget::new();
        widget.set_text_color(Color::new(0x12, 0x34, 0x56));
        assert_eq!(widget.text_color(), Color::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_static_text_draws_in_base_color() {
        let mut surface = FrameBuffer::new(64, 16);
        let mut widget = TextWidget::new();
        widget.set_text_color(Color::RED);
        widget.set_format_str("AB");

        widget.update(&mut surface);
        assert!(!widget.is_scrolling(), "Fitting text must not scroll");
        assert!(count_pixels(&surface, Color::RED) > 0, "Glyph pixels must be drawn");
        // Transparent background: untouched pixels stay black.
        assert_eq!(surface.pixel(63, 15), Some(Color::BLACK));
    }

    #[test]
    fn test_directive_changes_color_mid_text() {
        let mut surface = FrameBuffer::new(64, 16);
        let mut widget = TextWidget::new();
        widget.set_format_str("\\#FF0000A\\#0000FFB");
        widget.update(&mut surface);

        // 'A' occupies the first character cell in red, 'B' the second in
        // blue (FONT_6X10: 6 pixel advance).
        assert!(count_pixels(&surface, Color::RED) > 0);
        assert!(count_pixels(&surface, Color::BLUE) > 0);
        for y in 0..16 {
            for x in 0..6 {
                assert_ne!(surface.pixel(x, y), Some(Color::BLUE), "No blue in the first cell");
            }
            for x in 6..12 {
                assert_ne!(surface.pixel(x, y), Some(Color::RED), "No red in the second cell");
            }
        }
    }

    #[test]
    fn test_wide_text_engages_scrolling() {
        let mut surface = FrameBuffer::new(64, 16);
        let mut widget = TextWidget::new();
        widget.set_display_width(12);
        widget.set_scroll_period(Duration::ZERO);
        widget.set_format_str("HELLO WORLD");

        // First update engages scrolling with the text just off the right
        // edge of the window; nothing is visible yet.
        widget.update(&mut surface);
        assert!(widget.is_scrolling());
        assert_eq!(widget.scroll_offset(), 0);
        assert_eq!(surface.write_count(), 0);

        // Each further update advances one step and the text scrolls in.
        widget.update(&mut surface);
        assert_eq!(widget.scroll_offset(), 1);
        for _ in 0..8 {
            widget.update(&mut surface);
        }
        assert!(count_pixels(&surface, TextWidget::DEFAULT_TEXT_COLOR) > 0);
    }

    #[test]
    fn test_scrolling_is_clipped_to_window() {
        let mut surface = FrameBuffer::new(64, 16);
        let mut widget = TextWidget::new();
        widget.move_to(4, 2);
        widget.set_display_width(12);
        widget.set_scroll_period(Duration::ZERO);
        widget.set_format_str("HELLO WORLD");

        for _ in 0..20 {
            widget.update(&mut surface);
        }

        // All drawn pixels lie inside the 12x10 window at (4, 2).
        for y in 0..16 {
            for x in 0..64 {
                if surface.pixel(x, y) != Some(Color::BLACK) {
                    assert!(
                        (4..16).contains(&x) && (2..12).contains(&y),
                        "Pixel ({x}, {y}) outside the scroll window"
                    );
                }
            }
        }
    }

    #[test]
    fn test_scroll_offset_wraps_around() {
        let mut widget = TextWidget::new();
        widget.set_display_width(12);
        widget.set_scroll_period(Duration::ZERO);
        widget.set_format_str("HELLO WORLD");

        // 11 characters * 6 pixels = 66; wrap happens at 12 + 66 = 78.
        let mut surface = FrameBuffer::new(64, 16);
        let mut seen_wrap = false;
        let mut previous = 0;
        for _ in 0..100 {
            widget.update(&mut surface);
            let offset = widget.scroll_offset();
            if offset < previous {
                seen_wrap = true;
                assert_eq!(offset, 0, "Wrap must restart from the beginning");
            }
            assert!(offset < 78, "Offset must stay below the wrap point");
            previous = offset;
        }
        assert!(seen_wrap, "100 steps must cover at least one wrap");
    }

    #[test]
    fn test_set_format_str_resets_scroll_state() {
        let mut surface = FrameBuffer::new(64, 16);
        let mut widget = TextWidget::new();
        widget.set_display_width(12);
        widget.set_scroll_period(Duration::ZERO);
        widget.set_format_str("HELLO WORLD");
        for _ in 0..5 {
            widget.update(&mut surface);
        }
        assert!(widget.is_scrolling());

        widget.set_format_str("OK");
        assert!(!widget.is_scrolling(), "New text must reset scroll state");
        assert_eq!(widget.scroll_offset(), 0);
    }
}
