//! Application configuration constants.
//!
//! Geometry and timing for the simulated pixel matrix. Everything is a
//! compile-time `const`: the render loop and the screen states read these
//! instead of recalculating values per frame.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Matrix width in pixels (64x32 RGB LED panel).
pub const MATRIX_WIDTH: u32 = 64;

/// Matrix height in pixels.
pub const MATRIX_HEIGHT: u32 = 32;

/// Simulator window scale factor (one matrix pixel = 8x8 window pixels).
pub const PIXEL_SCALE: u32 = 8;

/// Default global brightness ratio (255 = full brightness).
pub const DEFAULT_BRIGHTNESS: u8 = 255;

/// Brightness change per Up/Down key press.
pub const BRIGHTNESS_STEP: u8 = 32;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The main loop sleeps if a frame
/// completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Time between boot progress increments.
pub const BOOT_STEP_PERIOD: Duration = Duration::from_millis(80);

/// Boot progress increment per step, in percent.
pub const BOOT_STEP: u8 = 5;

/// How long the announcement screen stays up before advancing on its own.
pub const ANNOUNCE_DWELL: Duration = Duration::from_secs(12);

/// Blink period of the activity lamp on the status screen.
pub const LAMP_BLINK_PERIOD: Duration = Duration::from_millis(500);

/// Time between signal meter animation steps on the status screen.
pub const SIGNAL_SWEEP_PERIOD: Duration = Duration::from_millis(100);

// =============================================================================
// Button Configuration
// =============================================================================

/// Stable samples required before a button level change is accepted.
/// At one sample per frame (20 ms) this is a 60 ms debounce window.
pub const DEBOUNCE_WINDOW_CYCLES: u32 = 3;
