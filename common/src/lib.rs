//! Display composition substrate for the pixel-matrix firmware.
//!
//! This crate contains the platform-agnostic building blocks that every
//! screen of the display is composed from:
//!
//! - [`color`]: RGB888 color with non-destructive intensity scaling and
//!   RGB565 conversions for the display format
//! - [`list`]: Fixed-capacity ordered container with a cursor-based iterator
//! - [`surface`]: Pixel-addressable drawing surface, frame buffer and the
//!   bridge into `embedded-graphics` drawing
//! - [`widgets`]: Named, positioned drawables (lamp, bitmap, text, progress
//!   bar) and the [`widgets::Canvas`] compositor that clips and translates
//!   child widgets into its own rectangle
//! - [`state_machine`]: Generic entry/process/exit state machine with
//!   deferred transitions, used to sequence application behavior
//! - [`timer`]: One-shot deadline helper for scroll ticks and timeouts
//!
//! # Threading Model
//!
//! Everything in this crate is single-threaded and synchronous: `update`
//! calls repaint widgets into a surface without blocking or yielding, and
//! a widget tree has exactly one writer at a time. Concurrent input
//! handling lives outside this crate (see the application's button driver).

// Crate-level lints: pixel math uses intentional narrowing casts
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod color;
pub mod list;
pub mod state_machine;
pub mod surface;
pub mod timer;
pub mod widgets;

// Re-export commonly used items
pub use color::Color;
pub use list::{Cursor, OrderedList};
pub use state_machine::{State, StateMachine};
pub use surface::{FrameBuffer, Surface, SurfacePainter};
pub use timer::SimpleTimer;
pub use widgets::{BitmapWidget, Canvas, LampWidget, ProgressBar, TextWidget, Widget};
