// Crate-level lints: pixel math uses intentional narrowing casts
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

//! Pixel-matrix display simulator.
//!
//! Drives a simulated 64x32 RGB LED matrix through the `display-common`
//! composition substrate. The application is the "external scheduler" of
//! the substrate: once per frame it pumps window events into the button
//! decoder, ticks the screen state machine, repaints the active screen's
//! widget tree into the frame buffer and flushes it to the simulator
//! window with the global brightness applied.
//!
//! # Screens
//!
//! - **Boot**: progress bar filling up, advances on its own
//! - **Announce**: scrolling multi-color announcement (12 s dwell)
//! - **Status**: icon, blinking activity lamp, animated signal meter
//!
//! # Controls (Simulator Mode)
//!
//! | Key     | Action                                        |
//! |---------|-----------------------------------------------|
//! | `Space` | Button: cycle between announcement and status |
//! | `Up`    | Raise display brightness                      |
//! | `Down`  | Lower display brightness                      |
//!
//! The space bar goes through the same debounce state machine a physical
//! button would: hold briefly and release to trigger.

mod button;
mod config;
mod screens;

use std::cell::RefCell;
use std::fmt::Write as _;
use std::thread;
use std::time::Instant;

use display_common::widgets::Algorithm;
use display_common::{
    BitmapWidget, Canvas, Color, FrameBuffer, LampWidget, ProgressBar, StateMachine, TextWidget, Widget,
};
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use profont::PROFONT_12_POINT;

use button::{ButtonDrv, ButtonState};
use config::{
    ANNOUNCE_DWELL, BOOT_STEP_PERIOD, BRIGHTNESS_STEP, DEFAULT_BRIGHTNESS, FRAME_TIME, LAMP_BLINK_PERIOD,
    MATRIX_HEIGHT, MATRIX_WIDTH, PIXEL_SCALE, SIGNAL_SWEEP_PERIOD,
};
use screens::{AnnounceState, AppModel, BootState, Mode, StatusState};

// =============================================================================
// Status Icon
// =============================================================================

/// 8x8 signal strength icon, row-major (0 = off, 1 = bar pixel).
#[rustfmt::skip]
const ICON_PATTERN: [u8; 64] = [
    0, 0, 0, 0, 0, 0, 1, 1,
    0, 0, 0, 0, 0, 0, 1, 1,
    0, 0, 0, 1, 1, 0, 1, 1,
    0, 0, 0, 1, 1, 0, 1, 1,
    1, 1, 0, 1, 1, 0, 1, 1,
    1, 1, 0, 1, 1, 0, 1, 1,
    1, 1, 0, 1, 1, 0, 1, 1,
    1, 1, 0, 1, 1, 0, 1, 1,
];

/// Expand the icon pattern into bitmap pixels.
fn icon_pixels() -> [Color; 64] {
    let mut pixels = [Color::BLACK; 64];
    for (pixel, &cell) in pixels.iter_mut().zip(ICON_PATTERN.iter()) {
        if cell != 0 {
            *pixel = Color::GREEN;
        }
    }
    pixels
}

// =============================================================================
// Widget Set
// =============================================================================

/// All widgets of the application, owned for the whole run.
///
/// The render pass composes a fresh canvas of references per frame; the
/// widgets themselves (and their scroll state) live here.
struct Widgets<'i> {
    boot_title: TextWidget,
    boot_bar: ProgressBar,
    announce_text: TextWidget,
    status_icon: BitmapWidget<'i>,
    status_label: TextWidget,
    status_lamp: LampWidget,
    signal_label: TextWidget,
    signal_meter: ProgressBar,
}

impl<'i> Widgets<'i> {
    fn new(icon: &'i [Color; 64]) -> Self {
        let mut boot_title = TextWidget::new();
        boot_title.set_format_str("BOOTING");
        boot_title.set_text_color(Color::CYAN);
        boot_title.move_to(11, 4);

        let mut boot_bar = ProgressBar::new(56, 5);
        boot_bar.set_fill_color(Color::GREEN);
        boot_bar.set_name("bootProgress");
        boot_bar.move_to(4, 20);

        let mut announce_text = TextWidget::new();
        announce_text.set_font(&PROFONT_12_POINT);
        announce_text.set_format_str("\\#FF4000PIXEL \\#00C8FFMATRIX \\#FFFFFF64x32 ONLINE");
        announce_text.set_name("announcement");
        announce_text.move_to(0, 9);

        let mut status_icon = BitmapWidget::new();
        status_icon.set(icon, 8, 8);
        status_icon.move_to(2, 1);

        let mut status_label = TextWidget::new();
        status_label.set_font(&FONT_4X6);
        status_label.set_format_str("LINK UP");
        status_label.move_to(14, 2);

        let mut status_lamp = LampWidget::new(false, Color::new(0x20, 0x00, 0x00), Color::GREEN, 4);
        status_lamp.set_name("activityLamp");
        status_lamp.move_to(58, 3);

        let mut signal_label = TextWidget::new();
        signal_label.set_font(&FONT_4X6);
        signal_label.set_name("signalLabel");
        signal_label.move_to(2, 16);

        let mut signal_meter = ProgressBar::new(60, 6);
        signal_meter.set_algorithm(Algorithm::PixelWise);
        signal_meter.set_fill_color(Color::YELLOW);
        signal_meter.set_name("signalMeter");
        signal_meter.move_to(2, 24);

        Self {
            boot_title,
            boot_bar,
            announce_text,
            status_icon,
            status_label,
            status_lamp,
            signal_label,
            signal_meter,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Repaint the active screen into the frame buffer.
fn render(frame: &mut FrameBuffer, widgets: &mut Widgets<'_>, model: &AppModel) {
    frame.fill(Color::BLACK);

    match model.mode {
        Mode::Boot => {
            widgets.boot_bar.set_progress(model.boot_progress);

            let mut root = Canvas::new(MATRIX_WIDTH, MATRIX_HEIGHT, 0, 0);
            let registered =
                root.add_widget(&mut widgets.boot_title) && root.add_widget(&mut widgets.boot_bar);
            if !registered {
                log::warn!("boot screen: widget registration failed");
            }
            root.update(frame);
        }
        Mode::Announce => {
            let mut root = Canvas::new(MATRIX_WIDTH, MATRIX_HEIGHT, 0, 0);
            if !root.add_widget(&mut widgets.announce_text) {
                log::warn!("announce screen: widget registration failed");
            }
            root.update(frame);
        }
        Mode::Status => {
            widgets.status_lamp.set_on_state(model.activity_lamp);
            widgets.signal_meter.set_progress(model.signal_level);

            let mut text: heapless::String<16> = heapless::String::new();
            write!(text, "SIGNAL {:>3}%", model.signal_level).ok();
            widgets.signal_label.set_format_str(&text);

            // Icon, label and lamp live in a sub-canvas across the top;
            // the signal meter and its label draw directly on the root.
            let mut header = Canvas::new(MATRIX_WIDTH, 12, 0, 2);
            let registered = header.add_widget(&mut widgets.status_icon)
                && header.add_widget(&mut widgets.status_label)
                && header.add_widget(&mut widgets.status_lamp);

            let mut root = Canvas::new(MATRIX_WIDTH, MATRIX_HEIGHT, 0, 0);
            let registered = registered
                && root.add_widget(&mut header)
                && root.add_widget(&mut widgets.signal_label)
                && root.add_widget(&mut widgets.signal_meter);
            if !registered {
                log::warn!("status screen: widget registration failed");
            }
            root.update(frame);
        }
    }
}

// =============================================================================
// Main Loop
// =============================================================================

fn main() {
    env_logger::init();
    log::info!("pixel matrix simulator starting ({MATRIX_WIDTH}x{MATRIX_HEIGHT})");

    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(MATRIX_WIDTH, MATRIX_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(PIXEL_SCALE).build();
    let mut window = Window::new("Pixel Matrix Display", &output_settings);

    // Screen states share the model; the machine sequences them.
    let model = RefCell::new(AppModel::new(DEFAULT_BRIGHTNESS));
    let boot = BootState::new(&model, BOOT_STEP_PERIOD);
    let announce = AnnounceState::new(&model, ANNOUNCE_DWELL);
    let status = StatusState::new(&model, LAMP_BLINK_PERIOD, SIGNAL_SWEEP_PERIOD);
    boot.set_next(&announce);
    announce.set_next(&status);

    let mut machine = StateMachine::new();
    machine.set_state(&boot);

    let mut button = ButtonDrv::new();
    let mut button_held = false;

    let icon = icon_pixels();
    let mut widgets = Widgets::new(&icon);
    let mut frame = FrameBuffer::new(MATRIX_WIDTH, MATRIX_HEIGHT);

    // Initial clear so the window exists before the first event poll.
    display.clear(Rgb565::BLACK).ok();
    window.update(&display);

    'running: loop {
        let frame_start = Instant::now();

        // Window events feed the button decoder and brightness control.
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Space => {
                            button_held = true;
                            button.notify_change();
                        }
                        Keycode::Up => {
                            let mut model = model.borrow_mut();
                            model.brightness = model.brightness.saturating_add(BRIGHTNESS_STEP);
                            log::info!("brightness: {}", model.brightness);
                        }
                        Keycode::Down => {
                            let mut model = model.borrow_mut();
                            model.brightness = model.brightness.saturating_sub(BRIGHTNESS_STEP);
                            log::info!("brightness: {}", model.brightness);
                        }
                        _ => {}
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if keycode == Keycode::Space {
                        button_held = false;
                        button.notify_change();
                    }
                }
                _ => {}
            }
        }

        // One debounce sample per frame; a consumed trigger cycles the
        // interactive screens.
        button.sample(button_held);
        if button.get_state() == ButtonState::Triggered {
            let mode = model.borrow().mode;
            match mode {
                Mode::Boot => {}
                Mode::Announce => {
                    log::info!("button: switching to status");
                    machine.set_state(&status);
                }
                Mode::Status => {
                    log::info!("button: switching to announcement");
                    machine.set_state(&announce);
                }
            }
        }

        machine.process();

        render(&mut frame, &mut widgets, &model.borrow());

        let brightness = model.borrow().brightness;
        frame.flush_to(&mut display, brightness).ok();
        window.update(&display);

        // Sleep to maintain the target frame rate.
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }

    log::info!("window closed, shutting down");
}
