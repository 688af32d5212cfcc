//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, panel geometry, colour tables and protocol
//! constants live here so they can be tuned in one place.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor, WebColors};

use crate::input::button::PressTiming;
use crate::input::encoder::{EncoderConfig, EncoderPolarity};
use crate::ui::page::LIVE_TEXT_CAPACITY;
use crate::ui::theme::Theme;
use crate::ui::PressScheme;

// Button

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Hold time after which a press is classified as a long press (ms).
pub const LONG_PRESS_MS: u32 = 600;

/// Poll interval of the input task (ms). Must stay at or below half the
/// debounce time.
pub const INPUT_POLL_MS: u64 = 5;

/// Press timing used by the firmware.
pub const PRESS_TIMING: PressTiming = PressTiming::CONTROLS;

/// How short and long presses drive the UI.
///
/// The encoder already moves the highlight, so a press activates.
pub const PRESS_SCHEME: PressScheme = PressScheme::PressActivates;

// Encoder

/// Minimum time between two accepted encoder moves (ms).
pub const ENCODER_DEBOUNCE_MS: u32 = 100;

/// Counter ticks per detent.
pub const ENCODER_STEP: i32 = 4;

/// A raw delta beyond this magnitude is a 16-bit counter wrap.
pub const ENCODER_WRAP_THRESHOLD: i32 = 30_000;

/// Direction mapping, confirmed on the bench.
pub const ENCODER_POLARITY: EncoderPolarity = EncoderPolarity::Normal;

pub const ENCODER: EncoderConfig = EncoderConfig {
    step: ENCODER_STEP,
    debounce_ms: ENCODER_DEBOUNCE_MS,
    polarity: ENCODER_POLARITY,
};

// Panel (ST7735S, landscape)

pub const LCD_WIDTH: u32 = 160;
pub const LCD_HEIGHT: u32 = 128;

/// SPI clock for the panel.
pub const LCD_SPI_FREQ_MHZ: u32 = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Logical names only; the concrete `embassy_nrf::peripherals::*` are
// picked in `main.rs`.  Adjust for the custom PCB.
//
//   Encoder push button → P0.11
//   Encoder A / B       → P0.12 / P0.24
//   LCD SCK / MOSI      → P0.26 / P0.27
//   LCD CS / DC / RST   → P0.28 / P0.29 / P0.30
//   LCD backlight (PWM) → P0.31
//   UART RX / TX        → P0.08 / P0.06

// Widgets

pub const BTN_DEFAULT_WIDTH: u32 = 100;
pub const BTN_DEFAULT_HEIGHT: u32 = 25;
pub const BTN_DEFAULT_RADIUS: u32 = 8;

/// Width reserved for a dynamic label, in glyphs. Cleared before each
/// partial refresh so a shorter value leaves no trailing pixels; covers
/// the longest text a live buffer can hold.
pub const DYNAMIC_LABEL_CHARS: u32 = LIVE_TEXT_CAPACITY as u32;

/// Screen fill behind every page.
pub const SCREEN_BACKGROUND: Rgb565 = Rgb565::BLACK;

/// Body colour of the highlighted button.
pub const HIGHLIGHT_COLOR: Rgb565 = Rgb565::CSS_DARK_ORANGE;

/// Label colours.
pub const LABEL_TEXT: Rgb565 = Rgb565::WHITE;
pub const LABEL_BACKGROUND: Rgb565 = SCREEN_BACKGROUND;

/// Button colour themes, cycled from the settings page. Entry 0 is
/// applied at boot.
pub const THEMES: [Theme; 4] = [
    Theme::new(Rgb565::WHITE, Rgb565::BLUE),
    Theme::new(Rgb565::BLACK, Rgb565::CSS_LIGHT_GRAY),
    Theme::new(Rgb565::YELLOW, Rgb565::CSS_DARK_GREEN),
    Theme::new(Rgb565::WHITE, Rgb565::CSS_DARK_RED),
];

/// Backlight levels (percent), cycled from the settings page. Entry 0 is
/// applied at boot.
pub const BRIGHTNESS_LEVELS: [u8; 5] = [100, 75, 50, 25, 10];

// UART link

pub const UART_BAUDRATE: u32 = 115_200;

/// Longest sensor line accepted, excluding the terminator.
pub const SENSOR_LINE_MAX: usize = 32;

/// Depth of the UI event channel.
pub const UI_EVENT_QUEUE: usize = 8;
