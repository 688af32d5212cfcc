//! Button colour themes and backlight levels.

use embedded_graphics::pixelcolor::Rgb565;

use super::page::Menu;

/// Text / body colour pair applied to every button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Rgb565,
    pub background: Rgb565,
}

impl Theme {
    pub const fn new(text: Rgb565, background: Rgb565) -> Self {
        Self { text, background }
    }
}

/// Recolour every button in the arena, so pages that are not active
/// pick the theme up too.
pub fn apply_theme(menu: &mut Menu, theme: Theme) {
    for button in menu.buttons_mut() {
        button.text_color = theme.text;
        button.bg_color = theme.background;
    }
}

/// Backlight driver.
pub trait Backlight {
    /// Set the backlight level; `percent` is already clamped to 0..=100.
    fn set_brightness(&mut self, percent: u8);
}

/// Clamp a brightness request to 100 %.
pub fn clamp_percent(percent: u8) -> u8 {
    percent.min(100)
}

/// PWM compare value for `percent` of a timer `period`.
pub fn duty_for(percent: u8, period: u16) -> u16 {
    let percent = u32::from(clamp_percent(percent));
    (u32::from(period) * percent / 100) as u16
}

/// Drive `backlight` at `percent`, clamped.
pub fn set_backlight<B: Backlight>(backlight: &mut B, percent: u8) {
    let percent = clamp_percent(percent);
    info!("backlight: {}%", percent);
    backlight.set_brightness(percent);
}
