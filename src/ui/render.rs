//! Framebuffer rendering of the active page.
//!
//! All drawing goes into one in-memory [`FrameBuffer`] through
//! `embedded-graphics`; the finished frame is handed to the [`Panel`] in
//! a single flush. Any state change redraws the whole page:
//!
//! 1. fill with [`SCREEN_BACKGROUND`]
//! 2. constant labels
//! 3. dynamic labels (live text, else fallback)
//! 4. buttons, the highlighted one on [`HIGHLIGHT_COLOR`]
//! 5. flush
//!
//! Sensor updates on a visible page take a shortcut and only repaint the
//! affected labels before flushing.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use super::nav::NavigationState;
use super::page::{Button, DataSlot, DynamicLabel, LiveData, Menu};
use crate::config::{
    DYNAMIC_LABEL_CHARS, HIGHLIGHT_COLOR, LCD_HEIGHT, LCD_WIDTH, SCREEN_BACKGROUND,
};
use crate::error::Error;

/// Fixed-width font for every widget.
pub const FONT: &MonoFont<'static> = &FONT_6X10;

const FRAME_PIXELS: usize = (LCD_WIDTH * LCD_HEIGHT) as usize;

/// Single RGB565 framebuffer, row-major.
pub struct FrameBuffer {
    pixels: [Rgb565; FRAME_PIXELS],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pixels: [SCREEN_BACKGROUND; FRAME_PIXELS],
        }
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        Self::index(point).map(|i| self.pixels[i])
    }

    /// Row-major pixels, ready to stream to the panel.
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    fn index(point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x >= LCD_WIDTH as i32 || y >= LCD_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * LCD_WIDTH as usize + x as usize)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(LCD_WIDTH, LCD_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = Self::index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

/// The physical display.
pub trait Panel {
    /// Transfer the whole frame to the glass. Bounded and blocking.
    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), Error>;
}

/// Text shown by a dynamic label: the live buffer when it has content,
/// the fallback text otherwise.
pub fn resolve_text<'a>(label: &'a DynamicLabel, live: &'a LiveData) -> &'a str {
    match label.data.map(|slot| live.get(slot)) {
        Some(text) if !text.is_empty() => text,
        _ => label.text,
    }
}

/// Top-left corner that centres `button.text` inside the button.
pub fn text_origin(button: &Button, font: &MonoFont<'_>) -> Point {
    let advance = (font.character_size.width + font.character_spacing) as i32;
    let text_width = advance * button.text.chars().count() as i32;
    let glyph_height = font.character_size.height as i32;
    button.position
        + Point::new(
            (button.size.width as i32 - text_width) / 2,
            (button.size.height as i32 - glyph_height) / 2,
        )
}

pub struct Renderer<P> {
    frame: FrameBuffer,
    panel: P,
}

impl<P: Panel> Renderer<P> {
    pub fn new(panel: P) -> Self {
        Self {
            frame: FrameBuffer::new(),
            panel,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Repaint the active page and flush. No-op when no page is active.
    pub fn redraw(&mut self, menu: &Menu, nav: &NavigationState, live: &LiveData) {
        let Some(page) = nav.current_page().and_then(|id| menu.page(id)) else {
            return;
        };

        self.frame.fill(SCREEN_BACKGROUND);

        for label in page.const_labels {
            draw_text(
                &mut self.frame,
                label.text,
                label.position,
                label.text_color,
                label.bg_color,
            );
        }

        for label in page.dynamic_labels {
            draw_text(
                &mut self.frame,
                resolve_text(label, live),
                label.position,
                label.text_color,
                label.bg_color,
            );
        }

        for index in 0..page.button_count() {
            if let Some((_, button)) = menu.page_button(page, index) {
                draw_button(&mut self.frame, button, index == nav.highlight());
            }
        }

        self.flush();
    }

    /// Repaint only the dynamic labels bound to `slots` on the active
    /// page, then flush. Returns `false` without flushing when none of
    /// them is visible.
    pub fn refresh_live(
        &mut self,
        menu: &Menu,
        nav: &NavigationState,
        live: &LiveData,
        slots: &[DataSlot],
    ) -> bool {
        let Some(page) = nav.current_page().and_then(|id| menu.page(id)) else {
            return false;
        };

        let mut touched = false;
        for label in page.dynamic_labels {
            if !label.data.is_some_and(|slot| slots.contains(&slot)) {
                continue;
            }
            let advance = FONT.character_size.width + FONT.character_spacing;
            let field = Size::new(DYNAMIC_LABEL_CHARS * advance, FONT.character_size.height);
            let _ = Rectangle::new(label.position, field)
                .into_styled(PrimitiveStyle::with_fill(label.bg_color))
                .draw(&mut self.frame);
            draw_text(
                &mut self.frame,
                resolve_text(label, live),
                label.position,
                label.text_color,
                label.bg_color,
            );
            touched = true;
        }

        if touched {
            self.flush();
        }
        touched
    }

    fn flush(&mut self) {
        if let Err(e) = self.panel.flush(&self.frame) {
            warn!("render: flush failed: {}", e);
        }
    }
}

fn draw_text(frame: &mut FrameBuffer, text: &str, at: Point, fg: Rgb565, bg: Rgb565) {
    let style = MonoTextStyleBuilder::new()
        .font(FONT)
        .text_color(fg)
        .background_color(bg)
        .build();
    let _ = Text::with_baseline(text, at, style, Baseline::Top).draw(frame);
}

fn draw_button(frame: &mut FrameBuffer, button: &Button, highlighted: bool) {
    let body = if highlighted {
        HIGHLIGHT_COLOR
    } else {
        button.bg_color
    };

    let _ = RoundedRectangle::with_equal_corners(
        Rectangle::new(button.position, button.size),
        Size::new(button.radius, button.radius),
    )
    .into_styled(PrimitiveStyle::with_fill(body))
    .draw(frame);

    draw_text(
        frame,
        button.text,
        text_origin(button, FONT),
        button.text_color,
        body,
    );
}
