//! ST7735S TFT (160×128, landscape) on SPIM3.
//!
//! The whole frame is streamed in one `fill_contiguous` call, so the
//! panel never shows a half-drawn page.

use defmt::info;
use display_interface_spi::SPIInterface;
use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_time::Delay;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7735s;
use mipidsi::options::{Orientation, Rotation};
use mipidsi::Builder;

use menu_panel::config::{LCD_HEIGHT, LCD_WIDTH, SCREEN_BACKGROUND};
use menu_panel::error::Error;
use menu_panel::ui::render::{FrameBuffer, Panel};

type Spi = ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, NoDelay>;

/// Concrete driver for the panel.
type Driver = mipidsi::Display<SPIInterface<Spi, Output<'static>>, ST7735s, Output<'static>>;

pub struct Lcd {
    inner: Driver,
}

/// Bring the panel out of reset in landscape and clear it.
pub fn init(
    spim: Spim<'static, SPI3>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
) -> Result<Lcd, Error> {
    let spi = ExclusiveDevice::new_no_delay(spim, cs).map_err(|_| Error::Display)?;
    let di = SPIInterface::new(spi, dc);

    let mut delay = Delay;
    let inner = Builder::new(ST7735s, di)
        .display_size(LCD_HEIGHT as u16, LCD_WIDTH as u16)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .reset_pin(rst)
        .init(&mut delay)
        .map_err(|_| Error::Display)?;

    let mut lcd = Lcd { inner };
    lcd.inner
        .clear(SCREEN_BACKGROUND)
        .map_err(|_| Error::Display)?;
    info!("lcd: {}x{} ready", LCD_WIDTH, LCD_HEIGHT);
    Ok(lcd)
}

impl Panel for Lcd {
    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        let area = Rectangle::new(Point::zero(), Size::new(LCD_WIDTH, LCD_HEIGHT));
        self.inner
            .fill_contiguous(&area, frame.pixels().iter().copied())
            .map_err(|_| Error::Display)
    }
}
