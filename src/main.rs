//! menu-panel firmware for nRF52840.
//!
//! 1. The QDEC task accumulates encoder steps into a 16-bit count.
//! 2. The input task polls the push button and that count, classifies
//!    gestures, and posts them to `UI_EVENTS`.
//! 3. The UART RX task posts parsed sensor readings to `UI_EVENTS`.
//! 4. The UI loop below owns all page, navigation and render state and
//!    handles one event at a time. Status lines it produces go to the
//!    UART TX task, which posts `TransmitDone` when the wire is free.

#![no_std]
#![no_main]

mod hw;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::{bind_interrupts, peripherals, qdec, spim, uarte};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use menu_panel::config::{LCD_SPI_FREQ_MHZ, UART_BAUDRATE, UI_EVENT_QUEUE};
use menu_panel::ui::menu::MAIN;
use menu_panel::{Ui, UiEvent};

use hw::backlight::PwmBacklight;
use hw::display::{self, Lcd};
use hw::uart::STATUS_TX;

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    QDEC => qdec::InterruptHandler<peripherals::QDEC>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

/// Everything the UI loop reacts to.
pub static UI_EVENTS: Channel<CriticalSectionRawMutex, UiEvent, UI_EVENT_QUEUE> = Channel::new();

/// Holds the framebuffer, too large for the main task's stack frame.
static UI: StaticCell<Ui<Lcd, PwmBacklight>> = StaticCell::new();

fn spi_frequency(mhz: u32) -> spim::Frequency {
    match mhz {
        32.. => spim::Frequency::M32,
        16..=31 => spim::Frequency::M16,
        8..=15 => spim::Frequency::M8,
        4..=7 => spim::Frequency::M4,
        2..=3 => spim::Frequency::M2,
        _ => spim::Frequency::M1,
    }
}

fn baudrate(bps: u32) -> uarte::Baudrate {
    match bps {
        9_600 => uarte::Baudrate::BAUD9600,
        57_600 => uarte::Baudrate::BAUD57600,
        230_400 => uarte::Baudrate::BAUD230400,
        _ => uarte::Baudrate::BAUD115200,
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("menu-panel starting");

    // Panel
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spi_frequency(LCD_SPI_FREQ_MHZ);
    spi_config.mode = spim::MODE_0;
    let spim = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_26, p.P0_27, spi_config);
    let cs = Output::new(p.P0_28, Level::High, OutputDrive::Standard);
    let dc = Output::new(p.P0_29, Level::Low, OutputDrive::Standard);
    let rst = Output::new(p.P0_30, Level::High, OutputDrive::Standard);
    let lcd = unwrap!(display::init(spim, cs, dc, rst));

    let backlight = PwmBacklight::new(SimplePwm::new_1ch(p.PWM0, p.P0_31));

    // Encoder and button
    let qdec = qdec::Qdec::new(p.QDEC, Irqs, p.P0_12, p.P0_24, qdec::Config::default());
    let button = Input::new(p.P0_11, Pull::Up);

    // Host link
    let mut uart_config = uarte::Config::default();
    uart_config.parity = uarte::Parity::EXCLUDED;
    uart_config.baudrate = baudrate(UART_BAUDRATE);
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uart_config);
    let (tx, rx) = uart.split();

    let ui = UI.init_with(|| Ui::new(lcd, backlight));
    ui.set_current_page(MAIN);

    unwrap!(spawner.spawn(hw::buttons::qdec_task(qdec)));
    unwrap!(spawner.spawn(hw::buttons::input_task(button)));
    unwrap!(spawner.spawn(hw::uart::rx_task(rx)));
    unwrap!(spawner.spawn(hw::uart::tx_task(tx)));

    loop {
        let event = UI_EVENTS.receive().await;
        ui.handle_event(event);

        if let Some(line) = ui.take_outbound() {
            if STATUS_TX.try_send(line).is_err() {
                warn!("uart: tx queue full, status dropped");
                ui.transmit_complete();
            }
        }
    }
}
