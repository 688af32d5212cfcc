//! UART link to the host board (UARTE0, 8N1).
//!
//! RX assembles sensor lines and posts parsed readings to the UI. TX
//! sends one status line at a time and reports back when the wire is
//! free again.

use defmt::{info, warn};
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::{UarteRx, UarteTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;

use menu_panel::link::{self, LineAssembler, StatusLine};
use menu_panel::{Error, UiEvent};

use crate::UI_EVENTS;

/// Longest status line, `PC:Off\r\n`.
const STATUS_LINE_MAX: usize = 8;

/// Status lines waiting for the transmitter. Depth 1: the UI never has
/// more than one in flight.
pub static STATUS_TX: Channel<CriticalSectionRawMutex, StatusLine, 1> = Channel::new();

#[embassy_executor::task]
pub async fn rx_task(mut rx: UarteRx<'static, UARTE0>) -> ! {
    let mut lines = LineAssembler::new();
    let mut byte = [0u8; 1];

    loop {
        if let Err(e) = rx.read(&mut byte).await {
            warn!("uart: rx error {}", e);
            continue;
        }
        let Some(line) = lines.push(byte[0]) else {
            continue;
        };
        match line.and_then(|l| link::parse_sensor_line(&l)) {
            Ok(reading) => UI_EVENTS.send(UiEvent::Sensor(reading)).await,
            Err(e) => warn!("uart: line dropped: {}", e),
        }
    }
}

/// Stage `line` in RAM (EasyDMA cannot read flash) and send it.
async fn send_line(tx: &mut UarteTx<'static, UARTE0>, line: StatusLine) -> Result<(), Error> {
    let mut buf: Vec<u8, STATUS_LINE_MAX> = Vec::new();
    buf.extend_from_slice(line.as_bytes())
        .map_err(|_| Error::FormatOverflow)?;
    tx.write(&buf).await.map_err(|_| Error::Uart)
}

#[embassy_executor::task]
pub async fn tx_task(mut tx: UarteTx<'static, UARTE0>) -> ! {
    loop {
        let line = STATUS_TX.receive().await;
        match send_line(&mut tx, line).await {
            Ok(()) => info!("uart: sent {=str}", line.trim_end()),
            Err(e) => warn!("uart: status not sent: {}", e),
        }
        UI_EVENTS.send(UiEvent::TransmitDone).await;
    }
}
