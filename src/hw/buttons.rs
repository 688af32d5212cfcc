//! Encoder push button and quadrature input.
//!
//! The QDEC task folds hardware deltas into a free-running 16-bit count.
//! The input task samples the button pin and that count every
//! [`INPUT_POLL_MS`], runs them through [`Controls`], and queues the
//! resulting gestures for the UI. A full queue drops the gesture rather
//! than pausing the poll.

use core::sync::atomic::{AtomicU16, Ordering};

use defmt::{debug, info, warn};
use embassy_nrf::gpio::Input;
use embassy_nrf::peripherals::QDEC;
use embassy_nrf::qdec::Qdec;
use embassy_time::{Duration, Instant, Ticker};

use menu_panel::config::{ENCODER, INPUT_POLL_MS, PRESS_TIMING};
use menu_panel::input::button::PressFsm;
use menu_panel::input::encoder::EncoderTracker;
use menu_panel::{Controls, InputSource, UiEvent};

use crate::UI_EVENTS;

/// Running encoder position, wraps at 16 bits.
static ENCODER_COUNT: AtomicU16 = AtomicU16::new(0);

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

struct Knob {
    button: Input<'static>,
}

impl InputSource for Knob {
    fn is_button_pressed(&mut self) -> bool {
        // Active-low with internal pull-up.
        self.button.is_low()
    }

    fn encoder_counter(&mut self) -> u16 {
        ENCODER_COUNT.load(Ordering::Relaxed)
    }
}

#[embassy_executor::task]
pub async fn qdec_task(mut qdec: Qdec<'static, QDEC>) -> ! {
    loop {
        let delta = qdec.read().await;
        ENCODER_COUNT.fetch_add(delta as u16, Ordering::Relaxed);
    }
}

#[embassy_executor::task]
pub async fn input_task(button: Input<'static>) -> ! {
    let mut knob = Knob { button };
    let mut controls = Controls::new(
        PressFsm::new(PRESS_TIMING),
        EncoderTracker::new(ENCODER, knob.encoder_counter(), now_ms()),
    );
    let mut ticker = Ticker::every(Duration::from_millis(INPUT_POLL_MS));
    info!("input: polling every {} ms", INPUT_POLL_MS);

    loop {
        ticker.next().await;
        for event in controls.poll(&mut knob, now_ms()) {
            debug!("input: {}", event);
            // Never stall sampling behind a frame flush.
            if UI_EVENTS.try_send(UiEvent::Input(event)).is_err() {
                warn!("input: queue full, {} dropped", event);
            }
        }
    }
}
