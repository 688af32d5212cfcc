//! Physical input: the push button and the rotary encoder.
//!
//! Raw samples come from an [`InputSource`]; the [`button`] FSM and the
//! [`encoder`] detector turn them into abstract [`InputEvent`]s for the
//! UI. Both are pure state machines driven by a millisecond tick, so they
//! work the same from a polling loop or from an edge interrupt.

pub mod button;
pub mod encoder;

use button::PressFsm;
use encoder::EncoderTracker;

/// Classified button gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressEvent {
    None,
    ShortPress,
    LongPress,
}

/// Encoder detent direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveEvent {
    None,
    Up,
    Down,
}

/// Input events handed to the UI (after debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    ShortPress,
    LongPress,
    MoveUp,
    MoveDown,
}

impl PressEvent {
    pub fn into_input(self) -> Option<InputEvent> {
        match self {
            PressEvent::None => None,
            PressEvent::ShortPress => Some(InputEvent::ShortPress),
            PressEvent::LongPress => Some(InputEvent::LongPress),
        }
    }
}

impl MoveEvent {
    pub fn into_input(self) -> Option<InputEvent> {
        match self {
            MoveEvent::None => None,
            MoveEvent::Up => Some(InputEvent::MoveUp),
            MoveEvent::Down => Some(InputEvent::MoveDown),
        }
    }
}

/// Raw hardware input.
pub trait InputSource {
    /// True while the button is held down (already inverted for
    /// active-low wiring).
    fn is_button_pressed(&mut self) -> bool;

    /// Free-running quadrature counter; wraps at 16 bits.
    fn encoder_counter(&mut self) -> u16;
}

/// Milliseconds from `since` to `now` on a wrapping `u32` tick.
///
/// Unsigned subtraction self-corrects across a single counter wrap.
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Button FSM and encoder detector polled together.
pub struct Controls {
    button: PressFsm,
    encoder: EncoderTracker,
}

impl Controls {
    pub fn new(button: PressFsm, encoder: EncoderTracker) -> Self {
        Self { button, encoder }
    }

    /// Sample both inputs once.
    ///
    /// Returns at most one event per input; the press is listed first.
    pub fn poll<S: InputSource>(
        &mut self,
        source: &mut S,
        now_ms: u32,
    ) -> heapless::Vec<InputEvent, 2> {
        let mut events = heapless::Vec::new();

        let press = self.button.poll(source.is_button_pressed(), now_ms);
        if let Some(event) = press.into_input() {
            let _ = events.push(event);
        }

        let movement = self.encoder.poll(source.encoder_counter(), now_ms);
        if let Some(event) = movement.into_input() {
            let _ = events.push(event);
        }

        events
    }
}
