//! Debounce / long-press state machine for the push button.
//!
//! ```text
//! Idle ──pressed──▶ Debouncing ──held ≥ debounce──▶ Pressed
//!  ▲                    │                            │    │
//!  └────released────────┘◀──released (ShortPress)────┘    │ held ≥ long
//!  ▲                                                      ▼
//!  └──────────────released──────────────────────── LongPressWait
//!                                                  (LongPress emitted)
//! ```
//!
//! Elapsed time is always measured from the first pressed sample, so the
//! long-press threshold includes the debounce window.

use super::{elapsed_ms, PressEvent};
use crate::config::{BUTTON_DEBOUNCE_MS, LONG_PRESS_MS};

/// Debounce and long-press thresholds (ms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressTiming {
    pub debounce_ms: u32,
    pub long_press_ms: u32,
}

impl PressTiming {
    /// Menu-only board: slow long press.
    pub const MENU: PressTiming = PressTiming {
        debounce_ms: BUTTON_DEBOUNCE_MS,
        long_press_ms: 1000,
    };

    /// Encoder board: the configured thresholds.
    pub const CONTROLS: PressTiming = PressTiming {
        debounce_ms: BUTTON_DEBOUNCE_MS,
        long_press_ms: LONG_PRESS_MS,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Released, waiting for a press.
    Idle,
    /// Press seen; waiting for the signal to settle.
    Debouncing,
    /// Stable press; waiting for release (short) or timeout (long).
    Pressed,
    /// Long press reported; waiting for the physical release.
    LongPressWait,
}

pub struct PressFsm {
    timing: PressTiming,
    state: ButtonState,
    press_start: u32,
}

impl PressFsm {
    pub const fn new(timing: PressTiming) -> Self {
        Self {
            timing,
            state: ButtonState::Idle,
            press_start: 0,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Feed one raw sample taken at `now_ms`.
    ///
    /// Call at least every `debounce_ms / 2`, or from both edges of the
    /// pin interrupt plus a timer tick.
    pub fn poll(&mut self, pressed: bool, now_ms: u32) -> PressEvent {
        let held = elapsed_ms(now_ms, self.press_start);

        match self.state {
            ButtonState::Idle => {
                if pressed {
                    self.press_start = now_ms;
                    self.state = ButtonState::Debouncing;
                }
                PressEvent::None
            }
            ButtonState::Debouncing => {
                if !pressed {
                    self.state = ButtonState::Idle;
                } else if held >= self.timing.debounce_ms {
                    self.state = ButtonState::Pressed;
                }
                PressEvent::None
            }
            ButtonState::Pressed => {
                if !pressed {
                    self.state = ButtonState::Idle;
                    debug!("button: short press ({} ms)", held);
                    PressEvent::ShortPress
                } else if held >= self.timing.long_press_ms {
                    self.state = ButtonState::LongPressWait;
                    debug!("button: long press");
                    PressEvent::LongPress
                } else {
                    PressEvent::None
                }
            }
            ButtonState::LongPressWait => {
                if !pressed {
                    self.state = ButtonState::Idle;
                }
                PressEvent::None
            }
        }
    }
}

impl Default for PressFsm {
    fn default() -> Self {
        Self::new(crate::config::PRESS_TIMING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: PressTiming = PressTiming {
        debounce_ms: 50,
        long_press_ms: 600,
    };

    /// Replays `(pressed, duration)` segments sampled every `step` ms and
    /// collects every non-`None` event.
    fn run(fsm: &mut PressFsm, start: u32, step: u32, script: &[(bool, u32)]) -> heapless::Vec<PressEvent, 16> {
        let mut now = start;
        let mut events = heapless::Vec::new();
        for &(pressed, duration) in script {
            let end = now.wrapping_add(duration);
            while now != end {
                let event = fsm.poll(pressed, now);
                if event != PressEvent::None {
                    events.push(event).unwrap();
                }
                now = now.wrapping_add(step);
            }
        }
        events
    }

    #[test]
    fn short_press_fires_once_on_release() {
        let mut fsm = PressFsm::new(TIMING);
        let events = run(&mut fsm, 0, 5, &[(true, 200), (false, 100)]);
        assert_eq!(events.as_slice(), &[PressEvent::ShortPress]);
        assert_eq!(fsm.state(), ButtonState::Idle);
    }

    #[test]
    fn bounce_shorter_than_debounce_is_rejected() {
        let mut fsm = PressFsm::new(TIMING);
        let events = run(
            &mut fsm,
            0,
            5,
            &[(true, 20), (false, 10), (true, 30), (false, 40), (true, 10), (false, 50)],
        );
        assert!(events.is_empty());
        assert_eq!(fsm.state(), ButtonState::Idle);
    }

    #[test]
    fn long_press_fires_once_and_swallows_release() {
        let mut fsm = PressFsm::new(TIMING);
        let events = run(&mut fsm, 0, 5, &[(true, 2000), (false, 100)]);
        assert_eq!(events.as_slice(), &[PressEvent::LongPress]);
    }

    #[test]
    fn long_press_fires_at_threshold() {
        let mut fsm = PressFsm::new(TIMING);
        assert_eq!(fsm.poll(true, 0), PressEvent::None);
        assert_eq!(fsm.poll(true, 50), PressEvent::None);
        assert_eq!(fsm.state(), ButtonState::Pressed);
        assert_eq!(fsm.poll(true, 599), PressEvent::None);
        assert_eq!(fsm.poll(true, 600), PressEvent::LongPress);
        assert_eq!(fsm.state(), ButtonState::LongPressWait);
        assert_eq!(fsm.poll(true, 5000), PressEvent::None);
        assert_eq!(fsm.poll(false, 5005), PressEvent::None);
        assert_eq!(fsm.state(), ButtonState::Idle);
    }

    #[test]
    fn repeated_presses_each_fire_once() {
        let mut fsm = PressFsm::new(TIMING);
        let events = run(
            &mut fsm,
            0,
            5,
            &[(true, 100), (false, 100), (true, 100), (false, 100), (true, 700), (false, 100)],
        );
        assert_eq!(
            events.as_slice(),
            &[PressEvent::ShortPress, PressEvent::ShortPress, PressEvent::LongPress]
        );
    }

    #[test]
    fn timing_survives_tick_wrap() {
        let mut fsm = PressFsm::new(TIMING);
        let start = u32::MAX - 100;
        let events = run(&mut fsm, start, 5, &[(true, 200), (false, 50)]);
        assert_eq!(events.as_slice(), &[PressEvent::ShortPress]);

        let events = run(&mut fsm, start, 5, &[(true, 1000), (false, 50)]);
        assert_eq!(events.as_slice(), &[PressEvent::LongPress]);
    }

    #[test]
    fn menu_preset_needs_a_full_second() {
        let mut fsm = PressFsm::new(PressTiming::MENU);
        let events = run(&mut fsm, 0, 10, &[(true, 800), (false, 50)]);
        assert_eq!(events.as_slice(), &[PressEvent::ShortPress]);
    }

    #[test]
    fn firmware_timing_follows_config() {
        assert_eq!(crate::config::PRESS_TIMING.debounce_ms, BUTTON_DEBOUNCE_MS);
        assert_eq!(crate::config::PRESS_TIMING.long_press_ms, LONG_PRESS_MS);
        assert_eq!(PressTiming::CONTROLS.long_press_ms, LONG_PRESS_MS);
        assert_eq!(PressTiming::MENU.debounce_ms, BUTTON_DEBOUNCE_MS);
    }

    #[test]
    fn default_fsm_uses_configured_long_press() {
        let mut fsm = PressFsm::default();
        let held_short = LONG_PRESS_MS - 5;
        let events = run(&mut fsm, 0, 5, &[(true, held_short), (false, 50)]);
        assert_eq!(events.as_slice(), &[PressEvent::ShortPress]);

        let events = run(&mut fsm, 0, 5, &[(true, LONG_PRESS_MS + 5), (false, 50)]);
        assert_eq!(events.as_slice(), &[PressEvent::LongPress]);
    }
}
