//! Rotary encoder delta detector.
//!
//! The quadrature peripheral exposes a free-running 16-bit counter. Each
//! poll compares it with the last committed sample; once the corrected
//! delta reaches one detent (`step` ticks) a single move is reported and
//! the sample is committed. Smaller deltas keep accumulating.

use super::{elapsed_ms, MoveEvent};
use crate::config::ENCODER_WRAP_THRESHOLD;

/// Which rotation direction counts as "down".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderPolarity {
    /// Counter increasing moves the highlight down.
    Normal,
    /// Counter increasing moves the highlight up.
    Inverted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Ticks per reported move.
    pub step: i32,
    /// Minimum time between two reported moves (ms).
    pub debounce_ms: u32,
    pub polarity: EncoderPolarity,
}

pub struct EncoderTracker {
    config: EncoderConfig,
    last_counter: u16,
    last_move: u32,
}

/// Signed distance between two samples of a wrapping 16-bit counter.
///
/// Both samples are read as `i16`; a raw jump larger than
/// [`ENCODER_WRAP_THRESHOLD`] is a wrap across the ±32768 boundary.
pub fn counter_delta(current: u16, last: u16) -> i32 {
    let mut delta = i32::from(current as i16) - i32::from(last as i16);
    if delta > ENCODER_WRAP_THRESHOLD {
        delta -= 65_536;
    } else if delta < -ENCODER_WRAP_THRESHOLD {
        delta += 65_536;
    }
    delta
}

impl EncoderTracker {
    /// Start tracking from the counter value read at boot.
    pub const fn new(config: EncoderConfig, counter: u16, now_ms: u32) -> Self {
        Self {
            config,
            last_counter: counter,
            last_move: now_ms,
        }
    }

    pub fn poll(&mut self, counter: u16, now_ms: u32) -> MoveEvent {
        if elapsed_ms(now_ms, self.last_move) < self.config.debounce_ms {
            return MoveEvent::None;
        }

        let delta = counter_delta(counter, self.last_counter);
        let forward = if delta >= self.config.step {
            true
        } else if delta <= -self.config.step {
            false
        } else {
            return MoveEvent::None;
        };

        self.last_counter = counter;
        self.last_move = now_ms;

        let event = match (forward, self.config.polarity) {
            (true, EncoderPolarity::Normal) | (false, EncoderPolarity::Inverted) => MoveEvent::Down,
            (false, EncoderPolarity::Normal) | (true, EncoderPolarity::Inverted) => MoveEvent::Up,
        };
        debug!("encoder: delta {} -> {}", delta, event);
        event
    }
}
