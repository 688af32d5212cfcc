//! nRF52840 drivers behind the library's `Panel`, `Backlight` and
//! `InputSource` seams, plus the tasks that feed the UI queue.

pub mod backlight;
pub mod buttons;
pub mod display;
pub mod uart;
