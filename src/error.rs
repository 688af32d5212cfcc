//! Unified error type for menu-panel.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! None of these reach the user; callers log and carry on.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Display
    /// Transfer of the framebuffer to the panel failed.
    Display,

    // UART link
    /// UART peripheral reported a framing/overrun error.
    Uart,

    /// A sensor line did not carry both readings.
    MalformedLine,

    /// A sensor line exceeded the line buffer and was discarded.
    LineOverflow,

    /// A status line is still being transmitted; the new one was dropped.
    TransmitBusy,

    // Generic
    /// A formatted value did not fit its fixed-size buffer.
    FormatOverflow,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::FormatOverflow
    }
}
