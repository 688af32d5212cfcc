//! UART side channel to the host board.
//!
//! Inbound: one sensor reading per line, `T:<float>;H:<float>`.
//! Outbound: `PC:On\r\n` / `PC:Off\r\n`, one line in flight at a time.
//! A toggle arriving while a line is still on the wire is dropped; the
//! next toggle tries again.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::SENSOR_LINE_MAX;
use crate::error::Error;
use crate::ui::page::LIVE_TEXT_CAPACITY;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    pub temperature: f32,
    pub humidity: f32,
}

/// Parse `T:<float>;H:<float>`. Surrounding whitespace and a trailing
/// `\r` are ignored.
pub fn parse_sensor_line(line: &str) -> Result<SensorReading, Error> {
    let line = line.trim();
    let rest = line.strip_prefix("T:").ok_or(Error::MalformedLine)?;
    let (temperature, humidity) = rest.split_once(';').ok_or(Error::MalformedLine)?;
    let humidity = humidity
        .trim_start()
        .strip_prefix("H:")
        .ok_or(Error::MalformedLine)?;

    Ok(SensorReading {
        temperature: temperature.trim().parse().map_err(|_| Error::MalformedLine)?,
        humidity: humidity.trim().parse().map_err(|_| Error::MalformedLine)?,
    })
}

/// `23.45` → `"23.5C"`.
pub fn format_temperature(value: f32) -> Result<String<LIVE_TEXT_CAPACITY>, Error> {
    let mut s = String::new();
    write!(s, "{:.1}C", value)?;
    Ok(s)
}

/// `60.0` → `"60.0%"`.
pub fn format_humidity(value: f32) -> Result<String<LIVE_TEXT_CAPACITY>, Error> {
    let mut s = String::new();
    write!(s, "{:.1}%", value)?;
    Ok(s)
}

/// Collects UART bytes into `\n`-terminated lines.
pub struct LineAssembler {
    buf: Vec<u8, SENSOR_LINE_MAX>,
    overflowed: bool,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte. Returns the finished line on `\n`.
    ///
    /// A line longer than [`SENSOR_LINE_MAX`] is thrown away whole and
    /// reported as [`Error::LineOverflow`] at its terminator.
    pub fn push(&mut self, byte: u8) -> Option<Result<String<SENSOR_LINE_MAX>, Error>> {
        match byte {
            b'\n' => {
                let overflowed = core::mem::replace(&mut self.overflowed, false);
                let bytes = core::mem::take(&mut self.buf);
                if overflowed {
                    return Some(Err(Error::LineOverflow));
                }
                Some(String::from_utf8(bytes).map_err(|_| Error::MalformedLine))
            }
            b'\r' => None,
            _ => {
                if !self.overflowed && self.buf.push(byte).is_err() {
                    self.overflowed = true;
                    self.buf.clear();
                }
                None
            }
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

pub type StatusLine = &'static str;

pub fn status_line(on: bool) -> StatusLine {
    if on {
        "PC:On\r\n"
    } else {
        "PC:Off\r\n"
    }
}

/// Single-flight sender for PC state lines.
#[derive(Default)]
pub struct StatusLink {
    in_flight: bool,
    outbox: Option<StatusLine>,
}

impl StatusLink {
    pub const fn new() -> Self {
        Self {
            in_flight: false,
            outbox: None,
        }
    }

    /// Queue the line for `on`, unless one is still being sent.
    pub fn request(&mut self, on: bool) -> Result<(), Error> {
        if self.in_flight {
            return Err(Error::TransmitBusy);
        }
        self.in_flight = true;
        self.outbox = Some(status_line(on));
        Ok(())
    }

    /// Hand the queued line to the transmitter. The link stays busy until
    /// [`complete`](Self::complete).
    pub fn take(&mut self) -> Option<StatusLine> {
        self.outbox.take()
    }

    /// Transmitter finished (or failed); the line is free again.
    pub fn complete(&mut self) {
        self.in_flight = false;
        self.outbox = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }
}
