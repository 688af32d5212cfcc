//! Host-testable core of the menu panel firmware.
//!
//! Everything here is hardware-agnostic: input classification, the page
//! model, navigation, framebuffer rendering and the UART line protocol.
//! The embedded binary (`main.rs`) supplies the panel, backlight, QDEC,
//! GPIO and UART drivers and feeds events into [`ui::Ui`].
//!
//! Usage: `cargo test --lib` on the host, or
//! `cargo build --release --features embedded` for the nRF52840.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod input;
pub mod link;
pub mod ui;

pub use error::Error;
pub use input::{Controls, InputEvent, InputSource};
pub use ui::{PressScheme, Ui, UiEvent};
