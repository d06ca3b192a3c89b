//! ST7789 panel driver with an owned off-device framebuffer
//!
//! The driver owns one full-frame pixel mirror, translates logical pixel
//! writes into the controller's serial wire protocol, and sequences the
//! controller's power-on initialization. Screen composition (what gets
//! drawn) and the task loop around it live elsewhere; this crate exposes
//! only the primitives they call:
//!
//! - [`St7789::init`] - power-up sequencing, one black frame
//! - [`St7789::plot`] / [`St7789::clear`] - framebuffer writes
//! - [`St7789::push`] - full-frame transmission
//! - [`St7789::backlight_on`] / [`St7789::backlight_off`]
//!
//! Hardware comes in through the `phosphor-hal` traits: a serial pixel
//! channel plus four output lines (D/C, CS, RST, backlight).

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod command;
pub mod config;
pub mod driver;
pub mod framebuffer;

// Re-exports for primary API
pub use color::Rgb565;
pub use config::{Orientation, DEFAULT_ORIENTATION, PANEL_HEIGHT, PANEL_WIDTH};
pub use driver::St7789;
pub use framebuffer::Framebuffer;
