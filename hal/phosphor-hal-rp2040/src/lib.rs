//! RP2040-specific HAL support for the display firmware
//!
//! This crate provides the RP2040 realization of the serial pixel channel
//! consumed by `phosphor-st7789`:
//!
//! - The PIO program that serializes bytes onto the panel's clock+data pair
//! - Clock divider math for the PIO state machine
//! - Board pin assignments and channel configuration
//! - A bit-banged [`PixelChannel`](phosphor_hal::PixelChannel) fallback
//!   for bring-up, matching the PIO wire format

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bitbang;
pub mod pio;

pub use bitbang::BitBangChannel;
pub use pio::{DisplayPins, PixelChannelConfig, SERIAL_PROGRAM};
