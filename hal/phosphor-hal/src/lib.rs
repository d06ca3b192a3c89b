//! Phosphor Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits consumed by the
//! display driver crates. Chip-specific HALs (RP2040, etc.) implement
//! them, so the same driver code can run on different hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Driver crates (phosphor-st7789, ...)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  phosphor-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  phosphor-hal-rp2040 (PIO, GPIO, ...)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output lines (D/C, CS, RST, backlight)
//! - [`channel::PixelChannel`] - Serial bit-stream channel to the panel

#![no_std]
#![deny(unsafe_code)]

pub mod channel;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use channel::PixelChannel;
pub use gpio::OutputPin;
