//! PIO-based panel serializer
//!
//! Uses the RP2040's Programmable I/O to shift framebuffer bytes onto the
//! panel's clock+data pair. This offloads the bit-banging from the CPU:
//! the driver just feeds bytes into the state machine's TX FIFO and the
//! PIO clocks them out at the configured rate.
//!
//! # Architecture
//!
//! One state machine runs a two-instruction program: shift one bit onto
//! the data pin with the clock low, then raise the clock (side-set). With
//! autopull at an 8-bit threshold the FIFO is consumed a byte at a time,
//! MSB first, which is the bit order the ST7789 expects.
//!
//! The bit rate is `SYS_CLK / (divider * 2)` since each bit costs two PIO
//! cycles.

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Autopull threshold: the serializer consumes whole bytes.
pub const SHIFT_THRESHOLD: u8 = 8;

/// PIO program for the panel serializer
///
/// Two instructions with a one-bit side-set mapped to the clock pin.
/// The data pin is the sole OUT pin.
#[rustfmt::skip]
pub const SERIAL_PROGRAM: &[u16] = &[
    // .side_set 1
    // .wrap_target
    0x6001, // out pins, 1  side 0  ; Shift next bit onto the data pin
    0xB042, // nop          side 1  ; Rising clock edge latches it
    // .wrap
];

/// Serial channel configuration for the panel wiring
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelChannelConfig {
    /// Data (DIN) GPIO pin
    pub data_pin: u8,
    /// Clock GPIO pin (side-set)
    pub clock_pin: u8,
    /// State machine clock divider as 16.8 fixed point
    pub clock_div: (u16, u8),
}

impl Default for PixelChannelConfig {
    fn default() -> Self {
        Self {
            data_pin: 11,
            clock_pin: 10,
            // Full speed: one bit per two system clocks
            clock_div: (1, 0),
        }
    }
}

/// Control line assignments for the panel
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayPins {
    /// Data/command select GPIO pin
    pub dc_pin: u8,
    /// Chip select GPIO pin
    pub cs_pin: u8,
    /// Reset GPIO pin
    pub rst_pin: u8,
    /// Backlight GPIO pin
    pub backlight_pin: u8,
}

impl Default for DisplayPins {
    fn default() -> Self {
        Self {
            dc_pin: 8,
            cs_pin: 9,
            rst_pin: 12,
            backlight_pin: 13,
        }
    }
}

/// Calculate the state machine clock divider for a target bit rate
///
/// The serializer spends 2 PIO cycles per bit (shift + clock edge), so:
/// bit_rate = SYS_CLK / (divider * 2)
///
/// Therefore: divider = SYS_CLK / (bit_rate * 2)
///
/// Returns (integer_part, fractional_part) for the 16.8 fixed-point divider.
pub fn calc_clock_divider(bit_rate_hz: u32) -> (u16, u8) {
    if bit_rate_hz == 0 {
        return (0xFFFF, 0xFF); // Maximum divider = stopped
    }

    // To get 8-bit fractional precision, multiply by 256 first
    // divider * 256 = (SYS_CLK * 256) / (bit_rate * 2)
    let divisor = bit_rate_hz * 2;
    let divider_x256 = (SYS_CLK_HZ as u64 * 256) / (divisor as u64);

    // Split into integer and fractional parts
    let int_part = (divider_x256 / 256) as u32;
    let frac_part = (divider_x256 % 256) as u32;

    // Clamp to valid range
    let int_part = int_part.min(0xFFFF) as u16;
    let frac_part = frac_part.min(0xFF) as u8;

    (int_part, frac_part)
}

/// Bit rate produced by a given 16.8 divider
pub fn divider_to_bit_rate(divider: (u16, u8)) -> u32 {
    let divider_x256 = (divider.0 as u64) * 256 + divider.1 as u64;
    if divider_x256 == 0 {
        return 0;
    }
    // bit_rate = SYS_CLK / (divider * 2)
    ((SYS_CLK_HZ as u64 * 256) / (divider_x256 * 2)) as u32
}
