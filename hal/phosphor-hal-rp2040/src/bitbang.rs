//! Bit-banged fallback serializer
//!
//! Drives the panel's clock+data pair from software, producing the same
//! wire format as the PIO serializer: MSB first, data valid before the
//! rising clock edge. Orders of magnitude slower than the PIO, but it
//! needs no state machine, which makes it useful for board bring-up and
//! for host-side verification of the wire protocol.

use phosphor_hal::{OutputPin, PixelChannel};

/// Software serializer over two GPIO lines
///
/// The clock idles low; each bit is presented on the data line and
/// latched by a rising clock edge, matching [`SERIAL_PROGRAM`].
///
/// [`SERIAL_PROGRAM`]: crate::pio::SERIAL_PROGRAM
pub struct BitBangChannel<DIN, CLK> {
    data_pin: DIN,
    clock_pin: CLK,
}

impl<DIN, CLK> BitBangChannel<DIN, CLK>
where
    DIN: OutputPin,
    CLK: OutputPin,
{
    /// Take ownership of the data and clock lines
    pub fn new(data_pin: DIN, mut clock_pin: CLK) -> Self {
        clock_pin.set_low();
        Self {
            data_pin,
            clock_pin,
        }
    }
}

impl<DIN, CLK> PixelChannel for BitBangChannel<DIN, CLK>
where
    DIN: OutputPin,
    CLK: OutputPin,
{
    fn put(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.clock_pin.set_low();
            self.data_pin.set_state(byte & (1 << bit) != 0);
            self.clock_pin.set_high();
        }
        // Leave the clock at its idle level between bytes
        self.clock_pin.set_low();
    }

    fn wait_idle(&mut self) {
        // Every bit is shifted before `put` returns; nothing is in flight
    }
}
