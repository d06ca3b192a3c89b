//! Serial pixel channel abstraction
//!
//! The display controller is fed over a one-way clock+data pair driven by
//! dedicated serializer hardware (a PIO state machine on the RP2040). The
//! driver only needs two operations from it: enqueue a byte, and block
//! until everything enqueued has been shifted out on the wire.

/// One-way serial byte channel to the display controller.
///
/// Both operations are synchronous from the caller's perspective. `put`
/// may buffer in a hardware FIFO; `wait_idle` drains it. Neither reports
/// errors: the serializer is dedicated hardware that cannot fail short of
/// a wiring fault, and there is no timeout on the idle wait.
pub trait PixelChannel {
    /// Enqueue one byte for transmission, MSB first on the wire.
    ///
    /// Blocks only if the hardware FIFO is full.
    fn put(&mut self, byte: u8);

    /// Block until every enqueued byte has been shifted out.
    ///
    /// The driver calls this before changing the data/command or chip
    /// select lines, so a line transition never lands mid-byte.
    fn wait_idle(&mut self);
}
