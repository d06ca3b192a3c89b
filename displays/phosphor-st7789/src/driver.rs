//! ST7789 panel driver
//!
//! Owns the framebuffer and the panel's control lines, and translates
//! logical pixel writes into the controller's serial wire protocol. All
//! operations are synchronous and blocking; the driver assumes a single
//! caller and takes `&mut self` everywhere.
//!
//! The wire protocol has two byte classes, selected by the D/C line:
//! opcodes (D/C low) and parameter/pixel data (D/C high). The driver
//! waits for the serializer to drain before every line change so a
//! transition never lands mid-byte, and brackets each change with a 1 µs
//! settle delay for the controller's setup/hold timing.

use embedded_hal::delay::DelayNs;
use phosphor_hal::{OutputPin, PixelChannel};

use crate::color::Rgb565;
use crate::command::{self, opcode};
use crate::config::{Orientation, DELAY_UNIT_MS};
use crate::framebuffer::Framebuffer;

/// Driver for an ST7789-controlled panel
///
/// Generic over the serial pixel channel, the four control lines, and a
/// delay provider. Construct exactly one per panel and keep it for the
/// device's lifetime; there is no deinit.
pub struct St7789<CH, DC, CS, RST, BL, D> {
    channel: CH,
    dc_pin: DC,
    cs_pin: CS,
    rst_pin: RST,
    backlight_pin: BL,
    delay: D,
    orientation: Orientation,
    framebuffer: Framebuffer,
}

impl<CH, DC, CS, RST, BL, D> St7789<CH, DC, CS, RST, BL, D>
where
    CH: PixelChannel,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the panel's channel and control lines
    ///
    /// Puts the lines into the power-up posture: backlight dark, D/C low,
    /// chip deselected, reset deasserted. Call [`init`](Self::init) before
    /// plotting anything.
    pub fn new(
        channel: CH,
        mut dc_pin: DC,
        mut cs_pin: CS,
        mut rst_pin: RST,
        mut backlight_pin: BL,
        delay: D,
        orientation: Orientation,
    ) -> Self {
        backlight_pin.set_low();
        dc_pin.set_low();
        cs_pin.set_high();
        rst_pin.set_high();

        Self {
            channel,
            dc_pin,
            cs_pin,
            rst_pin,
            backlight_pin,
            delay,
            orientation,
            framebuffer: Framebuffer::new(),
        }
    }

    /// Bring the controller out of reset and present a black frame
    ///
    /// Replays the power-up command table with its documented settling
    /// delays, lights the backlight, then clears and pushes the
    /// framebuffer once.
    pub fn init(&mut self) {
        self.cs_pin.set_high();
        self.rst_pin.set_high();

        self.run_init_table(&command::INIT_SEQUENCE);

        self.backlight_pin.set_high();
        self.framebuffer.clear();
        self.push();
    }

    /// Replay an init command table, sleeping each entry's post-delay
    fn run_init_table(&mut self, table: &[u8]) {
        for entry in command::entries(table) {
            self.write_command(entry.opcode, entry.payload);
            self.delay.delay_ms(entry.delay_units as u32 * DELAY_UNIT_MS);
        }
    }

    /// Plot one pixel at a logical coordinate
    ///
    /// Out-of-bounds coordinates are dropped silently: glyph and shape
    /// rasterization may legitimately run to an edge, so this is
    /// best-effort by design, not an error.
    pub fn plot(&mut self, x: u16, y: u16, color: Rgb565) {
        if let Some((row, col)) = self.orientation.map(x, y) {
            self.framebuffer.set(row, col, color);
        }
    }

    /// Reset every framebuffer cell to black
    ///
    /// Affects only the off-device buffer; the panel keeps showing the
    /// old frame until the next [`push`](Self::push).
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Transmit the entire framebuffer to the panel
    ///
    /// Issues RAMWR, then streams every cell in raster order as
    /// (high byte, low byte). The controller stays in data-receive mode
    /// for the whole frame, so the per-command strobe is bypassed. The
    /// call blocks until the serializer has accepted every byte.
    pub fn push(&mut self) {
        self.write_command(opcode::RAMWR, &[]);
        self.set_dc_cs(true, false);

        let Self {
            channel,
            framebuffer,
            ..
        } = self;
        for px in framebuffer.raster() {
            channel.put(px.high_byte());
            channel.put(px.low_byte());
        }
    }

    /// Logical width for the active orientation (exclusive x bound)
    pub fn width(&self) -> u16 {
        self.orientation.logical_width()
    }

    /// Logical height for the active orientation (exclusive y bound)
    pub fn height(&self) -> u16 {
        self.orientation.logical_height()
    }

    /// The orientation fixed at construction
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The driver's framebuffer, for inspection
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Light the backlight. Idempotent.
    pub fn backlight_on(&mut self) {
        self.backlight_pin.set_high();
    }

    /// Darken the backlight. Idempotent.
    pub fn backlight_off(&mut self) {
        self.backlight_pin.set_low();
    }

    /// Send one command: opcode with D/C low, parameters with D/C high
    ///
    /// Payload length is whatever the caller supplies; matching the
    /// controller's documented command lengths is the caller's job.
    fn write_command(&mut self, opcode: u8, payload: &[u8]) {
        self.channel.wait_idle();
        self.set_dc_cs(false, false);
        self.channel.put(opcode);

        if !payload.is_empty() {
            self.channel.wait_idle();
            self.set_dc_cs(true, false);
            for &byte in payload {
                self.channel.put(byte);
            }
        }

        self.channel.wait_idle();
        self.set_dc_cs(true, true);
    }

    /// Move the D/C and CS lines with the controller's setup/hold timing
    fn set_dc_cs(&mut self, dc: bool, cs: bool) {
        self.delay.delay_us(1);
        self.dc_pin.set_state(dc);
        self.cs_pin.set_state(cs);
        self.delay.delay_us(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Everything the driver does to the outside world, in order
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Put(u8),
        WaitIdle,
        Dc(bool),
        Cs(bool),
        Rst(bool),
        Backlight(bool),
        DelayUs(u32),
        DelayMs(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct SpyChannel {
        log: Log,
    }

    impl PixelChannel for SpyChannel {
        fn put(&mut self, byte: u8) {
            self.log.borrow_mut().push(Event::Put(byte));
        }
        fn wait_idle(&mut self) {
            self.log.borrow_mut().push(Event::WaitIdle);
        }
    }

    #[derive(Clone, Copy)]
    enum Line {
        Dc,
        Cs,
        Rst,
        Backlight,
    }

    struct SpyPin {
        log: Log,
        line: Line,
        high: bool,
    }

    impl SpyPin {
        fn new(log: &Log, line: Line) -> Self {
            Self {
                log: log.clone(),
                line,
                high: false,
            }
        }
    }

    impl OutputPin for SpyPin {
        fn set_high(&mut self) {
            self.high = true;
            self.record(true);
        }
        fn set_low(&mut self) {
            self.high = false;
            self.record(false);
        }
        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl SpyPin {
        fn record(&self, high: bool) {
            let event = match self.line {
                Line::Dc => Event::Dc(high),
                Line::Cs => Event::Cs(high),
                Line::Rst => Event::Rst(high),
                Line::Backlight => Event::Backlight(high),
            };
            self.log.borrow_mut().push(event);
        }
    }

    struct SpyDelay {
        log: Log,
    }

    impl DelayNs for SpyDelay {
        fn delay_ns(&mut self, ns: u32) {
            // The driver only uses the us/ms helpers
            self.log.borrow_mut().push(Event::DelayUs(ns / 1000));
        }
        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us));
        }
        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    type SpyDriver = St7789<SpyChannel, SpyPin, SpyPin, SpyPin, SpyPin, SpyDelay>;

    fn harness(orientation: Orientation) -> (Log, SpyDriver) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let driver = St7789::new(
            SpyChannel { log: log.clone() },
            SpyPin::new(&log, Line::Dc),
            SpyPin::new(&log, Line::Cs),
            SpyPin::new(&log, Line::Rst),
            SpyPin::new(&log, Line::Backlight),
            SpyDelay { log: log.clone() },
            orientation,
        );
        (log, driver)
    }

    fn puts(log: &Log) -> Vec<u8> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Put(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    fn sleeps(log: &Log) -> Vec<u32> {
        log.borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_power_up_posture() {
        let (log, _driver) = harness(Orientation::Portrait);
        assert_eq!(
            *log.borrow(),
            [
                Event::Backlight(false),
                Event::Dc(false),
                Event::Cs(true),
                Event::Rst(true),
            ]
        );
    }

    #[test]
    fn test_sequencer_scenario() {
        let (log, mut driver) = harness(Orientation::Portrait);
        log.borrow_mut().clear();

        driver.run_init_table(&[1, 20, 0x01, 1, 10, 0x11, 0]);

        assert_eq!(puts(&log), [0x01, 0x11]);
        assert_eq!(sleeps(&log), [100, 50]);
        // Nothing after the sentinel: the last event is the second sleep
        assert_eq!(*log.borrow().last().unwrap(), Event::DelayMs(50));
    }

    #[test]
    fn test_strobe_line_discipline() {
        let (log, mut driver) = harness(Orientation::Portrait);
        log.borrow_mut().clear();

        driver.run_init_table(&[2, 0, opcode::COLMOD, 0x55, 0]);

        assert_eq!(
            *log.borrow(),
            [
                // Opcode goes out with D/C low, chip selected
                Event::WaitIdle,
                Event::DelayUs(1),
                Event::Dc(false),
                Event::Cs(false),
                Event::DelayUs(1),
                Event::Put(opcode::COLMOD),
                // Parameters with D/C high
                Event::WaitIdle,
                Event::DelayUs(1),
                Event::Dc(true),
                Event::Cs(false),
                Event::DelayUs(1),
                Event::Put(0x55),
                // Deselect once the stream has drained
                Event::WaitIdle,
                Event::DelayUs(1),
                Event::Dc(true),
                Event::Cs(true),
                Event::DelayUs(1),
                Event::DelayMs(0),
            ]
        );
    }

    #[test]
    fn test_init_command_stream() {
        let (log, mut driver) = harness(Orientation::Portrait);
        log.borrow_mut().clear();

        driver.init();

        let bytes = puts(&log);
        // The full power-up byte stream, then RAMWR and the frame
        assert_eq!(
            bytes[..19],
            [
                0x01, // SWRESET
                0x11, // SLPOUT
                0x3A, 0x55, // COLMOD 16-bit
                0x36, 0x00, // MADCTL
                0x2A, 0x00, 0x00, 0x00, 0xF0, // CASET [0, 240)
                0x2B, 0x00, 0x00, 0x01, 0x40, // RASET [0, 320)
                0x21, // INVON
                0x13, // NORON
                0x29, // DISPON
            ]
        );
        assert_eq!(bytes[19], opcode::RAMWR);
        assert_eq!(bytes.len(), 20 + driver.framebuffer().pixel_count() * 2);

        // Documented settling times, in 5 ms units
        assert_eq!(sleeps(&log), [100, 50, 10, 0, 0, 0, 10, 10, 10]);

        // Backlight comes on after the sequencer, before the first frame
        let lit = log
            .borrow()
            .iter()
            .position(|e| *e == Event::Backlight(true))
            .unwrap();
        let ramwr = log
            .borrow()
            .iter()
            .position(|e| *e == Event::Put(opcode::RAMWR))
            .unwrap();
        assert!(lit < ramwr);
    }

    #[test]
    fn test_push_emits_full_frame_in_raster_order() {
        let (log, mut driver) = harness(Orientation::Portrait);
        driver.plot(1, 0, Rgb565::from_raw(0xABCD));
        log.borrow_mut().clear();

        driver.push();

        let bytes = puts(&log);
        // One opcode byte plus two bytes per cell
        assert_eq!(bytes.len(), 1 + 240 * 320 * 2);
        assert_eq!(bytes[0], opcode::RAMWR);

        // Cell (row 0, col 1) is raster index 1, high byte first
        assert_eq!(bytes[1], 0x00);
        assert_eq!(bytes[2], 0x00);
        assert_eq!(bytes[3], 0xAB);
        assert_eq!(bytes[4], 0xCD);
        assert!(bytes[5..].iter().all(|&b| b == 0x00));

        // After the RAMWR strobe the controller is left in data-receive
        // mode: D/C high, chip selected, no further line changes
        let line_events: Vec<Event> = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Dc(_) | Event::Cs(_)))
            .copied()
            .collect();
        assert_eq!(
            line_events[line_events.len() - 2..],
            [Event::Dc(true), Event::Cs(false)]
        );
    }

    #[test]
    fn test_plot_maps_through_orientation() {
        let (_log, mut driver) = harness(Orientation::Landscape);
        assert_eq!(driver.width(), PANEL_HEIGHT);
        assert_eq!(driver.height(), PANEL_WIDTH);

        driver.plot(0, 0, Rgb565::WHITE);
        assert_eq!(driver.framebuffer().get(319, 0), Rgb565::WHITE);
    }

    #[test]
    fn test_out_of_bounds_plot_is_dropped() {
        let (_log, mut driver) = harness(Orientation::Portrait);
        driver.plot(driver.width(), 0, Rgb565::WHITE);
        driver.plot(0, driver.height(), Rgb565::WHITE);
        driver.plot(u16::MAX, u16::MAX, Rgb565::WHITE);

        assert!(driver.framebuffer().raster().all(|px| px == Rgb565::BLACK));
    }

    #[test]
    fn test_backlight_is_idempotent() {
        let (_log, mut driver) = harness(Orientation::Portrait);

        driver.backlight_on();
        let after_once = driver.backlight_pin.is_set_high();
        driver.backlight_on();
        assert_eq!(driver.backlight_pin.is_set_high(), after_once);
        assert!(after_once);

        driver.backlight_off();
        driver.backlight_off();
        assert!(driver.backlight_pin.is_set_low());
    }

    #[test]
    fn test_clear_affects_buffer_not_wire() {
        let (log, mut driver) = harness(Orientation::Portrait);
        driver.plot(3, 4, Rgb565::WHITE);
        log.borrow_mut().clear();

        driver.clear();

        assert!(log.borrow().is_empty());
        assert!(driver.framebuffer().raster().all(|px| px == Rgb565::BLACK));
    }
}
