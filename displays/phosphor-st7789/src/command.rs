//! ST7789 command set and power-up sequence
//!
//! The init sequence is a flat byte table of entries shaped
//! `(total length including opcode, post-delay in 5 ms units, opcode,
//! payload...)`, terminated by a zero-length sentinel. The table is a
//! trusted build-time constant; its shape is checked by a `const`
//! assertion so a malformed edit fails the build instead of walking off
//! the end at runtime.

use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};

/// ST7789 opcodes used by this driver
pub mod opcode {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Exit sleep mode
    pub const SLPOUT: u8 = 0x11;
    /// Normal display mode on
    pub const NORON: u8 = 0x13;
    /// Display inversion on
    pub const INVON: u8 = 0x21;
    /// Main screen turn on
    pub const DISPON: u8 = 0x29;
    /// Column address window
    pub const CASET: u8 = 0x2A;
    /// Row address window
    pub const RASET: u8 = 0x2B;
    /// Memory write (pixel stream follows)
    pub const RAMWR: u8 = 0x2C;
    /// Memory data access control
    pub const MADCTL: u8 = 0x36;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
}

/// Power-up command table
///
/// Brings the controller from reset into 16-bit color, known addressing,
/// and display-on state. The delays are the controller's documented
/// settling times (somewhat shortened); dropping them gets the next
/// command issued before the previous one has finished internally.
#[rustfmt::skip]
pub const INIT_SEQUENCE: [u8; 38] = [
    1, 20, opcode::SWRESET,
    1, 10, opcode::SLPOUT,
    2,  2, opcode::COLMOD, 0x55,    // 16 bits per pixel
    2,  0, opcode::MADCTL, 0x00,    // Row-then-column, bottom-to-top refresh
    5,  0, opcode::CASET, 0x00, 0x00, (PANEL_WIDTH >> 8) as u8, (PANEL_WIDTH & 0xFF) as u8,
    5,  0, opcode::RASET, 0x00, 0x00, (PANEL_HEIGHT >> 8) as u8, (PANEL_HEIGHT & 0xFF) as u8,
    1,  2, opcode::INVON,           // Panel ships inverted
    1,  2, opcode::NORON,
    1,  2, opcode::DISPON,
    0,
];

// A broken table would otherwise be traversed blindly at power-up.
const _: () = assert!(is_well_formed(&INIT_SEQUENCE));

/// Check that every entry fits inside the table and a sentinel is present
pub const fn is_well_formed(table: &[u8]) -> bool {
    let mut pos = 0;
    loop {
        if pos >= table.len() {
            return false;
        }
        let len = table[pos] as usize;
        if len == 0 {
            return true;
        }
        if pos + len + 2 > table.len() {
            return false;
        }
        pos += len + 2;
    }
}

/// One parsed init-table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitEntry<'a> {
    /// Command opcode
    pub opcode: u8,
    /// Parameter bytes following the opcode (may be empty)
    pub payload: &'a [u8],
    /// Post-command settle time in [`DELAY_UNIT_MS`] units
    ///
    /// [`DELAY_UNIT_MS`]: crate::config::DELAY_UNIT_MS
    pub delay_units: u8,
}

/// Iterate the entries of an init table, stopping at the sentinel
pub fn entries(table: &[u8]) -> InitEntries<'_> {
    InitEntries { table, pos: 0 }
}

/// Iterator over init-table entries
pub struct InitEntries<'a> {
    table: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for InitEntries<'a> {
    type Item = InitEntry<'a>;

    fn next(&mut self) -> Option<InitEntry<'a>> {
        let len = *self.table.get(self.pos)? as usize;
        if len == 0 {
            return None;
        }
        let entry = InitEntry {
            opcode: self.table[self.pos + 2],
            payload: &self.table[self.pos + 3..self.pos + 2 + len],
            delay_units: self.table[self.pos + 1],
        };
        self.pos += len + 2;
        Some(entry)
    }
}
