//! Off-device framebuffer
//!
//! One 16-bit cell per physical panel pixel, row-major. The driver owns
//! exactly one instance for its lifetime and serializes the whole array
//! on every push; there is no dirty tracking.

use crate::color::Rgb565;
use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};

const COLS: usize = PANEL_WIDTH as usize;
const ROWS: usize = PANEL_HEIGHT as usize;

/// Full-frame pixel mirror of the panel
///
/// Rows index the panel's y axis, columns its x axis. Logical
/// coordinates go through [`Orientation::map`] before touching a cell.
///
/// [`Orientation::map`]: crate::config::Orientation::map
pub struct Framebuffer {
    cells: [[Rgb565; COLS]; ROWS],
}

impl Framebuffer {
    /// A framebuffer with every cell black
    pub const fn new() -> Self {
        Self {
            cells: [[Rgb565::BLACK; COLS]; ROWS],
        }
    }

    /// Write one cell
    ///
    /// `row` and `col` must already be panel coordinates; the orientation
    /// mapper guarantees they are in range.
    pub fn set(&mut self, row: u16, col: u16, color: Rgb565) {
        debug_assert!(row < PANEL_HEIGHT && col < PANEL_WIDTH);
        self.cells[row as usize][col as usize] = color;
    }

    /// Read one cell
    ///
    /// `row` and `col` must be panel coordinates.
    pub fn get(&self, row: u16, col: u16) -> Rgb565 {
        debug_assert!(row < PANEL_HEIGHT && col < PANEL_WIDTH);
        self.cells[row as usize][col as usize]
    }

    /// Reset every cell to black
    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(Rgb565::BLACK);
        }
    }

    /// Iterate every cell in raster order (top row first, left to right)
    pub fn raster(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of cells serialized per push
    pub const fn pixel_count(&self) -> usize {
        COLS * ROWS
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
