//! Panel geometry and orientation
//!
//! The physical panel dimensions are build-time constants; the logical
//! orientation is picked once when the driver is constructed. Each
//! orientation is an affine mapping from logical (x, y) coordinates to
//! framebuffer (row, col) cells.

/// Physical panel width in pixels (columns)
pub const PANEL_WIDTH: u16 = 240;

/// Physical panel height in pixels (rows)
pub const PANEL_HEIGHT: u16 = 320;

/// Init-table post-delays are expressed in units of this many milliseconds
pub const DELAY_UNIT_MS: u32 = 5;

/// Board default: the panel is mounted sideways
pub const DEFAULT_ORIENTATION: Orientation = Orientation::Landscape;

/// Logical orientation of the panel
///
/// `Portrait` keeps the panel's native axes; `Landscape` swaps them. The
/// `Flipped` variants rotate the image 180 degrees relative to their base
/// orientation. The exact cell mappings encode the panel's scan direction
/// and are not symmetric between the landscape variants; they match the
/// hardware as wired, so treat them as an opaque table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Native axes: logical x is a panel column, y is a row
    Portrait,
    /// Portrait rotated 180 degrees
    PortraitFlipped,
    /// Swapped axes: logical x runs along the panel's long edge
    Landscape,
    /// Landscape mirrored along the long edge
    LandscapeFlipped,
}

impl Orientation {
    /// Width of the logical coordinate space (exclusive x bound)
    pub const fn logical_width(self) -> u16 {
        match self {
            Orientation::Portrait | Orientation::PortraitFlipped => PANEL_WIDTH,
            Orientation::Landscape | Orientation::LandscapeFlipped => PANEL_HEIGHT,
        }
    }

    /// Height of the logical coordinate space (exclusive y bound)
    pub const fn logical_height(self) -> u16 {
        match self {
            Orientation::Portrait | Orientation::PortraitFlipped => PANEL_HEIGHT,
            Orientation::Landscape | Orientation::LandscapeFlipped => PANEL_WIDTH,
        }
    }

    /// Map a logical coordinate to a framebuffer (row, col) cell
    ///
    /// Returns `None` when the coordinate is outside the logical bounds;
    /// callers drop such pixels silently. Within bounds the mapping is a
    /// bijection onto the panel cells.
    pub fn map(self, x: u16, y: u16) -> Option<(u16, u16)> {
        if x >= self.logical_width() || y >= self.logical_height() {
            return None;
        }
        let cell = match self {
            Orientation::Portrait => (y, x),
            Orientation::PortraitFlipped => (PANEL_HEIGHT - 1 - y, PANEL_WIDTH - 1 - x),
            Orientation::Landscape => (PANEL_HEIGHT - 1 - x, y),
            Orientation::LandscapeFlipped => (x, PANEL_WIDTH - 1 - y),
        };
        Some(cell)
    }
}
