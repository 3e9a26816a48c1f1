//! Grid constants, width helpers and the [`GridPos`] value type.
//!
//! The dashboard grid is a fixed budget of [`COLUMNS`] horizontal units and an
//! unbounded number of vertical units. Every panel occupies the half-open
//! rectangle `[x, x + w) × [y, y + h)`.

use serde::{Deserialize, Serialize};

/// Horizontal capacity of one visual line.
pub const COLUMNS: u32 = 24;

/// Width assigned to panels that did not declare one.
pub const DEFAULT_PANEL_WIDTH: u32 = 12;

/// Height assigned to panels that did not declare one.
pub const DEFAULT_PANEL_HEIGHT: u32 = 8;

/// Vertical units consumed by a row header band.
pub const ROW_HEADER_HEIGHT: u32 = 1;

/// A panel spanning the whole column budget.
#[must_use]
pub const fn full_width() -> u32 {
    COLUMNS
}

/// Two panels per visual line.
#[must_use]
pub const fn half_width() -> u32 {
    COLUMNS / 2
}

/// Three panels per visual line.
#[must_use]
pub const fn third_width() -> u32 {
    COLUMNS / 3
}

/// Four panels per visual line.
#[must_use]
pub const fn quarter_width() -> u32 {
    COLUMNS / 4
}

/// Absolute position and extent of a panel on the dashboard grid.
///
/// `w` and `h` are zero until the author sizes the panel or the layout engine
/// substitutes defaults. `x` and `y` are written by the layout engine only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    /// Left edge, in columns.
    pub x: u32,
    /// Top edge, in grid units.
    pub y: u32,
    /// Width, in columns.
    pub w: u32,
    /// Height, in grid units.
    pub h: u32,
}

impl GridPos {
    /// Creates a grid position from its four coordinates.
    #[must_use]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Returns true if both dimensions are non-zero.
    #[must_use]
    pub const fn is_sized(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// Returns true if the panel fits inside the column budget.
    #[must_use]
    pub const fn fits_columns(&self) -> bool {
        self.right() <= COLUMNS
    }

    /// Returns true if the two rectangles share at least one grid cell.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        if !self.is_sized() || !other.is_sized() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}
