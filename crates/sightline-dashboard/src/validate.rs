//! Post-layout invariant checks.
//!
//! [`validate_layout`] inspects the panels of every expanded row and reports
//! each broken grid invariant instead of stopping at the first one. Panels of
//! collapsed rows and panels of unknown kind are not inspected.

use std::fmt;

use tracing::debug;

use crate::dashboard::Dashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::grid::{GridPos, COLUMNS};

/// Identifies a panel by its location in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelRef {
    /// Row index.
    pub row: usize,
    /// Panel index within the row.
    pub index: usize,
    /// Panel title.
    pub title: String,
}

impl PanelRef {
    /// Creates a panel reference.
    pub fn new(row: usize, index: usize, title: impl Into<String>) -> Self {
        Self {
            row,
            index,
            title: title.into(),
        }
    }
}

impl fmt::Display for PanelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (row {}, panel {})", self.title, self.row, self.index)
    }
}

/// A broken grid invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    /// Zero width or height.
    Unsized {
        /// Offending panel.
        panel: PanelRef,
        /// Its position.
        pos: GridPos,
    },
    /// Extends past the column budget.
    OutOfBounds {
        /// Offending panel.
        panel: PanelRef,
        /// Its position.
        pos: GridPos,
    },
    /// Two panels share a grid cell.
    Overlap {
        /// Earlier panel in row order.
        first: PanelRef,
        /// Later panel in row order.
        second: PanelRef,
    },
    /// A row's panels start above the bottom panel of an earlier row.
    RowOrder {
        /// Index of the row that starts too high.
        row: usize,
        /// Smallest Y among its panels.
        min_y: u32,
        /// Largest Y among the preceding expanded row's panels.
        previous_max_y: u32,
    },
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsized { panel, pos } => write!(f, "{panel} has no size: {pos}"),
            Self::OutOfBounds { panel, pos } => {
                write!(f, "{panel} exceeds {COLUMNS} columns: {pos}")
            }
            Self::Overlap { first, second } => write!(f, "{first} overlaps {second}"),
            Self::RowOrder {
                row,
                min_y,
                previous_max_y,
            } => write!(
                f,
                "row {row} starts at y={min_y}, not below previous row at y={previous_max_y}"
            ),
        }
    }
}

/// Checks every laid-out panel against the grid invariants.
#[must_use]
pub fn validate_layout(dashboard: &Dashboard) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();
    let mut placed: Vec<(PanelRef, GridPos)> = Vec::new();
    let mut previous_max_y: Option<u32> = None;

    for (row_index, row) in dashboard.rows.iter().enumerate() {
        if row.collapsed {
            continue;
        }

        let mut row_min_y: Option<u32> = None;
        let mut row_max_y: Option<u32> = None;

        for (panel_index, panel) in row.panels.iter().enumerate() {
            let Some(pos) = panel.grid_pos().copied() else {
                continue;
            };
            let panel_ref = PanelRef::new(row_index, panel_index, panel.title().unwrap_or_default());

            if !pos.is_sized() {
                violations.push(LayoutViolation::Unsized {
                    panel: panel_ref.clone(),
                    pos,
                });
            }
            if !pos.fits_columns() {
                violations.push(LayoutViolation::OutOfBounds {
                    panel: panel_ref.clone(),
                    pos,
                });
            }
            for (other_ref, other_pos) in &placed {
                if other_pos.overlaps(&pos) {
                    violations.push(LayoutViolation::Overlap {
                        first: other_ref.clone(),
                        second: panel_ref.clone(),
                    });
                }
            }

            row_min_y = Some(row_min_y.map_or(pos.y, |y| y.min(pos.y)));
            row_max_y = Some(row_max_y.map_or(pos.y, |y| y.max(pos.y)));
            placed.push((panel_ref, pos));
        }

        if let (Some(min_y), Some(prev)) = (row_min_y, previous_max_y) {
            if min_y <= prev {
                violations.push(LayoutViolation::RowOrder {
                    row: row_index,
                    min_y,
                    previous_max_y: prev,
                });
            }
        }
        if row_max_y.is_some() {
            previous_max_y = row_max_y;
        }
    }

    debug!(
        dashboard = %dashboard.title,
        panels = placed.len(),
        violations = violations.len(),
        "validated layout"
    );
    violations
}

/// Like [`validate_layout`], but as a result.
///
/// # Errors
///
/// Returns `DashboardError::InvalidLayout` carrying every violation found.
pub fn check_layout(dashboard: &Dashboard) -> DashboardResult<()> {
    let violations = validate_layout(dashboard);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::InvalidLayout(violations))
    }
}
