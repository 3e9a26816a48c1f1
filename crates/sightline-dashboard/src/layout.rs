//! Grid auto-layout.
//!
//! The engine makes one top-down pass over a dashboard's rows, packing each
//! row's panels left to right and wrapping to a new visual line whenever the
//! next panel would cross the column budget:
//!
//! 1. Every row first consumes [`ROW_HEADER_HEIGHT`] for its header band.
//! 2. Collapsed rows stop there; their panels keep whatever position they had.
//! 3. Panels without a declared size get [`DEFAULT_PANEL_WIDTH`] and
//!    [`DEFAULT_PANEL_HEIGHT`] before the wrap check.
//! 4. A panel that exactly fills the remaining width stays on the current
//!    line; the next panel wraps.
//! 5. After the last panel the cursor drops below the tallest panel of the
//!    row's final visual line.
//!
//! Panels of unknown kind are skipped without moving the cursor.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::{LayoutConfig, OverflowPolicy};
use crate::dashboard::Dashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::grid::{GridPos, COLUMNS, DEFAULT_PANEL_HEIGHT, DEFAULT_PANEL_WIDTH, ROW_HEADER_HEIGHT};

/// Summary of one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutReport {
    /// Panels that received a position.
    pub panels_placed: usize,
    /// Panels of unknown kind that were skipped.
    pub panels_skipped: usize,
    /// Rows that were collapsed and contributed only their header.
    pub rows_collapsed: usize,
    /// Final vertical cursor, i.e. the total grid height used.
    pub height: u32,
}

/// Assigns absolute grid positions to every panel of a dashboard.
///
/// The engine is stateless between calls; one engine can lay out any number
/// of dashboards, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `dashboard` in place.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::PanelTooWide` if the overflow policy is
    /// [`OverflowPolicy::Reject`] and an expanded row holds a panel wider than
    /// [`COLUMNS`]. In that case no panel is modified. With any other policy
    /// this never fails.
    pub fn apply(&self, dashboard: &mut Dashboard) -> DashboardResult<LayoutReport> {
        if self.config.overflow == OverflowPolicy::Reject {
            check_widths(dashboard)?;
        }

        debug!(
            dashboard = %dashboard.title,
            rows = dashboard.rows.len(),
            overflow = %self.config.overflow,
            "computing layout"
        );

        let mut report = LayoutReport::default();
        let mut cursor_y: u32 = 0;

        for (row_index, row) in dashboard.rows.iter_mut().enumerate() {
            cursor_y = cursor_y.saturating_add(ROW_HEADER_HEIGHT);

            if row.collapsed {
                trace!(row = row_index, title = %row.title, "row collapsed, header only");
                report.rows_collapsed += 1;
                continue;
            }

            let mut cursor_x: u32 = 0;
            let mut line_max_height: u32 = 0;

            for (panel_index, panel) in row.panels.iter_mut().enumerate() {
                let Some(pos) = panel.grid_pos_mut() else {
                    trace!(row = row_index, panel = panel_index, "skipping panel of unknown kind");
                    report.panels_skipped += 1;
                    continue;
                };

                let w = self.resolve_width(pos.w, row_index, panel_index);
                let h = if pos.h > 0 { pos.h } else { DEFAULT_PANEL_HEIGHT };

                if cursor_x.saturating_add(w) > COLUMNS {
                    cursor_x = 0;
                    cursor_y = cursor_y.saturating_add(line_max_height);
                    line_max_height = 0;
                }

                *pos = GridPos::new(cursor_x, cursor_y, w, h);
                trace!(row = row_index, panel = panel_index, pos = %pos, "placed panel");

                cursor_x = cursor_x.saturating_add(w);
                line_max_height = line_max_height.max(h);
                report.panels_placed += 1;
            }

            cursor_y = cursor_y.saturating_add(line_max_height);
        }

        report.height = cursor_y;
        debug!(
            dashboard = %dashboard.title,
            placed = report.panels_placed,
            skipped = report.panels_skipped,
            collapsed = report.rows_collapsed,
            height = report.height,
            "layout complete"
        );

        Ok(report)
    }

    fn resolve_width(&self, declared: u32, row: usize, panel: usize) -> u32 {
        if declared == 0 {
            return DEFAULT_PANEL_WIDTH;
        }
        if declared <= COLUMNS {
            return declared;
        }
        match self.config.overflow {
            OverflowPolicy::Clamp => {
                warn!(row, panel, width = declared, columns = COLUMNS, "clamping over-wide panel");
                COLUMNS
            }
            // Reject is caught by the pre-pass.
            OverflowPolicy::Tolerate | OverflowPolicy::Reject => {
                warn!(row, panel, width = declared, columns = COLUMNS, "placing over-wide panel");
                declared
            }
        }
    }
}

/// Lays out `dashboard` with the default engine.
///
/// # Errors
///
/// Never fails with the default configuration. The error channel is kept for
/// stricter engines; see [`LayoutEngine::apply`].
pub fn compute_layout(dashboard: &mut Dashboard) -> DashboardResult<LayoutReport> {
    LayoutEngine::default().apply(dashboard)
}

fn check_widths(dashboard: &Dashboard) -> DashboardResult<()> {
    for (row_index, row) in dashboard.rows.iter().enumerate() {
        if row.collapsed {
            continue;
        }
        for (panel_index, panel) in row.panels.iter().enumerate() {
            if let Some(pos) = panel.grid_pos() {
                if pos.w > COLUMNS {
                    return Err(DashboardError::PanelTooWide {
                        row: row_index,
                        panel: panel_index,
                        width: pos.w,
                        columns: COLUMNS,
                    });
                }
            }
        }
    }
    Ok(())
}
