//! # sightline-dashboard
//!
//! Dashboard declarations and grid auto-layout for Sightline.
//!
//! Dashboards are declared as ordered rows of panels. Authors may size a panel
//! with [`Positioned::with_size`] or leave it to the defaults; the layout
//! engine then assigns every panel an absolute [`GridPos`] on a 24-column
//! grid, wrapping panels that do not fit on the current line.
//!
//! ## Features
//!
//! - **Panel model**: time-series, stat and table panels behind one [`Panel`] enum
//! - **Auto-layout**: deterministic left-to-right, top-to-bottom packing
//! - **Collapsed rows**: only the header band is reserved
//! - **Overflow policies**: tolerate, clamp or reject over-wide panels
//! - **Validation**: post-layout bounds, overlap and row-order checks
//! - **JSON hand-off**: panels carry `gridPos: {x, y, w, h}` for renderers
//!
//! ## Example
//!
//! ```rust
//! use sightline_dashboard::{
//!     compute_layout, grid, Dashboard, GridPos, Positioned, Row, StatPanel, TimeSeriesPanel,
//! };
//!
//! let mut dashboard = Dashboard::new("API overview").with_row(
//!     Row::new("Traffic")
//!         .with_panel(StatPanel::new("Requests").with_size(grid::quarter_width(), 4))
//!         .with_panel(StatPanel::new("Errors").with_size(grid::quarter_width(), 4))
//!         .with_panel(TimeSeriesPanel::new("Latency")),
//! );
//!
//! let report = compute_layout(&mut dashboard).unwrap();
//! assert_eq!(report.panels_placed, 3);
//! assert_eq!(
//!     dashboard.rows[0].panels[2].grid_pos(),
//!     Some(&GridPos::new(12, 1, 12, 8))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod grid;
pub mod layout;
pub mod panel;
pub mod validate;

#[cfg(test)]
mod tests;

// Re-export main types
pub use config::{LayoutConfig, OverflowPolicy};
pub use dashboard::{Dashboard, Row, TimeRange};
pub use error::{DashboardError, DashboardResult};
pub use grid::{
    full_width, half_width, quarter_width, third_width, GridPos, COLUMNS, DEFAULT_PANEL_HEIGHT,
    DEFAULT_PANEL_WIDTH, ROW_HEADER_HEIGHT,
};
pub use layout::{compute_layout, LayoutEngine, LayoutReport};
pub use panel::{
    Panel, PanelKind, PanelMeta, PanelSpec, Positioned, ReduceCalc, StatPanel, TablePanel,
    Target, TimeSeriesPanel,
};
pub use validate::{check_layout, validate_layout, LayoutViolation, PanelRef};
