//! Error types for dashboard layout and serialization.

use thiserror::Error;

use crate::validate::LayoutViolation;

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors that can occur while laying out or encoding a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A panel is wider than the column budget and the engine is configured
    /// to reject such panels.
    #[error("panel {panel} in row {row} is {width} columns wide, limit is {columns}")]
    PanelTooWide {
        /// Index of the row holding the panel.
        row: usize,
        /// Index of the panel within its row.
        panel: usize,
        /// Declared width.
        width: u32,
        /// Column budget.
        columns: u32,
    },

    /// A laid-out dashboard breaks a grid invariant.
    #[error("invalid layout: {} violation(s), first: {}", .0.len(), first_violation(.0))]
    InvalidLayout(Vec<LayoutViolation>),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

fn first_violation(violations: &[LayoutViolation]) -> String {
    violations
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPos;
    use crate::validate::PanelRef;

    #[test]
    fn test_panel_too_wide_display() {
        let err = DashboardError::PanelTooWide {
            row: 1,
            panel: 2,
            width: 30,
            columns: 24,
        };
        assert_eq!(
            err.to_string(),
            "panel 2 in row 1 is 30 columns wide, limit is 24"
        );
    }

    #[test]
    fn test_invalid_layout_display() {
        let violation = LayoutViolation::OutOfBounds {
            panel: PanelRef::new(0, 0, "cpu"),
            pos: GridPos::new(18, 1, 12, 8),
        };
        let err = DashboardError::InvalidLayout(vec![violation]);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid layout: 1 violation(s)"));
        assert!(msg.contains("cpu"));
    }

    #[test]
    fn test_invalid_layout_empty() {
        let err = DashboardError::InvalidLayout(Vec::new());
        assert_eq!(err.to_string(), "invalid layout: 0 violation(s), first: none");
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err = DashboardError::from(serde_err);
        assert!(matches!(err, DashboardError::Serialization(_)));
    }
}
