//! Dashboard and row model.
//!
//! A [`Dashboard`] owns an ordered list of [`Row`]s and each row owns an
//! ordered list of [`Panel`]s. Insertion order is significant: it is the
//! order in which the layout engine places panels.

use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;
use crate::layout::{LayoutEngine, LayoutReport};
use crate::panel::Panel;

/// Relative time window shown by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the window, e.g. `now-6h`.
    pub from: String,
    /// End of the window, e.g. `now`.
    pub to: String,
}

impl TimeRange {
    /// Creates a time range.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new("now-6h", "now")
    }
}

/// A titled, optionally collapsed group of panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row header title.
    pub title: String,
    /// Collapsed rows hide their panels and are not laid out.
    #[serde(default)]
    pub collapsed: bool,
    /// Panels in left-to-right, top-to-bottom order.
    #[serde(default)]
    pub panels: Vec<Panel>,
}

impl Row {
    /// Creates an expanded, empty row.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            collapsed: false,
            panels: Vec::new(),
        }
    }

    /// Sets whether the row is collapsed.
    #[must_use]
    pub const fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Appends a panel.
    #[must_use]
    pub fn with_panel(mut self, panel: impl Into<Panel>) -> Self {
        self.panels.push(panel.into());
        self
    }

    /// Returns true if the row holds no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// A dashboard declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Stable identifier, if the author pinned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Dashboard title.
    pub title: String,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Default time window.
    #[serde(default)]
    pub time: TimeRange,
    /// Auto-refresh interval, e.g. `30s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    /// Rows in top-to-bottom order.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Dashboard {
    /// Creates an empty dashboard.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uid: None,
            title: title.into(),
            tags: Vec::new(),
            time: TimeRange::default(),
            refresh: None,
            rows: Vec::new(),
        }
    }

    /// Pins the dashboard uid.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Adds a search tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the default time window.
    #[must_use]
    pub fn with_time_range(mut self, time: TimeRange) -> Self {
        self.time = time;
        self
    }

    /// Sets the auto-refresh interval.
    #[must_use]
    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    /// Appends a row.
    #[must_use]
    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Iterates over every panel in row order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.panels.iter())
    }

    /// Total number of panels across all rows.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(|row| row.panels.len()).sum()
    }

    /// Assigns grid positions with the default layout engine.
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration; see [`LayoutEngine::apply`].
    pub fn auto_layout(&mut self) -> DashboardResult<LayoutReport> {
        LayoutEngine::default().apply(self)
    }

    /// Serializes the dashboard to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Serialization` if encoding fails.
    pub fn to_json(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the dashboard to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a dashboard from JSON.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Serialization` if the input is not a valid
    /// dashboard document.
    pub fn from_json(json: &str) -> DashboardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
