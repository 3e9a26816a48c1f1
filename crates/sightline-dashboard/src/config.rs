//! Layout engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::DashboardResult;

/// What the layout engine does with a panel declared wider than the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Place the panel at its declared width. Non-overlap is not guaranteed.
    #[default]
    Tolerate,
    /// Shrink the panel to the column budget before placing it.
    Clamp,
    /// Fail the whole layout pass without touching any panel.
    Reject,
}

impl OverflowPolicy {
    /// Returns the policy as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tolerate => "tolerate",
            Self::Clamp => "clamp",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Handling of panels wider than the column budget.
    pub overflow: OverflowPolicy,
}

impl LayoutConfig {
    /// Create a configuration with the default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the over-wide panel policy.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Parse a configuration from a JSON document. Missing keys take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Serialization` if the document is malformed.
    pub fn from_json(json: &str) -> DashboardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
