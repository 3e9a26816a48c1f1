//! Panel variants and the grid-position capability they share.
//!
//! The panel set is closed: [`Panel`] enumerates every kind the layout engine
//! knows how to place. A panel whose `type` is not recognized deserializes to
//! [`Panel::Unknown`], which keeps the source object verbatim, exposes no grid
//! position and is skipped by layout.
//!
//! - [`Positioned`]: read/write access to a panel's [`GridPos`]
//! - [`PanelSpec`]: builder methods common to every concrete panel
//! - [`TimeSeriesPanel`], [`StatPanel`], [`TablePanel`]: the concrete kinds

use serde::{Deserialize, Serialize};

use crate::grid::GridPos;

/// The kind of a known panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// Line/area graph over time.
    TimeSeries,
    /// Single reduced value.
    Stat,
    /// Tabular query result.
    Table,
}

impl PanelKind {
    /// Returns the kind as the renderer's `type` string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TimeSeries => "timeseries",
            Self::Stat => "stat",
            Self::Table => "table",
        }
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability of owning a mutable grid position.
pub trait Positioned {
    /// Returns the panel's grid position.
    fn grid_pos(&self) -> &GridPos;

    /// Returns the panel's grid position for mutation.
    fn grid_pos_mut(&mut self) -> &mut GridPos;

    /// Overwrites all four coordinates at once.
    fn set_grid_pos(&mut self, pos: GridPos) {
        *self.grid_pos_mut() = pos;
    }

    /// Declares the panel's size. Zero leaves the dimension to the layout
    /// engine's default.
    #[must_use]
    fn with_size(mut self, w: u32, h: u32) -> Self
    where
        Self: Sized,
    {
        let pos = self.grid_pos_mut();
        pos.w = w;
        pos.h = h;
        self
    }
}

/// A query attached to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Query identifier, unique within the panel (`A`, `B`, ...).
    #[serde(default)]
    pub ref_id: String,
    /// Query expression, opaque to this crate.
    pub expr: String,
    /// Legend template for the resulting series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,
}

impl Target {
    /// Creates a target for the given expression. The ref id is assigned when
    /// the target is attached to a panel.
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            ref_id: String::new(),
            expr: expr.into(),
            legend_format: None,
        }
    }

    /// Sets the legend template.
    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend_format = Some(legend.into());
        self
    }
}

/// Spreadsheet-style ref id for the target at `index`: `A`..`Z`, `AA`, `AB`, ...
fn ref_id_for(index: usize) -> String {
    let mut n = index + 1;
    let mut id = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        id.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    id.reverse();
    String::from_utf8_lossy(&id).into_owned()
}

/// Fields shared by every known panel kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelMeta {
    /// Panel title.
    pub title: String,
    /// Optional description shown as a tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Datasource name or uid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    /// Queries in declaration order.
    #[serde(default)]
    pub targets: Vec<Target>,
    /// Position on the dashboard grid.
    #[serde(default)]
    pub grid_pos: GridPos,
}

impl PanelMeta {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Builder surface shared by every concrete panel kind.
pub trait PanelSpec: Sized {
    /// The kind this type renders as.
    const KIND: PanelKind;

    /// Returns the shared fields.
    fn meta(&self) -> &PanelMeta;

    /// Returns the shared fields for mutation.
    fn meta_mut(&mut self) -> &mut PanelMeta;

    /// Sets the description.
    #[must_use]
    fn with_description(mut self, description: impl Into<String>) -> Self {
        self.meta_mut().description = Some(description.into());
        self
    }

    /// Sets the datasource.
    #[must_use]
    fn with_datasource(mut self, datasource: impl Into<String>) -> Self {
        self.meta_mut().datasource = Some(datasource.into());
        self
    }

    /// Appends a query, assigning the next free ref id.
    #[must_use]
    fn with_target(mut self, mut target: Target) -> Self {
        let targets = &mut self.meta_mut().targets;
        target.ref_id = ref_id_for(targets.len());
        targets.push(target);
        self
    }
}

impl<T: PanelSpec> Positioned for T {
    fn grid_pos(&self) -> &GridPos {
        &self.meta().grid_pos
    }

    fn grid_pos_mut(&mut self) -> &mut GridPos {
        &mut self.meta_mut().grid_pos
    }
}

/// A graph of one or more series over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPanel {
    /// Shared panel fields.
    #[serde(flatten)]
    pub meta: PanelMeta,
    /// Display unit for the Y axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Whether series are stacked.
    #[serde(default)]
    pub stacked: bool,
}

impl TimeSeriesPanel {
    /// Creates an unsized time-series panel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            meta: PanelMeta::new(title),
            unit: None,
            stacked: false,
        }
    }

    /// Sets the Y axis unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Stacks the series.
    #[must_use]
    pub const fn stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }
}

impl PanelSpec for TimeSeriesPanel {
    const KIND: PanelKind = PanelKind::TimeSeries;

    fn meta(&self) -> &PanelMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut PanelMeta {
        &mut self.meta
    }
}

/// How a stat panel reduces a series to one value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReduceCalc {
    /// Last non-null sample.
    #[default]
    LastNotNull,
    /// Arithmetic mean.
    Mean,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Sum of samples.
    Sum,
}

/// A single reduced value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatPanel {
    /// Shared panel fields.
    #[serde(flatten)]
    pub meta: PanelMeta,
    /// Display unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reduction applied to each series.
    #[serde(default)]
    pub reduce: ReduceCalc,
}

impl StatPanel {
    /// Creates an unsized stat panel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            meta: PanelMeta::new(title),
            unit: None,
            reduce: ReduceCalc::default(),
        }
    }

    /// Sets the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the reduction.
    #[must_use]
    pub const fn with_reduce(mut self, reduce: ReduceCalc) -> Self {
        self.reduce = reduce;
        self
    }
}

impl PanelSpec for StatPanel {
    const KIND: PanelKind = PanelKind::Stat;

    fn meta(&self) -> &PanelMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut PanelMeta {
        &mut self.meta
    }
}

/// Tabular view of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePanel {
    /// Shared panel fields.
    #[serde(flatten)]
    pub meta: PanelMeta,
    /// Columns to show, in order. Empty shows all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl TablePanel {
    /// Creates an unsized table panel.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            meta: PanelMeta::new(title),
            columns: Vec::new(),
        }
    }

    /// Appends a visible column.
    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }
}

impl PanelSpec for TablePanel {
    const KIND: PanelKind = PanelKind::Table;

    fn meta(&self) -> &PanelMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut PanelMeta {
        &mut self.meta
    }
}

/// Any panel a row can hold.
///
/// Known kinds are internally tagged by `type`. Any other object is kept
/// verbatim in [`Panel::Unknown`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// Time-series graph.
    TimeSeries(TimeSeriesPanel),
    /// Single stat.
    Stat(StatPanel),
    /// Table.
    Table(TablePanel),
    /// A panel kind this crate does not know, as it was read. Layout skips it.
    Unknown(serde_json::Value),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum KnownPanelRef<'a> {
    #[serde(rename = "timeseries")]
    TimeSeries(&'a TimeSeriesPanel),
    #[serde(rename = "stat")]
    Stat(&'a StatPanel),
    #[serde(rename = "table")]
    Table(&'a TablePanel),
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum KnownPanel {
    #[serde(rename = "timeseries")]
    TimeSeries(TimeSeriesPanel),
    #[serde(rename = "stat")]
    Stat(StatPanel),
    #[serde(rename = "table")]
    Table(TablePanel),
}

impl From<KnownPanel> for Panel {
    fn from(panel: KnownPanel) -> Self {
        match panel {
            KnownPanel::TimeSeries(p) => Self::TimeSeries(p),
            KnownPanel::Stat(p) => Self::Stat(p),
            KnownPanel::Table(p) => Self::Table(p),
        }
    }
}

impl Serialize for Panel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::TimeSeries(p) => KnownPanelRef::TimeSeries(p).serialize(serializer),
            Self::Stat(p) => KnownPanelRef::Stat(p).serialize(serializer),
            Self::Table(p) => KnownPanelRef::Table(p).serialize(serializer),
            Self::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Panel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let known = [PanelKind::TimeSeries, PanelKind::Stat, PanelKind::Table];
        let is_known = raw
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|ty| known.iter().any(|k| k.as_str() == ty));

        if !is_known {
            return Ok(Self::Unknown(raw));
        }
        KnownPanel::deserialize(raw)
            .map(Self::from)
            .map_err(serde::de::Error::custom)
    }
}

impl Panel {
    /// Returns the panel kind, or `None` for [`Panel::Unknown`].
    #[must_use]
    pub const fn kind(&self) -> Option<PanelKind> {
        match self {
            Self::TimeSeries(_) => Some(TimeSeriesPanel::KIND),
            Self::Stat(_) => Some(StatPanel::KIND),
            Self::Table(_) => Some(TablePanel::KIND),
            Self::Unknown(_) => None,
        }
    }

    fn meta(&self) -> Option<&PanelMeta> {
        match self {
            Self::TimeSeries(p) => Some(p.meta()),
            Self::Stat(p) => Some(p.meta()),
            Self::Table(p) => Some(p.meta()),
            Self::Unknown(_) => None,
        }
    }

    /// Returns the panel title, if the kind is known.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.meta().map(|m| m.title.as_str())
    }

    /// Returns the grid position, or `None` for an unknown kind.
    #[must_use]
    pub fn grid_pos(&self) -> Option<&GridPos> {
        self.meta().map(|m| &m.grid_pos)
    }

    /// Returns the grid position for mutation, or `None` for an unknown kind.
    pub fn grid_pos_mut(&mut self) -> Option<&mut GridPos> {
        match self {
            Self::TimeSeries(p) => Some(p.grid_pos_mut()),
            Self::Stat(p) => Some(p.grid_pos_mut()),
            Self::Table(p) => Some(p.grid_pos_mut()),
            Self::Unknown(_) => None,
        }
    }

    /// Writes all four coordinates. Returns false if the kind is unknown.
    pub fn set_grid_pos(&mut self, pos: GridPos) -> bool {
        match self.grid_pos_mut() {
            Some(slot) => {
                *slot = pos;
                true
            }
            None => false,
        }
    }
}

impl From<TimeSeriesPanel> for Panel {
    fn from(panel: TimeSeriesPanel) -> Self {
        Self::TimeSeries(panel)
    }
}

impl From<StatPanel> for Panel {
    fn from(panel: StatPanel) -> Self {
        Self::Stat(panel)
    }
}

impl From<TablePanel> for Panel {
    fn from(panel: TablePanel) -> Self {
        Self::Table(panel)
    }
}
