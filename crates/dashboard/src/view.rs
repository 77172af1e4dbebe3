use core_types::{DashboardTab, DateRange};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shown in place of metrics and charts when the range holds no data.
pub const NO_DATA_MESSAGE: &str = "No data for selected range";

/// Everything one tab displays for one date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabView {
    pub tab: DashboardTab,
    pub title: String,
    pub range: DateRange,
    pub no_data: bool,
    pub message: Option<String>,
    pub metrics: Vec<Metric>,
    pub charts: Vec<Chart>,
}

impl TabView {
    pub fn new(tab: DashboardTab, range: DateRange, metrics: Vec<Metric>, charts: Vec<Chart>) -> Self {
        Self {
            tab,
            title: tab.title().to_string(),
            range,
            no_data: false,
            message: None,
            metrics,
            charts,
        }
    }

    /// The placeholder rendered for an empty selection.
    pub fn no_data(tab: DashboardTab, range: DateRange) -> Self {
        Self {
            tab,
            title: tab.title().to_string(),
            range,
            no_data: true,
            message: Some(NO_DATA_MESSAGE.to_string()),
            metrics: Vec::new(),
            charts: Vec::new(),
        }
    }
}

/// A single headline number, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Series data for one chart; drawing it is left to the caller.
///
/// `x_label` names the axis carrying the point labels, `y_label` the axis
/// carrying the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

/// One bar or line vertex. `highlight` marks the "most common" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
    pub highlight: bool,
}
