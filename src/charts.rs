use crate::api::{CHATTERS_STATS, USERS_STATS};
use crate::errors::ClientError;
use serde::Serialize;
use serde_json::Value;

const FALLBACK_COLORS: [&str; 5] = ["#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f"];
const TOP_CHATTERS_COLORS: [&str; 5] = ["#990011", "#FFA351", "#2BAE66", "#D9E5D6", "#FFC0CB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Doughnut,
}

impl ChartKind {
    /// Bars are drawn horizontally.
    pub fn index_axis(self) -> Option<&'static str> {
        match self {
            ChartKind::Bar => Some("y"),
            ChartKind::Pie | ChartKind::Doughnut => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub element_id: &'static str,
    pub endpoint: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
}

impl ChartSpec {
    /// Everything needed to draw this chart from `series`.
    pub fn view<'a>(&self, series: &'a ChartSeries) -> ChartView<'a> {
        ChartView {
            element_id: self.element_id,
            kind: self.kind,
            title: self.title,
            index_axis: self.kind.index_axis(),
            series,
            data_labels: series.data_labels(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartView<'a> {
    pub element_id: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<&'static str>,
    #[serde(flatten)]
    pub series: &'a ChartSeries,
    pub data_labels: Vec<String>,
}

pub const TOP_CHATTERS: ChartSpec = ChartSpec {
    element_id: "chatters-histogram",
    endpoint: CHATTERS_STATS,
    kind: ChartKind::Bar,
    title: "Top 5 Chatters",
};

pub const USERS: ChartSpec = ChartSpec {
    element_id: "users-chart",
    endpoint: USERS_STATS,
    kind: ChartKind::Pie,
    title: "Users",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

impl ChartSeries {
    /// Builds a series from a `{label: number}` object, keeping the order the
    /// backend sent. Labels `Win`, `Tie` and `Loss` get their fixed colors.
    pub fn from_value(value: &Value) -> Result<Self, ClientError> {
        let Value::Object(map) = value else {
            return Err(ClientError::shape(format!(
                "chart data must be an object, got {value}"
            )));
        };

        let mut labels = Vec::with_capacity(map.len());
        let mut values = Vec::with_capacity(map.len());
        let mut colors = Vec::with_capacity(map.len());
        for (index, (label, raw)) in map.iter().enumerate() {
            let number = raw.as_f64().ok_or_else(|| {
                ClientError::shape(format!("chart value for {label:?} is not a number"))
            })?;
            colors.push(outcome_color(label, index).to_string());
            labels.push(label.clone());
            values.push(number);
        }

        Ok(Self {
            labels,
            values,
            colors,
        })
    }

    /// Recolors the series with the top chatters palette.
    pub fn with_chatters_palette(mut self) -> Self {
        self.colors = (0..self.labels.len())
            .map(|index| TOP_CHATTERS_COLORS[index % TOP_CHATTERS_COLORS.len()].to_string())
            .collect();
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn data_labels(&self) -> Vec<String> {
        self.values.iter().copied().map(format_data_label).collect()
    }
}

fn outcome_color(label: &str, index: usize) -> &'static str {
    match label {
        "Win" => "#59a14f",
        "Tie" => "#FFEB3B",
        "Loss" => "#e15759",
        _ => FALLBACK_COLORS[index % FALLBACK_COLORS.len()],
    }
}

pub fn format_data_label(value: f64) -> String {
    format!("{value}%")
}
