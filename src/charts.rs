use serde::Serialize;

use crate::content::ActivityChart;

const PERCENT_MAX: f64 = 100.0;
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.1)";
const TICK_COLOR: &str = "#a0a0a0";
const LEGEND_COLOR: &str = "#e0e0e0";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_thickness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bar_thickness: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<&'static str>,
    pub plugins: Plugins,
    pub scales: Scales,
    pub animation: Animation,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: &'static str,
    pub labels: LegendLabels,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub color: &'static str,
    pub use_point_style: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub mode: &'static str,
    pub intersect: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub stacked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub grid: Grid,
    pub ticks: Ticks,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Animation {
    pub duration: u32,
    pub easing: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueAxis {
    X,
    Y,
}

impl ValueAxis {
    pub fn key(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl ChartConfig {
    pub fn value_axis(&self) -> ValueAxis {
        match self.options.index_axis {
            Some("y") => ValueAxis::X,
            _ => ValueAxis::Y,
        }
    }
}

fn category_axis(stacked: bool) -> Axis {
    Axis {
        stacked,
        begin_at_zero: None,
        max: None,
        grid: Grid { color: GRID_COLOR },
        ticks: Ticks {
            color: TICK_COLOR,
            step_size: None,
        },
    }
}

fn percent_axis(stacked: bool, step: f64) -> Axis {
    Axis {
        stacked,
        begin_at_zero: Some(true),
        max: Some(PERCENT_MAX),
        grid: Grid { color: GRID_COLOR },
        ticks: Ticks {
            color: TICK_COLOR,
            step_size: Some(step),
        },
    }
}

fn datasets(chart: &ActivityChart, bar_thickness: Option<u32>, max_bar_thickness: Option<u32>) -> Vec<Dataset> {
    chart
        .series
        .iter()
        .map(|series| Dataset {
            label: series.label.clone(),
            data: series.data.clone(),
            background_color: series.color.clone(),
            border_color: series.color.clone(),
            border_width: 1,
            bar_thickness,
            max_bar_thickness,
        })
        .collect()
}

/// Grouped vertical bars: share of weekly time per activity at each age.
pub fn time_distribution_chart(chart: &ActivityChart) -> ChartConfig {
    ChartConfig {
        kind: "bar",
        data: ChartData {
            labels: chart.labels.clone(),
            datasets: datasets(chart, None, None),
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            index_axis: None,
            plugins: Plugins {
                legend: Legend {
                    display: false,
                    position: "top",
                    labels: LegendLabels {
                        color: LEGEND_COLOR,
                        use_point_style: true,
                    },
                },
                tooltip: Tooltip {
                    mode: "index",
                    intersect: false,
                },
            },
            scales: Scales {
                x: category_axis(false),
                y: percent_axis(false, 10.0),
            },
            animation: Animation {
                duration: 1_000,
                easing: "easeInOutQuart",
            },
        },
    }
}

/// Horizontal stacked bars: how each age bucket splits into activities.
pub fn age_activity_chart(chart: &ActivityChart) -> ChartConfig {
    ChartConfig {
        kind: "bar",
        data: ChartData {
            labels: chart.labels.clone(),
            datasets: datasets(chart, Some(35), Some(45)),
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            index_axis: Some("y"),
            plugins: Plugins {
                legend: Legend {
                    display: true,
                    position: "bottom",
                    labels: LegendLabels {
                        color: LEGEND_COLOR,
                        use_point_style: true,
                    },
                },
                tooltip: Tooltip {
                    mode: "point",
                    intersect: true,
                },
            },
            scales: Scales {
                x: percent_axis(true, 20.0),
                y: category_axis(true),
            },
            animation: Animation {
                duration: 1_500,
                easing: "easeInOutQuart",
            },
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Share {
    pub label: String,
    pub color: String,
    pub percent: f64,
}

pub fn activity_breakdown(chart: &ActivityChart, index: usize) -> Vec<Share> {
    let mut shares: Vec<Share> = chart
        .series
        .iter()
        .filter_map(|series| {
            let percent = *series.data.get(index)?;
            (percent > 0.0).then(|| Share {
                label: series.label.clone(),
                color: series.color.clone(),
                percent,
            })
        })
        .collect();
    shares.sort_by(|a, b| b.percent.total_cmp(&a.percent));
    shares
}

pub fn peak_shares(chart: &ActivityChart) -> Vec<Share> {
    chart
        .series
        .iter()
        .map(|series| Share {
            label: series.label.clone(),
            color: series.color.clone(),
            percent: series.data.iter().copied().fold(0.0, f64::max).clamp(0.0, 100.0),
        })
        .collect()
}

pub fn percent_label(value: f64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Series;

    fn chart() -> ActivityChart {
        ActivityChart {
            labels: vec!["Age 3".to_string(), "Age 4".to_string()],
            series: vec![
                Series {
                    label: "Learning".to_string(),
                    color: "#4A90E2".to_string(),
                    data: vec![60.0, 100.0],
                },
                Series {
                    label: "Swimming".to_string(),
                    color: "#F5A623".to_string(),
                    data: vec![40.0, 0.0],
                },
            ],
        }
    }

    #[test]
    fn time_distribution_serializes_vertical_grouped_bars() {
        let value = serde_json::to_value(time_distribution_chart(&chart())).expect("serializable");

        assert_eq!(value["type"], "bar");
        assert!(value["options"].get("indexAxis").is_none());
        assert_eq!(value["options"]["scales"]["y"]["max"], 100.0);
        assert_eq!(value["options"]["scales"]["y"]["ticks"]["stepSize"], 10.0);
        assert_eq!(value["options"]["scales"]["x"]["stacked"], false);
        assert_eq!(value["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(value["data"]["datasets"][1]["backgroundColor"], "#F5A623");
        assert!(value["data"]["datasets"][0].get("barThickness").is_none());
    }

    #[test]
    fn age_activity_is_horizontal_and_stacked() {
        let config = age_activity_chart(&chart());
        assert_eq!(config.value_axis(), ValueAxis::X);

        let value = serde_json::to_value(&config).expect("serializable");
        assert_eq!(value["options"]["indexAxis"], "y");
        assert_eq!(value["options"]["scales"]["x"]["stacked"], true);
        assert_eq!(value["options"]["scales"]["y"]["stacked"], true);
        assert_eq!(value["options"]["scales"]["x"]["ticks"]["stepSize"], 20.0);
        assert_eq!(value["data"]["datasets"][0]["barThickness"], 35);
        assert_eq!(value["options"]["animation"]["duration"], 1_500);
    }

    #[test]
    fn breakdown_drops_empty_shares_and_sorts() {
        let shares = activity_breakdown(&chart(), 0);
        let labels: Vec<&str> = shares.iter().map(|share| share.label.as_str()).collect();
        assert_eq!(labels, vec!["Learning", "Swimming"]);

        let only_learning = activity_breakdown(&chart(), 1);
        assert_eq!(only_learning.len(), 1);
        assert_eq!(only_learning[0].percent, 100.0);

        assert!(activity_breakdown(&chart(), 7).is_empty());
    }

    #[test]
    fn peak_shares_take_each_series_maximum() {
        let peaks = peak_shares(&chart());
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].label, "Learning");
        assert_eq!(peaks[0].percent, 100.0);
        assert_eq!(peaks[1].percent, 40.0);

        let empty = ActivityChart {
            labels: Vec::new(),
            series: vec![Series {
                label: "Reading".to_string(),
                color: "#fff".to_string(),
                data: Vec::new(),
            }],
        };
        assert_eq!(peak_shares(&empty)[0].percent, 0.0);
    }

    #[test]
    fn percent_labels_drop_trailing_zeroes() {
        assert_eq!(percent_label(20.0), "20%");
        assert_eq!(percent_label(12.5), "12.5%");
    }
}
