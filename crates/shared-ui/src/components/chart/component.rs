use dioxus::prelude::*;

/// A labelled value on a chart. `None` means no data for that slot, which is
/// drawn differently from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: Option<i64>,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: Option<i64>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One heatmap row: a label (e.g. a month) and one cell per day.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSeries {
    pub label: String,
    pub cells: Vec<ChartPoint>,
}

const BAR_AREA_HEIGHT: f64 = 160.0;
const BAR_WIDTH: f64 = 28.0;
const BAR_GAP: f64 = 10.0;
const AXIS_HEIGHT: f64 = 28.0;

const CELL: f64 = 14.0;
const CELL_GAP: f64 = 3.0;
const ROW_LABEL_WIDTH: f64 = 64.0;

/// Heights of each bar scaled so the largest value fills `max_height`.
/// Missing values and an all-zero series give zero-height bars.
pub fn bar_heights(values: &[Option<i64>], max_height: f64) -> Vec<f64> {
    let max = values.iter().flatten().copied().max().unwrap_or(0);
    if max <= 0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| match v {
            Some(v) if *v > 0 => *v as f64 / max as f64 * max_height,
            _ => 0.0,
        })
        .collect()
}

/// Intensity bucket 0..=4 of a heatmap cell relative to the series maximum.
pub fn heat_level(value: Option<i64>, max: i64) -> u8 {
    match value {
        Some(v) if v > 0 && max > 0 => {
            let level = (v * 4 + max - 1) / max;
            level.clamp(1, 4) as u8
        }
        _ => 0,
    }
}

/// Short axis label: "2024-03" becomes "Mar 24", "2024-03-07" becomes "7".
/// Anything else is returned unchanged.
pub fn axis_label(key: &str) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let parts: Vec<&str> = key.split('-').collect();
    match parts.as_slice() {
        [y, m] if y.len() == 4 => match m.parse::<usize>() {
            Ok(m @ 1..=12) => format!("{} {}", MONTHS[m - 1], &y[2..]),
            _ => key.to_string(),
        },
        [_, _, d] => d.trim_start_matches('0').to_string(),
        _ => key.to_string(),
    }
}

/// Vertical bar chart. Each bar carries a `<title>` tooltip with the raw
/// value; months with no data show "no data".
#[component]
pub fn BarChart(title: String, points: Vec<ChartPoint>) -> Element {
    let values: Vec<Option<i64>> = points.iter().map(|p| p.value).collect();
    let heights = bar_heights(&values, BAR_AREA_HEIGHT);
    let width = (points.len().max(1) as f64) * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
    let height = BAR_AREA_HEIGHT + AXIS_HEIGHT;
    let view_box = format!("0 0 {width} {height}");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        figure { class: "chart chart-bar",
            figcaption { class: "chart-title", "{title}" }
            if points.is_empty() {
                p { class: "chart-empty", "No data" }
            } else {
                svg {
                    class: "chart-svg",
                    xmlns: "http://www.w3.org/2000/svg",
                    view_box: "{view_box}",
                    role: "img",
                    "aria-label": "{title}",
                    for (i, (point, h)) in points.iter().zip(heights.iter()).enumerate() {
                        {
                            let x = BAR_GAP + i as f64 * (BAR_WIDTH + BAR_GAP);
                            let y = BAR_AREA_HEIGHT - h;
                            let tip = match point.value {
                                Some(v) => format!("{}: {v}", point.label),
                                None => format!("{}: no data", point.label),
                            };
                            let label = axis_label(&point.label);
                            let label_x = x + BAR_WIDTH / 2.0;
                            let label_y = BAR_AREA_HEIGHT + 18.0;
                            rsx! {
                                g { key: "{point.label}",
                                    rect {
                                        class: if point.value.is_some() { "chart-bar-rect" } else { "chart-bar-rect chart-bar-missing" },
                                        x: "{x}",
                                        y: "{y}",
                                        width: "{BAR_WIDTH}",
                                        height: "{h}",
                                        rx: "3",
                                        title { "{tip}" }
                                    }
                                    text {
                                        class: "chart-axis-label",
                                        x: "{label_x}",
                                        y: "{label_y}",
                                        text_anchor: "middle",
                                        "{label}"
                                    }
                                }
                            }
                        }
                    }
                    line {
                        class: "chart-axis",
                        x1: "0",
                        y1: "{BAR_AREA_HEIGHT}",
                        x2: "{width}",
                        y2: "{BAR_AREA_HEIGHT}",
                    }
                }
            }
        }
    }
}

/// Calendar-style heatmap: one row per series, one cell per point, shaded by
/// [`heat_level`] against the largest value across all rows.
#[component]
pub fn Heatmap(title: String, rows: Vec<HeatmapSeries>) -> Element {
    let max = rows
        .iter()
        .flat_map(|r| r.cells.iter().filter_map(|c| c.value))
        .max()
        .unwrap_or(0);
    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let width = ROW_LABEL_WIDTH + columns as f64 * (CELL + CELL_GAP);
    let height = rows.len() as f64 * (CELL + CELL_GAP) + CELL_GAP;
    let view_box = format!("0 0 {width} {height}");

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        figure { class: "chart chart-heatmap",
            figcaption { class: "chart-title", "{title}" }
            if rows.is_empty() {
                p { class: "chart-empty", "No data" }
            } else {
                svg {
                    class: "chart-svg",
                    xmlns: "http://www.w3.org/2000/svg",
                    view_box: "{view_box}",
                    role: "img",
                    "aria-label": "{title}",
                    for (r, row) in rows.iter().enumerate() {
                        {
                            let y = CELL_GAP + r as f64 * (CELL + CELL_GAP);
                            let text_y = y + CELL - 3.0;
                            let label = axis_label(&row.label);
                            rsx! {
                                g { key: "{row.label}",
                                    text { class: "chart-axis-label", x: "0", y: "{text_y}", "{label}" }
                                    for (c, cell) in row.cells.iter().enumerate() {
                                        {
                                            let x = ROW_LABEL_WIDTH + c as f64 * (CELL + CELL_GAP);
                                            let level = heat_level(cell.value, max);
                                            let tip = format!("{}: {}", cell.label, cell.value.unwrap_or(0));
                                            rsx! {
                                                rect {
                                                    key: "{cell.label}",
                                                    class: "chart-heat-cell heat-{level}",
                                                    x: "{x}",
                                                    y: "{y}",
                                                    width: "{CELL}",
                                                    height: "{CELL}",
                                                    rx: "2",
                                                    title { "{tip}" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "chart-legend",
                    span { "Less" }
                    for level in 0..=4u8 {
                        span { key: "{level}", class: "chart-legend-swatch heat-{level}" }
                    }
                    span { "More" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bars_scale_to_largest_value() {
        let heights = bar_heights(&[Some(2), None, Some(4), Some(0)], 100.0);
        assert_eq!(heights, vec![50.0, 0.0, 100.0, 0.0]);
    }

    #[test]
    fn empty_or_zero_series_is_flat() {
        assert!(bar_heights(&[], 100.0).is_empty());
        assert_eq!(bar_heights(&[None, Some(0)], 100.0), vec![0.0, 0.0]);
    }

    #[test]
    fn heat_levels_bucket_by_quarter() {
        assert_eq!(heat_level(None, 8), 0);
        assert_eq!(heat_level(Some(0), 8), 0);
        assert_eq!(heat_level(Some(1), 8), 1);
        assert_eq!(heat_level(Some(2), 8), 1);
        assert_eq!(heat_level(Some(3), 8), 2);
        assert_eq!(heat_level(Some(6), 8), 3);
        assert_eq!(heat_level(Some(8), 8), 4);
        assert_eq!(heat_level(Some(5), 0), 0);
    }

    #[test]
    fn axis_labels() {
        assert_eq!(axis_label("2024-03"), "Mar 24");
        assert_eq!(axis_label("2024-03-07"), "7");
        assert_eq!(axis_label("2024-13"), "2024-13");
        assert_eq!(axis_label("Total"), "Total");
    }

    #[test]
    fn bar_chart_renders_one_rect_per_point() {
        let points = vec![
            ChartPoint::new("2024-01", Some(3)),
            ChartPoint::new("2024-02", None),
        ];
        let html = dioxus_ssr::render_element(rsx! {
            BarChart { title: "Cases opened", points }
        });
        assert_eq!(html.matches("<rect").count(), 2);
        assert!(html.contains("Cases opened"));
        assert!(html.contains("2024-02: no data"));
    }

    #[test]
    fn empty_heatmap_says_so() {
        let html = dioxus_ssr::render_element(rsx! {
            Heatmap { title: "Daily activity", rows: Vec::new() }
        });
        assert!(html.contains("No data"));
        assert!(!html.contains("<svg"));
    }
}
