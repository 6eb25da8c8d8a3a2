use dioxus::prelude::*;
use shared_types::dashboard::{
    dashboard_charts, dashboard_offices, range_summary, ChartConfig, DataPoint, HeatmapRow,
    SummaryRange, DASHBOARD_TITLE, MONTHLY_METRICS,
};
use shared_types::{DataByRange, SummaryQuery};
use shared_ui::components::{
    BarChart, Card, CardContent, ChartPoint, FormSelect, Heatmap, HeatmapSeries, Input,
    PageHeader, PageSubtitle, PageTitle, SkeletonRows,
};

use crate::format_helpers::error_message;

fn chart_points(points: &[DataPoint]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint::new(p.date.clone(), p.value))
        .collect()
}

/// Heatmap rows labelled "metric · month".
pub fn heatmap_series(rows: &[HeatmapRow]) -> Vec<HeatmapSeries> {
    rows.iter()
        .map(|r| HeatmapSeries {
            label: format!("{} · {}", r.metric, r.month),
            cells: chart_points(&r.points),
        })
        .collect()
}

/// Query for the month inputs; blank inputs leave the server defaults.
pub fn summary_query(start: &str, end: &str) -> SummaryQuery {
    let param = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());
    SummaryQuery {
        start_month: param(start),
        end_month: param(end),
    }
}

/// Totals for `office` in metric order, as display strings.
fn range_totals(totals: &DataByRange, office: &str) -> Vec<(&'static str, String)> {
    let values = totals.data_per_case_office.get(office);
    MONTHLY_METRICS
        .iter()
        .map(|metric| {
            let value = values
                .and_then(|v| v.get(*metric).copied().flatten())
                .map(|n| n.to_string())
                .unwrap_or_else(|| "–".to_string());
            (*metric, value)
        })
        .collect()
}

#[component]
pub fn Dashboard() -> Element {
    let mut start_month = use_signal(String::new);
    let mut end_month = use_signal(String::new);
    let mut office = use_signal(String::new);

    let monthly = use_resource(move || async move {
        server::api::get_monthly_summary(summary_query(&start_month(), &end_month())).await
    });
    let daily = use_resource(move || async move {
        server::api::get_daily_summary(summary_query(&start_month(), &end_month())).await
    });

    let monthly_data = monthly.read().clone();
    let daily_data = daily.read().clone();
    let monthly_ok = monthly_data.as_ref().and_then(|r| r.as_ref().ok());
    let daily_ok = daily_data.as_ref().and_then(|r| r.as_ref().ok());
    let offices = dashboard_offices(monthly_ok, daily_ok);

    use_effect(move || {
        let monthly = monthly.read();
        let daily = daily.read();
        let available = dashboard_offices(
            monthly.as_ref().and_then(|r| r.as_ref().ok()),
            daily.as_ref().and_then(|r| r.as_ref().ok()),
        );
        let current = office.peek().clone();
        if !available.contains(&current) {
            if let Some(first) = available.into_iter().next() {
                office.set(first);
            }
        }
    });

    let selected = office();
    let charts = dashboard_charts(monthly_ok, daily_ok, &selected);
    let totals = monthly_ok.and_then(|m| {
        let query = summary_query(&start_month(), &end_month());
        let today = chrono::Local::now().date_naive();
        SummaryRange::from_query(&query, today)
            .ok()
            .map(|range| range_summary(&range, m))
    });
    let error = match (&monthly_data, &daily_data) {
        (Some(Err(e)), _) | (_, Some(Err(e))) => Some(error_message(e)),
        _ => None,
    };
    let loading = monthly_data.is_none() || daily_data.is_none();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }
        div { class: "container",
            PageHeader {
                div {
                    PageTitle { "{DASHBOARD_TITLE}" }
                    if let Some(t) = &totals {
                        PageSubtitle { "{t.start} to {t.end}" }
                    }
                }
            }

            div { class: "dashboard-filters",
                Input {
                    label: "From",
                    input_type: "month",
                    value: start_month(),
                    on_input: move |e: FormEvent| start_month.set(e.value()),
                }
                Input {
                    label: "To",
                    input_type: "month",
                    value: end_month(),
                    on_input: move |e: FormEvent| end_month.set(e.value()),
                }
                FormSelect {
                    label: "Case office",
                    value: selected.clone(),
                    disabled: offices.is_empty(),
                    onchange: move |e: Event<FormData>| office.set(e.value()),
                    for name in offices.iter() {
                        option {
                            key: "{name}",
                            value: "{name}",
                            selected: *name == selected,
                            "{name}"
                        }
                    }
                }
            }

            if let Some(msg) = error {
                p { class: "error-text", "{msg}" }
            } else if loading {
                SkeletonRows { count: 6 }
            } else {
                if let Some(t) = &totals {
                    div { class: "dashboard-totals",
                        for (metric, value) in range_totals(t, &selected) {
                            div { key: "{metric}", class: "dashboard-total",
                                span { class: "dashboard-total-value", "{value}" }
                                span { class: "dashboard-total-label", "{metric}" }
                            }
                        }
                    }
                }
                div { class: "dashboard-grid",
                    for chart in charts {
                        {match chart {
                            ChartConfig::Bar { title, points } => rsx! {
                                Card { key: "{title}",
                                    CardContent {
                                        BarChart { title: title.clone(), points: chart_points(&points) }
                                    }
                                }
                            },
                            ChartConfig::Heatmap { title, rows, .. } => rsx! {
                                Card { key: "{title}", class: "dashboard-wide",
                                    CardContent {
                                        Heatmap { title: title.clone(), rows: heatmap_series(&rows) }
                                    }
                                }
                            },
                        }}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn blank_month_inputs_are_omitted() {
        assert_eq!(summary_query("", "  "), SummaryQuery::default());
        let q = summary_query("2022-01", "");
        assert_eq!(q.start_month.as_deref(), Some("2022-01"));
        assert_eq!(q.end_month, None);
    }

    #[test]
    fn heatmap_rows_keep_missing_days() {
        let rows = vec![HeatmapRow {
            metric: "Cases opened".into(),
            month: "2022-02".into(),
            points: vec![
                DataPoint { date: "2022-02-01".into(), value: None },
                DataPoint { date: "2022-02-02".into(), value: Some(3) },
            ],
        }];
        let series = heatmap_series(&rows);
        assert_eq!(series[0].label, "Cases opened · 2022-02");
        assert_eq!(series[0].cells[0].value, None);
        assert_eq!(series[0].cells[1].value, Some(3));
    }

    #[test]
    fn totals_fall_back_to_dash() {
        let mut office = BTreeMap::new();
        office.insert("Cases opened".to_string(), Some(4));
        office.insert("Total cases".to_string(), None);
        let totals = DataByRange {
            start: "2022-01".into(),
            end: "2022-03".into(),
            data_per_case_office: BTreeMap::from([("Legal Aid".to_string(), office)]),
        };

        let rows = range_totals(&totals, "Legal Aid");
        assert_eq!(rows.len(), MONTHLY_METRICS.len());
        assert!(rows.contains(&("Cases opened", "4".to_string())));
        assert!(rows.contains(&("Total cases", "–".to_string())));
        assert!(range_totals(&totals, "Elsewhere").iter().all(|(_, v)| v == "–"));
    }
}
