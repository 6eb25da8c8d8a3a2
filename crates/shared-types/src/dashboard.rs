//! Reporting dashboard: per-office monthly and daily case metrics, range
//! totals, and the chart configurations the dashboard page renders.
//!
//! The aggregation functions are pure. The server loads flat
//! [`CaseRecord`], [`OfficerActivity`], [`CloseEvent`] and [`CaseActivity`]
//! rows and hands them here, so the arithmetic is tested without a database.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::AppError;

pub const DASHBOARD_TITLE: &str = "Reporting Dashboard";
pub const HEATMAP_TITLE: &str = "Daily activity";

pub const ACTIVE_CASE_OFFICERS: &str = "Active case officers";
pub const TOTAL_CASES: &str = "Total cases";
pub const AVERAGE_CASES_PER_OFFICER: &str = "Average cases per officer";
pub const AVERAGE_DAYS_PER_CASE: &str = "Average days per case";
pub const CASES_OPENED: &str = "Cases opened";
pub const CASES_CLOSED: &str = "Cases closed";
pub const CASES_WITH_ACTIVITY: &str = "Cases with activity";

/// Monthly metrics in the order their bar charts appear.
pub const MONTHLY_METRICS: [&str; 6] = [
    ACTIVE_CASE_OFFICERS,
    TOTAL_CASES,
    AVERAGE_CASES_PER_OFFICER,
    AVERAGE_DAYS_PER_CASE,
    CASES_OPENED,
    CASES_CLOSED,
];

/// Daily metrics shown in the heatmap.
pub const DAILY_METRICS: [&str; 3] = [CASES_OPENED, CASES_CLOSED, CASES_WITH_ACTIVITY];

// ── Wire types ──────────────────────────────────────────────────────

/// One value on a chart axis. `value` is `null` when nothing happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DataPoint {
    pub date: String,
    pub value: Option<i64>,
}

/// office → metric → one point per month (`YYYY-MM`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DataMonthly {
    pub data_per_case_office: BTreeMap<String, BTreeMap<String, Vec<DataPoint>>>,
}

/// office → metric → month (`YYYY-MM`) → one point per day (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DataDailyPerMonth {
    pub data_per_case_office: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<DataPoint>>>>,
}

/// office → metric → total over `start..=end`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DataByRange {
    pub start: String,
    pub end: String,
    pub data_per_case_office: BTreeMap<String, BTreeMap<String, Option<i64>>>,
}

/// Query string shared by the summary endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct SummaryQuery {
    /// First month, `yyyy-mm`.
    #[serde(rename = "startMonth")]
    pub start_month: Option<String>,
    /// Last month, `yyyy-mm`.
    #[serde(rename = "endMonth")]
    pub end_month: Option<String>,
}

// ── Input records ───────────────────────────────────────────────────

/// A legal case as the dashboard sees it. `closed_on` is the day of the
/// latest log that moved the case to `Closed`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseRecord {
    pub case_id: i64,
    pub office: String,
    pub opened_on: NaiveDate,
    pub closed_on: Option<NaiveDate>,
}

/// A day on which an officer of `office` wrote at least one log.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct OfficerActivity {
    pub office: String,
    pub user_id: i64,
    pub day: NaiveDate,
}

/// A log change that moved a case of `office` to `Closed`. A case closed,
/// reopened and closed again yields two events.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CloseEvent {
    pub office: String,
    pub case_id: i64,
    pub day: NaiveDate,
}

/// A log written against a case of `office`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseActivity {
    pub office: String,
    pub case_id: i64,
    pub day: NaiveDate,
}

// ── Date helpers ────────────────────────────────────────────────────

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn next_month(d: NaiveDate) -> NaiveDate {
    let (year, month) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(d)
}

/// Last day of the month containing `d`.
pub fn month_end(d: NaiveDate) -> NaiveDate {
    next_month(d).pred_opt().unwrap_or(d)
}

pub fn month_key(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

pub fn day_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn parse_month(param: &str, value: &str) -> Result<NaiveDate, AppError> {
    let invalid = || AppError::bad_request(format!("{} query param must be in format yyyy-mm", param));
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(invalid());
    }
    let year: i32 = value[..4].parse().map_err(|_| invalid())?;
    let month: u32 = value[5..].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

// ── Range ───────────────────────────────────────────────────────────

/// Inclusive span of months a summary covers. Both ends are the first
/// day of their month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SummaryRange {
    /// Resolve `startMonth`/`endMonth` query params.
    ///
    /// Without an end the range ends this month, or roughly a year after
    /// `start` when one is given. Without a start it begins about ten
    /// months before the end.
    pub fn from_params(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        let start = start.map(|s| parse_month("startMonth", s)).transpose()?;
        let end = end.map(|s| parse_month("endMonth", s)).transpose()?;

        let end = match (end, start) {
            (Some(end), _) => end,
            (None, None) => today,
            (None, Some(start)) => first_of_month(start + Duration::days(345)),
        };
        let start = start.unwrap_or_else(|| first_of_month(end - Duration::days(315)));

        Ok(Self {
            start: first_of_month(start),
            end: first_of_month(end),
        })
    }

    pub fn from_query(query: &SummaryQuery, today: NaiveDate) -> Result<Self, AppError> {
        Self::from_params(
            query.start_month.as_deref(),
            query.end_month.as_deref(),
            today,
        )
    }

    /// First day of every month in the range.
    pub fn months(&self) -> Vec<NaiveDate> {
        let mut months = Vec::new();
        let mut m = self.start;
        while m <= self.end {
            months.push(m);
            m = next_month(m);
        }
        months
    }

    /// Last day covered by the range.
    pub fn last_day(&self) -> NaiveDate {
        month_end(self.end)
    }
}

// ── Aggregation ─────────────────────────────────────────────────────

fn non_zero(n: i64) -> Option<i64> {
    (n > 0).then_some(n)
}

fn empty_series<'a>(metrics: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, Vec<DataPoint>> {
    metrics.into_iter().map(|m| (m.to_string(), Vec::new())).collect()
}

/// Monthly metrics for every office, including offices without data.
pub fn monthly_summary(
    range: &SummaryRange,
    offices: &[String],
    cases: &[CaseRecord],
    officers: &[OfficerActivity],
) -> DataMonthly {
    let mut data = BTreeMap::new();

    for office in offices {
        let office_cases: Vec<&CaseRecord> = cases.iter().filter(|c| &c.office == office).collect();
        let mut series = empty_series(MONTHLY_METRICS);

        for month in range.months() {
            let end = month_end(month);
            let in_month = move |d: NaiveDate| d >= month && d <= end;
            let key = month_key(month);

            let active = officers
                .iter()
                .filter(|a| &a.office == office && in_month(a.day))
                .map(|a| a.user_id)
                .collect::<HashSet<_>>()
                .len() as i64;

            let total = office_cases
                .iter()
                .filter(|c| c.opened_on <= end && c.closed_on.map_or(true, |d| d >= end))
                .count() as i64;

            let opened = office_cases.iter().filter(|c| in_month(c.opened_on)).count() as i64;

            let durations: Vec<i64> = office_cases
                .iter()
                .filter_map(|c| {
                    c.closed_on
                        .filter(|d| in_month(*d))
                        .map(|d| (d - c.opened_on).num_days() + 1)
                })
                .collect();

            let average_cases = (total > 0 && active > 0).then(|| total / active);
            let average_days = (!durations.is_empty())
                .then(|| durations.iter().sum::<i64>() / durations.len() as i64);

            let values = [
                (ACTIVE_CASE_OFFICERS, non_zero(active)),
                (TOTAL_CASES, non_zero(total)),
                (AVERAGE_CASES_PER_OFFICER, average_cases),
                (AVERAGE_DAYS_PER_CASE, average_days),
                (CASES_OPENED, non_zero(opened)),
                (CASES_CLOSED, non_zero(durations.len() as i64)),
            ];
            for (metric, value) in values {
                if let Some(points) = series.get_mut(metric) {
                    points.push(DataPoint {
                        date: key.clone(),
                        value,
                    });
                }
            }
        }

        data.insert(office.clone(), series);
    }

    DataMonthly {
        data_per_case_office: data,
    }
}

/// Daily metrics for every office, one point for each real day of each
/// month in the range. Closed counts close events and activity counts
/// logs, so one case can contribute several to the same day.
pub fn daily_summary(
    range: &SummaryRange,
    offices: &[String],
    cases: &[CaseRecord],
    closes: &[CloseEvent],
    activity: &[CaseActivity],
) -> DataDailyPerMonth {
    let mut data = BTreeMap::new();

    for office in offices {
        let office_cases: Vec<&CaseRecord> = cases.iter().filter(|c| &c.office == office).collect();
        let office_closes: Vec<&CloseEvent> = closes.iter().filter(|c| &c.office == office).collect();
        let office_activity: Vec<&CaseActivity> =
            activity.iter().filter(|a| &a.office == office).collect();

        let mut per_metric: BTreeMap<String, BTreeMap<String, Vec<DataPoint>>> = DAILY_METRICS
            .iter()
            .map(|m| (m.to_string(), BTreeMap::new()))
            .collect();

        for month in range.months() {
            let mut opened = Vec::new();
            let mut closed = Vec::new();
            let mut active = Vec::new();

            let mut day = month;
            while day <= month_end(month) {
                let date = day_key(day);
                let n_opened = office_cases.iter().filter(|c| c.opened_on == day).count() as i64;
                let n_closed = office_closes.iter().filter(|c| c.day == day).count() as i64;
                let n_active = office_activity.iter().filter(|a| a.day == day).count() as i64;

                opened.push(DataPoint {
                    date: date.clone(),
                    value: non_zero(n_opened),
                });
                closed.push(DataPoint {
                    date: date.clone(),
                    value: non_zero(n_closed),
                });
                active.push(DataPoint {
                    date,
                    value: non_zero(n_active),
                });

                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }

            let key = month_key(month);
            for (metric, points) in [
                (CASES_OPENED, opened),
                (CASES_CLOSED, closed),
                (CASES_WITH_ACTIVITY, active),
            ] {
                if let Some(months) = per_metric.get_mut(metric) {
                    months.insert(key.clone(), points);
                }
            }
        }

        data.insert(office.clone(), per_metric);
    }

    DataDailyPerMonth {
        data_per_case_office: data,
    }
}

/// Collapse monthly series into one value per metric. Flow metrics
/// (opened, closed) are summed; level metrics keep their latest value.
pub fn range_summary(range: &SummaryRange, monthly: &DataMonthly) -> DataByRange {
    let data = monthly
        .data_per_case_office
        .iter()
        .map(|(office, series)| {
            let totals = series
                .iter()
                .map(|(metric, points)| {
                    let values = points.iter().filter_map(|p| p.value);
                    let total = if metric == CASES_OPENED || metric == CASES_CLOSED {
                        values.reduce(|a, b| a + b)
                    } else {
                        values.last()
                    };
                    (metric.clone(), total)
                })
                .collect();
            (office.clone(), totals)
        })
        .collect();

    DataByRange {
        start: month_key(range.start),
        end: month_key(range.end),
        data_per_case_office: data,
    }
}

// ── Chart assembly ──────────────────────────────────────────────────

/// One row of the heatmap: a metric's daily values for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub metric: String,
    pub month: String,
    pub points: Vec<DataPoint>,
}

/// A chart on the dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartConfig {
    Bar {
        title: String,
        points: Vec<DataPoint>,
    },
    Heatmap {
        title: String,
        metrics: Vec<String>,
        rows: Vec<HeatmapRow>,
    },
}

impl ChartConfig {
    pub fn title(&self) -> &str {
        match self {
            ChartConfig::Bar { title, .. } | ChartConfig::Heatmap { title, .. } => title,
        }
    }
}

/// Office names present in either payload, sorted. The first one is
/// selected when the page loads.
pub fn dashboard_offices(
    monthly: Option<&DataMonthly>,
    daily: Option<&DataDailyPerMonth>,
) -> Vec<String> {
    let mut offices = BTreeSet::new();
    if let Some(m) = monthly {
        offices.extend(m.data_per_case_office.keys().cloned());
    }
    if let Some(d) = daily {
        offices.extend(d.data_per_case_office.keys().cloned());
    }
    offices.into_iter().collect()
}

/// The six monthly bar charts followed by the daily heatmap for `office`.
/// Missing data yields empty charts rather than dropping them.
pub fn dashboard_charts(
    monthly: Option<&DataMonthly>,
    daily: Option<&DataDailyPerMonth>,
    office: &str,
) -> Vec<ChartConfig> {
    let office_monthly = monthly.and_then(|m| m.data_per_case_office.get(office));
    let office_daily = daily.and_then(|d| d.data_per_case_office.get(office));

    let mut charts: Vec<ChartConfig> = MONTHLY_METRICS
        .iter()
        .map(|metric| ChartConfig::Bar {
            title: metric.to_string(),
            points: office_monthly
                .and_then(|s| s.get(*metric))
                .cloned()
                .unwrap_or_default(),
        })
        .collect();

    let mut rows = Vec::new();
    for metric in DAILY_METRICS {
        if let Some(months) = office_daily.and_then(|d| d.get(metric)) {
            for (month, points) in months {
                rows.push(HeatmapRow {
                    metric: metric.to_string(),
                    month: month.clone(),
                    points: points.clone(),
                });
            }
        }
    }
    charts.push(ChartConfig::Heatmap {
        title: HEATMAP_TITLE.to_string(),
        metrics: DAILY_METRICS.iter().map(|m| m.to_string()).collect(),
        rows,
    });

    charts
}
