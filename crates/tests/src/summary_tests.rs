use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{
    create_test_case, create_test_client, get_authed, id_of, patch_json, test_app, JHB_OFFICE,
};

/// Open a Johannesburg case and close it straight away.
async fn open_and_close_case(app: &axum::Router) {
    let client = create_test_client(app, "Closing Client").await;
    let case = create_test_case(app, id_of(&client), JHB_OFFICE).await;
    let (status, _) = patch_json(
        app,
        &format!("/api/legal-cases/{}", id_of(&case)),
        &json!({ "state": "Closed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// Every `(date, value)` with a value, across all months of a daily series.
fn daily_points(series: &Value) -> Vec<(String, i64)> {
    series
        .as_object()
        .unwrap()
        .values()
        .flat_map(|points| points.as_array().unwrap())
        .filter_map(|p| Some((p["date"].as_str()?.to_string(), p["value"].as_i64()?)))
        .collect()
}

#[tokio::test]
async fn malformed_month_is_a_bad_request() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = get_authed(&app, "/api/summary/monthly?startMonth=2022/01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "startMonth query param must be in format yyyy-mm");

    let (status, resp) = get_authed(&app, "/api/summary/daily?endMonth=march").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["message"], "endMonth query param must be in format yyyy-mm");
}

#[tokio::test]
async fn monthly_summary_lists_every_office() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Summary Client").await;
    create_test_case(&app, id_of(&client), JHB_OFFICE).await;

    let (status, resp) = get_authed(&app, "/api/summary/monthly").await;
    assert_eq!(status, StatusCode::OK);
    let offices = resp["dataPerCaseOffice"].as_object().unwrap();
    let mut names: Vec<&String> = offices.keys().collect();
    names.sort();
    assert_eq!(names, vec!["Cape Town", "Johannesburg"]);

    let opened = offices["Johannesburg"]["Cases opened"].as_array().unwrap();
    let last = opened.last().unwrap();
    assert_eq!(last["value"], 1);
}

#[tokio::test]
async fn range_summary_echoes_bounds() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) =
        get_authed(&app, "/api/summary/range?startMonth=2021-01&endMonth=2021-03").await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["start"].as_str().unwrap().starts_with("2021-01"));
    assert!(resp["end"].as_str().unwrap().starts_with("2021-03"));
    assert!(resp["dataPerCaseOffice"]["Cape Town"].is_object());
}

#[tokio::test]
async fn summary_requires_auth() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = crate::common::get_anonymous(&app, "/api/summary/range").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn closed_case_counts_in_monthly_summary() {
    let (app, _pool, _guard) = test_app().await;
    open_and_close_case(&app).await;

    let (status, resp) = get_authed(&app, "/api/summary/monthly").await;
    assert_eq!(status, StatusCode::OK);
    let jhb = &resp["dataPerCaseOffice"]["Johannesburg"];
    assert_eq!(jhb["Cases closed"].as_array().unwrap().last().unwrap()["value"], 1);
    // opened and closed on the same day counts as one day
    assert_eq!(
        jhb["Average days per case"].as_array().unwrap().last().unwrap()["value"],
        1
    );
}

#[tokio::test]
async fn daily_summary_counts_closes_and_every_log() {
    let (app, _pool, _guard) = test_app().await;
    open_and_close_case(&app).await;

    let (status, resp) = get_authed(&app, "/api/summary/daily").await;
    assert_eq!(status, StatusCode::OK);
    let jhb = &resp["dataPerCaseOffice"]["Johannesburg"];

    let closed = daily_points(&jhb["Cases closed"]);
    assert_eq!(closed.len(), 1);
    let (day, count) = &closed[0];
    assert_eq!(*count, 1);

    // the create log and the close log land on the same day
    let activity = daily_points(&jhb["Cases with activity"]);
    assert_eq!(activity, vec![(day.clone(), 2)]);

    assert_eq!(daily_points(&jhb["Cases opened"]), vec![(day.clone(), 1)]);
    assert!(daily_points(&resp["dataPerCaseOffice"]["Cape Town"]["Cases closed"]).is_empty());
}
