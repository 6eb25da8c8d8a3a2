use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case, create_test_client, create_test_meeting, delete_authed, get_authed, id_of,
    patch_json, post_json, test_app, JHB_OFFICE,
};

async fn open_case(app: &axum::Router) -> i64 {
    let client = create_test_client(app, "Meeting Client").await;
    id_of(&create_test_case(app, id_of(&client), JHB_OFFICE).await)
}

#[tokio::test]
async fn create_meeting_success() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let resp = create_test_meeting(&app, case, "2022-03-04T09:30:00Z").await;
    assert_eq!(resp["legal_case"], case);
    assert_eq!(resp["meeting_type"], "Consultation");
    assert_eq!(resp["meeting_date"], "2022-03-04T09:30:00Z");
}

#[tokio::test]
async fn create_meeting_requires_text_fields() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let body = json!({
        "legal_case": case,
        "location": " ",
        "meeting_type": "",
        "meeting_date": "2022-03-04T09:30:00Z",
        "notes": "",
    });
    let (status, resp) = post_json(&app, "/api/meetings", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["location"], "Location cannot be empty");
    assert_eq!(resp["field_errors"]["meeting_type"], "Meeting type cannot be empty");
    assert_eq!(resp["field_errors"]["notes"], "Note cannot be empty");
}

#[tokio::test]
async fn list_meetings_latest_first_per_case() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    let other = open_case(&app).await;
    create_test_meeting(&app, case, "2022-01-10T10:00:00Z").await;
    create_test_meeting(&app, case, "2022-02-10T10:00:00Z").await;
    create_test_meeting(&app, other, "2022-03-10T10:00:00Z").await;

    let (status, resp) = get_authed(&app, &format!("/api/meetings?legal_case={case}")).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = resp
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["meeting_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2022-02-10T10:00:00Z", "2022-01-10T10:00:00Z"]);
}

#[tokio::test]
async fn update_and_delete_meeting() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    let meeting = create_test_meeting(&app, case, "2022-01-10T10:00:00Z").await;
    let id = id_of(&meeting);

    let (status, resp) = patch_json(
        &app,
        &format!("/api/meetings/{id}"),
        &json!({ "location": "Magistrate's court" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["location"], "Magistrate's court");
    assert_eq!(resp["notes"], meeting["notes"]);

    let (status, _) = patch_json(&app, &format!("/api/meetings/{id}"), &json!({ "notes": "" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = delete_authed(&app, &format!("/api/meetings/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get_authed(&app, &format!("/api/meetings/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
