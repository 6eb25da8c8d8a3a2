use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case, create_test_client, get_authed, id_of, patch_json, post_json, test_app,
    JHB_OFFICE, OFFICER_ID,
};

#[tokio::test]
async fn case_changes_are_logged_under_the_case() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Logged Client").await;
    let case = create_test_case(&app, id_of(&client), JHB_OFFICE).await;
    let id = id_of(&case);

    patch_json(
        &app,
        &format!("/api/legal-cases/{id}"),
        &json!({ "state": "Closed", "summary": "Settled" }),
    )
    .await;

    let (status, logs) = get_authed(
        &app,
        &format!("/api/logs?parent_id={id}&parent_type=LegalCase&target_type=LegalCase"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["action"], "Create");
    assert_eq!(logs[1]["action"], "Update");
    assert_eq!(logs[1]["note"], case["case_number"]);
    assert_eq!(logs[1]["user"], OFFICER_ID);

    let update_log = id_of(&logs[1]);
    let (status, changes) = get_authed(&app, &format!("/api/logs/{update_log}/changes")).await;
    assert_eq!(status, StatusCode::OK);
    let mut fields: Vec<(String, String)> = changes
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["field"].as_str().unwrap().to_string(),
                c["value"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    fields.sort();
    assert_eq!(
        fields,
        vec![
            ("state".to_string(), "Closed".to_string()),
            ("summary".to_string(), "Settled".to_string()),
        ]
    );
}

#[tokio::test]
async fn case_update_logs_its_kind() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Update Logs").await;
    let case = id_of(&create_test_case(&app, id_of(&client), JHB_OFFICE).await);

    let body = json!({ "legal_case": case, "note": { "title": "Call", "content": "Done" } });
    let (_, update) = post_json(&app, "/api/case-updates", &body).await;

    let (_, logs) = get_authed(&app, &format!("/api/logs?target_type=CaseUpdate&parent_id={case}")).await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["target_id"], update["id"]);
    assert_eq!(logs[0]["parent_type"], "LegalCase");
    assert_eq!(logs[0]["note"], "note");
}

#[tokio::test]
async fn manual_log_entry() {
    let (app, _pool, _guard) = test_app().await;

    let body = json!({
        "target_type": "Export",
        "action": "Download",
        "note": "Quarterly report",
        "changes": [{ "field": "format", "value": "csv" }],
    });
    let (status, log) = post_json(&app, "/api/logs", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["user"], OFFICER_ID);

    let (status, fetched) = get_authed(&app, &format!("/api/logs/{}", id_of(&log))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["note"], "Quarterly report");

    let (status, resp) = post_json(&app, "/api/logs", &json!({ "target_type": "", "action": "x" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["target_type"], "Target type is required");
}

#[tokio::test]
async fn missing_log_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = get_authed(&app, "/api/logs/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
