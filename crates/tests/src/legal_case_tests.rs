use axum::http::StatusCode;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case, create_test_client, delete_authed, get_authed, id_of, patch_json,
    post_json, test_app, CPT_OFFICE, EVICTION_TYPE, JHB_OFFICE, OFFICER_ID, OTHER_OFFICER_ID,
};

#[tokio::test]
async fn create_case_issues_office_case_number() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Thabo Mbeki").await;

    let resp = create_test_case(&app, id_of(&client), JHB_OFFICE).await;
    let expected = format!("JHB/{}/0001", Utc::now().format("%y%m"));
    assert_eq!(resp["case_number"], expected);
    assert_eq!(resp["state"], "Opened");
    assert_eq!(resp["client"], id_of(&client));
    assert_eq!(resp["users"], json!([OFFICER_ID]));
    assert_eq!(resp["case_types"], json!([EVICTION_TYPE]));
    assert_eq!(resp["case_offices"], json!([JHB_OFFICE]));
}

#[tokio::test]
async fn first_office_issues_the_number() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Palesa Moroka").await;

    let body = json!({
        "client": id_of(&client),
        "case_offices": [CPT_OFFICE, JHB_OFFICE],
    });
    let (status, resp) = post_json(&app, "/api/legal-cases", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(resp["case_number"].as_str().unwrap().starts_with("CPT/"));
    assert_eq!(resp["case_offices"], json!([CPT_OFFICE, JHB_OFFICE]));
}

#[tokio::test]
async fn create_case_without_office_is_a_field_error() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Mpho Radebe").await;

    let body = json!({ "client": id_of(&client), "summary": "No office" });
    let (status, resp) = post_json(&app, "/api/legal-cases", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp["field_errors"]["case_offices"],
        "At least one case office is required"
    );
}

#[tokio::test]
async fn create_case_for_unknown_client_400() {
    let (app, _pool, _guard) = test_app().await;

    let body = json!({ "client": 777, "case_offices": [JHB_OFFICE] });
    let (status, _) = post_json(&app, "/api/legal-cases", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn colliding_case_number_is_a_conflict() {
    let (app, pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Duplicate Number").await;
    let taken = format!("JHB/{}/0051", Utc::now().format("%y%m"));
    sqlx::query("INSERT INTO legal_cases (id, case_number, client_id) VALUES (50, $1, $2)")
        .bind(&taken)
        .bind(id_of(&client))
        .execute(&pool)
        .await
        .unwrap();

    let body = json!({ "client": id_of(&client), "case_offices": [JHB_OFFICE] });
    let (status, resp) = post_json(&app, "/api/legal-cases", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(resp["message"], "A legal case with this number already exists");
}

#[tokio::test]
async fn list_cases_filters_by_client() {
    let (app, _pool, _guard) = test_app().await;
    let a = create_test_client(&app, "Client A").await;
    let b = create_test_client(&app, "Client B").await;
    create_test_case(&app, id_of(&a), JHB_OFFICE).await;
    create_test_case(&app, id_of(&a), CPT_OFFICE).await;
    create_test_case(&app, id_of(&b), JHB_OFFICE).await;

    let (status, resp) = get_authed(&app, &format!("/api/legal-cases?client={}", id_of(&a))).await;
    assert_eq!(status, StatusCode::OK);
    let list = resp.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|c| c["client"] == id_of(&a)));

    let (_, all) = get_authed(&app, "/api/legal-cases").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn patch_state_and_officers() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Naledi Pandor").await;
    let case = create_test_case(&app, id_of(&client), JHB_OFFICE).await;
    let id = id_of(&case);

    let (status, resp) = patch_json(
        &app,
        &format!("/api/legal-cases/{id}"),
        &json!({ "state": "InProgress", "users": [OFFICER_ID, OTHER_OFFICER_ID] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["state"], "InProgress");
    assert_eq!(resp["users"], json!([OFFICER_ID, OTHER_OFFICER_ID]));
    assert_eq!(resp["case_number"], case["case_number"]);
    assert_eq!(resp["summary"], case["summary"]);
}

#[tokio::test]
async fn patch_rejects_unknown_state() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Bad State").await;
    let case = create_test_case(&app, id_of(&client), JHB_OFFICE).await;

    let (status, _) = patch_json(
        &app,
        &format!("/api/legal-cases/{}", id_of(&case)),
        &json!({ "state": "Archived" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_cannot_empty_offices() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Empty Offices").await;
    let case = create_test_case(&app, id_of(&client), JHB_OFFICE).await;

    let (status, resp) = patch_json(
        &app,
        &format!("/api/legal-cases/{}", id_of(&case)),
        &json!({ "case_offices": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp["field_errors"]["case_offices"].is_string());
}

#[tokio::test]
async fn patch_missing_case_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = patch_json(&app, "/api/legal-cases/99", &json!({ "summary": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_case() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Gone Soon").await;
    let case = create_test_case(&app, id_of(&client), JHB_OFFICE).await;

    let (status, _) = delete_authed(&app, &format!("/api/legal-cases/{}", id_of(&case))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, resp) = get_authed(&app, &format!("/api/clients/{}", id_of(&client))).await;
    assert_eq!(resp["legal_cases"], json!([]));
}
