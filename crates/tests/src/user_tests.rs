use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_token, get_authed, patch_json, patch_json_as, test_app, CPT_OFFICE, JHB_OFFICE,
    OFFICER_ID, OTHER_OFFICER_ID,
};

#[tokio::test]
async fn get_user_hides_password_hash() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = get_authed(&app, &format!("/api/users/{OFFICER_ID}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["username"], "tmokoena");
    assert_eq!(resp["case_office"], JHB_OFFICE);
    assert!(resp.get("password_hash").is_none());
}

#[tokio::test]
async fn get_missing_user_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = get_authed(&app, "/api/users/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn officer_updates_own_profile() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = patch_json(
        &app,
        &format!("/api/users/{OFFICER_ID}"),
        &json!({ "contact_number": "0115550000", "case_office": CPT_OFFICE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["contact_number"], "0115550000");
    assert_eq!(resp["case_office"], CPT_OFFICE);
    // untouched fields survive
    assert_eq!(resp["name"], "Thandi Mokoena");
}

#[tokio::test]
async fn explicit_null_clears_office() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = patch_json(
        &app,
        &format!("/api/users/{OFFICER_ID}"),
        &json!({ "case_office": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["case_office"].is_null());
}

#[tokio::test]
async fn cannot_edit_another_officer() {
    let (app, _pool, _guard) = test_app().await;

    let token = create_test_token(OTHER_OFFICER_ID);
    let (status, resp) = patch_json_as(
        &app,
        &format!("/api/users/{OFFICER_ID}"),
        &json!({ "name": "Someone Else" }),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(resp["kind"], "Forbidden");
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = patch_json(
        &app,
        &format!("/api/users/{OFFICER_ID}"),
        &json!({ "email": "not-an-email" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["email"], "Valid email is required");
}
