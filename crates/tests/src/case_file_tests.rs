use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case, create_test_client, delete_authed, get_authed, get_raw, id_of, patch_json,
    test_app, upload_file, JHB_OFFICE,
};

async fn open_case(app: &axum::Router) -> i64 {
    let client = create_test_client(app, "File Client").await;
    id_of(&create_test_case(app, id_of(&client), JHB_OFFICE).await)
}

#[tokio::test]
async fn upload_then_download_bytes() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let (status, file) = upload_file(&app, case, "lease.pdf", b"%PDF-1.4 lease").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(file["legal_case"], case);
    assert_eq!(file["upload_file_name"], "lease.pdf");
    assert_eq!(file["description"], "Uploaded in test");
    assert_eq!(file["size_bytes"], 14);

    let (status, headers, bytes) =
        get_raw(&app, &format!("/api/legal-case-files/{}/download", id_of(&file))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"%PDF-1.4 lease");
    assert_eq!(headers["content-type"], "application/pdf");
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"lease.pdf\""
    );
}

#[tokio::test]
async fn upload_to_missing_case_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, _) = upload_file(&app, 404, "lease.pdf", b"data").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let (status, resp) = upload_file(&app, case, "empty.pdf", b"").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["upload"], "File is empty");
}

#[tokio::test]
async fn list_files_oldest_first() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    let other = open_case(&app).await;
    upload_file(&app, case, "first.pdf", b"1").await;
    upload_file(&app, case, "second.pdf", b"2").await;
    upload_file(&app, other, "elsewhere.pdf", b"3").await;

    let (status, resp) = get_authed(&app, &format!("/api/legal-case-files?legal_case={case}")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = resp
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["upload_file_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["first.pdf", "second.pdf"]);
}

#[tokio::test]
async fn rename_and_delete_file() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    let (_, file) = upload_file(&app, case, "notes.pdf", b"abc").await;
    let id = id_of(&file);

    let (status, resp) = patch_json(
        &app,
        &format!("/api/legal-case-files/{id}"),
        &json!({ "description": "Signed lease" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["description"], "Signed lease");
    assert_eq!(resp["upload_file_name"], "notes.pdf");

    let (status, _) = delete_authed(&app, &format!("/api/legal-case-files/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_authed(&app, &format!("/api/legal-case-files/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete_authed(&app, &format!("/api/legal-case-files/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
