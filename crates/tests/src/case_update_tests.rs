use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case, create_test_client, get_authed, id_of, post_json, test_app, upload_file,
    JHB_OFFICE,
};

async fn open_case(app: &axum::Router) -> i64 {
    let client = create_test_client(app, "Update Client").await;
    id_of(&create_test_case(app, id_of(&client), JHB_OFFICE).await)
}

#[tokio::test]
async fn note_update_is_recorded() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let body = json!({
        "legal_case": case,
        "note": { "title": "Called landlord", "content": "Agreed to postpone" },
    });
    let (status, resp) = post_json(&app, "/api/case-updates", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["kind"], "note");
    assert_eq!(resp["title"], "Called landlord");
    assert_eq!(resp["content"], "Agreed to postpone");
    assert_eq!(resp["meeting"], json!(null));
    assert_eq!(resp["files"], json!([]));
}

#[tokio::test]
async fn empty_note_is_a_content_error() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let body = json!({ "legal_case": case, "note": { "title": " ", "content": "" } });
    let (status, resp) = post_json(&app, "/api/case-updates", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["content"], "Note cannot be empty");
}

#[tokio::test]
async fn meeting_update_creates_meeting() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let body = json!({
        "legal_case": case,
        "meeting": {
            "meeting_type": "Mediation",
            "location": "Community hall",
            "notes": "Both parties attended",
            "meeting_date": "2022-05-01T08:00:00Z",
        },
    });
    let (status, resp) = post_json(&app, "/api/case-updates", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["kind"], "meeting");
    let meeting_id = resp["meeting"].as_i64().expect("meeting id");

    let (status, meeting) = get_authed(&app, &format!("/api/meetings/{meeting_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(meeting["legal_case"], case);
    assert_eq!(meeting["location"], "Community hall");
}

#[tokio::test]
async fn file_update_dedupes_in_order() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    let (_, a) = upload_file(&app, case, "a.pdf", b"a").await;
    let (_, b) = upload_file(&app, case, "b.pdf", b"b").await;

    let body = json!({
        "legal_case": case,
        "files": [id_of(&b), id_of(&a), id_of(&b)],
    });
    let (status, resp) = post_json(&app, "/api/case-updates", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["kind"], "files");
    assert_eq!(resp["files"], json!([id_of(&b), id_of(&a)]));
}

#[tokio::test]
async fn files_from_another_case_are_rejected() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    let other = open_case(&app).await;
    let (_, foreign) = upload_file(&app, other, "other.pdf", b"x").await;

    let body = json!({ "legal_case": case, "files": [id_of(&foreign)] });
    let (status, resp) = post_json(&app, "/api/case-updates", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp["field_errors"]["files"],
        "Every file must belong to this legal case"
    );

    let (_, updates) = get_authed(&app, &format!("/api/case-updates?legal_case={case}")).await;
    assert_eq!(updates, json!([]));
}

#[tokio::test]
async fn two_payloads_are_rejected() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;

    let body = json!({
        "legal_case": case,
        "note": { "title": "Both", "content": "kinds" },
        "files": [1],
    });
    let (status, resp) = post_json(&app, "/api/case-updates", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp["message"],
        "A case update needs exactly one of note, meeting or files"
    );
}

#[tokio::test]
async fn updates_list_newest_first() {
    let (app, _pool, _guard) = test_app().await;
    let case = open_case(&app).await;
    for title in ["first", "second"] {
        let body = json!({ "legal_case": case, "note": { "title": title, "content": "..." } });
        post_json(&app, "/api/case-updates", &body).await;
    }

    let (status, resp) = get_authed(&app, &format!("/api/case-updates?legal_case={case}")).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = resp
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}
