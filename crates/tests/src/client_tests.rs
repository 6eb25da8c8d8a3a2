use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    create_test_case, create_test_client, delete_authed, get_authed, id_of, patch_json,
    post_json, test_app, CPT_OFFICE, JHB_OFFICE,
};

#[tokio::test]
async fn create_client_success() {
    let (app, _pool, _guard) = test_app().await;

    let resp = create_test_client(&app, "Lerato Dlamini").await;
    assert_eq!(resp["name"], "Lerato Dlamini");
    assert_eq!(resp["preferred_name"], "Lerato");
    assert_eq!(resp["official_identifier_type"], "national_id");
    assert_eq!(resp["legal_cases"], json!([]));
    assert!(resp["id"].as_i64().is_some());
    assert!(resp["created_at"].as_str().is_some());
}

#[tokio::test]
async fn create_client_reports_every_bad_field() {
    let (app, _pool, _guard) = test_app().await;

    let body = json!({
        "name": "",
        "preferred_name": "",
        "official_identifier_type": "national_id",
        "contact_email": "nope",
    });
    let (status, resp) = post_json(&app, "/api/clients", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["field_errors"]["name"], "Name cannot be empty");
    assert_eq!(resp["field_errors"]["preferred_name"], "Preferred name cannot be empty");
    assert_eq!(resp["field_errors"]["contact_email"], "Valid email is required");
}

#[tokio::test]
async fn list_clients_sorted_by_name() {
    let (app, _pool, _guard) = test_app().await;
    create_test_client(&app, "Zanele Khumalo").await;
    create_test_client(&app, "Ayanda Nkosi").await;

    let (status, resp) = get_authed(&app, "/api/clients").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = resp
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ayanda Nkosi", "Zanele Khumalo"]);
}

#[tokio::test]
async fn list_clients_filters_by_case_office() {
    let (app, _pool, _guard) = test_app().await;
    let jhb = create_test_client(&app, "Sipho Ndlovu").await;
    let cpt = create_test_client(&app, "Anele Mthembu").await;
    create_test_client(&app, "No Cases Yet").await;
    create_test_case(&app, id_of(&jhb), JHB_OFFICE).await;
    create_test_case(&app, id_of(&cpt), CPT_OFFICE).await;

    let (status, resp) = get_authed(&app, &format!("/api/clients?caseOffice={JHB_OFFICE}")).await;
    assert_eq!(status, StatusCode::OK);
    let list = resp.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Sipho Ndlovu");
    assert_eq!(list[0]["legal_cases"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_missing_client_404() {
    let (app, _pool, _guard) = test_app().await;

    let (status, resp) = get_authed(&app, "/api/clients/4242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "Client 4242 not found");
}

#[tokio::test]
async fn patch_changes_only_given_fields() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Bongani Zulu").await;
    let id = id_of(&client);

    let (status, resp) = patch_json(
        &app,
        &format!("/api/clients/{id}"),
        &json!({ "contact_number": "0730000000" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["contact_number"], "0730000000");
    assert_eq!(resp["name"], "Bongani Zulu");
    assert_eq!(resp["contact_email"], client["contact_email"]);
}

#[tokio::test]
async fn delete_client_removes_their_cases() {
    let (app, _pool, _guard) = test_app().await;
    let client = create_test_client(&app, "Kagiso Molefe").await;
    let case = create_test_case(&app, id_of(&client), JHB_OFFICE).await;

    let (status, _) = delete_authed(&app, &format!("/api/clients/{}", id_of(&client))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = get_authed(&app, &format!("/api/legal-cases/{}", id_of(&case))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_authed(&app, &format!("/api/clients/{}", id_of(&client))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
