use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    Router,
};
use serde_json::Value;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Global mutex ensuring tests run sequentially against the shared database.
/// Each test acquires this lock before truncating and seeding.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

/// Password of every seeded user.
pub const TEST_PASSWORD: &str = "correct-horse";

/// Seeded ids.
pub const OFFICER_ID: i64 = 1;
pub const OTHER_OFFICER_ID: i64 = 2;
pub const JHB_OFFICE: i64 = 1;
pub const CPT_OFFICE: i64 = 2;
pub const EVICTION_TYPE: i64 = 1;

/// Build a test router backed by a real Postgres pool.
/// Acquires a global lock, truncates all tables, and re-seeds offices,
/// case types and two officers. The returned `MutexGuard` must be held for
/// the duration of the test.
pub async fn test_app() -> (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let guard = TEST_MUTEX.lock().await;

    let _ = dotenvy::dotenv();
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "casebook-integration-test-secret");
    }
    if std::env::var("UPLOAD_DIR").is_err() {
        let dir = std::env::temp_dir().join("casebook-test-uploads");
        std::env::set_var("UPLOAD_DIR", dir);
    }

    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must be set for tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE log_changes, logs, case_update_files, case_updates, legal_case_files, meetings, legal_case_case_offices, legal_case_case_types, legal_case_users, legal_cases, clients, users, case_types, case_offices RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate");

    sqlx::query(
        "INSERT INTO case_offices (id, name, case_office_code) VALUES (1, 'Johannesburg', 'JHB'), (2, 'Cape Town', 'CPT')"
    )
    .execute(&pool)
    .await
    .expect("Failed to seed case offices");
    sqlx::query("SELECT setval('case_offices_id_seq', 2)")
        .execute(&pool)
        .await
        .expect("Failed to bump office sequence");

    sqlx::query("INSERT INTO case_types (id, title) VALUES (1, 'Eviction'), (2, 'Labour')")
        .execute(&pool)
        .await
        .expect("Failed to seed case types");
    sqlx::query("SELECT setval('case_types_id_seq', 2)")
        .execute(&pool)
        .await
        .expect("Failed to bump case type sequence");

    let hash = server::auth::password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    sqlx::query(
        "INSERT INTO users (id, username, name, email, password_hash, case_office_id) VALUES
            (1, 'tmokoena', 'Thandi Mokoena', 'thandi@example.org', $1, 1),
            (2, 'nsithole', 'Nomsa Sithole', 'nomsa@example.org', $1, 2)"
    )
    .bind(&hash)
    .execute(&pool)
    .await
    .expect("Failed to seed users");
    sqlx::query("SELECT setval('users_id_seq', 2)")
        .execute(&pool)
        .await
        .expect("Failed to bump user sequence");

    let state = server::db::AppState { pool: pool.clone() };
    let router = server::rest::api_router()
        .layer(middleware::from_fn(server::auth::middleware::auth_middleware))
        .with_state(state);

    (router, pool, guard)
}

/// Bearer token for a seeded user.
pub fn create_test_token(user_id: i64) -> String {
    let username = if user_id == OFFICER_ID { "tmokoena" } else { "nsithole" };
    server::auth::jwt::create_token(user_id, username).expect("Failed to create test JWT")
}

fn request(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(t) => builder.header("authorization", format!("Bearer {t}")),
        None => builder,
    }
}

/// POST JSON as the default officer.
pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_json_as(app, uri, body, Some(&create_test_token(OFFICER_ID))).await
}

/// POST JSON with an explicit token, or none.
pub async fn post_json_as(
    app: &Router,
    uri: &str,
    body: &Value,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let req = request("POST", uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// PATCH JSON as the default officer.
pub async fn patch_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    patch_json_as(app, uri, body, &create_test_token(OFFICER_ID)).await
}

pub async fn patch_json_as(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> (StatusCode, Value) {
    let req = request("PATCH", uri, Some(token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// GET as the default officer.
pub async fn get_authed(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = request("GET", uri, Some(&create_test_token(OFFICER_ID)))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// GET without any credentials.
pub async fn get_anonymous(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = request("GET", uri, None).body(Body::empty()).unwrap();
    send(app, req).await
}

/// DELETE as the default officer.
pub async fn delete_authed(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = request("DELETE", uri, Some(&create_test_token(OFFICER_ID)))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// Upload `data` as a case file through the multipart endpoint.
pub async fn upload_file(
    app: &Router,
    legal_case: i64,
    file_name: &str,
    data: &[u8],
) -> (StatusCode, Value) {
    const BOUNDARY: &str = "casebook-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"legal_case\"\r\n\r\n{legal_case}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\nUploaded in test\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"upload\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let req = request("POST", "/api/legal-case-files", Some(&create_test_token(OFFICER_ID)))
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body_bytes) = send_raw(app, req).await;

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, body)
}

/// Send a request and return raw bytes + status + headers (for downloads).
pub async fn send_raw(
    app: &Router,
    req: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, headers, body_bytes.to_vec())
}

/// GET raw bytes as the default officer.
pub async fn get_raw(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let req = request("GET", uri, Some(&create_test_token(OFFICER_ID)))
        .body(Body::empty())
        .unwrap();
    send_raw(app, req).await
}

/// Create a client via the API and return the response JSON.
pub async fn create_test_client(app: &Router, name: &str) -> Value {
    let body = serde_json::json!({
        "name": name,
        "preferred_name": name.split(' ').next().unwrap_or(name),
        "official_identifier": "8001015009087",
        "official_identifier_type": "national_id",
        "contact_number": "0821234567",
        "contact_email": "client@example.org",
    });

    let (status, response) = post_json(app, "/api/clients", &body).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create test client: {} {:?}",
        status,
        response
    );
    response
}

/// Open a legal case for `client` in `office` and return the response JSON.
pub async fn create_test_case(app: &Router, client: i64, office: i64) -> Value {
    let body = serde_json::json!({
        "client": client,
        "summary": "Tenant facing unlawful eviction",
        "users": [OFFICER_ID],
        "case_types": [EVICTION_TYPE],
        "case_offices": [office],
    });

    let (status, response) = post_json(app, "/api/legal-cases", &body).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create test case: {} {:?}",
        status,
        response
    );
    response
}

/// Record a meeting on `legal_case` and return the response JSON.
pub async fn create_test_meeting(app: &Router, legal_case: i64, date: &str) -> Value {
    let body = serde_json::json!({
        "legal_case": legal_case,
        "location": "Braamfontein office",
        "meeting_type": "Consultation",
        "meeting_date": date,
        "notes": "Discussed lease terms",
    });

    let (status, response) = post_json(app, "/api/meetings", &body).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create test meeting: {} {:?}",
        status,
        response
    );
    response
}

/// Id field of a JSON response.
pub fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().expect("response has no id")
}
