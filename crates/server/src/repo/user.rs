use shared_types::{AppError, UpdateUserRequest, User};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"id, username, name, membership_number, contact_number, email,
    case_office_id AS case_office, created_at"#;

/// Row used only for login: carries the password hash.
#[derive(Debug, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// All users, for assignment pickers.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<User>, AppError> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users ORDER BY name, username"))
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_credentials(
    pool: &Pool<Postgres>,
    username: &str,
) -> Result<Option<UserCredentials>, AppError> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Insert a user with an already-hashed password.
pub async fn create(
    pool: &Pool<Postgres>,
    username: &str,
    name: &str,
    email: &str,
    password_hash: &str,
    case_office: Option<i64>,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, name, email, password_hash, case_office_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(username)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(case_office)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Partially update a user. `case_office: Some(None)` clears the office.
pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: UpdateUserRequest,
) -> Result<Option<User>, AppError> {
    let (set_office, office) = match req.case_office {
        Some(office) => (true, office),
        None => (false, None),
    };

    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users SET
            name              = COALESCE($2, name),
            membership_number = COALESCE($3, membership_number),
            contact_number    = COALESCE($4, contact_number),
            email             = COALESCE($5, email),
            case_office_id    = CASE WHEN $6 THEN $7 ELSE case_office_id END
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(req.name.as_deref())
    .bind(req.membership_number.as_deref())
    .bind(req.contact_number.as_deref())
    .bind(req.email.as_deref())
    .bind(set_office)
    .bind(office)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
