use shared_types::{AppError, Credentials, User};
use sqlx::{Pool, Postgres};

use super::{jwt, password};
use crate::error_convert::ValidateRequest;

pub const BAD_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// Check a username/password pair and issue a session token.
///
/// Unknown users and wrong passwords get the same 400 so the response does
/// not reveal which usernames exist.
pub async fn authenticate(
    pool: &Pool<Postgres>,
    creds: &Credentials,
) -> Result<(User, String), AppError> {
    creds.validate_request()?;

    let Some(stored) = crate::repo::user::find_credentials(pool, creds.username.trim()).await?
    else {
        tracing::info!(username = %creds.username, "Login rejected: unknown user");
        return Err(AppError::bad_request(BAD_CREDENTIALS));
    };

    let valid = password::verify_password(&creds.password, &stored.password_hash).map_err(|e| {
        tracing::error!(user_id = stored.id, error = %e, "Stored password hash is malformed");
        AppError::internal("Unable to verify credentials")
    })?;
    if !valid {
        tracing::info!(user_id = stored.id, "Login rejected: wrong password");
        return Err(AppError::bad_request(BAD_CREDENTIALS));
    }

    let token = jwt::create_token(stored.id, &stored.username)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    let user = crate::repo::user::find_by_id(pool, stored.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok((user, token))
}
