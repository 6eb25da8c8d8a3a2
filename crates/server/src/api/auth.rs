// Server-only auth helpers shared across the api/* modules.

use dioxus::prelude::*;
use shared_types::{AppError, AuthUser};

use crate::auth::{cookies, jwt};
use crate::db::get_db;
use crate::error_convert::AppErrorExt;

/// Claims for the current request: the ones `auth_middleware` injected, or
/// failing that, whatever the session cookie / Bearer header carries.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }

    let token = cookies::extract_token(&parts.headers)?;
    jwt::validate_token(&token).ok()
}

/// Extract and validate the caller's identity from the current request.
pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// Load the signed-in user. A token for a deleted user clears the cookie.
pub(crate) async fn fetch_auth_user(user_id: i64) -> Result<Option<AuthUser>, ServerFnError> {
    let db = get_db().await;
    let user = crate::repo::user::find_by_id(db, user_id)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    match user {
        Some(u) => Ok(Some(AuthUser::from(u))),
        None => {
            cookies::schedule_clear_cookie();
            tracing::warn!(user_id, "Session token references a missing user, clearing cookie");
            Ok(None)
        }
    }
}
