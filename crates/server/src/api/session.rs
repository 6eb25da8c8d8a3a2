use dioxus::prelude::*;
use shared_types::{AuthUser, FeatureFlags};

/// Get the current feature flags. No auth required.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Sign in with username and password. The session cookie is set by the
/// auth middleware on the way out.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(username: String, password: String) -> Result<AuthUser, ServerFnError> {
    use crate::auth::{cookies, session};
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::Credentials;

    let db = get_db().await;
    let (user, token) = session::authenticate(db, &Credentials { username, password })
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_session_cookie(&token);
    tracing::info!(user_id = user.id, "User signed in");
    Ok(AuthUser::from(user))
}

/// Clear the session cookie.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    crate::auth::cookies::schedule_clear_cookie();
    Ok(())
}

/// The signed-in user, or `None` when there is no valid session.
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    match super::auth::current_claims() {
        Some(claims) => super::auth::fetch_auth_user(claims.sub).await,
        None => Ok(None),
    }
}
