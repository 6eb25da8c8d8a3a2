use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot};
use super::jwt::validate_token;

/// Permissive auth middleware.
///
/// On each request it validates the session token (cookie or Bearer
/// header) and inserts the `Claims`, then inserts a `CookieSlot` so server
/// functions can set or clear the session cookie. Unauthenticated requests
/// pass through; handlers decide with `AuthRequired`.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    if let Some(token) = cookies::extract_token(req.headers()) {
        match validate_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid session token"),
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;
    cookie_slot.apply(response.headers_mut());
    response
}
