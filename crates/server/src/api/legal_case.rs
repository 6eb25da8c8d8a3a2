use dioxus::prelude::*;
use shared_types::{CreateLegalCaseRequest, LegalCase, LegalCaseState, UpdateLegalCaseRequest};

// ── Legal Case Server Functions ────────────────────────

#[server]
pub async fn list_legal_cases(client: Option<i64>) -> Result<Vec<LegalCase>, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    super::auth::require_auth()?;
    crate::repo::legal_case::list(get_db().await, client)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[server]
pub async fn get_legal_case(id: i64) -> Result<LegalCase, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    crate::repo::legal_case::find_by_id(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| {
            AppError::missing(RecordKind::LegalCase, id).into_server_fn_error()
        })
}

/// Open a case for a client. The case number is assigned from the first
/// office's code.
#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn create_legal_case(body: CreateLegalCaseRequest) -> Result<LegalCase, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;

    let claims = super::auth::require_auth()?;
    let case = crate::repo::legal_case::create(get_db().await, claims.sub, body)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    tracing::info!(case_id = case.id, case_number = %case.case_number, "Legal case opened");
    Ok(case)
}

#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn update_legal_case(
    id: i64,
    body: UpdateLegalCaseRequest,
) -> Result<LegalCase, ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    let claims = super::auth::require_auth()?;
    crate::repo::legal_case::update(get_db().await, claims.sub, id, body)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| {
            AppError::missing(RecordKind::LegalCase, id).into_server_fn_error()
        })
}

/// Move a case to another workflow state.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn set_legal_case_state(
    id: i64,
    state: LegalCaseState,
) -> Result<LegalCase, ServerFnError> {
    update_legal_case(id, UpdateLegalCaseRequest::state(state)).await
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_legal_case(id: i64) -> Result<(), ServerFnError> {
    use crate::db::get_db;
    use crate::error_convert::AppErrorExt;
    use shared_types::{AppError, RecordKind};

    super::auth::require_auth()?;
    let deleted = crate::repo::legal_case::delete(get_db().await, id)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    if !deleted {
        return Err(
            AppError::missing(RecordKind::LegalCase, id).into_server_fn_error()
        );
    }
    Ok(())
}
