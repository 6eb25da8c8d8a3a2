use std::collections::HashMap;

use shared_types::{
    is_valid_identifier_type, AppError, Client, ClientRow, CreateClientRequest,
    UpdateClientRequest,
};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"c.id, c.name, c.preferred_name, c.official_identifier,
    c.official_identifier_type, c.contact_number, c.contact_email, c.created_at, c.updated_at"#;

fn check_identifier_type(value: &str) -> Result<(), AppError> {
    if is_valid_identifier_type(value) {
        Ok(())
    } else {
        Err(AppError::field(
            "official_identifier_type",
            "Identifier type must be national_id, passport or other",
        ))
    }
}

/// Case ids per client, ordered by id.
async fn case_ids_by_client(
    pool: &Pool<Postgres>,
    client_ids: &[i64],
) -> Result<HashMap<i64, Vec<i64>>, AppError> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT client_id, id FROM legal_cases WHERE client_id = ANY($1) ORDER BY id",
    )
    .bind(client_ids)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
    for (client_id, case_id) in rows {
        map.entry(client_id).or_default().push(case_id);
    }
    Ok(map)
}

async fn attach_cases(pool: &Pool<Postgres>, rows: Vec<ClientRow>) -> Result<Vec<Client>, AppError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut cases = case_ids_by_client(pool, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let legal_cases = cases.remove(&row.id).unwrap_or_default();
            Client::from_row(row, legal_cases)
        })
        .collect())
}

/// List clients by name. With `case_office`, only clients having at least
/// one legal case handled by that office.
pub async fn list(
    pool: &Pool<Postgres>,
    case_office: Option<i64>,
) -> Result<Vec<Client>, AppError> {
    let rows = sqlx::query_as::<_, ClientRow>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM clients c
        WHERE $1::BIGINT IS NULL OR EXISTS (
            SELECT 1
            FROM legal_cases lc
            JOIN legal_case_case_offices lco ON lco.legal_case_id = lc.id
            WHERE lc.client_id = c.id AND lco.case_office_id = $1
        )
        ORDER BY c.name ASC, c.id ASC
        "#
    ))
    .bind(case_office)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    attach_cases(pool, rows).await
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<Client>, AppError> {
    let row = sqlx::query_as::<_, ClientRow>(&format!(
        "SELECT {COLUMNS} FROM clients c WHERE c.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    match row {
        Some(row) => Ok(attach_cases(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn create(pool: &Pool<Postgres>, req: CreateClientRequest) -> Result<Client, AppError> {
    check_identifier_type(&req.official_identifier_type)?;

    let row = sqlx::query_as::<_, ClientRow>(
        r#"
        INSERT INTO clients AS c
            (name, preferred_name, official_identifier, official_identifier_type,
             contact_number, contact_email)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING c.id, c.name, c.preferred_name, c.official_identifier,
                  c.official_identifier_type, c.contact_number, c.contact_email,
                  c.created_at, c.updated_at
        "#,
    )
    .bind(req.name.trim())
    .bind(req.preferred_name.trim())
    .bind(&req.official_identifier)
    .bind(&req.official_identifier_type)
    .bind(&req.contact_number)
    .bind(&req.contact_email)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(Client::from_row(row, Vec::new()))
}

pub async fn update(
    pool: &Pool<Postgres>,
    id: i64,
    req: UpdateClientRequest,
) -> Result<Option<Client>, AppError> {
    if let Some(kind) = req.official_identifier_type.as_deref() {
        check_identifier_type(kind)?;
    }

    let row = sqlx::query_as::<_, ClientRow>(
        r#"
        UPDATE clients AS c SET
            name                     = COALESCE($2, c.name),
            preferred_name           = COALESCE($3, c.preferred_name),
            official_identifier      = COALESCE($4, c.official_identifier),
            official_identifier_type = COALESCE($5, c.official_identifier_type),
            contact_number           = COALESCE($6, c.contact_number),
            contact_email            = COALESCE($7, c.contact_email),
            updated_at               = NOW()
        WHERE c.id = $1
        RETURNING c.id, c.name, c.preferred_name, c.official_identifier,
                  c.official_identifier_type, c.contact_number, c.contact_email,
                  c.created_at, c.updated_at
        "#,
    )
    .bind(id)
    .bind(req.name.as_deref())
    .bind(req.preferred_name.as_deref())
    .bind(req.official_identifier.as_deref())
    .bind(req.official_identifier_type.as_deref())
    .bind(req.contact_number.as_deref())
    .bind(req.contact_email.as_deref())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    match row {
        Some(row) => Ok(attach_cases(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Delete a client and, by cascade, their legal cases.
pub async fn delete(pool: &Pool<Postgres>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
