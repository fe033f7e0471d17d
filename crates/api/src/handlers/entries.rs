//! Handlers for the `/entries` resource.
//!
//! Every handler validates its input with the `cinelog-core` rules before
//! touching the service, so malformed requests never reach the store.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use cinelog_core::entry::{EntryPatch, NewEntry};
use cinelog_core::validation;

use crate::error::{codes, AppError, AppResult};
use crate::query::{ListEntriesParams, SearchEntriesParams};
use crate::response::{CountResponse, Envelope, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /entries?cursor=&limit=
///
/// One page of entries, newest first, with continuation metadata.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListEntriesParams>,
) -> AppResult<impl IntoResponse> {
    let limit = parse_limit(params.limit.as_deref())?;
    let cursor = checked_cursor(params.cursor.as_deref())?;

    let page = state.service.list_entries(cursor, limit).await?;
    Ok(Json(Envelope::new(page)))
}

/// GET /entries/search?q=&cursor=&limit=
///
/// Same pagination contract as `list`, restricted to titles containing `q`.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchEntriesParams>,
) -> AppResult<impl IntoResponse> {
    let term = match params.q.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => term,
        _ => {
            return Err(AppError::validation_bare(
                codes::INVALID_QUERY_PARAMS,
                "Search term is required",
            ))
        }
    };
    let limit = parse_limit(params.limit.as_deref())?;
    let cursor = checked_cursor(params.cursor.as_deref())?;

    let page = state.service.search_entries(term, cursor, limit).await?;
    Ok(Json(Envelope::new(page)))
}

/// GET /entries/count
pub async fn count(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = state.service.count_entries().await?;
    Ok(Json(Envelope::new(CountResponse { count })))
}

/// POST /entries
///
/// Create a new entry. Returns 201 with the created record.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|_| {
        AppError::validation_bare(codes::INVALID_ENTRY_DATA, "Invalid entry data")
    })?;
    let input: NewEntry = serde_json::from_value(body).map_err(|_| {
        AppError::validation_bare(codes::INVALID_ENTRY_DATA, "Invalid entry data")
    })?;
    validation::validate_new_entry(&input)
        .map_err(|errors| AppError::validation(codes::INVALID_ENTRY_DATA, "Invalid entry data", &errors))?;

    let entry = state.service.create_entry(&input).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(entry))))
}

/// PUT /entries/{id}
///
/// Apply a partial update to an existing entry.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    checked_id(&id)?;

    let Json(body) = body.map_err(|_| {
        AppError::validation_bare(codes::INVALID_UPDATE_DATA, "Invalid update data")
    })?;
    let patch: EntryPatch = serde_json::from_value(body).map_err(|_| {
        AppError::validation_bare(codes::INVALID_UPDATE_DATA, "Invalid update data")
    })?;
    validation::validate_entry_patch(&patch).map_err(|errors| {
        AppError::validation(codes::INVALID_UPDATE_DATA, "Invalid update data", &errors)
    })?;

    let entry = state.service.update_entry(&id, &patch).await?;
    Ok(Json(Envelope::new(entry)))
}

/// DELETE /entries/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    checked_id(&id)?;

    state.service.delete_entry(&id).await?;
    Ok(Json(Envelope::new(MessageResponse {
        message: "Entry deleted successfully",
    })))
}

// ---------------------------------------------------------------------------
// Parameter checks
// ---------------------------------------------------------------------------

/// Parse the `limit` query value. Absent is fine (the service defaults);
/// a value that is not an integer at all is a 400. Range handling is the
/// service's clamp.
fn parse_limit(limit: Option<&str>) -> Result<Option<i64>, AppError> {
    match limit {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            AppError::validation_bare(codes::INVALID_QUERY_PARAMS, "Invalid query parameters")
        }),
    }
}

/// Check the cursor token shape before it reaches the store.
fn checked_cursor(cursor: Option<&str>) -> Result<Option<&str>, AppError> {
    match cursor {
        None => Ok(None),
        Some(cursor) => match validation::validate_cursor(cursor) {
            Ok(()) => Ok(Some(cursor)),
            Err(error) => Err(AppError::validation(
                codes::INVALID_QUERY_PARAMS,
                "Invalid query parameters",
                &[error],
            )),
        },
    }
}

/// Check a path id token.
fn checked_id(id: &str) -> Result<(), AppError> {
    validation::validate_entry_id(id)
        .map_err(|error| AppError::validation(codes::INVALID_ENTRY_ID, "Invalid entry ID", &[error]))
}
