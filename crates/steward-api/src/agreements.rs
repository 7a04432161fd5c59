//! Handlers for `/agreements` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/agreements` | Optional `?status=Active\|Completed\|Archived` |
//! | `POST`  | `/agreements` | Body: [`NewAgreement`]; returns 201 + stored agreement |
//! | `GET`   | `/agreements/:id` | 404 if not found |
//! | `PATCH` | `/agreements/:id` | Body: [`AgreementPatch`] (typed partial update) |
//! | `POST`  | `/agreements/:id/archive` | Idempotent status transition |
//! | `GET`   | `/agreements/renewals` | Optional `as_of` (default today), `window_days` (default 30) |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use steward_core::{
  agreement::{Agreement, AgreementPatch, AgreementStatus, NewAgreement},
  lifecycle,
  reminder::Notifier,
  store::AgreementStore,
};

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<AgreementStatus>,
}

/// `GET /agreements[?status=<status>]`
pub async fn list<S, N>(
  State(state): State<ApiState<S, N>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Agreement>>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let agreements = state
    .store
    .list_agreements(params.status)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(agreements))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /agreements` — body: [`NewAgreement`]
pub async fn create<S, N>(
  State(state): State<ApiState<S, N>>,
  Json(body): Json<NewAgreement>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let agreement = state
    .store
    .add_agreement(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(agreement)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /agreements/:id`
pub async fn get_one<S, N>(
  State(state): State<ApiState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Json<Agreement>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let agreement = state
    .store
    .get_agreement(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("agreement {id} not found")))?;
  Ok(Json(agreement))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /agreements/:id` — body: [`AgreementPatch`]
pub async fn update<S, N>(
  State(state): State<ApiState<S, N>>,
  Path(id): Path<i64>,
  Json(patch): Json<AgreementPatch>,
) -> Result<Json<Agreement>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let agreement = state
    .store
    .update_agreement(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(agreement))
}

// ─── Archive ──────────────────────────────────────────────────────────────────

/// `POST /agreements/:id/archive` — archiving twice succeeds silently.
pub async fn archive_one<S, N>(
  State(state): State<ApiState<S, N>>,
  Path(id): Path<i64>,
) -> Result<Json<Agreement>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let agreement = lifecycle::archive(state.store.as_ref(), id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(agreement))
}

// ─── Renewals ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenewalParams {
  /// Reference date for the window. Defaults to today (UTC).
  pub as_of:       Option<NaiveDate>,
  pub window_days: Option<u32>,
}

/// `GET /agreements/renewals[?as_of=YYYY-MM-DD][&window_days=30]`
///
/// Active agreements ending on or before `as_of + window_days`, overdue
/// ones included.
pub async fn renewals<S, N>(
  State(state): State<ApiState<S, N>>,
  Query(params): Query<RenewalParams>,
) -> Result<Json<Vec<Agreement>>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let agreements = state
    .store
    .list_agreements(Some(AgreementStatus::Active))
    .await
    .map_err(ApiError::from_store)?;

  let as_of = params.as_of.unwrap_or_else(|| Utc::now().date_naive());
  let window = params
    .window_days
    .unwrap_or(lifecycle::DEFAULT_RENEWAL_WINDOW_DAYS);

  Ok(Json(lifecycle::upcoming_renewals(&agreements, as_of, window)))
}
