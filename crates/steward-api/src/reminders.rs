//! Handler for `/reminders/dispatch` — run one reminder cycle on demand.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/reminders/dispatch` | Optional `as_of`, `window_days`; 200 with a [`DispatchReport`] |

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use steward_core::{
  agreement::AgreementStatus,
  lifecycle,
  reminder::{self, DispatchReport, Notifier},
  store::AgreementStore,
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DispatchParams {
  /// Reference date for the renewal window. Defaults to today (UTC).
  pub as_of:       Option<NaiveDate>,
  pub window_days: Option<u32>,
}

/// `POST /reminders/dispatch[?as_of=YYYY-MM-DD][&window_days=30]`
///
/// Computes the due set, loads the catch-all list, and hands every
/// (recipient, agreement) pair to the notification port. Empty due set or
/// empty recipient list is a warning inside a 200 response, not an error.
pub async fn dispatch_now<S, N>(
  State(state): State<ApiState<S, N>>,
  Query(params): Query<DispatchParams>,
) -> Result<Json<DispatchReport>, ApiError>
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
  let due = lifecycle::upcoming_renewals(&agreements, as_of, window);

  let recipients =
    state.store.list_emails().await.map_err(ApiError::from_store)?;

  let report =
    reminder::dispatch(&due, &recipients, state.notifier.as_ref()).await;
  Ok(Json(report))
}
