//! Handler for `/dashboard` — headline metrics plus the chart grouping.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/dashboard` | Optional `?property=<name>` filter |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use steward_core::{
  reminder::Notifier,
  report::{self, DashboardSummary, PriceBreakdown},
  store::AgreementStore,
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
  /// Restrict the dashboard to one property's agreements.
  pub property: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
  pub summary:          DashboardSummary,
  pub price_by_service: Vec<PriceBreakdown>,
}

/// `GET /dashboard[?property=<name>]`
///
/// Archived agreements are excluded from every figure. `average_increase`
/// is `null` when there is nothing to average.
pub async fn summary<S, N>(
  State(state): State<ApiState<S, N>>,
  Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let mut agreements = state
    .store
    .list_agreements(None)
    .await
    .map_err(ApiError::from_store)?;

  if let Some(property) = &params.property {
    agreements.retain(|a| a.property == *property);
  }

  Ok(Json(DashboardResponse {
    summary:          report::summarize(&agreements),
    price_by_service: report::price_by_service(&agreements),
  }))
}
