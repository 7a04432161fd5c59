//! Handlers for `/properties` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/properties` | All properties |
//! | `POST` | `/properties` | Body: `{"name":"Main St"}`; 409 on duplicate |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use steward_core::{
  property::Property, reminder::Notifier, store::AgreementStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /properties`
pub async fn list<S, N>(
  State(state): State<ApiState<S, N>>,
) -> Result<Json<Vec<Property>>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let properties = state
    .store
    .list_properties()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(properties))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /properties` — body: `{"name":"Main St"}`
pub async fn create<S, N>(
  State(state): State<ApiState<S, N>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let property = state
    .store
    .add_property(body.name)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(property)))
}
