//! Handlers for `/emails` endpoints — the catch-all reminder list.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/emails` | All recipients |
//! | `POST` | `/emails` | Body: `{"address":"ops@example.com"}`; 409 on duplicate |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use steward_core::{email::Email, reminder::Notifier, store::AgreementStore};

use crate::{ApiState, error::ApiError};

/// `GET /emails`
pub async fn list<S, N>(
  State(state): State<ApiState<S, N>>,
) -> Result<Json<Vec<Email>>, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let emails = state.store.list_emails().await.map_err(ApiError::from_store)?;
  Ok(Json(emails))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub address: String,
}

/// `POST /emails` — body: `{"address":"ops@example.com"}`
pub async fn create<S, N>(
  State(state): State<ApiState<S, N>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AgreementStore,
  N: Notifier,
{
  let email = state
    .store
    .add_email(body.address)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(email)))
}
