//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a store error by walking its source chain for a domain error.
  ///
  /// Keeps the router generic over the backend's error type: any error that
  /// wraps (or is) [`steward_core::Error`] maps to the right status code,
  /// anything else is a 500.
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&e);
    while let Some(err) = current {
      if let Some(domain) = err.downcast_ref::<steward_core::Error>() {
        return Self::from_domain(domain);
      }
      current = err.source();
    }
    Self::Store(Box::new(e))
  }

  fn from_domain(e: &steward_core::Error) -> Self {
    use steward_core::Error as Domain;
    match e {
      Domain::AgreementNotFound(_) => Self::NotFound(e.to_string()),
      Domain::DuplicateProperty(_) | Domain::DuplicateEmail(_) => {
        Self::Conflict(e.to_string())
      }
      Domain::UnknownProperty(_)
      | Domain::NegativePrice(_)
      | Domain::NegativeIncrease(_)
      | Domain::UnknownStatus(_) => Self::Unprocessable(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, m.clone())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
