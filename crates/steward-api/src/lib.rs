//! JSON REST API for steward.
//!
//! Exposes an axum [`Router`] backed by any
//! [`steward_core::store::AgreementStore`] and notification port. This is
//! the presentation boundary: a UI renders what these routes return. Auth,
//! TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", steward_api::api_router(store.clone(), notifier.clone()))
//! ```

pub mod agreements;
pub mod dashboard;
pub mod emails;
pub mod error;
pub mod properties;
pub mod reminders;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use steward_core::{reminder::Notifier, store::AgreementStore};

pub use error::ApiError;

/// Shared handler state: the store plus the notification port.
pub struct ApiState<S, N> {
  pub store:    Arc<S>,
  pub notifier: Arc<N>,
}

// Manual impl — a derive would demand `S: Clone` and `N: Clone`.
impl<S, N> Clone for ApiState<S, N> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), notifier: self.notifier.clone() }
  }
}

/// Build a fully-materialised API router for `store` and `notifier`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, N>(store: Arc<S>, notifier: Arc<N>) -> Router<()>
where
  S: AgreementStore + 'static,
  N: Notifier + 'static,
{
  Router::new()
    // Agreements
    .route(
      "/agreements",
      get(agreements::list::<S, N>).post(agreements::create::<S, N>),
    )
    .route("/agreements/renewals", get(agreements::renewals::<S, N>))
    .route(
      "/agreements/{id}",
      get(agreements::get_one::<S, N>).patch(agreements::update::<S, N>),
    )
    .route("/agreements/{id}/archive", post(agreements::archive_one::<S, N>))
    // Properties and the catch-all email list
    .route(
      "/properties",
      get(properties::list::<S, N>).post(properties::create::<S, N>),
    )
    .route("/emails", get(emails::list::<S, N>).post(emails::create::<S, N>))
    // Read-side aggregations
    .route("/dashboard", get(dashboard::summary::<S, N>))
    // Reminder dispatch
    .route("/reminders/dispatch", post(reminders::dispatch_now::<S, N>))
    .with_state(ApiState { store, notifier })
}
