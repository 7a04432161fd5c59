//! The `AgreementStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `steward-store-sqlite`).
//! Higher layers (`steward-api`, `steward-server`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  agreement::{Agreement, AgreementPatch, AgreementStatus, NewAgreement},
  email::Email,
  property::Property,
};

/// Abstraction over an agreement store backend.
///
/// Every write is immediately durable — single statements, no batching and
/// no transactions spanning calls. Reads are snapshots with no isolation
/// guarantee against a concurrent writer; the system assumes one operator
/// at a time, and concurrent updates would race last-write-wins. That is an
/// accepted limitation, not something backends are expected to fix.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AgreementStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Agreements ────────────────────────────────────────────────────────

  /// List agreements, optionally restricted to one status.
  fn list_agreements(
    &self,
    status: Option<AgreementStatus>,
  ) -> impl Future<Output = Result<Vec<Agreement>, Self::Error>> + Send + '_;

  /// Retrieve one agreement by id. Returns `None` if not found.
  fn get_agreement(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Agreement>, Self::Error>> + Send + '_;

  /// Persist a new agreement and return it with its assigned id.
  ///
  /// Fails if a money field is negative or if `input.property` names no
  /// existing [`Property`].
  fn add_agreement(
    &self,
    input: NewAgreement,
  ) -> impl Future<Output = Result<Agreement, Self::Error>> + Send + '_;

  /// Apply a typed partial update and return the updated agreement.
  ///
  /// Fails with the backend's not-found error if `id` is absent, and with
  /// the same validation errors as [`AgreementStore::add_agreement`] for
  /// the fields the patch touches.
  fn update_agreement(
    &self,
    id: i64,
    patch: AgreementPatch,
  ) -> impl Future<Output = Result<Agreement, Self::Error>> + Send + '_;

  // ── Properties ────────────────────────────────────────────────────────

  fn list_properties(
    &self,
  ) -> impl Future<Output = Result<Vec<Property>, Self::Error>> + Send + '_;

  /// Add a property. Fails with a duplicate-key error if `name` exists.
  fn add_property(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Property, Self::Error>> + Send + '_;

  // ── Emails ────────────────────────────────────────────────────────────

  fn list_emails(
    &self,
  ) -> impl Future<Output = Result<Vec<Email>, Self::Error>> + Send + '_;

  /// Add a reminder recipient. Fails with a duplicate-key error if
  /// `address` exists.
  fn add_email(
    &self,
    address: String,
  ) -> impl Future<Output = Result<Email, Self::Error>> + Send + '_;
}
