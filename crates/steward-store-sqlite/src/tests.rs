//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use steward_core::{
  agreement::{Agreement, AgreementPatch, AgreementStatus, NewAgreement},
  lifecycle,
  store::AgreementStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn hvac_agreement(property: &str) -> NewAgreement {
  NewAgreement {
    property:         property.into(),
    service_type:     "HVAC Maintenance".into(),
    vendor:           "Acme Mechanical".into(),
    start_date:       date("2023-02-01"),
    end_date:         date("2024-02-01"),
    price:            1200.0,
    increase_percent: 3.5,
    status:           AgreementStatus::Active,
  }
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_properties() {
  let s = store().await;

  let main = s.add_property("Main St".into()).await.unwrap();
  assert_eq!(main.name, "Main St");

  s.add_property("Oak Ave".into()).await.unwrap();

  let all = s.list_properties().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].name, "Main St");
  assert_eq!(all[1].name, "Oak Ave");
}

#[tokio::test]
async fn duplicate_property_errors_and_leaves_one_row() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();

  let err = s.add_property("Main St".into()).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::DuplicateProperty(ref name))
      if name == "Main St"
  ));

  let all = s.list_properties().await.unwrap();
  assert_eq!(all.len(), 1);
}

// ─── Emails ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_emails() {
  let s = store().await;

  s.add_email("ops@example.com".into()).await.unwrap();
  s.add_email("pm@example.com".into()).await.unwrap();

  let all = s.list_emails().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].address, "ops@example.com");
}

#[tokio::test]
async fn duplicate_email_errors() {
  let s = store().await;
  s.add_email("ops@example.com".into()).await.unwrap();

  let err = s.add_email("ops@example.com".into()).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::DuplicateEmail(_))
  ));
}

// ─── Agreements ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_agreement() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();

  let added = s.add_agreement(hvac_agreement("Main St")).await.unwrap();
  assert_eq!(added.property, "Main St");
  assert_eq!(added.status, AgreementStatus::Active);

  let fetched = s.get_agreement(added.id).await.unwrap().unwrap();
  assert_eq!(fetched, added);
}

#[tokio::test]
async fn get_agreement_missing_returns_none() {
  let s = store().await;
  assert!(s.get_agreement(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_agreements_filtered_by_status() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();

  s.add_agreement(hvac_agreement("Main St")).await.unwrap();

  let mut completed = hvac_agreement("Main St");
  completed.service_type = "Landscaping".into();
  completed.status = AgreementStatus::Completed;
  s.add_agreement(completed).await.unwrap();

  let all = s.list_agreements(None).await.unwrap();
  assert_eq!(all.len(), 2);

  let active = s
    .list_agreements(Some(AgreementStatus::Active))
    .await
    .unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].service_type, "HVAC Maintenance");
}

#[tokio::test]
async fn add_agreement_unknown_property_errors() {
  let s = store().await;

  let err = s.add_agreement(hvac_agreement("Nowhere Ln")).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::UnknownProperty(ref name))
      if name == "Nowhere Ln"
  ));
}

#[tokio::test]
async fn add_agreement_negative_price_errors() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();

  let mut input = hvac_agreement("Main St");
  input.price = -1.0;

  let err = s.add_agreement(input).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::NegativePrice(_))
  ));
}

// ─── Updates ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_agreement_missing_errors() {
  let s = store().await;

  let err = s
    .update_agreement(42, AgreementPatch::status_only(AgreementStatus::Archived))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::AgreementNotFound(42))
  ));
}

#[tokio::test]
async fn update_agreement_touches_only_patched_fields() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();
  let added = s.add_agreement(hvac_agreement("Main St")).await.unwrap();

  let patch = AgreementPatch {
    vendor: Some("Borealis HVAC".into()),
    price: Some(1500.0),
    ..AgreementPatch::default()
  };
  let updated = s.update_agreement(added.id, patch).await.unwrap();

  assert_eq!(updated.vendor, "Borealis HVAC");
  assert_eq!(updated.price, 1500.0);
  assert_eq!(updated.service_type, added.service_type);
  assert_eq!(updated.start_date, added.start_date);
  assert_eq!(updated.end_date, added.end_date);
  assert_eq!(updated.status, added.status);

  // Persisted, not just returned.
  let fetched = s.get_agreement(added.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_agreement_unknown_property_errors() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();
  let added = s.add_agreement(hvac_agreement("Main St")).await.unwrap();

  let patch = AgreementPatch {
    property: Some("Nowhere Ln".into()),
    ..AgreementPatch::default()
  };
  let err = s.update_agreement(added.id, patch).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::UnknownProperty(_))
  ));
}

#[tokio::test]
async fn update_agreement_negative_increase_errors() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();
  let added = s.add_agreement(hvac_agreement("Main St")).await.unwrap();

  let patch = AgreementPatch {
    increase_percent: Some(-0.5),
    ..AgreementPatch::default()
  };
  let err = s.update_agreement(added.id, patch).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(steward_core::Error::NegativeIncrease(_))
  ));
}

// ─── Archiving ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn archive_round_trip_changes_only_status() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();
  let added = s.add_agreement(hvac_agreement("Main St")).await.unwrap();

  lifecycle::archive(&s, added.id).await.unwrap();

  let fetched = s.get_agreement(added.id).await.unwrap().unwrap();
  assert_eq!(fetched.status, AgreementStatus::Archived);
  assert_eq!(
    Agreement { status: added.status, ..fetched.clone() },
    added,
    "all fields except status must survive the round trip"
  );
}

#[tokio::test]
async fn archive_twice_is_idempotent() {
  let s = store().await;
  s.add_property("Main St".into()).await.unwrap();
  let added = s.add_agreement(hvac_agreement("Main St")).await.unwrap();

  let first = lifecycle::archive(&s, added.id).await.unwrap();
  assert_eq!(first.status, AgreementStatus::Archived);

  // Second archive succeeds silently and leaves the status unchanged.
  let second = lifecycle::archive(&s, added.id).await.unwrap();
  assert_eq!(second.status, AgreementStatus::Archived);

  let fetched = s.get_agreement(added.id).await.unwrap().unwrap();
  assert_eq!(fetched.status, AgreementStatus::Archived);
}
