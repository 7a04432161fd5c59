//! Status-aware queries and renewal-window computation.
//!
//! These are pure functions over agreement slices, plus [`archive`], which
//! is the one lifecycle transition that writes through the store.

use chrono::{Days, NaiveDate};

use crate::{
  agreement::{Agreement, AgreementPatch, AgreementStatus},
  store::AgreementStore,
};

/// Lookahead used to flag agreements needing attention.
pub const DEFAULT_RENEWAL_WINDOW_DAYS: u32 = 30;

/// Everything that is not archived. Completed agreements still count — they
/// stay on the dashboard until someone archives them.
pub fn active_agreements(agreements: &[Agreement]) -> Vec<Agreement> {
  agreements
    .iter()
    .filter(|a| a.status != AgreementStatus::Archived)
    .cloned()
    .collect()
}

/// Active agreements whose `end_date` falls on or before
/// `as_of + window_days`.
///
/// There is deliberately no lower bound: an agreement already past its
/// `end_date` is still returned, so overdue and upcoming renewals surface
/// in one view.
pub fn upcoming_renewals(
  agreements: &[Agreement],
  as_of: NaiveDate,
  window_days: u32,
) -> Vec<Agreement> {
  let horizon = as_of
    .checked_add_days(Days::new(u64::from(window_days)))
    .unwrap_or(NaiveDate::MAX);

  agreements
    .iter()
    .filter(|a| a.status == AgreementStatus::Active && a.end_date <= horizon)
    .cloned()
    .collect()
}

/// Transition an agreement to [`AgreementStatus::Archived`].
///
/// Idempotent: archiving an already-archived agreement succeeds silently
/// and leaves it archived.
pub async fn archive<S: AgreementStore>(
  store: &S,
  id: i64,
) -> Result<Agreement, S::Error> {
  store
    .update_agreement(id, AgreementPatch::status_only(AgreementStatus::Archived))
    .await
}

/// Arithmetic mean of `increase_percent` over the given set.
///
/// `None` for the empty set — callers render it as "N/A". Never a
/// division-by-zero fault.
pub fn average_increase(agreements: &[Agreement]) -> Option<f64> {
  if agreements.is_empty() {
    return None;
  }
  let sum: f64 = agreements.iter().map(|a| a.increase_percent).sum();
  Some(sum / agreements.len() as f64)
}
