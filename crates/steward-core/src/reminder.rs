//! The reminder dispatcher and its notification port.
//!
//! Dispatch is a full cross product: every recipient on the catch-all list
//! is told about every due agreement. No deduplication, no suppression of
//! already-notified pairs, no rate limiting, no delivery confirmation and
//! no retry — each notification is handed to the port exactly once.

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{agreement::Agreement, email::Email};

// ─── Notification port ───────────────────────────────────────────────────────

/// The context handed to the notification port for one reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewalNotice {
  pub service_type: String,
  pub end_date:     NaiveDate,
}

impl RenewalNotice {
  pub fn for_agreement(agreement: &Agreement) -> Self {
    Self {
      service_type: agreement.service_type.clone(),
      end_date:     agreement.end_date,
    }
  }
}

/// The outbound notification port.
///
/// Fire-and-forget: the dispatcher consumes no return value. Production
/// deployments plug in a mail-sending integration here; the stub
/// implementation in `steward-server` only logs.
pub trait Notifier: Send + Sync {
  fn notify(
    &self,
    recipient: &str,
    notice: &RenewalNotice,
  ) -> impl Future<Output = ()> + Send;
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Why a dispatch run sent nothing. A warning condition, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchWarning {
  /// Nothing is due inside the renewal window.
  NoDueAgreements,
  /// The catch-all email list is empty.
  NoRecipients,
}

/// Outcome of one dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
  /// Notifications handed to the port.
  pub sent:    usize,
  pub warning: Option<DispatchWarning>,
}

/// Hand one notification per (recipient, agreement) pair to `notifier`.
///
/// `due` with N agreements and M recipients produces exactly N×M
/// notifications. Pair ordering is unspecified. An empty due set is checked
/// before an empty recipient list, so when both are empty the report says
/// [`DispatchWarning::NoDueAgreements`].
pub async fn dispatch<N: Notifier>(
  due: &[Agreement],
  recipients: &[Email],
  notifier: &N,
) -> DispatchReport {
  if due.is_empty() {
    tracing::warn!("no due agreements, nothing to dispatch");
    return DispatchReport { sent: 0, warning: Some(DispatchWarning::NoDueAgreements) };
  }
  if recipients.is_empty() {
    tracing::warn!("catch-all email list is empty, nothing to dispatch");
    return DispatchReport { sent: 0, warning: Some(DispatchWarning::NoRecipients) };
  }

  let mut sent = 0;
  for recipient in recipients {
    for agreement in due {
      let notice = RenewalNotice::for_agreement(agreement);
      notifier.notify(&recipient.address, &notice).await;
      sent += 1;
    }
  }

  tracing::info!(sent, "dispatched renewal reminders");
  DispatchReport { sent, warning: None }
}
