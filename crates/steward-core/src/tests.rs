//! Tests for the lifecycle, dispatcher and reporting computations.

use std::sync::Mutex;

use chrono::NaiveDate;

use crate::{
  agreement::{Agreement, AgreementStatus},
  email::Email,
  lifecycle::{active_agreements, average_increase, upcoming_renewals},
  reminder::{DispatchWarning, Notifier, RenewalNotice, dispatch},
  report::{price_by_service, summarize},
};

fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

fn agreement(
  id: i64,
  service_type: &str,
  end_date: &str,
  status: AgreementStatus,
) -> Agreement {
  Agreement {
    id,
    property: "Main St".into(),
    service_type: service_type.into(),
    vendor: "Acme".into(),
    start_date: date("2023-01-01"),
    end_date: date(end_date),
    price: 100.0,
    increase_percent: 3.0,
    status,
  }
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[test]
fn active_agreements_drops_archived_only() {
  let set = vec![
    agreement(1, "hvac", "2024-06-01", AgreementStatus::Active),
    agreement(2, "landscaping", "2024-06-01", AgreementStatus::Completed),
    agreement(3, "pest", "2024-06-01", AgreementStatus::Archived),
  ];

  let shown = active_agreements(&set);
  assert_eq!(shown.len(), 2);
  assert!(shown.iter().all(|a| a.status != AgreementStatus::Archived));
}

#[test]
fn upcoming_renewals_window_boundaries() {
  let as_of = date("2024-01-01");
  let set = vec![
    // Inside the 30-day window.
    agreement(1, "hvac", "2024-01-15", AgreementStatus::Active),
    // Already overdue — still included, there is no lower bound.
    agreement(2, "landscaping", "2023-12-20", AgreementStatus::Active),
    // Beyond the window.
    agreement(3, "pest", "2024-03-01", AgreementStatus::Active),
    // Archived is never due, no matter the date.
    agreement(4, "roofing", "2024-01-10", AgreementStatus::Archived),
  ];

  let due = upcoming_renewals(&set, as_of, 30);
  let ids: Vec<_> = due.iter().map(|a| a.id).collect();
  assert_eq!(ids, vec![1, 2]);
}

#[test]
fn upcoming_renewals_includes_window_edge() {
  let as_of = date("2024-01-01");
  let set =
    vec![agreement(1, "hvac", "2024-01-31", AgreementStatus::Active)];

  assert_eq!(upcoming_renewals(&set, as_of, 30).len(), 1);
  assert_eq!(upcoming_renewals(&set, as_of, 29).len(), 0);
}

#[test]
fn upcoming_renewals_skips_completed() {
  let as_of = date("2024-01-01");
  let set =
    vec![agreement(1, "hvac", "2024-01-15", AgreementStatus::Completed)];
  assert!(upcoming_renewals(&set, as_of, 30).is_empty());
}

#[test]
fn average_increase_empty_is_none() {
  assert_eq!(average_increase(&[]), None);
}

#[test]
fn average_increase_is_arithmetic_mean() {
  let mut a = agreement(1, "hvac", "2024-06-01", AgreementStatus::Active);
  let mut b = agreement(2, "pest", "2024-06-01", AgreementStatus::Active);
  a.increase_percent = 2.0;
  b.increase_percent = 4.0;

  assert_eq!(average_increase(&[a, b]), Some(3.0));
}

// ─── Dispatcher ──────────────────────────────────────────────────────────────

/// Records every (recipient, notice) pair handed to the port.
#[derive(Default)]
struct RecordingNotifier {
  delivered: Mutex<Vec<(String, RenewalNotice)>>,
}

impl Notifier for RecordingNotifier {
  async fn notify(&self, recipient: &str, notice: &RenewalNotice) {
    self
      .delivered
      .lock()
      .unwrap()
      .push((recipient.to_owned(), notice.clone()));
  }
}

fn email(id: i64, address: &str) -> Email {
  Email { id, address: address.into() }
}

#[tokio::test]
async fn dispatch_is_full_cross_product() {
  let due = vec![
    agreement(1, "hvac", "2024-01-10", AgreementStatus::Active),
    agreement(2, "landscaping", "2024-01-12", AgreementStatus::Active),
    agreement(3, "pest", "2024-01-14", AgreementStatus::Active),
  ];
  let recipients = vec![email(1, "ops@example.com"), email(2, "pm@example.com")];
  let notifier = RecordingNotifier::default();

  let report = dispatch(&due, &recipients, &notifier).await;

  assert_eq!(report.sent, 6);
  assert_eq!(report.warning, None);

  let delivered = notifier.delivered.lock().unwrap();
  assert_eq!(delivered.len(), 6);
  // Every pair appears exactly once.
  for recipient in &recipients {
    for agreement in &due {
      let expected = RenewalNotice::for_agreement(agreement);
      let count = delivered
        .iter()
        .filter(|(r, n)| *r == recipient.address && *n == expected)
        .count();
      assert_eq!(count, 1);
    }
  }
}

#[tokio::test]
async fn dispatch_empty_recipients_warns() {
  let due = vec![agreement(1, "hvac", "2024-01-10", AgreementStatus::Active)];
  let notifier = RecordingNotifier::default();

  let report = dispatch(&due, &[], &notifier).await;

  assert_eq!(report.sent, 0);
  assert_eq!(report.warning, Some(DispatchWarning::NoRecipients));
  assert!(notifier.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn dispatch_empty_due_set_warns() {
  let recipients = vec![email(1, "ops@example.com")];
  let notifier = RecordingNotifier::default();

  let report = dispatch(&[], &recipients, &notifier).await;

  assert_eq!(report.sent, 0);
  assert_eq!(report.warning, Some(DispatchWarning::NoDueAgreements));
}

#[tokio::test]
async fn dispatch_both_empty_reports_no_due_agreements() {
  let notifier = RecordingNotifier::default();
  let report = dispatch(&[], &[], &notifier).await;
  assert_eq!(report.warning, Some(DispatchWarning::NoDueAgreements));
}

// ─── Reporting ───────────────────────────────────────────────────────────────

#[test]
fn summarize_counts_and_average() {
  let mut active = agreement(1, "hvac", "2024-06-01", AgreementStatus::Active);
  let mut done =
    agreement(2, "landscaping", "2024-06-01", AgreementStatus::Completed);
  let mut gone = agreement(3, "pest", "2024-06-01", AgreementStatus::Archived);
  active.increase_percent = 2.0;
  done.increase_percent = 4.0;
  gone.increase_percent = 90.0; // must not influence the average

  let summary = summarize(&[active, done, gone]);

  assert_eq!(summary.total_agreements, 2);
  assert_eq!(summary.active_agreements, 1);
  assert_eq!(summary.average_increase, Some(3.0));
}

#[test]
fn summarize_empty_reports_no_average() {
  let summary = summarize(&[]);
  assert_eq!(summary.total_agreements, 0);
  assert_eq!(summary.active_agreements, 0);
  assert_eq!(summary.average_increase, None);
}

#[test]
fn price_by_service_groups_and_excludes_archived() {
  let mut a = agreement(1, "hvac", "2024-06-01", AgreementStatus::Active);
  let mut b = agreement(2, "hvac", "2024-06-01", AgreementStatus::Active);
  let mut c = agreement(3, "hvac", "2024-06-01", AgreementStatus::Completed);
  let mut d = agreement(4, "pest", "2024-06-01", AgreementStatus::Archived);
  a.price = 100.0;
  b.price = 50.0;
  c.price = 25.0;
  d.price = 999.0;

  let breakdown = price_by_service(&[a, b, c, d]);

  assert_eq!(breakdown.len(), 2);
  assert_eq!(breakdown[0].service_type, "hvac");
  assert_eq!(breakdown[0].status, AgreementStatus::Active);
  assert_eq!(breakdown[0].total_price, 150.0);
  assert_eq!(breakdown[1].status, AgreementStatus::Completed);
  assert_eq!(breakdown[1].total_price, 25.0);
}
